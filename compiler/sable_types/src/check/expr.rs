//! Expression inference.

use sable_ir::{ExprId, ExprKind};

use crate::assign::{self, ContextError};
use crate::{
    classify, Assigned, Binding, Checker, Idx, MismatchContext, Position, TypeCheckError,
    TypeErrorKind,
};

impl Checker<'_> {
    /// Infer the type of `expr` appearing at `position`.
    ///
    /// Overloaded references stay [`Assigned::Deferred`]; callers with a
    /// contextual type resolve them, callers without one report them.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn infer(&mut self, expr: ExprId, position: Position) -> Assigned {
        let arena = self.arena;
        let assigned = match arena.kind(expr) {
            ExprKind::Int(_) => Assigned::Resolved(Idx::INT),
            ExprKind::Float(_) => Assigned::Resolved(Idx::DOUBLE),
            ExprKind::Bool(_) => Assigned::Resolved(Idx::BOOL),
            ExprKind::Error => Assigned::Resolved(Idx::ERROR),
            ExprKind::Paren(inner) => self.infer(*inner, position),
            ExprKind::Try(inner) => {
                self.try_depth += 1;
                let assigned = self.infer(*inner, position);
                self.try_depth -= 1;
                assigned
            }
            ExprKind::Ident(_) | ExprKind::Member { .. } | ExprKind::Compound { .. } => {
                self.infer_reference(expr, position)
            }
            ExprKind::Call { callee, args } => self.check_call(expr, *callee, args, position),
            ExprKind::Subscript { base, args } => {
                Assigned::Resolved(self.check_subscript_get(expr, *base, args))
            }
        };
        if let Assigned::Resolved(ty) = assigned {
            self.record(expr, ty);
        }
        assigned
    }

    /// Infer a value with no contextual type.
    ///
    /// An overload set that is still deferred here is ambiguous.
    pub fn infer_value(&mut self, expr: ExprId) -> Idx {
        match self.infer(expr, Position::Value) {
            Assigned::Resolved(ty) => ty,
            Assigned::Deferred(set) => {
                let span = self.arena.span(expr);
                self.push_error(
                    span,
                    TypeErrorKind::AmbiguousReference {
                        name: set.name,
                        candidates: set.types(),
                    },
                );
                Idx::ERROR
            }
        }
    }

    /// Check `expr` against a contextual type.
    ///
    /// Returns the expression's resolved type, or the error type after
    /// reporting a mismatch.
    pub fn check_against(&mut self, expr: ExprId, expected: Idx, context: MismatchContext) -> Idx {
        let assigned = self.infer(expr, Position::Value);
        self.resolve_against(expr, assigned, expected, context)
    }

    /// Resolve an already inferred assignment against a contextual type.
    pub(crate) fn resolve_against(
        &mut self,
        expr: ExprId,
        assigned: Assigned,
        expected: Idx,
        context: MismatchContext,
    ) -> Idx {
        let span = self.arena.span(expr);
        match assign::resolve_contextual(self.pool, assigned, expected) {
            Ok(ty) => {
                self.record(expr, ty);
                ty
            }
            Err(ContextError::Mismatch { found }) => {
                self.report(TypeCheckError::mismatch(span, found, expected, context));
                Idx::ERROR
            }
            Err(ContextError::NoArm(set)) => {
                self.push_error(
                    span,
                    TypeErrorKind::OverloadMismatch {
                        name: set.name,
                        expected,
                        candidates: set.types(),
                    },
                );
                Idx::ERROR
            }
            Err(ContextError::Ambiguous(set)) => {
                self.push_error(
                    span,
                    TypeErrorKind::AmbiguousReference {
                        name: set.name,
                        candidates: set.types(),
                    },
                );
                Idx::ERROR
            }
        }
    }

    fn infer_reference(&mut self, expr: ExprId, position: Position) -> Assigned {
        let class = classify(self.arena, expr, position);
        let span = self.arena.span(expr);
        match self.bind_reference(expr) {
            Err(err) => {
                self.report(err.into());
                Assigned::Resolved(Idx::ERROR)
            }
            Ok(Binding::Poisoned) => Assigned::Resolved(Idx::ERROR),
            Ok(Binding::Value(ty)) => Assigned::Resolved(ty),
            Ok(Binding::Type { name, .. }) => {
                self.push_error(
                    span,
                    TypeErrorKind::NotAValue {
                        name,
                        is_module: false,
                    },
                );
                Assigned::Resolved(Idx::ERROR)
            }
            Ok(Binding::Module(name)) => {
                self.push_error(
                    span,
                    TypeErrorKind::NotAValue {
                        name,
                        is_module: true,
                    },
                );
                Assigned::Resolved(Idx::ERROR)
            }
            Ok(Binding::Decls {
                name,
                base,
                candidates,
            }) => assign::assign(
                self.pool,
                self.table,
                name,
                &candidates,
                base,
                class,
                &self.config,
            ),
        }
    }
}
