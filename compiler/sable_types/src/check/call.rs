//! Direct calls and subscripts.
//!
//! A direct call keeps the callee's labels, so the arguments must carry
//! exactly the declared label sequence. Overloads are selected by labels
//! first, then by argument types. When several arms still fit, the call's
//! result stays deferred if every arm takes the same parameter types.

use sable_ir::{CallArg, ExprId, ExprKind, Name, Span};
use smallvec::SmallVec;

use crate::assign::{self, Arm, OverloadSet};
use crate::{
    classify, Assigned, BindBase, Binding, Checker, DeclId, FunctionSig, Idx, MismatchContext,
    Position, TypeErrorKind,
};

/// A callable arm together with its signature.
struct Candidate {
    arm: Arm,
    sig: FunctionSig,
}

enum CallOutcome {
    Selected { decl: Option<DeclId>, ret: Idx },
    Deferred(OverloadSet),
    Failed,
}

impl Checker<'_> {
    pub(crate) fn check_call(
        &mut self,
        call: ExprId,
        callee: ExprId,
        args: &[CallArg],
        position: Position,
    ) -> Assigned {
        let arena = self.arena;
        let span = arena.span(call);
        let Some((name, arms)) = self.callee_arms(callee) else {
            for arg in args {
                self.infer_value(arg.value);
            }
            return Assigned::Resolved(Idx::ERROR);
        };

        let assigned = match self.select_overload(span, name, arms, args) {
            CallOutcome::Selected { ret, .. } => Assigned::Resolved(ret),
            CallOutcome::Deferred(set) => Assigned::Deferred(set),
            CallOutcome::Failed => Assigned::Resolved(Idx::ERROR),
        };

        // `S0.f1(s0)` used as a value loses its labels; called again
        // directly it keeps them.
        if classify(arena, call, position).erases_labels(&self.config) {
            let pool = self.pool;
            assigned.map_types(|ty| pool.erase_labels(ty))
        } else {
            assigned
        }
    }

    /// Candidate arms for a callee, typed with labels where the callee's
    /// form retains them. `None` when the callee failed and was reported.
    fn callee_arms(&mut self, callee: ExprId) -> Option<(Option<Name>, SmallVec<[Arm; 2]>)> {
        let arena = self.arena;
        let target = arena.skip_parens(callee);
        let span = arena.span(target);
        match arena.kind(target) {
            ExprKind::Ident(_) | ExprKind::Member { .. } => match self.bind_reference(target) {
                Err(err) => {
                    self.report(err.into());
                    None
                }
                Ok(Binding::Poisoned) => None,
                Ok(Binding::Value(ty)) if ty.is_error() => None,
                Ok(Binding::Value(ty)) => {
                    self.record(target, ty);
                    let name = match arena.kind(target) {
                        ExprKind::Ident(name) => Some(*name),
                        _ => None,
                    };
                    Some((name, smallvec::smallvec![Arm { decl: None, ty }]))
                }
                Ok(Binding::Type { ty, name }) => {
                    let table = self.table;
                    let inits = table.initializers(ty);
                    if inits.is_empty() {
                        self.push_error(
                            span,
                            TypeErrorKind::NoSuchMember {
                                owner: ty,
                                member: table.init_name(),
                                on_type: true,
                            },
                        );
                        return None;
                    }
                    let arms = inits
                        .iter()
                        .map(|&id| Arm {
                            decl: Some(id),
                            ty: assign::decl_type(
                                self.pool,
                                table.get(id),
                                BindBase::TypeQualified(ty),
                            ),
                        })
                        .collect();
                    Some((Some(name), arms))
                }
                Ok(Binding::Module(name)) => {
                    self.push_error(
                        span,
                        TypeErrorKind::NotAValue {
                            name,
                            is_module: true,
                        },
                    );
                    None
                }
                Ok(Binding::Decls {
                    name,
                    base,
                    candidates,
                }) => {
                    let class = classify(arena, target, Position::Callee);
                    let assigned = assign::assign(
                        self.pool,
                        self.table,
                        name,
                        &candidates,
                        base,
                        class,
                        &self.config,
                    );
                    Some((Some(name), assigned.arms()))
                }
            },
            kind => {
                let name = match kind {
                    ExprKind::Compound { name, .. } => Some(name.base),
                    _ => None,
                };
                match self.infer(callee, Position::Callee) {
                    Assigned::Resolved(ty) if ty.is_error() => None,
                    Assigned::Resolved(ty) => {
                        Some((name, smallvec::smallvec![Arm { decl: None, ty }]))
                    }
                    Assigned::Deferred(set) => Some((Some(set.name), set.arms)),
                }
            }
        }
    }

    /// Pick the arm a call's arguments select.
    fn select_overload(
        &mut self,
        span: Span,
        name: Option<Name>,
        arms: SmallVec<[Arm; 2]>,
        args: &[CallArg],
    ) -> CallOutcome {
        // Arguments are typed once, before any arm is tried.
        let arg_types: Vec<Assigned> = args
            .iter()
            .map(|arg| self.infer(arg.value, Position::Value))
            .collect();

        let mut candidates = Vec::with_capacity(arms.len());
        let mut not_callable = None;
        for arm in arms {
            match self.pool.function_sig(arm.ty) {
                Some(sig) => candidates.push(Candidate { arm, sig }),
                None if arm.ty.is_error() => {}
                None => {
                    not_callable.get_or_insert(arm.ty);
                }
            }
        }
        if candidates.is_empty() {
            if let Some(ty) = not_callable {
                self.push_error(span, TypeErrorKind::NotCallable { ty });
            }
            return CallOutcome::Failed;
        }

        let by_labels: Vec<usize> = (0..candidates.len())
            .filter(|&i| labels_fit(&candidates[i].sig, args))
            .collect();
        let viable: Vec<usize> = by_labels
            .iter()
            .copied()
            .filter(|&i| self.args_fit(&candidates[i].sig, &arg_types))
            .collect();

        match viable.as_slice() {
            [] => {
                self.report_unmatched(span, name, &candidates, &by_labels, args, &arg_types);
                CallOutcome::Failed
            }
            &[i] => {
                let chosen = &candidates[i];
                if candidates.len() > 1 {
                    tracing::debug!(
                        ?name,
                        decl = ?chosen.arm.decl,
                        "selected overload by arguments"
                    );
                }
                self.finish_args(&chosen.sig, args, arg_types);
                self.check_throws(span, chosen.sig.throws);
                CallOutcome::Selected {
                    decl: chosen.arm.decl,
                    ret: chosen.sig.ret,
                }
            }
            &[first, ..] => {
                let same_params = viable
                    .iter()
                    .all(|&i| self.same_params(&candidates[i].sig, &candidates[first].sig));
                if !same_params {
                    self.push_error(
                        span,
                        TypeErrorKind::AmbiguousReference {
                            name: name.unwrap_or(Name::EMPTY),
                            candidates: viable.iter().map(|&i| candidates[i].arm.ty).collect(),
                        },
                    );
                    return CallOutcome::Failed;
                }

                let throws = viable.iter().any(|&i| candidates[i].sig.throws);
                let first_sig = candidates[first].sig.clone();
                self.finish_args(&first_sig, args, arg_types);
                self.check_throws(span, throws);

                let ret = candidates[first].sig.ret;
                if viable.iter().all(|&i| candidates[i].sig.ret == ret) {
                    return CallOutcome::Selected { decl: None, ret };
                }
                tracing::debug!(?name, arms = viable.len(), "deferring call result");
                CallOutcome::Deferred(OverloadSet {
                    name: name.unwrap_or(Name::EMPTY),
                    arms: viable
                        .iter()
                        .map(|&i| Arm {
                            decl: candidates[i].arm.decl,
                            ty: candidates[i].sig.ret,
                        })
                        .collect(),
                })
            }
        }
    }

    fn args_fit(&self, sig: &FunctionSig, arg_types: &[Assigned]) -> bool {
        sig.params
            .iter()
            .zip(arg_types)
            .all(|(param, arg)| match arg {
                Assigned::Resolved(ty) => self.pool.convertible(*ty, param.ty),
                Assigned::Deferred(set) => set
                    .arms
                    .iter()
                    .any(|arm| self.pool.convertible(arm.ty, param.ty)),
            })
    }

    fn same_params(&self, a: &FunctionSig, b: &FunctionSig) -> bool {
        a.arity() == b.arity()
            && a.params
                .iter()
                .zip(b.params.iter())
                .all(|(x, y)| self.pool.erase_labels(x.ty) == self.pool.erase_labels(y.ty))
    }

    /// Resolve deferred arguments against the selected parameter types.
    fn finish_args(&mut self, sig: &FunctionSig, args: &[CallArg], arg_types: Vec<Assigned>) {
        for ((arg, assigned), param) in args.iter().zip(arg_types).zip(sig.params.iter()) {
            if assigned.is_deferred() {
                self.resolve_against(arg.value, assigned, param.ty, MismatchContext::Argument);
            }
        }
    }

    fn check_throws(&mut self, span: Span, throws: bool) {
        if throws && self.try_depth == 0 {
            self.push_error(span, TypeErrorKind::MissingTry);
        }
    }

    /// Explain why no arm fits.
    ///
    /// With a single candidate, or a single one whose labels fit, the
    /// report names the exact problem; otherwise it is a generic
    /// no-match.
    fn report_unmatched(
        &mut self,
        span: Span,
        name: Option<Name>,
        candidates: &[Candidate],
        by_labels: &[usize],
        args: &[CallArg],
        arg_types: &[Assigned],
    ) {
        let focus = match (candidates, by_labels) {
            ([_], _) => 0,
            (_, &[i]) => i,
            _ => {
                self.push_error(span, TypeErrorKind::NoMatchingOverload { name });
                return;
            }
        };
        let sig = &candidates[focus].sig;
        let have: Box<[Option<Name>]> = args.iter().map(|arg| arg.label).collect();

        if sig.arity() != args.len() {
            self.push_error(
                span,
                TypeErrorKind::ArityMismatch {
                    expected: sig.arity(),
                    found: args.len(),
                },
            );
            return;
        }
        if !labels_fit(sig, args) {
            let kind = if sig.has_labels() {
                TypeErrorKind::ArgumentLabelMismatch {
                    have,
                    expected: sig.labels().copied().collect(),
                }
            } else {
                TypeErrorKind::ExtraneousLabels { have }
            };
            self.push_error(span, kind);
            return;
        }

        for ((arg, assigned), param) in args.iter().zip(arg_types).zip(sig.params.iter()) {
            let fits = match assigned {
                Assigned::Resolved(ty) => self.pool.convertible(*ty, param.ty),
                Assigned::Deferred(set) => set
                    .arms
                    .iter()
                    .any(|arm| self.pool.convertible(arm.ty, param.ty)),
            };
            if !fits {
                self.resolve_against(
                    arg.value,
                    assigned.clone(),
                    param.ty,
                    MismatchContext::Argument,
                );
            }
        }
    }

    pub(crate) fn check_subscript_get(
        &mut self,
        expr: ExprId,
        base: ExprId,
        args: &[CallArg],
    ) -> Idx {
        self.check_subscript(expr, base, args)
            .map_or(Idx::ERROR, |(ret, _)| ret)
    }

    /// Check a subscript used as an assignment target; returns the element
    /// type the assigned value must convert to.
    pub(crate) fn check_subscript_set(
        &mut self,
        expr: ExprId,
        base: ExprId,
        args: &[CallArg],
    ) -> Idx {
        let Some((ret, decl)) = self.check_subscript(expr, base, args) else {
            return Idx::ERROR;
        };
        let arena = self.arena;
        let span = arena.span(expr);

        if decl.is_some_and(|id| !self.table.get(id).settable) {
            self.push_error(span, TypeErrorKind::SubscriptNotSettable);
            return ret;
        }

        let base = arena.skip_parens(base);
        let mutable_base = match arena.kind(base) {
            ExprKind::Ident(name) => match self.env.lookup(*name) {
                Some(local) if local.mutable => None,
                _ => Some(TypeErrorKind::ImmutableBase { name: Some(*name) }),
            },
            _ => Some(TypeErrorKind::ImmutableBase { name: None }),
        };
        if let Some(kind) = mutable_base {
            self.push_error(span, kind);
        }
        ret
    }

    fn check_subscript(
        &mut self,
        expr: ExprId,
        base: ExprId,
        args: &[CallArg],
    ) -> Option<(Idx, Option<DeclId>)> {
        let table = self.table;
        let span = self.arena.span(expr);
        let base_ty = self.infer_value(base);
        let subscript = self.well_known.subscript;
        let subscripts = if base_ty.is_error() {
            &[][..]
        } else {
            table.subscripts(base_ty)
        };

        if subscripts.is_empty() {
            if !base_ty.is_error() {
                self.push_error(
                    span,
                    TypeErrorKind::NoSuchMember {
                        owner: base_ty,
                        member: subscript,
                        on_type: false,
                    },
                );
            }
            for arg in args {
                self.infer_value(arg.value);
            }
            return None;
        }

        let arms = subscripts
            .iter()
            .map(|&id| {
                let decl = table.get(id);
                Arm {
                    decl: Some(id),
                    ty: self.pool.function(decl.params.clone(), decl.ret, decl.throws),
                }
            })
            .collect();

        match self.select_overload(span, Some(subscript), arms, args) {
            CallOutcome::Selected { decl, ret } => Some((ret, decl)),
            CallOutcome::Deferred(set) => {
                self.push_error(
                    span,
                    TypeErrorKind::AmbiguousReference {
                        name: subscript,
                        candidates: set.types(),
                    },
                );
                None
            }
            CallOutcome::Failed => None,
        }
    }
}

/// Arity and the exact label sequence match.
fn labels_fit(sig: &FunctionSig, args: &[CallArg]) -> bool {
    sig.arity() == args.len() && sig.labels().eq(args.iter().map(|arg| &arg.label))
}
