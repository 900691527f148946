//! Name binding.
//!
//! Resolves a reference expression to the declarations it may denote:
//! - `f1`: locals first, then free functions, then nominal types, then the
//!   module name;
//! - `base.member`: the base decides the lookup. A module selects free
//!   functions, a type selects its methods (curried) or initializers, a
//!   value selects methods with the receiver already applied;
//! - `f1(a:b:)`: only declarations whose label sequence matches exactly.
//!
//! Parentheses are transparent.

use sable_ir::{CompoundName, ExprId, ExprKind, Name, Span};
use smallvec::SmallVec;

use crate::{Checker, DeclId, Idx};

/// How a bound declaration is reached.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindBase {
    /// Bare or module-qualified: `f1`, `TestModule.f1`.
    Free,
    /// Through the owner type: `S0.f1`, `S0.init`.
    TypeQualified(Idx),
    /// Through a value of the owner type: `s0.f1`.
    Instance(Idx),
}

/// What a reference denotes.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Binding {
    /// A value with a known type: a local, or a non-reference expression.
    Value(Idx),
    /// One or more declarations sharing a base name.
    Decls {
        name: Name,
        base: BindBase,
        candidates: SmallVec<[DeclId; 2]>,
    },
    /// A nominal type name.
    Type { ty: Idx, name: Name },
    /// The module namespace.
    Module(Name),
    /// The base already failed to check and was reported.
    Poisoned,
}

/// Binding failures.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum BindError {
    #[error("cannot find name in scope")]
    Unbound { name: Name, span: Span },

    #[error("no declaration matches the compound name")]
    UnboundCompound {
        name: CompoundName,
        owner: Option<Idx>,
        span: Span,
    },

    #[error("type has no such member")]
    NoSuchMember {
        owner: Idx,
        member: Name,
        on_type: bool,
        span: Span,
    },

    #[error("module has no such member")]
    NoModuleMember {
        module: Name,
        member: Name,
        span: Span,
    },
}

/// What the left-hand side of a member access denotes.
#[derive(Copy, Clone, Debug)]
enum MemberBase {
    Module(Name),
    Type(Idx),
    Value(Idx),
    Poisoned,
}

impl Checker<'_> {
    /// Bind a reference expression to its candidate declarations.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn bind_reference(&mut self, expr: ExprId) -> Result<Binding, BindError> {
        let arena = self.arena;
        let expr = arena.skip_parens(expr);
        let span = arena.span(expr);
        match arena.kind(expr) {
            ExprKind::Ident(name) => self.bind_ident(*name, span),
            ExprKind::Member { base, member } => {
                let base = self.bind_base(*base)?;
                self.bind_member(base, *member, span)
            }
            ExprKind::Compound { base, name } => {
                let base = match base {
                    Some(base) => Some(self.bind_base(*base)?),
                    None => None,
                };
                self.bind_compound(base, name, span)
            }
            _ => Ok(Binding::Value(self.infer_value(expr))),
        }
    }

    fn bind_ident(&self, name: Name, span: Span) -> Result<Binding, BindError> {
        if let Some(local) = self.env.lookup(name) {
            return Ok(Binding::Value(local.ty));
        }
        let free = self.table.lookup(name);
        if !free.is_empty() {
            return Ok(Binding::Decls {
                name,
                base: BindBase::Free,
                candidates: free.iter().copied().collect(),
            });
        }
        if let Some(ty) = self.table.lookup_type(name) {
            return Ok(Binding::Type { ty, name });
        }
        if self.table.module_name() == Some(name) {
            return Ok(Binding::Module(name));
        }
        Err(BindError::Unbound { name, span })
    }

    fn bind_base(&mut self, base: ExprId) -> Result<MemberBase, BindError> {
        let arena = self.arena;
        let inner = arena.skip_parens(base);
        let binding = match arena.kind(inner) {
            ExprKind::Ident(_) | ExprKind::Member { .. } => self.bind_reference(inner)?,
            _ => Binding::Value(self.infer_value(inner)),
        };
        Ok(match binding {
            Binding::Type { ty, .. } => MemberBase::Type(ty),
            Binding::Module(name) => MemberBase::Module(name),
            Binding::Poisoned => MemberBase::Poisoned,
            Binding::Value(ty) if ty.is_error() => MemberBase::Poisoned,
            Binding::Value(ty) => MemberBase::Value(ty),
            // A function used as a base: check it as a value.
            Binding::Decls { .. } => match self.infer_value(inner) {
                ty if ty.is_error() => MemberBase::Poisoned,
                ty => MemberBase::Value(ty),
            },
        })
    }

    fn bind_member(
        &self,
        base: MemberBase,
        member: Name,
        span: Span,
    ) -> Result<Binding, BindError> {
        match base {
            MemberBase::Poisoned => Ok(Binding::Poisoned),
            MemberBase::Module(module) => {
                let free = self.table.lookup(member);
                if !free.is_empty() {
                    return Ok(Binding::Decls {
                        name: member,
                        base: BindBase::Free,
                        candidates: free.iter().copied().collect(),
                    });
                }
                if let Some(ty) = self.table.lookup_type(member) {
                    return Ok(Binding::Type { ty, name: member });
                }
                Err(BindError::NoModuleMember {
                    module,
                    member,
                    span,
                })
            }
            MemberBase::Type(owner) => {
                let candidates = if member == self.table.init_name() {
                    self.table.initializers(owner)
                } else {
                    self.table.lookup_member(owner, member)
                };
                if candidates.is_empty() {
                    return Err(BindError::NoSuchMember {
                        owner,
                        member,
                        on_type: true,
                        span,
                    });
                }
                Ok(Binding::Decls {
                    name: member,
                    base: BindBase::TypeQualified(owner),
                    candidates: candidates.iter().copied().collect(),
                })
            }
            MemberBase::Value(owner) => {
                let candidates = self.table.lookup_member(owner, member);
                if candidates.is_empty() {
                    return Err(BindError::NoSuchMember {
                        owner,
                        member,
                        on_type: false,
                        span,
                    });
                }
                Ok(Binding::Decls {
                    name: member,
                    base: BindBase::Instance(owner),
                    candidates: candidates.iter().copied().collect(),
                })
            }
        }
    }

    fn bind_compound(
        &self,
        base: Option<MemberBase>,
        name: &CompoundName,
        span: Span,
    ) -> Result<Binding, BindError> {
        let (owner, bind_base) = match base {
            None | Some(MemberBase::Module(_)) => (None, BindBase::Free),
            Some(MemberBase::Type(owner)) => (Some(owner), BindBase::TypeQualified(owner)),
            // Initializers are only reachable through the type.
            Some(MemberBase::Value(owner)) if name.base == self.table.init_name() => {
                return Err(BindError::UnboundCompound {
                    name: name.clone(),
                    owner: Some(owner),
                    span,
                });
            }
            Some(MemberBase::Value(owner)) => (Some(owner), BindBase::Instance(owner)),
            Some(MemberBase::Poisoned) => return Ok(Binding::Poisoned),
        };

        let candidates = self.table.lookup_compound(owner, name);
        if candidates.is_empty() {
            return Err(BindError::UnboundCompound {
                name: name.clone(),
                owner,
                span,
            });
        }
        Ok(Binding::Decls {
            name: name.base,
            base: bind_base,
            candidates,
        })
    }
}
