//! Checking a compilation unit.

use rayon::prelude::*;
use sable_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue, ErrorCode, ErrorGuaranteed};
use sable_ir::{ExprArena, Name, ParsedType, Span, StmtId, StringInterner};
use sable_types::{CheckConfig, Checker, DeclError, DeclTable, Pool, TypeCheckError};

/// Options for one checking run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SessionConfig {
    pub check: CheckConfig,
    pub diagnostics: DiagnosticConfig,
}

/// A parameter of a body, in scope for every statement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BodyParam {
    pub name: Name,
    pub ty: ParsedType,
    pub mutable: bool,
    pub span: Span,
}

/// A function body: parameters and a statement list.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Body {
    pub name: Name,
    pub params: Vec<BodyParam>,
    pub stmts: Vec<StmtId>,
}

/// What a checking run produced.
#[derive(Clone, Debug)]
pub struct CheckOutcome {
    /// Type errors of every body, in body order.
    pub errors: Vec<TypeCheckError>,
    /// Declaration and type errors rendered, limited and sorted by position.
    pub diagnostics: Vec<Diagnostic>,
    guarantee: Option<ErrorGuaranteed>,
}

impl CheckOutcome {
    /// Proof that errors were reported, if any were.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        self.guarantee
    }

    /// Primary messages of the rendered diagnostics.
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }
}

/// Everything one run checks against.
pub struct CompilationUnit {
    pub names: StringInterner,
    pub pool: Pool,
    pub table: DeclTable,
    pub arena: ExprArena,
    bodies: Vec<Body>,
    decl_errors: Vec<DeclError>,
}

impl CompilationUnit {
    pub fn new(names: StringInterner, pool: Pool, table: DeclTable, arena: ExprArena) -> Self {
        CompilationUnit {
            names,
            pool,
            table,
            arena,
            bodies: Vec::new(),
            decl_errors: Vec::new(),
        }
    }

    /// Attach the errors collected while building the declaration table.
    #[must_use]
    pub fn with_decl_errors(mut self, errors: Vec<DeclError>) -> Self {
        self.decl_errors = errors;
        self
    }

    pub fn add_body(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Check every body.
    ///
    /// Each body gets its own [`Checker`]; bodies run in parallel and share
    /// the pool, interner and table read-only.
    #[tracing::instrument(level = "debug", skip_all, fields(bodies = self.bodies.len()))]
    pub fn check(&self, config: &SessionConfig) -> CheckOutcome {
        let per_body: Vec<Vec<TypeCheckError>> = self
            .bodies
            .par_iter()
            .map(|body| self.check_body(body, config.check))
            .collect();
        let errors: Vec<TypeCheckError> = per_body.into_iter().flatten().collect();

        let mut queue = DiagnosticQueue::with_config(config.diagnostics.clone());
        for err in &self.decl_errors {
            queue.add(decl_diagnostic(err));
        }
        for err in &errors {
            queue.add(err.to_diagnostic(&self.pool, &self.names));
        }
        let guarantee = queue.has_errors();
        tracing::debug!(errors = errors.len(), "unit checked");

        CheckOutcome {
            errors,
            diagnostics: queue.flush(),
            guarantee,
        }
    }

    /// Check one body on the current thread.
    pub fn check_body(&self, body: &Body, config: CheckConfig) -> Vec<TypeCheckError> {
        let _span = tracing::debug_span!("body", name = self.names.lookup(body.name)).entered();
        let mut checker =
            Checker::new(&self.arena, &self.table, &self.pool, &self.names).with_config(config);
        for param in &body.params {
            let ty = checker.resolve_annotation(&param.ty, param.span);
            checker.declare_local(param.name, ty, param.mutable, param.span);
        }
        checker.check_body(&body.stmts);
        checker.into_errors()
    }
}

fn decl_diagnostic(err: &DeclError) -> Diagnostic {
    match err {
        DeclError::Duplicate { span, previous, .. } => Diagnostic::error(ErrorCode::E2006)
            .with_message(err.to_string())
            .with_label(*span, "redeclared here")
            .with_secondary_label(*previous, "previously declared here"),
        DeclError::InvalidOwner { span } => Diagnostic::error(ErrorCode::E2002)
            .with_message(err.to_string())
            .with_label(*span, "owner is not a declared type"),
    }
}
