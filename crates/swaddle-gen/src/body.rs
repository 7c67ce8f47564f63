//! Flattened module bodies and their free-variable analysis
//!
//! A [`ModuleBody`] is the already tree-shaken, already flattened output of the
//! bundler: plain top-level statements, no `import`/`export` declarations.
//! Parsing it with OXC gives the statement boundaries, the top-level
//! declarations and the free variables the wrapper must supply. The source text
//! itself is kept verbatim apart from `\r\n` line breaks, which are read as
//! `\n` and restored when the wrapper is finished.

use crate::error::{RenderError, Result};
use crate::globals::is_host_global;
use indexmap::IndexSet;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    ArrowFunctionExpression, AwaitExpression, ForOfStatement, Function, IdentifierReference,
    Statement, StringLiteral, TemplateLiteral, VariableDeclaration, VariableDeclarationKind,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::{Parser, ParserReturn};
use oxc_semantic::{ScopeFlags, Scoping, SemanticBuilder};
use oxc_span::{GetSpan, SourceType};
use std::ops::Range;

/// A public export of the bundle: `exported` is the name consumers see,
/// `local` the top-level binding in the body that holds the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExportBinding {
    pub exported: String,
    pub local: String,
}

/// The flattened statements of a bundle together with their analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBody {
    code: String,
    statements: Vec<Range<usize>>,
    free_variables: IndexSet<String>,
    host_globals: IndexSet<String>,
    declarations: IndexSet<String>,
    multiline_literals: Vec<Range<usize>>,
    top_level_await: Option<usize>,
    crlf: bool,
    exports: Vec<ExportBinding>,
}

impl ModuleBody {
    /// Parse and analyse a flattened module body.
    ///
    /// Fails when the code has syntax errors or still contains `import` or
    /// `export` declarations.
    pub fn parse(code: impl Into<String>) -> Result<Self> {
        let mut code = code.into();
        let crlf = code.contains("\r\n");
        if crlf {
            code = code.replace("\r\n", "\n");
        }
        let analysis = analyze(&code)?;

        tracing::trace!(
            statements = analysis.statements.len(),
            free_variables = analysis.free_variables.len(),
            "analysed module body"
        );

        Ok(Self {
            code,
            statements: analysis.statements,
            free_variables: analysis.free_variables,
            host_globals: analysis.host_globals,
            declarations: analysis.declarations,
            multiline_literals: analysis.multiline_literals,
            top_level_await: analysis.top_level_await,
            crlf,
            exports: Vec::new(),
        })
    }

    /// Parse a body given as separate statements, one per line group
    pub fn from_statements<I, S>(statements: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let code = statements
            .into_iter()
            .map(|stmt| stmt.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::parse(code)
    }

    /// Declare a public export
    pub fn with_export(mut self, exported: impl Into<String>, local: impl Into<String>) -> Self {
        self.exports.push(ExportBinding {
            exported: exported.into(),
            local: local.into(),
        });
        self
    }

    /// Declare `local` as the default export
    pub fn with_default_export(self, local: impl Into<String>) -> Self {
        self.with_export("default", local)
    }

    /// Treat a free variable as supplied by the host (e.g. a global the page
    /// loads through its own script tag)
    pub fn assume_global(mut self, name: &str) -> Self {
        if let Some(name) = self.free_variables.shift_remove_full(name).map(|(_, n)| n) {
            self.host_globals.insert(name);
        }
        self
    }

    /// The body text, with `\n` line breaks
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Line break the body was written with: `"\r\n"` or `"\n"`
    pub fn line_ending(&self) -> &'static str {
        if self.crlf { "\r\n" } else { "\n" }
    }

    /// Byte offset of the first `await` outside any function, which only an
    /// ES module can host
    pub fn top_level_await(&self) -> Option<usize> {
        self.top_level_await
    }

    /// Top-level statements in source order
    pub fn statements(&self) -> impl Iterator<Item = &str> + '_ {
        self.statements.iter().map(|range| &self.code[range.clone()])
    }

    /// Identifiers referenced but not declared, excluding host globals, in
    /// order of first reference
    pub fn free_variables(&self) -> &IndexSet<String> {
        &self.free_variables
    }

    /// Host globals the body references (`console`, `window`, ...)
    pub fn host_globals(&self) -> &IndexSet<String> {
        &self.host_globals
    }

    /// Names declared in the body's top-level scope
    pub fn declarations(&self) -> &IndexSet<String> {
        &self.declarations
    }

    /// Every name the body reads or writes without declaring it
    pub fn references(&self) -> impl Iterator<Item = &str> + '_ {
        self.free_variables
            .iter()
            .chain(self.host_globals.iter())
            .map(String::as_str)
    }

    pub fn exports(&self) -> &[ExportBinding] {
        &self.exports
    }

    pub fn has_exports(&self) -> bool {
        !self.exports.is_empty()
    }

    /// Byte ranges of string and template literals spanning several lines;
    /// lines starting inside them must not be re-indented
    pub(crate) fn multiline_literals(&self) -> &[Range<usize>] {
        &self.multiline_literals
    }
}

/// Owned results of analysing a body; the AST does not outlive `analyze`
struct Analysis {
    statements: Vec<Range<usize>>,
    free_variables: IndexSet<String>,
    host_globals: IndexSet<String>,
    declarations: IndexSet<String>,
    multiline_literals: Vec<Range<usize>>,
    top_level_await: Option<usize>,
}

fn analyze(code: &str) -> Result<Analysis> {
    let allocator = Allocator::default();

    let ParserReturn {
        program,
        errors,
        panicked,
        ..
    } = Parser::new(&allocator, code, SourceType::mjs()).parse();

    if panicked || !errors.is_empty() {
        return Err(RenderError::parse(join_diagnostics(&errors)));
    }

    if let Some(stmt) = program.body.iter().find(|stmt| is_module_declaration(stmt)) {
        let span = stmt.span();
        return Err(RenderError::parse(format!(
            "found an import/export declaration at {}..{}; declare imports as externals and exports as export bindings",
            span.start, span.end
        )));
    }

    let semantic_ret = SemanticBuilder::new().build(&program);
    if !semantic_ret.errors.is_empty() {
        return Err(RenderError::parse(join_diagnostics(&semantic_ret.errors)));
    }
    let scoping = semantic_ret.semantic.scoping();

    let statements = program
        .body
        .iter()
        .map(|stmt| {
            let span = stmt.span();
            span.start as usize..span.end as usize
        })
        .collect();

    let mut collector = ReferenceCollector::new(code, scoping);
    collector.visit_program(&program);

    let mut free_variables = IndexSet::new();
    let mut host_globals = IndexSet::new();
    for name in collector.unresolved {
        if is_host_global(&name) {
            host_globals.insert(name);
        } else {
            free_variables.insert(name);
        }
    }

    Ok(Analysis {
        statements,
        free_variables,
        host_globals,
        declarations: top_level_declarations(scoping),
        multiline_literals: collector.multiline_literals,
        top_level_await: collector.top_level_await,
    })
}

fn is_module_declaration(stmt: &Statement<'_>) -> bool {
    matches!(
        stmt,
        Statement::ImportDeclaration(_)
            | Statement::ExportAllDeclaration(_)
            | Statement::ExportDefaultDeclaration(_)
            | Statement::ExportNamedDeclaration(_)
    )
}

fn join_diagnostics<E: std::fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collects unresolved identifier references in first-reference order, the
/// spans of multi-line literals and the first top-level `await`.
struct ReferenceCollector<'s> {
    source: &'s str,
    scoping: &'s Scoping,
    unresolved: IndexSet<String>,
    multiline_literals: Vec<Range<usize>>,
    top_level_await: Option<usize>,
    function_depth: usize,
}

impl<'s> ReferenceCollector<'s> {
    fn new(source: &'s str, scoping: &'s Scoping) -> Self {
        Self {
            source,
            scoping,
            unresolved: IndexSet::new(),
            multiline_literals: Vec::new(),
            top_level_await: None,
            function_depth: 0,
        }
    }

    fn record_multiline(&mut self, start: u32, end: u32) {
        let range = start as usize..end as usize;
        if self.source[range.clone()].contains('\n') {
            self.multiline_literals.push(range);
        }
    }

    fn record_await(&mut self, start: u32) {
        if self.function_depth == 0 && self.top_level_await.is_none() {
            self.top_level_await = Some(start as usize);
        }
    }
}

impl<'a> Visit<'a> for ReferenceCollector<'_> {
    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        let resolved = ident
            .reference_id
            .get()
            .and_then(|id| self.scoping.get_reference(id).symbol_id());
        if resolved.is_none() {
            self.unresolved.insert(ident.name.to_string());
        }
    }

    fn visit_template_literal(&mut self, template: &TemplateLiteral<'a>) {
        self.record_multiline(template.span.start, template.span.end);
        walk::walk_template_literal(self, template);
    }

    // Line continuations (`'a\` + newline + `b'`)
    fn visit_string_literal(&mut self, lit: &StringLiteral<'a>) {
        self.record_multiline(lit.span.start, lit.span.end);
    }

    fn visit_function(&mut self, func: &Function<'a>, flags: ScopeFlags) {
        self.function_depth += 1;
        walk::walk_function(self, func, flags);
        self.function_depth -= 1;
    }

    fn visit_arrow_function_expression(&mut self, expr: &ArrowFunctionExpression<'a>) {
        self.function_depth += 1;
        walk::walk_arrow_function_expression(self, expr);
        self.function_depth -= 1;
    }

    fn visit_await_expression(&mut self, expr: &AwaitExpression<'a>) {
        self.record_await(expr.span.start);
        walk::walk_await_expression(self, expr);
    }

    fn visit_for_of_statement(&mut self, stmt: &ForOfStatement<'a>) {
        if stmt.r#await {
            self.record_await(stmt.span.start);
        }
        walk::walk_for_of_statement(self, stmt);
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'a>) {
        if decl.kind == VariableDeclarationKind::AwaitUsing {
            self.record_await(decl.span.start);
        }
        walk::walk_variable_declaration(self, decl);
    }
}

fn top_level_declarations(scoping: &Scoping) -> IndexSet<String> {
    let root = scoping.root_scope_id();
    scoping
        .symbol_ids()
        .filter(|&symbol_id| scoping.symbol_scope_id(symbol_id) == root)
        .map(|symbol_id| scoping.symbol_name(symbol_id).to_string())
        .collect()
}
