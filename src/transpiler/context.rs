//! Per-operation render state.

use serde::Serialize;

use crate::ast::Value;
use crate::config::{DefaultNullable, RenderConfig};
use crate::error::RenderResult;

/// A parameter as it appears in one rendered statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamBinding {
    /// Logical name from the query tree.
    pub name: String,
    /// Marker written into the SQL text.
    pub marker: String,
    /// Name used on the command object.
    pub command_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// How the generated identity value of an INSERT is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCarry {
    /// The INSERT returns it inline.
    Inline { field: String },
    /// A follow-up query reads the session's last auto-increment value.
    Native { field: String },
    /// The value comes from a sequence; touched, then read.
    Sequence { field: String, sequence: String },
}

impl IdentityCarry {
    pub fn field(&self) -> &str {
        match self {
            IdentityCarry::Inline { field }
            | IdentityCarry::Native { field }
            | IdentityCarry::Sequence { field, .. } => field,
        }
    }

    /// Total statements the operation needs.
    pub fn statement_count(&self) -> usize {
        match self {
            IdentityCarry::Inline { .. } => 1,
            IdentityCarry::Native { .. } => 2,
            IdentityCarry::Sequence { .. } => 3,
        }
    }
}

/// Rendering context: output buffer, layout state, and the carry shared
/// between the statements of one logical operation.
///
/// One context serves one operation and is dropped afterwards.
#[derive(Debug)]
pub struct RenderContext {
    buffer: String,
    indent_level: usize,
    at_line_start: bool,
    pretty: bool,
    statement_index: usize,
    identity: Option<IdentityCarry>,
    params: Vec<ParamBinding>,
    default_nullable: DefaultNullable,
    sequences: bool,
    take_override: Option<String>,
    skip_override: Option<String>,
}

impl RenderContext {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            at_line_start: true,
            pretty: config.pretty,
            statement_index: 0,
            identity: None,
            params: Vec::new(),
            default_nullable: config.default_nullable,
            sequences: config.sequences,
            take_override: config.pagination.take.clone(),
            skip_override: config.pagination.skip.clone(),
        }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    pub fn default_nullable(&self) -> DefaultNullable {
        self.default_nullable
    }

    /// Sequences are allowed by configuration.
    pub fn sequences_enabled(&self) -> bool {
        self.sequences
    }

    pub fn take_override(&self) -> Option<&str> {
        self.take_override.as_deref()
    }

    pub fn skip_override(&self) -> Option<&str> {
        self.skip_override.as_deref()
    }

    // Cross-statement carry

    pub fn identity(&self) -> Option<&IdentityCarry> {
        self.identity.as_ref()
    }

    pub fn set_identity(&mut self, carry: Option<IdentityCarry>) {
        self.identity = carry;
    }

    pub fn reset_identity(&mut self) {
        self.identity = None;
    }

    pub fn statement_index(&self) -> usize {
        self.statement_index
    }

    /// Start a fresh statement buffer.
    pub fn begin_statement(&mut self, index: usize) {
        self.statement_index = index;
        self.buffer.clear();
        self.params.clear();
        self.indent_level = 0;
        self.at_line_start = true;
    }

    /// Take the finished statement text and its bindings.
    pub fn finish_statement(&mut self) -> (String, Vec<ParamBinding>) {
        self.indent_level = 0;
        self.at_line_start = true;
        (
            std::mem::take(&mut self.buffer),
            std::mem::take(&mut self.params),
        )
    }

    // Parameters

    /// 1-based index the next bound parameter will get.
    pub fn next_param_index(&self) -> usize {
        self.params.len() + 1
    }

    pub fn bind(&mut self, binding: ParamBinding) {
        self.params.push(binding);
    }

    pub fn params(&self) -> &[ParamBinding] {
        &self.params
    }

    // Output

    pub fn write(&mut self, s: &str) {
        if self.pretty && self.at_line_start && self.indent_level > 0 {
            for _ in 0..self.indent_level {
                self.buffer.push_str("    ");
            }
        }
        self.buffer.push_str(s);
        self.at_line_start = false;
    }

    pub fn space(&mut self) {
        if !self.buffer.is_empty() && !self.at_line_start {
            self.buffer.push(' ');
        }
    }

    /// Line break in pretty mode, a single space otherwise.
    pub fn newline(&mut self) {
        if self.pretty {
            if !self.at_line_start {
                self.buffer.push('\n');
            }
            self.at_line_start = true;
        } else {
            self.space();
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Open a clause: keyword, then the body on its own indented line when
    /// pretty.
    pub fn clause(&mut self, keyword: &str) {
        self.newline();
        self.write(keyword);
        self.open_body();
    }

    /// Start a clause body after a keyword already written.
    pub fn open_body(&mut self) {
        if self.pretty {
            self.newline();
            self.indent();
        } else {
            self.space();
        }
    }

    pub fn close_clause(&mut self) {
        if self.pretty {
            self.dedent();
        }
    }

    /// List separator: `,` plus a line break or a space.
    pub fn separator(&mut self) {
        self.write(",");
        self.newline();
    }

    /// Open a parenthesized list: `(` on its own line when pretty,
    /// ` (` inline otherwise.
    pub fn open_list(&mut self) {
        if self.pretty {
            self.newline();
            self.write("(");
            self.newline();
            self.indent();
        } else {
            self.write(" (");
        }
    }

    pub fn close_list(&mut self) {
        if self.pretty {
            self.dedent();
            self.newline();
        }
        self.write(")");
    }

    /// Render into a detached string. Parameters bound inside the closure
    /// still land in the statement, in walk order.
    pub fn fragment<F>(&mut self, f: F) -> RenderResult<String>
    where
        F: FnOnce(&mut Self) -> RenderResult<()>,
    {
        let saved = std::mem::take(&mut self.buffer);
        let saved_line_start = self.at_line_start;
        let saved_pretty = self.pretty;
        self.at_line_start = false;
        self.pretty = false;

        let result = f(self);

        let fragment = std::mem::replace(&mut self.buffer, saved);
        self.at_line_start = saved_line_start;
        self.pretty = saved_pretty;
        result.map(|_| fragment)
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_clauses() {
        let mut ctx = RenderContext::new(&RenderConfig::default());
        ctx.write("SELECT");
        ctx.open_body();
        ctx.write("a");
        ctx.separator();
        ctx.write("b");
        ctx.close_clause();
        ctx.clause("FROM");
        ctx.write("t");
        ctx.close_clause();
        assert_eq!(ctx.as_str(), "SELECT a, b FROM t");
    }

    #[test]
    fn test_pretty_clauses() {
        let mut ctx = RenderContext::new(&RenderConfig::default().pretty(true));
        ctx.write("SELECT");
        ctx.open_body();
        ctx.write("a");
        ctx.separator();
        ctx.write("b");
        ctx.close_clause();
        ctx.clause("FROM");
        ctx.write("t");
        ctx.close_clause();
        assert_eq!(ctx.as_str(), "SELECT\n    a,\n    b\nFROM\n    t");
    }

    #[test]
    fn test_fragment_is_detached() {
        let mut ctx = RenderContext::new(&RenderConfig::default().pretty(true));
        ctx.write("SELECT");
        let frag = ctx
            .fragment(|c| {
                c.write("x");
                c.newline();
                c.write("y");
                Ok(())
            })
            .unwrap();
        assert_eq!(frag, "x y");
        assert_eq!(ctx.as_str(), "SELECT");
    }

    #[test]
    fn test_statement_reset() {
        let mut ctx = RenderContext::new(&RenderConfig::default());
        ctx.write("INSERT");
        ctx.bind(ParamBinding {
            name: "a".to_string(),
            marker: "?".to_string(),
            command_name: "a".to_string(),
            value: None,
        });
        let (sql, params) = ctx.finish_statement();
        assert_eq!(sql, "INSERT");
        assert_eq!(params.len(), 1);

        ctx.begin_statement(1);
        assert_eq!(ctx.as_str(), "");
        assert_eq!(ctx.next_param_index(), 1);
        assert_eq!(ctx.statement_index(), 1);
    }

    #[test]
    fn test_identity_carry_counts() {
        let native = IdentityCarry::Native {
            field: "id".to_string(),
        };
        assert_eq!(native.statement_count(), 2);
        assert_eq!(native.field(), "id");
        let seq = IdentityCarry::Sequence {
            field: "id".to_string(),
            sequence: "s".to_string(),
        };
        assert_eq!(seq.statement_count(), 3);
    }
}
