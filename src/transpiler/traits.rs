//! Dialect hooks and identifier utilities.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::ast::{Expr, Field, Function, SequenceResolver, SqlDataType, Table};
use crate::config::DefaultNullable;
use crate::error::{RenderError, RenderResult};
use crate::transpiler::provider::ProviderParameter;
use crate::transpiler::types;

/// SQL reserved words that must be quoted when used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "order",
    "group",
    "user",
    "table",
    "select",
    "from",
    "where",
    "join",
    "left",
    "right",
    "inner",
    "outer",
    "on",
    "and",
    "or",
    "not",
    "null",
    "true",
    "false",
    "limit",
    "offset",
    "as",
    "in",
    "is",
    "like",
    "between",
    "having",
    "union",
    "all",
    "distinct",
    "case",
    "when",
    "then",
    "else",
    "end",
    "create",
    "alter",
    "drop",
    "insert",
    "update",
    "delete",
    "index",
    "key",
    "primary",
    "foreign",
    "references",
    "default",
    "constraint",
    "check",
];

/// Escape an identifier if it's a reserved word or contains special chars.
/// Handles dotted identifiers (e.g., `schema.table`) by quoting each part.
pub fn escape_identifier(name: &str) -> String {
    if name.contains('.') {
        return name
            .split('.')
            .map(escape_single_identifier)
            .collect::<Vec<_>>()
            .join(".");
    }
    escape_single_identifier(name)
}

fn escape_single_identifier(name: &str) -> String {
    let lower = name.to_lowercase();
    let needs_escaping = RESERVED_WORDS.contains(&lower.as_str())
        || name.chars().any(|c| !c.is_alphanumeric() && c != '_')
        || name.chars().next().map(|c| c.is_numeric()).unwrap_or(false);

    if needs_escaping {
        format!("\"{}\"", name.replace('"', "\"\""))
    } else {
        name.to_string()
    }
}

/// Where row-limiting keywords go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationPlacement {
    /// `SELECT FIRST 10 a, b ...`
    BeforeColumns,
    /// `... ORDER BY a LIMIT 10`
    AfterQuery,
}

/// Pagination keywords and their layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Single-argument template for the row limit.
    pub take: &'static str,
    /// Single-argument template for the row offset.
    pub skip: &'static str,
    pub placement: PaginationPlacement,
    /// Emit the offset keyword before the limit keyword.
    pub skip_first: bool,
    /// The offset keyword is only legal after ORDER BY.
    pub requires_order_by: bool,
    /// Limit value to emit when only an offset was requested.
    pub take_for_skip_only: Option<&'static str>,
    /// Offset value to emit when only a limit was requested.
    pub skip_for_take_only: Option<&'static str>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            take: "LIMIT {0}",
            skip: "OFFSET {0}",
            placement: PaginationPlacement::AfterQuery,
            skip_first: false,
            requires_order_by: false,
            take_for_skip_only: None,
            skip_for_take_only: None,
        }
    }
}

/// Single-row pseudo-table used by SELECTs with no source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DummyTable {
    pub name: &'static str,
    /// The table has many rows, so a one-row limit must be forced.
    pub single_row_hint: bool,
}

/// Sequence feeding `table`, if the metadata layer knows one.
pub fn table_sequence(table: &Table, resolver: &dyn SequenceResolver) -> Option<String> {
    resolver.table_sequence(table).or_else(|| {
        table
            .identity_field()
            .and_then(|f| resolver.field_sequence(table, f))
    })
}

/// Shared PRIMARY KEY field list check.
pub fn key_list(quoted: &[String]) -> RenderResult<String> {
    if quoted.is_empty() {
        return Err(RenderError::contract("primary key field list is empty"));
    }
    Ok(quoted.join(", "))
}

/// Dialect-specific SQL generation.
///
/// Every hook has a default matching generic ANSI-ish output; a dialect
/// overrides only where it differs.
pub trait SqlGenerator: Send + Sync {
    /// Short lowercase dialect name.
    fn name(&self) -> &'static str;

    /// Quote an identifier (table or column name).
    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name)
    }

    /// Marker written into the query text for parameter `name`, the
    /// `index`-th (1-based) in walk order.
    fn placeholder(&self, name: &str, index: usize) -> String;

    /// Name the parameter carries on the command object.
    fn command_parameter_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Inverse of [`SqlGenerator::command_parameter_name`].
    fn parameter_name(&self, command_name: &str) -> String {
        let prefix = self.command_parameter_name("");
        command_name
            .strip_prefix(prefix.as_str())
            .unwrap_or(command_name)
            .to_string()
    }

    // Literals

    fn bool_literal(&self, val: bool) -> String {
        if val { "1".to_string() } else { "0".to_string() }
    }

    fn string_literal(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    fn date_literal(&self, d: NaiveDate) -> String {
        format!("'{}'", d.format("%Y-%m-%d"))
    }

    fn time_literal(&self, t: NaiveTime) -> String {
        format!("'{}'", types::time_text(t))
    }

    fn datetime_literal(&self, dt: NaiveDateTime) -> String {
        format!("'{}'", types::datetime_text(dt))
    }

    fn binary_literal(&self, bytes: &[u8]) -> String {
        format!("X'{}'", types::hex(bytes))
    }

    /// Join already-rendered operands into one string concatenation.
    fn string_concat(&self, parts: &[String]) -> String {
        parts.join(" || ")
    }

    // Clause policies

    fn pagination(&self) -> Pagination {
        Pagination::default()
    }

    fn dummy_table(&self) -> Option<DummyTable> {
        None
    }

    fn update_allows_from(&self) -> bool {
        true
    }

    /// Turn `NULL IS NULL` / `NULL IS NOT NULL` into `1=1` / `1=0`.
    fn rewrite_null_comparisons(&self) -> bool {
        false
    }

    /// Render negated LIKE as `NOT a LIKE b` instead of `a NOT LIKE b`.
    fn negated_like_prefix(&self) -> bool {
        false
    }

    // Types and DDL

    /// Dialect spelling for a data type; `None` falls back to the generic
    /// mapping.
    fn data_type(&self, _ty: &SqlDataType) -> Option<String> {
        None
    }

    /// Auto-increment type token for an identity column in CREATE TABLE.
    fn identity_column_type(&self, _field: &Field) -> Option<String> {
        None
    }

    /// Nullability marker for a CREATE TABLE column. Empty when the field
    /// agrees with the table default.
    fn null_attribute(&self, field: &Field, policy: DefaultNullable) -> &'static str {
        match (policy, field.is_nullable()) {
            (DefaultNullable::Null, true) | (DefaultNullable::NotNull, false) => "",
            (_, true) => "NULL",
            (_, false) => "NOT NULL",
        }
    }

    /// PRIMARY KEY table constraint from already-quoted field names.
    fn primary_key_clause(&self, name: &str, fields: &[String]) -> RenderResult<String> {
        let list = key_list(fields)?;
        Ok(format!(
            "CONSTRAINT {} PRIMARY KEY ({})",
            self.quote_identifier(name),
            list
        ))
    }

    // Functions

    /// Rewrite a function call before it is rendered.
    fn convert_function(&self, func: Function) -> RenderResult<Function> {
        Ok(func)
    }

    // Identity and sequences

    fn supports_sequences(&self) -> bool {
        false
    }

    /// Value expression for the identity column of an INSERT. `None` means
    /// the server fills it in natively.
    fn identity_expression(
        &self,
        _table: &Table,
        _resolver: &dyn SequenceResolver,
    ) -> RenderResult<Option<Expr>> {
        Ok(None)
    }

    /// The INSERT itself can hand back the generated value.
    fn supports_identity_returning(&self) -> bool {
        false
    }

    fn returning_clause(&self, field: &Field) -> String {
        format!("RETURNING {}", self.quote_identifier(&field.name))
    }

    /// Fixed query returning the last auto-increment value of the session.
    fn last_identity_query(&self) -> RenderResult<String> {
        Err(RenderError::unsupported(self.name(), "last identity query"))
    }

    fn sequence_current_value_query(&self, _sequence: &str) -> RenderResult<String> {
        Err(RenderError::unsupported(self.name(), "sequence current value"))
    }

    /// Statement forcing the server to settle sequence state before the
    /// current value is read.
    fn sequence_touch_query(&self, sequence: &str) -> RenderResult<String> {
        self.sequence_current_value_query(sequence)
    }

    // Diagnostics

    /// Native type name of a bound parameter, for diagnostics.
    fn provider_type_name(&self, parameter: &dyn ProviderParameter) -> Option<String> {
        parameter.native_type().map(|t| t.name)
    }
}
