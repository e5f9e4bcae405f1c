//! IBM Informix.
//!
//! Informix paginates with `SKIP n FIRST m` ahead of the select list, has
//! no FROM on UPDATE, reads identities through `DBINFO` or sequence
//! `currval`, and needs a real table to select constants from.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::super::traits::{
    DummyTable, Pagination, PaginationPlacement, SqlGenerator, key_list, table_sequence,
};
use super::super::types;
use crate::ast::{DataKind, Expr, Field, Function, Precedence, SequenceResolver, SqlDataType, Table};
use crate::config::DefaultNullable;
use crate::error::RenderResult;
use crate::transpiler::provider::ProviderParameter;

pub struct InformixGenerator;

/// Single-row source for identity and sequence queries.
const SINGLE_ROW: &str = "FROM systables where tabid = 1";

impl SqlGenerator for InformixGenerator {
    fn name(&self) -> &'static str {
        "informix"
    }

    fn quote_identifier(&self, name: &str) -> String {
        // Delimited identifiers need DELIMIDENT; names go out as written.
        name.to_string()
    }

    fn placeholder(&self, _name: &str, _index: usize) -> String {
        "?".to_string()
    }

    fn command_parameter_name(&self, name: &str) -> String {
        format!(":{}", name)
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "'t'".to_string() } else { "'f'".to_string() }
    }

    fn date_literal(&self, d: NaiveDate) -> String {
        format!("DATETIME({}) YEAR TO DAY", d.format("%Y-%m-%d"))
    }

    fn time_literal(&self, t: NaiveTime) -> String {
        if t.nanosecond() == 0 {
            format!("DATETIME({}) HOUR TO SECOND", types::time_text(t))
        } else {
            format!("DATETIME({}) HOUR TO FRACTION(3)", types::time_text(t))
        }
    }

    fn datetime_literal(&self, dt: NaiveDateTime) -> String {
        if dt.nanosecond() == 0 {
            format!("DATETIME({}) YEAR TO SECOND", types::datetime_text(dt))
        } else {
            format!("DATETIME({}) YEAR TO FRACTION(3)", types::datetime_text(dt))
        }
    }

    fn pagination(&self) -> Pagination {
        Pagination {
            take: "FIRST {0}",
            skip: "SKIP {0}",
            placement: PaginationPlacement::BeforeColumns,
            skip_first: true,
            ..Pagination::default()
        }
    }

    fn dummy_table(&self) -> Option<DummyTable> {
        Some(DummyTable {
            name: "SYSTABLES",
            single_row_hint: true,
        })
    }

    fn update_allows_from(&self) -> bool {
        false
    }

    fn rewrite_null_comparisons(&self) -> bool {
        true
    }

    fn negated_like_prefix(&self) -> bool {
        true
    }

    fn data_type(&self, ty: &SqlDataType) -> Option<String> {
        match ty.kind {
            DataKind::DateTime => Some("datetime year to second".to_string()),
            DataKind::DateTime2 => Some("datetime year to fraction".to_string()),
            DataKind::SByte | DataKind::Byte => Some("SmallInt".to_string()),
            DataKind::SmallMoney => Some("Decimal(10,4)".to_string()),
            _ => None,
        }
    }

    fn identity_column_type(&self, field: &Field) -> Option<String> {
        match field.kind() {
            DataKind::Int32 => Some("SERIAL".to_string()),
            DataKind::Int64 => Some("SERIAL8".to_string()),
            _ => None,
        }
    }

    fn null_attribute(&self, field: &Field, policy: DefaultNullable) -> &'static str {
        match (policy, field.is_nullable()) {
            (DefaultNullable::Null, true) | (DefaultNullable::NotNull, false) => "",
            // Informix columns are nullable unless told otherwise.
            (_, true) => "    ",
            (_, false) => "NOT NULL",
        }
    }

    fn primary_key_clause(&self, _name: &str, fields: &[String]) -> RenderResult<String> {
        Ok(format!("PRIMARY KEY ({})", key_list(fields)?))
    }

    fn convert_function(&self, func: Function) -> RenderResult<Function> {
        if func.is("Coalesce") && func.args.len() >= 2 {
            return Ok(nested_nvl(func.args));
        }
        if func.is("CharIndex") && func.args.len() >= 2 {
            let mut args = func.args;
            args.swap(0, 1);
            return Ok(Function::new("INSTR", args));
        }
        if func.is("Substring") {
            return Ok(Function::new("SUBSTR", func.args));
        }
        Ok(func)
    }

    fn supports_sequences(&self) -> bool {
        true
    }

    fn identity_expression(
        &self,
        table: &Table,
        resolver: &dyn SequenceResolver,
    ) -> RenderResult<Option<Expr>> {
        Ok(table_sequence(table, resolver)
            .map(|seq| Expr::raw(format!("{}.nextval", seq), Precedence::Primary)))
    }

    fn last_identity_query(&self) -> RenderResult<String> {
        Ok(format!("SELECT DBINFO('sqlca.sqlerrd1') {}", SINGLE_ROW))
    }

    fn sequence_current_value_query(&self, sequence: &str) -> RenderResult<String> {
        Ok(format!("SELECT {}.currval {}", sequence, SINGLE_ROW))
    }

    fn provider_type_name(&self, parameter: &dyn ProviderParameter) -> Option<String> {
        parameter
            .native_type()
            .filter(|t| t.is_for("informix"))
            .map(|t| t.name)
    }
}

/// `Coalesce(a, b, c)` as `NVL(a, NVL(b, c))`. Needs at least two args.
fn nested_nvl(mut args: Vec<Expr>) -> Function {
    let tail = args.split_off(args.len().saturating_sub(2));
    let mut func = Function::new("NVL", tail);
    while let Some(prev) = args.pop() {
        func = Function::new("NVL", vec![prev, Expr::Function(func)]);
    }
    func
}
