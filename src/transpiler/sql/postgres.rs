use super::super::traits::{SqlGenerator, table_sequence};
use super::super::types::{self, decimal, with_length};
use crate::ast::{DataKind, Expr, Field, Function, Precedence, SequenceResolver, SqlDataType, Table};
use crate::error::RenderResult;

/// PostgreSQL Generator.
pub struct PostgresGenerator;

impl SqlGenerator for PostgresGenerator {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, _name: &str, index: usize) -> String {
        format!("${}", index)
    }

    fn bool_literal(&self, val: bool) -> String {
        if val { "TRUE".to_string() } else { "FALSE".to_string() }
    }

    fn binary_literal(&self, bytes: &[u8]) -> String {
        format!("'\\x{}'::bytea", types::hex(bytes))
    }

    fn data_type(&self, ty: &SqlDataType) -> Option<String> {
        let name = match ty.kind {
            DataKind::Boolean => "boolean",
            DataKind::Guid => "uuid",
            DataKind::SByte | DataKind::Byte | DataKind::Int16 => "smallint",
            DataKind::UInt16 | DataKind::Int32 => "integer",
            DataKind::UInt32 | DataKind::Int64 => "bigint",
            DataKind::UInt64 => "numeric(20,0)",
            DataKind::Single => "real",
            DataKind::Double => "double precision",
            DataKind::Decimal => return Some(decimal("numeric", ty)),
            DataKind::Money | DataKind::SmallMoney => "money",
            DataKind::Char | DataKind::NChar => return Some(with_length("char", ty)),
            DataKind::VarChar | DataKind::NVarChar => return Some(with_length("varchar", ty)),
            DataKind::Text | DataKind::NText => "text",
            DataKind::Binary | DataKind::VarBinary | DataKind::Blob | DataKind::Image => "bytea",
            DataKind::Date => "date",
            DataKind::Time => "time",
            DataKind::DateTime | DataKind::DateTime2 | DataKind::SmallDateTime | DataKind::Timestamp => {
                "timestamp"
            }
            DataKind::DateTimeOffset => "timestamptz",
            DataKind::Xml => "xml",
            DataKind::Json => "jsonb",
            DataKind::Undefined => return None,
        };
        Some(name.to_string())
    }

    fn identity_column_type(&self, field: &Field) -> Option<String> {
        match field.kind() {
            DataKind::Int32 => Some("SERIAL".to_string()),
            DataKind::Int64 => Some("BIGSERIAL".to_string()),
            _ => None,
        }
    }

    fn convert_function(&self, func: Function) -> RenderResult<Function> {
        if func.is("CharIndex") && func.args.len() == 2 {
            let mut args = func.args;
            args.swap(0, 1);
            return Ok(Function::new("STRPOS", args));
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
        Ok(table_sequence(table, resolver).map(|seq| {
            Expr::raw(
                format!("nextval({})", self.string_literal(&seq)),
                Precedence::Primary,
            )
        }))
    }

    fn supports_identity_returning(&self) -> bool {
        true
    }

    fn last_identity_query(&self) -> RenderResult<String> {
        Ok("SELECT lastval()".to_string())
    }

    fn sequence_current_value_query(&self, sequence: &str) -> RenderResult<String> {
        Ok(format!("SELECT currval({})", self.string_literal(sequence)))
    }
}
