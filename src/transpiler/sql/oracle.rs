use chrono::{NaiveDate, NaiveDateTime};

use super::super::traits::{DummyTable, Pagination, SqlGenerator, table_sequence};
use super::super::types::{self, decimal, with_length};
use crate::ast::{DataKind, Expr, Function, Precedence, SequenceResolver, SqlDataType, Table};
use crate::error::RenderResult;

pub struct OracleGenerator;

impl SqlGenerator for OracleGenerator {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn quote_identifier(&self, id: &str) -> String {
        // Oracle standardly uses double quotes for case-sensitive identifiers
        format!("\"{}\"", id.replace('"', "\"\""))
    }

    fn placeholder(&self, name: &str, _index: usize) -> String {
        format!(":{}", name)
    }

    fn command_parameter_name(&self, name: &str) -> String {
        format!(":{}", name)
    }

    fn date_literal(&self, d: NaiveDate) -> String {
        format!("DATE '{}'", d.format("%Y-%m-%d"))
    }

    fn datetime_literal(&self, dt: NaiveDateTime) -> String {
        format!("TIMESTAMP '{}'", types::datetime_text(dt))
    }

    fn pagination(&self) -> Pagination {
        // Oracle 12c+ row limiting
        Pagination {
            take: "FETCH NEXT {0} ROWS ONLY",
            skip: "OFFSET {0} ROWS",
            skip_first: true,
            ..Pagination::default()
        }
    }

    fn dummy_table(&self) -> Option<DummyTable> {
        Some(DummyTable {
            name: "DUAL",
            single_row_hint: false,
        })
    }

    fn data_type(&self, ty: &SqlDataType) -> Option<String> {
        let name = match ty.kind {
            DataKind::Boolean => "Number(1)",
            DataKind::SByte | DataKind::Byte => "Number(3)",
            DataKind::Int16 => "Number(5)",
            DataKind::UInt16 | DataKind::Int32 => "Number(10)",
            DataKind::UInt32 | DataKind::Int64 => "Number(19)",
            DataKind::UInt64 => "Number(20)",
            DataKind::Single => "Binary_Float",
            DataKind::Double => "Binary_Double",
            DataKind::Decimal => return Some(decimal("Number", ty)),
            DataKind::Money => "Number(19,4)",
            DataKind::SmallMoney => "Number(10,4)",
            DataKind::VarChar => return Some(with_length("VarChar2", ty)),
            DataKind::NVarChar => return Some(with_length("NVarChar2", ty)),
            DataKind::Text | DataKind::Json => "Clob",
            DataKind::NText => "NClob",
            DataKind::Binary | DataKind::VarBinary => return Some(with_length("Raw", ty)),
            DataKind::Image => "Blob",
            DataKind::Guid => "Raw(16)",
            DataKind::Time | DataKind::DateTime | DataKind::DateTime2 | DataKind::SmallDateTime => {
                "Timestamp"
            }
            DataKind::DateTimeOffset => "Timestamp With Time Zone",
            DataKind::Xml => "XmlType",
            _ => return None,
        };
        Some(name.to_string())
    }

    fn convert_function(&self, func: Function) -> RenderResult<Function> {
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

    fn sequence_current_value_query(&self, sequence: &str) -> RenderResult<String> {
        Ok(format!("SELECT {}.currval FROM dual", sequence))
    }
}
