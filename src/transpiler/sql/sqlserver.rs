use super::super::traits::{Pagination, SqlGenerator};
use super::super::types;
use crate::ast::{DataKind, Field, SqlDataType};
use crate::error::RenderResult;

pub struct SqlServerGenerator;

impl SqlGenerator for SqlServerGenerator {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn quote_identifier(&self, id: &str) -> String {
        format!("[{}]", id.replace(']', "]]"))
    }

    fn placeholder(&self, name: &str, _index: usize) -> String {
        format!("@{}", name)
    }

    fn command_parameter_name(&self, name: &str) -> String {
        format!("@{}", name)
    }

    fn string_literal(&self, s: &str) -> String {
        format!("N'{}'", s.replace('\'', "''"))
    }

    fn binary_literal(&self, bytes: &[u8]) -> String {
        format!("0x{}", types::hex(bytes))
    }

    fn string_concat(&self, parts: &[String]) -> String {
        parts.join(" + ")
    }

    fn pagination(&self) -> Pagination {
        // SQL Server 2012+: OFFSET n ROWS FETCH NEXT m ROWS ONLY
        Pagination {
            take: "FETCH NEXT {0} ROWS ONLY",
            skip: "OFFSET {0} ROWS",
            skip_first: true,
            requires_order_by: true,
            skip_for_take_only: Some("0"),
            ..Pagination::default()
        }
    }

    fn data_type(&self, ty: &SqlDataType) -> Option<String> {
        match ty.kind {
            DataKind::Text => Some("VarChar(Max)".to_string()),
            DataKind::NText | DataKind::Json => Some("NVarChar(Max)".to_string()),
            DataKind::Blob => Some("VarBinary(Max)".to_string()),
            _ => None,
        }
    }

    fn identity_column_type(&self, field: &Field) -> Option<String> {
        match field.kind() {
            DataKind::Int32 => Some("Int IDENTITY".to_string()),
            DataKind::Int64 => Some("BigInt IDENTITY".to_string()),
            _ => None,
        }
    }

    fn last_identity_query(&self) -> RenderResult<String> {
        Ok("SELECT SCOPE_IDENTITY()".to_string())
    }
}
