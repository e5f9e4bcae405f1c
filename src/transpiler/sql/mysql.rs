use super::super::traits::{Pagination, SqlGenerator};
use super::super::types::{decimal, with_length};
use crate::ast::{DataKind, Field, Function, SqlDataType};
use crate::error::RenderResult;

/// MySQL Generator.
pub struct MysqlGenerator;

impl SqlGenerator for MysqlGenerator {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn placeholder(&self, _name: &str, _index: usize) -> String {
        "?".to_string()
    }

    fn string_concat(&self, parts: &[String]) -> String {
        format!("CONCAT({})", parts.join(", "))
    }

    fn pagination(&self) -> Pagination {
        // OFFSET needs a LIMIT; the documented "no limit" value is 2^64-1.
        Pagination {
            take_for_skip_only: Some("18446744073709551615"),
            ..Pagination::default()
        }
    }

    fn data_type(&self, ty: &SqlDataType) -> Option<String> {
        let name = match ty.kind {
            DataKind::Boolean => "tinyint(1)",
            DataKind::SByte => "tinyint",
            DataKind::Byte => "tinyint unsigned",
            DataKind::Int16 => "smallint",
            DataKind::UInt16 => "smallint unsigned",
            DataKind::Int32 => "int",
            DataKind::UInt32 => "int unsigned",
            DataKind::Int64 => "bigint",
            DataKind::UInt64 => "bigint unsigned",
            DataKind::Single => "float",
            DataKind::Double => "double",
            DataKind::Decimal => return Some(decimal("decimal", ty)),
            DataKind::Money => "decimal(19,4)",
            DataKind::SmallMoney => "decimal(10,4)",
            DataKind::Guid => "char(36)",
            DataKind::NVarChar => return Some(with_length("varchar", ty)),
            DataKind::NChar => return Some(with_length("char", ty)),
            DataKind::NText => "text",
            DataKind::Image => "longblob",
            DataKind::DateTime | DataKind::DateTime2 | DataKind::SmallDateTime | DataKind::DateTimeOffset => {
                "datetime"
            }
            DataKind::Json => "json",
            DataKind::Xml => "text",
            _ => return None,
        };
        Some(name.to_string())
    }

    fn identity_column_type(&self, field: &Field) -> Option<String> {
        match field.kind() {
            DataKind::Int32 => Some("int AUTO_INCREMENT".to_string()),
            DataKind::Int64 => Some("bigint AUTO_INCREMENT".to_string()),
            _ => None,
        }
    }

    fn convert_function(&self, func: Function) -> RenderResult<Function> {
        if func.is("CharIndex") {
            return Ok(Function::new("LOCATE", func.args));
        }
        Ok(func)
    }

    fn last_identity_query(&self) -> RenderResult<String> {
        Ok("SELECT LAST_INSERT_ID()".to_string())
    }
}
