use super::super::traits::{Pagination, SqlGenerator};
use crate::ast::{DataKind, Function, SqlDataType};
use crate::error::RenderResult;

/// SQLite Generator.
pub struct SqliteGenerator;

impl SqlGenerator for SqliteGenerator {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _name: &str, _index: usize) -> String {
        "?".to_string()
    }

    fn pagination(&self) -> Pagination {
        // OFFSET is only valid after LIMIT; -1 means no limit.
        Pagination {
            take_for_skip_only: Some("-1"),
            ..Pagination::default()
        }
    }

    fn data_type(&self, ty: &SqlDataType) -> Option<String> {
        // Storage classes; SQLite ignores declared lengths.
        let name = match ty.kind {
            k if k.is_integer() => "INTEGER",
            DataKind::Boolean => "INTEGER",
            DataKind::Single | DataKind::Double => "REAL",
            DataKind::Decimal | DataKind::Money | DataKind::SmallMoney => "NUMERIC",
            DataKind::Binary | DataKind::VarBinary | DataKind::Blob | DataKind::Image => "BLOB",
            DataKind::Undefined => return None,
            _ => "TEXT",
        };
        Some(name.to_string())
    }

    fn convert_function(&self, func: Function) -> RenderResult<Function> {
        if func.is("CharIndex") && func.args.len() == 2 {
            let mut args = func.args;
            args.swap(0, 1);
            return Ok(Function::new("INSTR", args));
        }
        if func.is("Substring") {
            return Ok(Function::new("SUBSTR", func.args));
        }
        Ok(func)
    }

    fn last_identity_query(&self) -> RenderResult<String> {
        Ok("SELECT last_insert_rowid()".to_string())
    }
}
