//! Renderer test modules.
//!
//! Tests are organized by category:
//! - `core`: rendering through [`Renderer`](super::Renderer) and `ToSql`
//! - `dialects`: per-dialect output (Postgres, SQL Server, Oracle, ...)
//! - `informix`: the Informix plugin end to end
//! - `sequencer`: statement planning and the identity carry

mod core;

use crate::ast::{DataKind, Field, SqlDataType, Table};

/// `person(id identity, name nvarchar(50), age smallint)`.
pub(crate) fn person() -> Table {
    Table::new("person")
        .field(Field::new("id", DataKind::Int32).identity().primary_key(1))
        .field(Field::new("name", SqlDataType::with_length(DataKind::NVarChar, 50)))
        .field(Field::new("age", DataKind::Int16))
}

/// `person` fed by the table-level sequence `person_seq`.
pub(crate) fn sequenced_person() -> Table {
    person().sequence("person_seq")
}
