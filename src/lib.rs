//! # sqlweave
//!
//! Dialect-aware SQL rendering: one query tree, many databases.
//!
//! Build a [`QueryTree`](ast::QueryTree), pick a [`Dialect`](transpiler::Dialect),
//! and get back the statements the database needs. An INSERT that asks for
//! its generated identity may need more than one.
//!
//! ## Quick Example
//!
//! ```rust
//! use sqlweave::prelude::*;
//!
//! let person = Table::new("person")
//!     .field(Field::new("id", DataKind::Int32).identity())
//!     .field(Field::new("name", DataKind::NVarChar));
//!
//! let insert = InsertQuery::new(person)
//!     .set("name", Expr::param("name"))
//!     .with_identity();
//!
//! let batch = Renderer::new(Dialect::Informix).render(&insert.into()).unwrap();
//! assert_eq!(batch.len(), 2);
//! assert_eq!(batch.sql(0), Some("INSERT INTO person (name) VALUES (?)"));
//! assert_eq!(
//!     batch.sql(1),
//!     Some("SELECT DBINFO('sqlca.sqlerrd1') FROM systables where tabid = 1")
//! );
//! ```
//!
//! ## Dialects
//!
//! | Dialect   | Markers | Pagination                      | Identity            |
//! |-----------|---------|---------------------------------|---------------------|
//! | generic   | `?`     | `LIMIT n OFFSET m`              | unsupported         |
//! | informix  | `?`     | `SELECT SKIP m FIRST n ...`     | DBINFO / sequences  |
//! | postgres  | `$n`    | `LIMIT n OFFSET m`              | RETURNING           |
//! | sqlite    | `?`     | `LIMIT n OFFSET m`              | last_insert_rowid() |
//! | sqlserver | `@name` | `OFFSET m ROWS FETCH NEXT n ...` | SCOPE_IDENTITY()    |
//! | oracle    | `:name` | `OFFSET m ROWS FETCH NEXT n ...` | sequences           |
//! | mysql     | `?`     | `LIMIT n OFFSET m`              | LAST_INSERT_ID()    |

pub mod ast;
pub mod config;
pub mod error;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::{DefaultNullable, RenderConfig};
    pub use crate::error::*;
    pub use crate::transpiler::{
        CommandBatch, Dialect, RenderedStatement, Renderer, StatementPurpose, ToSql,
    };
}

/// Render `tree` for `dialect` with default settings.
///
/// ```
/// use sqlweave::prelude::*;
///
/// let q = SelectQuery::new()
///     .from(Table::new("person"))
///     .take(Expr::lit(10));
/// let batch = sqlweave::render(&q.into(), Dialect::Informix).unwrap();
/// assert_eq!(batch.to_script(), "SELECT FIRST 10 * FROM person");
/// ```
pub fn render(
    tree: &ast::QueryTree,
    dialect: transpiler::Dialect,
) -> error::RenderResult<transpiler::CommandBatch> {
    transpiler::Renderer::new(dialect).render(tree)
}
