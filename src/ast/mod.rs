//! Abstract, dialect-agnostic query model.

pub mod expr;
pub mod predicate;
pub mod query;
pub mod table;
pub mod types;
pub mod values;

pub use expr::*;
pub use predicate::*;
pub use query::*;
pub use table::*;
pub use types::*;
pub use values::*;
