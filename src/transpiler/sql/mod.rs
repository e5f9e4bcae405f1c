//! Dialect plugins. Each overrides only the hooks where its database
//! differs from the defaults on [`SqlGenerator`](super::traits::SqlGenerator).

pub mod generic;
pub mod informix;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;
pub mod sqlserver;
