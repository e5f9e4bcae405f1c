//! SQL renderer for the abstract query tree.
//!
//! A [`Renderer`] pairs one dialect with its configuration and turns a
//! [`QueryTree`] into the ordered statements the operation needs.

pub mod conditions;
pub mod context;
pub mod ddl;
pub mod dialect;
pub mod dml;
pub mod expressions;
pub mod provider;
pub mod sequencer;
pub mod sql;
pub mod template;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

use tracing::trace;

use crate::ast::{
    CreateTableQuery, DeleteQuery, DescriptorSequences, InsertQuery, QueryTree, SelectQuery,
    SequenceResolver, UpdateQuery,
};
use crate::config::RenderConfig;
use crate::error::RenderResult;

pub use context::{IdentityCarry, ParamBinding, RenderContext};
pub use dialect::Dialect;
pub use provider::{NativeType, ProviderParameter, TypedParameter, describe_parameter};
pub use sequencer::{CommandBatch, CommandSequencer, RenderedStatement, StatementPurpose};
pub use template::Template;
pub use traits::{DummyTable, Pagination, PaginationPlacement, SqlGenerator, escape_identifier};

/// Renders query trees for one dialect.
///
/// A renderer holds no per-operation state: every call to
/// [`Renderer::render`] works on a fresh [`RenderContext`], so one renderer
/// can be shared between threads.
pub struct Renderer {
    config: RenderConfig,
    generator: Box<dyn SqlGenerator>,
    resolver: Box<dyn SequenceResolver + Send + Sync>,
}

impl Renderer {
    /// Renderer with default settings for `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            config: RenderConfig::for_dialect(dialect),
            generator: dialect.generator(),
            resolver: Box::new(DescriptorSequences),
        }
    }

    pub fn from_config(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self {
            generator: config.dialect.generator(),
            resolver: Box::new(DescriptorSequences),
            config,
        })
    }

    /// Replace the sequence resolver. By default sequence names are read
    /// from the table and field descriptors.
    pub fn with_resolver(mut self, resolver: impl SequenceResolver + Send + Sync + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    pub fn generator(&self) -> &dyn SqlGenerator {
        self.generator.as_ref()
    }

    /// Render every statement of the operation `tree` describes.
    pub fn render(&self, tree: &QueryTree) -> RenderResult<CommandBatch> {
        tree.validate()?;

        let mut ctx = RenderContext::new(&self.config);
        let sequencer = CommandSequencer::new(self.generator.as_ref(), self.resolver.as_ref());
        let count = sequencer.command_count(tree, &mut ctx)?;

        let mut statements = Vec::with_capacity(count);
        for index in 0..count {
            let statement = sequencer.build_command(tree, index, &mut ctx)?;
            trace!(
                dialect = self.generator.name(),
                index,
                purpose = ?statement.purpose,
                sql = %statement.sql,
                "Rendered statement"
            );
            statements.push(statement);
        }

        Ok(CommandBatch {
            kind: tree.kind(),
            statements,
        })
    }

    /// Render `tree` as one script, statements separated by `;`.
    pub fn render_sql(&self, tree: &QueryTree) -> RenderResult<String> {
        self.render(tree).map(|batch| batch.to_script())
    }
}

/// Trait for converting query nodes to SQL.
pub trait ToSql {
    /// Convert this node to SQL using the generic dialect.
    fn to_sql(&self) -> RenderResult<String> {
        self.to_sql_with_dialect(Dialect::default())
    }

    /// Convert this node to SQL for a specific dialect.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> RenderResult<String>;
}

impl ToSql for QueryTree {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> RenderResult<String> {
        Renderer::new(dialect).render_sql(self)
    }
}

macro_rules! impl_to_sql {
    ($($ty:ty),*) => {
        $(
            impl ToSql for $ty {
                fn to_sql_with_dialect(&self, dialect: Dialect) -> RenderResult<String> {
                    QueryTree::from(self.clone()).to_sql_with_dialect(dialect)
                }
            }
        )*
    };
}

impl_to_sql!(SelectQuery, InsertQuery, UpdateQuery, DeleteQuery, CreateTableQuery);
