//! Command sequencing: how many statements one logical operation needs and
//! what each of them renders.

use serde::Serialize;
use tracing::{debug, warn};

use super::context::{IdentityCarry, ParamBinding, RenderContext};
use super::ddl::build_create_table;
use super::dml::{delete::build_delete, insert::build_insert, select::build_select, update::build_update};
use super::traits::{SqlGenerator, table_sequence};
use crate::ast::{InsertQuery, QueryKind, QueryTree, SequenceResolver};
use crate::error::{RenderError, RenderResult};

/// Why a statement is in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "purpose", rename_all = "snake_case")]
pub enum StatementPurpose {
    /// The logical operation itself.
    Operation,
    /// The operation, returning the generated identity inline.
    OperationReturningIdentity { field: String },
    /// Settles sequence state ahead of the read.
    SequenceTouch { sequence: String },
    /// Reads the generated identity value.
    IdentityRetrieval { field: String },
}

impl StatementPurpose {
    pub fn is_identity_follow_up(&self) -> bool {
        matches!(
            self,
            StatementPurpose::SequenceTouch { .. } | StatementPurpose::IdentityRetrieval { .. }
        )
    }
}

/// One physical SQL statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedStatement {
    pub sql: String,
    #[serde(flatten)]
    pub purpose: StatementPurpose,
    pub params: Vec<ParamBinding>,
}

/// Ordered statements for one logical operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandBatch {
    pub kind: QueryKind,
    pub statements: Vec<RenderedStatement>,
}

impl CommandBatch {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// SQL of the statement at `index`.
    pub fn sql(&self, index: usize) -> Option<&str> {
        self.statements.get(index).map(|s| s.sql.as_str())
    }

    /// All statements joined into one script.
    pub fn to_script(&self) -> String {
        self.statements
            .iter()
            .map(|s| s.sql.as_str())
            .collect::<Vec<_>>()
            .join(";\n")
    }
}

/// Decides the statement plan for an operation and renders each statement.
pub struct CommandSequencer<'a> {
    generator: &'a dyn SqlGenerator,
    resolver: &'a dyn SequenceResolver,
}

impl<'a> CommandSequencer<'a> {
    pub fn new(generator: &'a dyn SqlGenerator, resolver: &'a dyn SequenceResolver) -> Self {
        Self {
            generator,
            resolver,
        }
    }

    /// Number of statements `tree` needs. Records the identity carry in
    /// `ctx`, replacing whatever a previous operation left there.
    pub fn command_count(&self, tree: &QueryTree, ctx: &mut RenderContext) -> RenderResult<usize> {
        ctx.reset_identity();

        let carry = match tree {
            QueryTree::Insert(insert) if insert.with_identity => Some(self.plan_identity(insert, ctx)?),
            _ => None,
        };
        let count = carry.as_ref().map_or(1, IdentityCarry::statement_count);

        debug!(
            dialect = self.generator.name(),
            kind = %tree.kind(),
            statements = count,
            carry = ?carry,
            "Planned command batch"
        );
        ctx.set_identity(carry);
        Ok(count)
    }

    fn plan_identity(&self, insert: &InsertQuery, ctx: &RenderContext) -> RenderResult<IdentityCarry> {
        let table = &insert.into;
        let field = table.identity_field().ok_or_else(|| {
            RenderError::contract(format!(
                "identity requested for table '{}' which has no identity field",
                table.name
            ))
        })?;
        let field_name = field.name.clone();

        if let Some(sequence) = table_sequence(table, self.resolver) {
            if ctx.sequences_enabled() && self.generator.supports_sequences() {
                return Ok(IdentityCarry::Sequence {
                    field: field_name,
                    sequence,
                });
            }
            warn!(
                dialect = self.generator.name(),
                table = %table.name,
                sequence = %sequence,
                "Sequences disabled; ignoring sequence metadata"
            );
        }

        if self.generator.supports_identity_returning() {
            Ok(IdentityCarry::Inline { field: field_name })
        } else {
            Ok(IdentityCarry::Native { field: field_name })
        }
    }

    /// Render statement `index` of the plan recorded by
    /// [`CommandSequencer::command_count`].
    pub fn build_command(
        &self,
        tree: &QueryTree,
        index: usize,
        ctx: &mut RenderContext,
    ) -> RenderResult<RenderedStatement> {
        ctx.begin_statement(index);
        let carry = ctx.identity().cloned();

        let purpose = match (index, &carry) {
            (0, Some(IdentityCarry::Inline { field })) => {
                self.build_operation(tree, ctx)?;
                StatementPurpose::OperationReturningIdentity {
                    field: field.clone(),
                }
            }
            (0, _) => {
                self.build_operation(tree, ctx)?;
                StatementPurpose::Operation
            }
            (1, Some(IdentityCarry::Native { field })) => {
                ctx.write(&self.generator.last_identity_query()?);
                StatementPurpose::IdentityRetrieval {
                    field: field.clone(),
                }
            }
            (1, Some(IdentityCarry::Sequence { sequence, .. })) => {
                ctx.write(&self.generator.sequence_touch_query(sequence)?);
                StatementPurpose::SequenceTouch {
                    sequence: sequence.clone(),
                }
            }
            (2, Some(IdentityCarry::Sequence { field, sequence })) => {
                ctx.write(&self.generator.sequence_current_value_query(sequence)?);
                StatementPurpose::IdentityRetrieval {
                    field: field.clone(),
                }
            }
            _ => {
                return Err(RenderError::contract(format!(
                    "statement {} is outside the planned batch",
                    index
                )));
            }
        };

        let (sql, params) = ctx.finish_statement();
        Ok(RenderedStatement {
            sql,
            purpose,
            params,
        })
    }

    fn build_operation(&self, tree: &QueryTree, ctx: &mut RenderContext) -> RenderResult<()> {
        match tree {
            QueryTree::Select(q) => build_select(q, self.generator, ctx),
            QueryTree::Insert(q) => build_insert(q, self.generator, self.resolver, ctx),
            QueryTree::Update(q) => build_update(q, self.generator, ctx),
            QueryTree::Delete(q) => build_delete(q, self.generator, ctx),
            QueryTree::CreateTable(q) => build_create_table(q, self.generator, ctx),
        }
    }
}
