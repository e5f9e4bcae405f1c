//! DML (Data Manipulation Language) SQL generation.
//!
//! SELECT, INSERT, UPDATE and DELETE builders plus the clause pieces they
//! share.

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

use super::conditions::build_predicate;
use super::context::RenderContext;
use super::expressions::table_ref;
use super::traits::SqlGenerator;
use crate::ast::{Predicate, TableSource};
use crate::error::RenderResult;

/// `FROM a x INNER JOIN b y ON ..., c`
pub(crate) fn build_from(
    sources: &[TableSource],
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    ctx.clause("FROM");
    for (i, source) in sources.iter().enumerate() {
        if i > 0 {
            ctx.separator();
        }
        ctx.write(&table_ref(&source.table, generator));
        for join in &source.joins {
            ctx.indent();
            ctx.newline();
            ctx.write(join.kind.as_str());
            ctx.write(" ");
            ctx.write(&table_ref(&join.table, generator));
            ctx.write(" ON ");
            build_predicate(&join.on, generator, ctx)?;
            ctx.dedent();
        }
    }
    ctx.close_clause();
    Ok(())
}

/// A predicate clause such as WHERE or HAVING.
pub(crate) fn build_condition_clause(
    keyword: &str,
    predicate: &Predicate,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    ctx.clause(keyword);
    build_predicate(predicate, generator, ctx)?;
    ctx.close_clause();
    Ok(())
}
