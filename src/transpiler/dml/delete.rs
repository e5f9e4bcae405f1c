//! DELETE SQL generation.

use super::build_condition_clause;
use crate::ast::DeleteQuery;
use crate::error::RenderResult;
use crate::transpiler::context::RenderContext;
use crate::transpiler::expressions::table_ref;
use crate::transpiler::traits::SqlGenerator;

/// Generate DELETE SQL.
pub fn build_delete(
    query: &DeleteQuery,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    ctx.write("DELETE FROM ");
    ctx.write(&table_ref(&query.table, generator));
    if let Some(w) = &query.where_ {
        build_condition_clause("WHERE", w, generator, ctx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Table};
    use crate::config::RenderConfig;
    use crate::transpiler::Dialect;

    #[test]
    fn test_delete_with_where() {
        let q = DeleteQuery::new(Table::new("person"))
            .where_(Expr::column("id").eq(Expr::param("id")));
        let generator = Dialect::SqlServer.generator();
        let mut ctx = RenderContext::new(&RenderConfig::for_dialect(Dialect::SqlServer));
        build_delete(&q, generator.as_ref(), &mut ctx).unwrap();
        assert_eq!(ctx.finish_statement().0, "DELETE FROM [person] WHERE [id] = @id");
    }

    #[test]
    fn test_delete_everything() {
        let q = DeleteQuery::new(Table::new("log"));
        let generator = Dialect::Generic.generator();
        let mut ctx = RenderContext::new(&RenderConfig::default());
        build_delete(&q, generator.as_ref(), &mut ctx).unwrap();
        assert_eq!(ctx.finish_statement().0, "DELETE FROM log");
    }
}
