//! UPDATE SQL generation.

use tracing::warn;

use super::{build_condition_clause, build_from};
use crate::ast::UpdateQuery;
use crate::error::RenderResult;
use crate::transpiler::context::RenderContext;
use crate::transpiler::expressions::{build_expr, table_ref};
use crate::transpiler::traits::SqlGenerator;

/// Generate UPDATE SQL.
pub fn build_update(
    query: &UpdateQuery,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    ctx.write("UPDATE ");
    ctx.write(&table_ref(&query.table, generator));

    ctx.clause("SET");
    for (i, item) in query.items.iter().enumerate() {
        if i > 0 {
            ctx.separator();
        }
        ctx.write(&generator.quote_identifier(&item.column));
        ctx.write(" = ");
        build_expr(&item.value, generator, ctx)?;
    }
    ctx.close_clause();

    if !query.from.is_empty() {
        if generator.update_allows_from() {
            build_from(&query.from, generator, ctx)?;
        } else {
            warn!(
                dialect = generator.name(),
                table = %query.table.name,
                "FROM clause omitted from UPDATE"
            );
        }
    }

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

    fn render(query: &UpdateQuery, dialect: Dialect) -> String {
        let generator = dialect.generator();
        let mut ctx = RenderContext::new(&RenderConfig::for_dialect(dialect));
        build_update(query, generator.as_ref(), &mut ctx).unwrap();
        ctx.finish_statement().0
    }

    fn query() -> UpdateQuery {
        UpdateQuery::new(Table::new("person"))
            .set("name", Expr::qualified("src", "name"))
            .from(Table::new("staging").alias("src"))
            .where_(Expr::qualified("src", "id").eq(Expr::column("id")))
    }

    #[test]
    fn test_update_with_from() {
        assert_eq!(
            render(&query(), Dialect::Postgres),
            "UPDATE person SET name = src.name FROM staging src WHERE src.id = id"
        );
    }

    #[test]
    fn test_from_dropped_where_forbidden() {
        assert_eq!(
            render(&query(), Dialect::Informix),
            "UPDATE person SET name = src.name WHERE src.id = id"
        );
    }

    #[test]
    fn test_multiple_assignments() {
        let q = UpdateQuery::new(Table::new("person"))
            .set("a", Expr::param("a"))
            .set("b", Expr::column("b").add(Expr::lit(1)));
        assert_eq!(render(&q, Dialect::Generic), "UPDATE person SET a = ?, b = b + 1");
    }
}
