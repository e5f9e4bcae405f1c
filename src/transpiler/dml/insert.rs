//! INSERT SQL generation.

use crate::ast::{Expr, InsertQuery, SequenceResolver};
use crate::error::RenderResult;
use crate::transpiler::context::{IdentityCarry, RenderContext};
use crate::transpiler::expressions::{build_expr, table_name};
use crate::transpiler::traits::SqlGenerator;

/// Generate INSERT SQL.
///
/// When the dialect feeds identity columns from a sequence, the identity
/// column is added with the dialect's next-value expression unless the
/// caller set it explicitly. When the sequencer chose inline retrieval a
/// RETURNING clause closes the statement.
pub fn build_insert(
    query: &InsertQuery,
    generator: &dyn SqlGenerator,
    resolver: &dyn SequenceResolver,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    let table = &query.into;

    let mut columns: Vec<(&str, Expr)> = Vec::with_capacity(query.items.len() + 1);
    if let Some(identity) = table.identity_field() {
        let explicit = query.items.iter().any(|i| i.column == identity.name);
        if !explicit && ctx.sequences_enabled() && generator.supports_sequences() {
            if let Some(expr) = generator.identity_expression(table, resolver)? {
                columns.push((identity.name.as_str(), expr));
            }
        }
    }
    for item in &query.items {
        columns.push((item.column.as_str(), item.value.clone()));
    }

    ctx.write("INSERT INTO ");
    ctx.write(&table_name(table, generator));

    if columns.is_empty() {
        ctx.newline();
        ctx.write("DEFAULT VALUES");
    } else {
        ctx.open_list();
        for (i, (name, _)) in columns.iter().enumerate() {
            if i > 0 {
                ctx.separator();
            }
            ctx.write(&generator.quote_identifier(name));
        }
        ctx.close_list();

        ctx.newline();
        ctx.write("VALUES");
        ctx.open_list();
        for (i, (_, value)) in columns.iter().enumerate() {
            if i > 0 {
                ctx.separator();
            }
            build_expr(value, generator, ctx)?;
        }
        ctx.close_list();
    }

    let inline = match ctx.identity() {
        Some(IdentityCarry::Inline { field }) => Some(field.clone()),
        _ => None,
    };
    if let Some(field) = inline.and_then(|name| table.get_field(&name)) {
        ctx.newline();
        ctx.write(&generator.returning_clause(field));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DataKind, DescriptorSequences, Field, Table};
    use crate::config::RenderConfig;
    use crate::transpiler::Dialect;

    fn render(query: &InsertQuery, config: RenderConfig) -> String {
        let generator = config.dialect.generator();
        let mut ctx = RenderContext::new(&config);
        build_insert(query, generator.as_ref(), &DescriptorSequences, &mut ctx).unwrap();
        ctx.finish_statement().0
    }

    fn person() -> Table {
        Table::new("person")
            .field(Field::new("id", DataKind::Int32).identity())
            .field(Field::new("first_name", DataKind::NVarChar))
            .field(Field::new("last_name", DataKind::NVarChar))
    }

    #[test]
    fn test_compact_insert() {
        let q = InsertQuery::new(person())
            .set("first_name", Expr::param("first"))
            .set("last_name", Expr::lit("Smith"));
        assert_eq!(
            render(&q, RenderConfig::default()),
            "INSERT INTO person (first_name, last_name) VALUES (?, 'Smith')"
        );
    }

    #[test]
    fn test_pretty_insert() {
        let q = InsertQuery::new(person()).set("first_name", Expr::param("first"));
        assert_eq!(
            render(&q, RenderConfig::default().pretty(true)),
            "INSERT INTO person\n(\n    first_name\n)\nVALUES\n(\n    ?\n)"
        );
    }

    #[test]
    fn test_sequence_identity_column_is_prepended() {
        let table = Table::new("person")
            .sequence("person_seq")
            .field(Field::new("id", DataKind::Int32).identity())
            .field(Field::new("name", DataKind::NVarChar));
        let q = InsertQuery::new(table).set("name", Expr::param("name"));
        assert_eq!(
            render(&q, RenderConfig::for_dialect(Dialect::Informix)),
            "INSERT INTO person (id, name) VALUES (person_seq.nextval, ?)"
        );
        // Sequences switched off: the server fills the column.
        assert_eq!(
            render(&q, RenderConfig::for_dialect(Dialect::Informix).sequences(false)),
            "INSERT INTO person (name) VALUES (?)"
        );
    }

    #[test]
    fn test_default_values() {
        let q = InsertQuery::new(Table::new("audit"));
        assert_eq!(
            render(&q, RenderConfig::default()),
            "INSERT INTO audit DEFAULT VALUES"
        );
    }
}
