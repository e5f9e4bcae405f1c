//! DDL (CREATE TABLE) generation.

use super::context::RenderContext;
use super::expressions::table_name;
use super::traits::SqlGenerator;
use super::types::column_type;
use crate::ast::CreateTableQuery;
use crate::error::RenderResult;

/// Generate CREATE TABLE SQL.
///
/// Identity fields take the dialect's auto-increment token instead of their
/// declared type. Nullability markers appear only where the field disagrees
/// with the configured default. The primary key comes from the explicit
/// definition when present, otherwise from the fields' key positions.
pub fn build_create_table(
    query: &CreateTableQuery,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    let table = &query.table;
    let policy = ctx.default_nullable();

    let mut defs = Vec::with_capacity(table.fields.len());
    for field in &table.fields {
        defs.push((
            generator.quote_identifier(&field.name),
            column_type(generator, field)?,
            generator.null_attribute(field, policy),
        ));
    }

    let key = match &query.primary_key {
        Some(pk) => Some((
            pk.name.clone(),
            pk.fields
                .iter()
                .map(|f| generator.quote_identifier(f))
                .collect::<Vec<_>>(),
        )),
        None => {
            let fields = table.primary_key_fields();
            if fields.is_empty() {
                None
            } else {
                Some((
                    None,
                    fields
                        .iter()
                        .map(|f| generator.quote_identifier(&f.name))
                        .collect(),
                ))
            }
        }
    };
    let key_clause = match key {
        Some((name, fields)) => {
            let name = name.unwrap_or_else(|| format!("PK_{}", table.name));
            Some(generator.primary_key_clause(&name, &fields)?)
        }
        None => None,
    };

    let (name_width, type_width) = if ctx.is_pretty() {
        (
            defs.iter().map(|d| d.0.len()).max().unwrap_or(0),
            defs.iter().map(|d| d.1.len()).max().unwrap_or(0),
        )
    } else {
        (0, 0)
    };

    ctx.write("CREATE TABLE ");
    ctx.write(&table_name(table, generator));
    ctx.open_list();
    for (i, (name, ty, null)) in defs.iter().enumerate() {
        if i > 0 {
            ctx.separator();
        }
        let line = format!(
            "{:<nw$} {:<tw$} {}",
            name,
            ty,
            null,
            nw = name_width,
            tw = type_width
        );
        // Pretty output keeps a blank null marker so columns stay aligned.
        if ctx.is_pretty() && !null.is_empty() {
            ctx.write(&line);
        } else {
            ctx.write(line.trim_end());
        }
    }
    if let Some(clause) = key_clause {
        if !defs.is_empty() {
            ctx.separator();
        }
        ctx.write(&clause);
    }
    ctx.close_list();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DataKind, Field, SqlDataType, Table};
    use crate::config::{DefaultNullable, RenderConfig};
    use crate::error::RenderError;
    use crate::transpiler::Dialect;

    fn render(query: &CreateTableQuery, config: RenderConfig) -> RenderResult<String> {
        let generator = config.dialect.generator();
        let mut ctx = RenderContext::new(&config);
        build_create_table(query, generator.as_ref(), &mut ctx)?;
        Ok(ctx.finish_statement().0)
    }

    fn person() -> Table {
        Table::new("person")
            .field(Field::new("id", DataKind::Int32).identity().primary_key(1))
            .field(Field::new("name", SqlDataType::with_length(DataKind::NVarChar, 50)))
            .field(Field::new("age", DataKind::Int16).not_null())
    }

    #[test]
    fn test_generic_create_table() {
        let sql = render(&CreateTableQuery::new(person()), RenderConfig::default()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE person (id Int NOT NULL, name NVarChar(50) NULL, age SmallInt NOT NULL, \
             CONSTRAINT PK_person PRIMARY KEY (id))"
        );
    }

    #[test]
    fn test_default_null_policy() {
        let config = RenderConfig::default().default_nullable(DefaultNullable::Null);
        let sql = render(&CreateTableQuery::new(person()), config).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE person (id Int NOT NULL, name NVarChar(50), age SmallInt NOT NULL, \
             CONSTRAINT PK_person PRIMARY KEY (id))"
        );
    }

    #[test]
    fn test_default_not_null_policy() {
        let config = RenderConfig::default().default_nullable(DefaultNullable::NotNull);
        let sql = render(&CreateTableQuery::new(person()), config).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE person (id Int, name NVarChar(50) NULL, age SmallInt, \
             CONSTRAINT PK_person PRIMARY KEY (id))"
        );
    }

    #[test]
    fn test_pretty_alignment() {
        let table = Table::new("t")
            .field(Field::new("id", DataKind::Int64).not_null())
            .field(Field::new("label", DataKind::Text));
        let config = RenderConfig::default()
            .pretty(true)
            .default_nullable(DefaultNullable::Null);
        let sql = render(&CreateTableQuery::new(table), config).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE t\n(\n    id    BigInt NOT NULL,\n    label Text\n)"
        );
    }

    #[test]
    fn test_empty_explicit_key_is_contract_violation() {
        let q = CreateTableQuery::new(person()).primary_key(Some("pk"), &[]);
        let err = render(&q, RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::ContractViolation(_)));
    }

    #[test]
    fn test_explicit_key_name() {
        let q = CreateTableQuery::new(Table::new("t").field(Field::new("a", DataKind::Int32).not_null()))
            .primary_key(Some("pk_t"), &["a"]);
        let sql = render(&q, RenderConfig::for_dialect(Dialect::Postgres)).unwrap();
        assert_eq!(sql, "CREATE TABLE t (a integer NOT NULL, CONSTRAINT pk_t PRIMARY KEY (a))");
    }
}
