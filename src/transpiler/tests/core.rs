//! Rendering through the public entry points.

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;

use super::person;
use crate::ast::*;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::transpiler::{Dialect, Renderer, StatementPurpose, ToSql};

#[test]
fn test_select_basic() {
    let q = SelectQuery::new()
        .column(Expr::column("id"))
        .column_as(Expr::column("name"), "person_name")
        .from(person())
        .where_(Expr::column("age").gt(Expr::param("min_age")))
        .order_by(OrderBy::asc(Expr::column("name")))
        .take(Expr::lit(10));
    let batch = Renderer::new(Dialect::Generic).render(&q.into()).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(
        batch.sql(0).unwrap(),
        "SELECT id, name AS person_name FROM person WHERE age > ? ORDER BY name LIMIT 10"
    );
    assert_eq!(batch.statements[0].purpose, StatementPurpose::Operation);
    assert_eq!(batch.statements[0].params[0].name, "min_age");
}

#[test]
fn test_to_sql_trait() {
    let q = DeleteQuery::new(Table::new("log")).where_(Expr::column("id").lt(Expr::lit(100)));
    assert_eq!(q.to_sql().unwrap(), "DELETE FROM log WHERE id < 100");

    let q = UpdateQuery::new(person()).set("age", Expr::column("age").add(Expr::lit(1)));
    assert_eq!(
        q.to_sql_with_dialect(Dialect::SqlServer).unwrap(),
        "UPDATE [person] SET [age] = [age] + 1"
    );
}

#[test]
fn test_null_rewrite_leaves_string_literals_alone() {
    let q = SelectQuery::new()
        .column(Expr::column("id"))
        .from(Table::new("t"))
        .where_(Expr::column("note").eq(Expr::lit("NULL IS NULL")))
        .where_(Expr::null().is_null())
        .where_(Expr::null().is_not_null().not());

    assert_eq!(
        q.to_sql_with_dialect(Dialect::Informix).unwrap(),
        "SELECT id FROM t WHERE note = 'NULL IS NULL' AND 1=1 AND NOT 1=0"
    );
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT id FROM t WHERE note = 'NULL IS NULL' AND NULL IS NULL AND NOT NULL IS NOT NULL"
    );
}

#[test]
fn test_out_of_scope_column_is_rejected() {
    let q = SelectQuery::new()
        .from(person())
        .where_(Expr::qualified("x", "id").eq(Expr::lit(1)));
    let err = q.to_sql().unwrap_err();
    assert!(matches!(err, RenderError::ContractViolation(_)));

    // Aliases are in scope.
    let q = SelectQuery::new()
        .from(person().alias("p"))
        .where_(Expr::qualified("p", "id").eq(Expr::lit(1)));
    assert_eq!(q.to_sql().unwrap(), "SELECT * FROM person p WHERE p.id = 1");
}

#[test]
fn test_insert_unknown_column_is_rejected() {
    let q = InsertQuery::new(person()).set("nickname", Expr::lit("Bob"));
    let err = q.to_sql().unwrap_err();
    assert!(matches!(err, RenderError::ContractViolation(_)));
}

#[test]
fn test_update_without_assignments_is_rejected() {
    let q = UpdateQuery::new(person()).where_(Expr::column("id").eq(Expr::lit(1)));
    let err = q.to_sql_with_dialect(Dialect::Informix).unwrap_err();
    assert!(matches!(err, RenderError::ContractViolation(_)));
}

#[test]
fn test_create_table_without_columns_is_rejected() {
    let err = CreateTableQuery::new(Table::new("t"))
        .to_sql_with_dialect(Dialect::Informix)
        .unwrap_err();
    assert!(matches!(err, RenderError::ContractViolation(_)));
}

#[test]
fn test_malformed_decimal_renders_nothing() {
    let q = SelectQuery::new()
        .from(Table::new("t"))
        .where_(Expr::column("a").eq(Expr::lit(Value::Decimal("1; DROP TABLE t --".to_string()))));
    let err = q.to_sql().unwrap_err();
    assert!(matches!(err, RenderError::ContractViolation(_)));

    let q = SelectQuery::new()
        .from(Table::new("t"))
        .where_(Expr::column("a").eq(Expr::lit(Value::Decimal("-4.25".to_string()))));
    assert_eq!(q.to_sql().unwrap(), "SELECT * FROM t WHERE a = -4.25");
}

#[test]
fn test_render_is_idempotent() {
    let renderer = Renderer::new(Dialect::Informix);
    let tree: QueryTree = InsertQuery::new(super::sequenced_person())
        .set("name", Expr::param("name"))
        .with_identity()
        .into();
    let first = renderer.render(&tree).unwrap();
    let second = renderer.render(&tree).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_renderer_shared_between_threads() {
    let renderer = Arc::new(Renderer::new(Dialect::Informix));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let renderer = Arc::clone(&renderer);
            thread::spawn(move || {
                let tree: QueryTree = if i % 2 == 0 {
                    InsertQuery::new(person())
                        .set("name", Expr::param("name"))
                        .with_identity()
                        .into()
                } else {
                    SelectQuery::new().from(person()).into()
                };
                renderer.render(&tree).unwrap().len()
            })
        })
        .collect();
    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![2, 1, 2, 1]);
}

#[test]
fn test_pretty_config() {
    let renderer = Renderer::from_config(RenderConfig::default().pretty(true)).unwrap();
    let q = DeleteQuery::new(Table::new("log")).where_(Expr::column("id").lt(Expr::lit(100)));
    assert_eq!(
        renderer.render_sql(&q.into()).unwrap(),
        "DELETE FROM log\nWHERE\n    id < 100"
    );
}

#[test]
fn test_from_config_validates_templates() {
    let mut config = RenderConfig::default();
    config.pagination.take = Some("TOP".to_string());
    assert!(matches!(
        Renderer::from_config(config),
        Err(RenderError::Config(_))
    ));
}

#[test]
fn test_batch_serializes_with_purpose_tags() {
    let tree: QueryTree = InsertQuery::new(person())
        .set("name", Expr::param_with("name", "Ann"))
        .with_identity()
        .into();
    let batch = Renderer::new(Dialect::Informix).render(&tree).unwrap();
    let json = serde_json::to_value(&batch).unwrap();

    assert_eq!(json["kind"], "Insert");
    assert_eq!(json["statements"][0]["purpose"], "operation");
    assert_eq!(json["statements"][0]["params"][0]["command_name"], ":name");
    assert_eq!(json["statements"][1]["purpose"], "identity_retrieval");
    assert_eq!(json["statements"][1]["field"], "id");
}

#[test]
fn test_script_joins_statements() {
    let tree: QueryTree = InsertQuery::new(person())
        .set("name", Expr::param("name"))
        .with_identity()
        .into();
    let script = Renderer::new(Dialect::SQLite).render_sql(&tree).unwrap();
    assert_eq!(
        script,
        "INSERT INTO person (name) VALUES (?);\nSELECT last_insert_rowid()"
    );
}
