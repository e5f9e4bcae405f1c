use pretty_assertions::assert_eq;
use sqlweave::prelude::*;

const INSERT_JSON: &str = r#"{
    "Insert": {
        "into": {
            "name": "customer",
            "sequence": "customer_seq",
            "fields": [
                { "name": "id", "data_type": { "kind": "Int32" }, "identity": true, "nullable": false },
                { "name": "name", "data_type": { "kind": "NVarChar", "length": 80 } }
            ]
        },
        "items": [
            { "column": "name", "value": { "Param": { "name": "name", "value": { "String": "Acme" } } } }
        ],
        "with_identity": true
    }
}"#;

#[test]
fn test_json_tree_to_informix_batch() {
    let tree: QueryTree = serde_json::from_str(INSERT_JSON).expect("valid query tree");
    let batch = sqlweave::render(&tree, Dialect::Informix).expect("renders");

    assert_eq!(batch.kind, QueryKind::Insert);
    assert_eq!(
        batch.to_script(),
        "INSERT INTO customer (id, name) VALUES (customer_seq.nextval, ?);\n\
         SELECT customer_seq.currval FROM systables where tabid = 1;\n\
         SELECT customer_seq.currval FROM systables where tabid = 1"
    );
    let param = &batch.statements[0].params[0];
    assert_eq!(param.marker, "?");
    assert_eq!(param.command_name, ":name");
    assert_eq!(param.value, Some(Value::String("Acme".to_string())));
}

#[test]
fn test_toml_config_drives_renderer() {
    let config = RenderConfig::from_toml_str(
        r#"
        dialect = "informix"
        sequences = false
        "#,
    )
    .expect("valid config");
    let renderer = Renderer::from_config(config).expect("renderer");
    let tree: QueryTree = serde_json::from_str(INSERT_JSON).expect("valid query tree");

    let batch = renderer.render(&tree).expect("renders");
    assert_eq!(batch.len(), 2);
    assert_eq!(
        batch.sql(1),
        Some("SELECT DBINFO('sqlca.sqlerrd1') FROM systables where tabid = 1")
    );
}

#[test]
fn test_pagination_override() {
    let config = RenderConfig::from_toml_str(
        r#"
        dialect = "generic"

        [pagination]
        take = "FETCH FIRST {0} ROWS ONLY"
        "#,
    )
    .expect("valid config");
    let renderer = Renderer::from_config(config).expect("renderer");
    let q = SelectQuery::new()
        .column(Expr::column("id"))
        .from(Table::new("customer"))
        .take(Expr::lit(3));
    assert_eq!(
        renderer.render_sql(&q.into()).expect("renders"),
        "SELECT id FROM customer FETCH FIRST 3 ROWS ONLY"
    );
}

#[test]
fn test_same_tree_every_dialect() {
    let q = SelectQuery::new()
        .column(Expr::column("id"))
        .from(Table::new("customer"))
        .where_(Expr::column("name").like(Expr::param("pattern")));

    let rendered: Vec<(Dialect, String)> = Dialect::ALL
        .iter()
        .map(|d| (*d, q.to_sql_with_dialect(*d).expect("renders")))
        .collect();

    assert_eq!(
        rendered,
        vec![
            (Dialect::Generic, "SELECT id FROM customer WHERE name LIKE ?".to_string()),
            (Dialect::Informix, "SELECT id FROM customer WHERE name LIKE ?".to_string()),
            (Dialect::Postgres, "SELECT id FROM customer WHERE name LIKE $1".to_string()),
            (Dialect::SQLite, "SELECT id FROM customer WHERE name LIKE ?".to_string()),
            (
                Dialect::SqlServer,
                "SELECT [id] FROM [customer] WHERE [name] LIKE @pattern".to_string()
            ),
            (
                Dialect::Oracle,
                "SELECT \"id\" FROM \"customer\" WHERE \"name\" LIKE :pattern".to_string()
            ),
            (
                Dialect::MySQL,
                "SELECT `id` FROM `customer` WHERE `name` LIKE ?".to_string()
            ),
        ]
    );
}

#[test]
fn test_unsupported_is_reported_per_dialect() {
    let q = CreateTableQuery::new(
        Table::new("t").field(Field::new("x", SqlDataType::new(DataKind::Undefined))),
    );
    let err = q.to_sql_with_dialect(Dialect::Informix).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unsupported construct for informix: data type Undefined"
    );
}

#[test]
fn test_json_identity_column_is_not_null() {
    let json = r#"{
        "CreateTable": {
            "table": {
                "name": "t",
                "fields": [
                    { "name": "id", "data_type": { "kind": "Int32" }, "identity": true },
                    { "name": "note", "data_type": { "kind": "NVarChar", "length": 20 } }
                ]
            }
        }
    }"#;
    let tree: QueryTree = serde_json::from_str(json).expect("valid query tree");
    assert_eq!(
        tree.to_sql().unwrap(),
        "CREATE TABLE t (id Int NOT NULL, note NVarChar(20) NULL)"
    );
}
