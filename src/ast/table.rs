//! Table and field descriptors, plus the sequence-name resolver seam.

use serde::{Deserialize, Serialize};

use super::types::{DataKind, SqlDataType};

fn default_true() -> bool {
    true
}

/// A column descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: SqlDataType,
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Server-generated on insert (auto-increment or sequence-backed).
    #[serde(default)]
    pub identity: bool,
    /// Position inside the primary key, if the field is part of it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<u32>,
    /// Explicit database sequence feeding this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: impl Into<SqlDataType>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            identity: false,
            primary_key: None,
            sequence: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark as identity. Identity fields are never nullable.
    pub fn identity(mut self) -> Self {
        self.identity = true;
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self, order: u32) -> Self {
        self.primary_key = Some(order);
        self.nullable = false;
        self
    }

    pub fn sequence(mut self, name: impl Into<String>) -> Self {
        self.sequence = Some(name.into());
        self
    }

    pub fn kind(&self) -> DataKind {
        self.data_type.kind
    }

    /// Effective nullability. Identity and primary key columns are never
    /// nullable, whatever the `nullable` flag says.
    pub fn is_nullable(&self) -> bool {
        self.nullable && !self.identity && self.primary_key.is_none()
    }
}

/// A table descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Table-level sequence metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            alias: None,
            fields: Vec::new(),
            sequence: None,
        }
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn sequence(mut self, name: impl Into<String>) -> Self {
        self.sequence = Some(name.into());
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The first identity field, in declaration order.
    pub fn identity_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.identity)
    }

    /// Primary key fields ordered by their key position.
    pub fn primary_key_fields(&self) -> Vec<&Field> {
        let mut keys: Vec<&Field> = self
            .fields
            .iter()
            .filter(|f| f.primary_key.is_some())
            .collect();
        keys.sort_by_key(|f| f.primary_key);
        keys
    }

    /// The name the table is referred to by inside a query.
    pub fn reference_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Resolves sequence names for identity fields.
///
/// The metadata layer decides where sequence names come from; the renderer
/// only asks.
pub trait SequenceResolver {
    /// Sequence explicitly feeding `field`, if any.
    fn field_sequence(&self, table: &Table, field: &Field) -> Option<String>;

    /// Sequence associated with the table as a whole, if any.
    fn table_sequence(&self, table: &Table) -> Option<String>;
}

/// Reads sequence names straight from the descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorSequences;

impl SequenceResolver for DescriptorSequences {
    fn field_sequence(&self, _table: &Table, field: &Field) -> Option<String> {
        field.sequence.clone()
    }

    fn table_sequence(&self, table: &Table) -> Option<String> {
        table.sequence.clone().or_else(|| {
            table
                .identity_field()
                .and_then(|f| f.sequence.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> Table {
        Table::new("orders")
            .field(Field::new("line", DataKind::Int16).primary_key(2))
            .field(Field::new("id", DataKind::Int32).identity().primary_key(1).sequence("orders_seq"))
            .field(Field::new("note", DataKind::NVarChar))
    }

    #[test]
    fn test_identity_field() {
        let t = orders();
        assert_eq!(t.identity_field().map(|f| f.name.as_str()), Some("id"));
        assert!(!t.identity_field().map(|f| f.nullable).unwrap_or(true));
    }

    #[test]
    fn test_identity_from_json_is_not_nullable() {
        let field: Field =
            serde_json::from_str(r#"{"name":"id","data_type":{"kind":"Int32"},"identity":true}"#)
                .unwrap();
        assert!(field.nullable);
        assert!(!field.is_nullable());

        let plain: Field =
            serde_json::from_str(r#"{"name":"note","data_type":{"kind":"NVarChar"}}"#).unwrap();
        assert!(plain.is_nullable());
    }

    #[test]
    fn test_primary_key_order() {
        let t = orders();
        let names: Vec<&str> = t.primary_key_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "line"]);
    }

    #[test]
    fn test_descriptor_sequences() {
        let t = orders();
        let resolver = DescriptorSequences;
        assert_eq!(resolver.table_sequence(&t).as_deref(), Some("orders_seq"));

        let bare = Table::new("logs").field(Field::new("id", DataKind::Int64).identity());
        assert_eq!(resolver.table_sequence(&bare), None);
        assert_eq!(resolver.table_sequence(&bare.clone().sequence("logs_seq")).as_deref(), Some("logs_seq"));
    }
}
