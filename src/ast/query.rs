//! The query tree: one root per logical operation.

use serde::{Deserialize, Serialize};

use super::expr::{ColumnRef, Expr};
use super::predicate::Predicate;
use super::table::Table;
use crate::error::{RenderError, RenderResult};

/// Root kind of a query tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
    CreateTable,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::Select => write!(f, "SELECT"),
            QueryKind::Insert => write!(f, "INSERT"),
            QueryKind::Update => write!(f, "UPDATE"),
            QueryKind::Delete => write!(f, "DELETE"),
            QueryKind::CreateTable => write!(f, "CREATE TABLE"),
        }
    }
}

/// A complete logical operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryTree {
    Select(SelectQuery),
    Insert(InsertQuery),
    Update(UpdateQuery),
    Delete(DeleteQuery),
    CreateTable(CreateTableQuery),
}

impl QueryTree {
    pub fn kind(&self) -> QueryKind {
        match self {
            QueryTree::Select(_) => QueryKind::Select,
            QueryTree::Insert(_) => QueryKind::Insert,
            QueryTree::Update(_) => QueryKind::Update,
            QueryTree::Delete(_) => QueryKind::Delete,
            QueryTree::CreateTable(_) => QueryKind::CreateTable,
        }
    }

    /// Check that every qualified column reference points at a table in
    /// scope and that INSERT/UPDATE targets name real fields.
    pub fn validate(&self) -> RenderResult<()> {
        match self {
            QueryTree::Select(q) => q.validate(),
            QueryTree::Insert(q) => {
                check_items(&q.into, &q.items)?;
                for item in &q.items {
                    check_scope(&[&q.into], &item.value)?;
                }
                Ok(())
            }
            QueryTree::Update(q) => {
                if q.items.is_empty() {
                    return Err(RenderError::contract(format!(
                        "UPDATE of table '{}' has no SET items",
                        q.table.name
                    )));
                }
                check_items(&q.table, &q.items)?;
                let mut scope = vec![&q.table];
                for source in &q.from {
                    source.collect_tables(&mut scope);
                }
                let mut refs = Vec::new();
                for item in &q.items {
                    item.value.column_refs(&mut refs);
                }
                if let Some(w) = &q.where_ {
                    w.column_refs(&mut refs);
                }
                check_refs(&scope, &refs)
            }
            QueryTree::Delete(q) => {
                let mut refs = Vec::new();
                if let Some(w) = &q.where_ {
                    w.column_refs(&mut refs);
                }
                check_refs(&[&q.table], &refs)
            }
            QueryTree::CreateTable(q) => {
                if q.table.fields.is_empty() {
                    return Err(RenderError::contract(format!(
                        "CREATE TABLE '{}' has no columns",
                        q.table.name
                    )));
                }
                Ok(())
            }
        }
    }
}

fn check_items(table: &Table, items: &[SetItem]) -> RenderResult<()> {
    for item in items {
        if table.get_field(&item.column).is_none() {
            return Err(RenderError::contract(format!(
                "column '{}' does not belong to table '{}'",
                item.column, table.name
            )));
        }
    }
    Ok(())
}

fn check_scope(scope: &[&Table], expr: &Expr) -> RenderResult<()> {
    let mut refs = Vec::new();
    expr.column_refs(&mut refs);
    check_refs(scope, &refs)
}

fn check_refs(scope: &[&Table], refs: &[&ColumnRef]) -> RenderResult<()> {
    for col in refs {
        if let Some(qualifier) = &col.table {
            let known = scope
                .iter()
                .any(|t| t.reference_name() == qualifier.as_str() || t.name == *qualifier);
            if !known {
                return Err(RenderError::contract(format!(
                    "column '{}.{}' references a table outside the query",
                    qualifier, col.name
                )));
            }
        }
    }
    Ok(())
}

/// A projected column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectColumn {
    pub expr: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl SelectColumn {
    pub fn expr(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn aliased(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub table: Table,
    pub on: Predicate,
}

/// A FROM entry: a table plus the joins hanging off it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSource {
    pub table: Table,
    #[serde(default)]
    pub joins: Vec<Join>,
}

impl TableSource {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            joins: Vec::new(),
        }
    }

    pub fn join(mut self, kind: JoinKind, table: Table, on: Predicate) -> Self {
        self.joins.push(Join { kind, table, on });
        self
    }

    fn collect_tables<'a>(&'a self, out: &mut Vec<&'a Table>) {
        out.push(&self.table);
        for join in &self.joins {
            out.push(&join.table);
        }
    }
}

impl From<Table> for TableSource {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub expr: Expr,
    #[serde(default)]
    pub desc: bool,
}

impl OrderBy {
    pub fn asc(expr: Expr) -> Self {
        Self { expr, desc: false }
    }

    pub fn desc(expr: Expr) -> Self {
        Self { expr, desc: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectQuery {
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub columns: Vec<SelectColumn>,
    #[serde(default)]
    pub from: Vec<TableSource>,
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_: Option<Predicate>,
    #[serde(default)]
    pub group_by: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<Predicate>,
    #[serde(default)]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<Expr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<Expr>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn column(mut self, expr: Expr) -> Self {
        self.columns.push(SelectColumn::expr(expr));
        self
    }

    pub fn column_as(mut self, expr: Expr, alias: impl Into<String>) -> Self {
        self.columns.push(SelectColumn::aliased(expr, alias));
        self
    }

    pub fn from(mut self, source: impl Into<TableSource>) -> Self {
        self.from.push(source.into());
        self
    }

    pub fn where_(mut self, predicate: Predicate) -> Self {
        self.where_ = Some(match self.where_.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group_by.push(expr);
        self
    }

    pub fn having(mut self, predicate: Predicate) -> Self {
        self.having = Some(predicate);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn take(mut self, expr: Expr) -> Self {
        self.take = Some(expr);
        self
    }

    pub fn skip(mut self, expr: Expr) -> Self {
        self.skip = Some(expr);
        self
    }

    fn validate(&self) -> RenderResult<()> {
        let mut scope = Vec::new();
        for source in &self.from {
            source.collect_tables(&mut scope);
        }
        let mut refs = Vec::new();
        for col in &self.columns {
            col.expr.column_refs(&mut refs);
        }
        for source in &self.from {
            for join in &source.joins {
                join.on.column_refs(&mut refs);
            }
        }
        if let Some(w) = &self.where_ {
            w.column_refs(&mut refs);
        }
        for g in &self.group_by {
            g.column_refs(&mut refs);
        }
        if let Some(h) = &self.having {
            h.column_refs(&mut refs);
        }
        for o in &self.order_by {
            o.expr.column_refs(&mut refs);
        }
        check_refs(&scope, &refs)
    }
}

/// `column = value` assignment used by INSERT and UPDATE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetItem {
    pub column: String,
    pub value: Expr,
}

impl SetItem {
    pub fn new(column: impl Into<String>, value: Expr) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertQuery {
    pub into: Table,
    #[serde(default)]
    pub items: Vec<SetItem>,
    /// The caller wants the generated identity value back.
    #[serde(default)]
    pub with_identity: bool,
}

impl InsertQuery {
    pub fn new(into: Table) -> Self {
        Self {
            into,
            items: Vec::new(),
            with_identity: false,
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: Expr) -> Self {
        self.items.push(SetItem::new(column, value));
        self
    }

    pub fn with_identity(mut self) -> Self {
        self.with_identity = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateQuery {
    pub table: Table,
    #[serde(default)]
    pub items: Vec<SetItem>,
    #[serde(default)]
    pub from: Vec<TableSource>,
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_: Option<Predicate>,
}

impl UpdateQuery {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            items: Vec::new(),
            from: Vec::new(),
            where_: None,
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: Expr) -> Self {
        self.items.push(SetItem::new(column, value));
        self
    }

    pub fn from(mut self, source: impl Into<TableSource>) -> Self {
        self.from.push(source.into());
        self
    }

    pub fn where_(mut self, predicate: Predicate) -> Self {
        self.where_ = Some(predicate);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteQuery {
    pub table: Table,
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_: Option<Predicate>,
}

impl DeleteQuery {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            where_: None,
        }
    }

    pub fn where_(mut self, predicate: Predicate) -> Self {
        self.where_ = Some(predicate);
        self
    }
}

/// An explicit primary key definition. When absent, CREATE TABLE derives
/// the key from the fields' `primary_key` positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableQuery {
    pub table: Table,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,
}

impl CreateTableQuery {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            primary_key: None,
        }
    }

    pub fn primary_key(mut self, name: Option<&str>, fields: &[&str]) -> Self {
        self.primary_key = Some(PrimaryKey {
            name: name.map(str::to_string),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
        self
    }
}

impl From<SelectQuery> for QueryTree {
    fn from(q: SelectQuery) -> Self {
        QueryTree::Select(q)
    }
}

impl From<InsertQuery> for QueryTree {
    fn from(q: InsertQuery) -> Self {
        QueryTree::Insert(q)
    }
}

impl From<UpdateQuery> for QueryTree {
    fn from(q: UpdateQuery) -> Self {
        QueryTree::Update(q)
    }
}

impl From<DeleteQuery> for QueryTree {
    fn from(q: DeleteQuery) -> Self {
        QueryTree::Delete(q)
    }
}

impl From<CreateTableQuery> for QueryTree {
    fn from(q: CreateTableQuery) -> Self {
        QueryTree::CreateTable(q)
    }
}
