use serde::{Deserialize, Serialize};

use super::predicate::{CompareOp, Predicate};
use super::values::Value;

/// Operator precedence, lowest binding first.
///
/// A child is parenthesized when its precedence is lower than the
/// precedence the enclosing operator renders it at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Precedence {
    Unknown,
    LogicalDisjunction,
    LogicalConjunction,
    LogicalNegation,
    Bitwise,
    Comparison,
    Additive,
    Subtraction,
    Multiplicative,
    Unary,
    Primary,
}

/// A column reference, optionally qualified with a table name or alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }
}

/// A named parameter placeholder. The value is carried for the execution
/// layer; rendering only emits the marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// A function call. Dialects may rewrite it before it is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

impl Function {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Case-insensitive name check.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Arithmetic and string operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Concat,
}

impl BinaryOp {
    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::Add | BinaryOp::Concat => Precedence::Additive,
            BinaryOp::Subtract => Precedence::Subtraction,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => Precedence::Multiplicative,
        }
    }

    /// Operators where `a op (b op c)` differs from `(a op b) op c`.
    pub fn is_left_associative_only(self) -> bool {
        matches!(self, BinaryOp::Subtract | BinaryOp::Divide | BinaryOp::Modulo)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Concat => "||",
        }
    }
}

/// A SQL expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Column(ColumnRef),
    Literal(Value),
    Param(Param),
    Function(Function),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Negate(Box<Expr>),
    /// Pre-rendered SQL with a caller-declared precedence.
    Raw { sql: String, precedence: Precedence },
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column(ColumnRef::new(name))
    }

    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Expr::Column(ColumnRef::qualified(table, name))
    }

    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn null() -> Self {
        Expr::Literal(Value::Null)
    }

    pub fn param(name: impl Into<String>) -> Self {
        Expr::Param(Param {
            name: name.into(),
            value: None,
        })
    }

    pub fn param_with(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Param(Param {
            name: name.into(),
            value: Some(value.into()),
        })
    }

    pub fn func(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Function(Function::new(name, args))
    }

    pub fn raw(sql: impl Into<String>, precedence: Precedence) -> Self {
        Expr::Raw {
            sql: sql.into(),
            precedence,
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Expr::Column(_) | Expr::Literal(_) | Expr::Param(_) | Expr::Function(_) => {
                Precedence::Primary
            }
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Negate(_) => Precedence::Unary,
            Expr::Raw { precedence, .. } => *precedence,
        }
    }

    /// True for the NULL literal, however it was spelled.
    pub fn is_null_literal(&self) -> bool {
        match self {
            Expr::Literal(v) => v.is_null(),
            Expr::Raw { sql, .. } => sql.trim().eq_ignore_ascii_case("NULL"),
            _ => false,
        }
    }

    fn binary(self, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    pub fn add(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Add, right)
    }

    pub fn sub(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Subtract, right)
    }

    pub fn mul(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Multiply, right)
    }

    pub fn div(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Divide, right)
    }

    pub fn concat(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Concat, right)
    }

    pub fn neg(self) -> Expr {
        Expr::Negate(Box::new(self))
    }

    // Predicate builders

    fn compare(self, op: CompareOp, right: Expr) -> Predicate {
        Predicate::Compare {
            left: self,
            op,
            right,
        }
    }

    pub fn eq(self, right: Expr) -> Predicate {
        self.compare(CompareOp::Eq, right)
    }

    pub fn ne(self, right: Expr) -> Predicate {
        self.compare(CompareOp::Ne, right)
    }

    pub fn lt(self, right: Expr) -> Predicate {
        self.compare(CompareOp::Lt, right)
    }

    pub fn le(self, right: Expr) -> Predicate {
        self.compare(CompareOp::Le, right)
    }

    pub fn gt(self, right: Expr) -> Predicate {
        self.compare(CompareOp::Gt, right)
    }

    pub fn ge(self, right: Expr) -> Predicate {
        self.compare(CompareOp::Ge, right)
    }

    pub fn like(self, pattern: Expr) -> Predicate {
        Predicate::Like {
            expr: self,
            pattern,
            escape: None,
            negated: false,
        }
    }

    pub fn not_like(self, pattern: Expr) -> Predicate {
        Predicate::Like {
            expr: self,
            pattern,
            escape: None,
            negated: true,
        }
    }

    pub fn is_null(self) -> Predicate {
        Predicate::IsNull {
            expr: self,
            negated: false,
        }
    }

    pub fn is_not_null(self) -> Predicate {
        Predicate::IsNull {
            expr: self,
            negated: true,
        }
    }

    pub fn between(self, low: Expr, high: Expr) -> Predicate {
        Predicate::Between {
            expr: self,
            low,
            high,
            negated: false,
        }
    }

    pub fn in_list(self, values: Vec<Expr>) -> Predicate {
        Predicate::InList {
            expr: self,
            values,
            negated: false,
        }
    }

    /// Collect every column reference in this expression, left to right.
    pub fn column_refs<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        match self {
            Expr::Column(col) => out.push(col),
            Expr::Function(func) => {
                for arg in &func.args {
                    arg.column_refs(out);
                }
            }
            Expr::Binary { left, right, .. } => {
                left.column_refs(out);
                right.column_refs(out);
            }
            Expr::Negate(inner) => inner.column_refs(out),
            Expr::Literal(_) | Expr::Param(_) | Expr::Raw { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Primary > Precedence::Comparison);
        assert!(Precedence::Comparison > Precedence::LogicalConjunction);
        assert!(Precedence::LogicalConjunction > Precedence::LogicalDisjunction);
        assert!(Precedence::Subtraction > Precedence::Additive);
    }

    #[test]
    fn test_expr_precedence() {
        let sum = Expr::column("a").add(Expr::lit(1));
        assert_eq!(sum.precedence(), Precedence::Additive);
        assert_eq!(Expr::param("p").precedence(), Precedence::Primary);
        assert_eq!(
            Expr::raw("x OR y", Precedence::LogicalDisjunction).precedence(),
            Precedence::LogicalDisjunction
        );
    }

    #[test]
    fn test_null_literal_detection() {
        assert!(Expr::null().is_null_literal());
        assert!(Expr::raw(" null ", Precedence::Primary).is_null_literal());
        assert!(!Expr::lit("NULL").is_null_literal());
    }

    #[test]
    fn test_column_refs_walk_order() {
        let expr = Expr::func(
            "Coalesce",
            vec![Expr::qualified("t", "a"), Expr::column("b").add(Expr::column("c"))],
        );
        let mut refs = Vec::new();
        expr.column_refs(&mut refs);
        let names: Vec<&str> = refs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
