use serde::{Deserialize, Serialize};

use super::expr::{ColumnRef, Expr, Precedence};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// A boolean condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Compare {
        left: Expr,
        op: CompareOp,
        right: Expr,
    },
    Like {
        expr: Expr,
        pattern: Expr,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        escape: Option<Expr>,
        #[serde(default)]
        negated: bool,
    },
    IsNull {
        expr: Expr,
        #[serde(default)]
        negated: bool,
    },
    Between {
        expr: Expr,
        low: Expr,
        high: Expr,
        #[serde(default)]
        negated: bool,
    },
    InList {
        expr: Expr,
        values: Vec<Expr>,
        #[serde(default)]
        negated: bool,
    },
    Not(Box<Predicate>),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    /// A boolean-valued expression used directly as a condition.
    Expr(Expr),
}

impl Predicate {
    pub fn precedence(&self) -> Precedence {
        match self {
            Predicate::Compare { .. }
            | Predicate::Like { .. }
            | Predicate::IsNull { .. }
            | Predicate::Between { .. }
            | Predicate::InList { .. } => Precedence::Comparison,
            Predicate::Not(_) => Precedence::LogicalNegation,
            Predicate::And(items) if items.len() == 1 => items[0].precedence(),
            Predicate::Or(items) if items.len() == 1 => items[0].precedence(),
            Predicate::And(_) => Precedence::LogicalConjunction,
            Predicate::Or(_) => Precedence::LogicalDisjunction,
            Predicate::Expr(expr) => expr.precedence(),
        }
    }

    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Predicate::And(mut items) => {
                items.push(other);
                Predicate::And(items)
            }
            first => Predicate::And(vec![first, other]),
        }
    }

    pub fn or(self, other: Predicate) -> Predicate {
        match self {
            Predicate::Or(mut items) => {
                items.push(other);
                Predicate::Or(items)
            }
            first => Predicate::Or(vec![first, other]),
        }
    }

    pub fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }

    /// Attach an ESCAPE expression to a LIKE predicate. Other predicates are
    /// returned unchanged.
    pub fn escape(self, escape_expr: Expr) -> Predicate {
        match self {
            Predicate::Like {
                expr,
                pattern,
                negated,
                ..
            } => Predicate::Like {
                expr,
                pattern,
                escape: Some(escape_expr),
                negated,
            },
            other => other,
        }
    }

    /// Collect every column reference in this predicate, left to right.
    pub fn column_refs<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
        match self {
            Predicate::Compare { left, right, .. } => {
                left.column_refs(out);
                right.column_refs(out);
            }
            Predicate::Like {
                expr,
                pattern,
                escape,
                ..
            } => {
                expr.column_refs(out);
                pattern.column_refs(out);
                if let Some(e) = escape {
                    e.column_refs(out);
                }
            }
            Predicate::IsNull { expr, .. } => expr.column_refs(out),
            Predicate::Between {
                expr, low, high, ..
            } => {
                expr.column_refs(out);
                low.column_refs(out);
                high.column_refs(out);
            }
            Predicate::InList { expr, values, .. } => {
                expr.column_refs(out);
                for v in values {
                    v.column_refs(out);
                }
            }
            Predicate::Not(inner) => inner.column_refs(out),
            Predicate::And(items) | Predicate::Or(items) => {
                for item in items {
                    item.column_refs(out);
                }
            }
            Predicate::Expr(expr) => expr.column_refs(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_flattens() {
        let p = Expr::column("a")
            .eq(Expr::lit(1))
            .and(Expr::column("b").eq(Expr::lit(2)))
            .and(Expr::column("c").is_null());
        match p {
            Predicate::And(items) => assert_eq!(items.len(), 3),
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn test_predicate_precedence() {
        let or = Expr::column("a")
            .eq(Expr::lit(1))
            .or(Expr::column("b").eq(Expr::lit(2)));
        assert_eq!(or.precedence(), Precedence::LogicalDisjunction);
        assert_eq!(or.clone().not().precedence(), Precedence::LogicalNegation);
        assert_eq!(
            Predicate::And(vec![or]).precedence(),
            Precedence::LogicalDisjunction
        );
    }

    #[test]
    fn test_escape_only_touches_like() {
        let like = Expr::column("name")
            .like(Expr::lit("a!%"))
            .escape(Expr::lit("!"));
        assert!(matches!(like, Predicate::Like { escape: Some(_), .. }));

        let cmp = Expr::column("a").eq(Expr::lit(1)).escape(Expr::lit("!"));
        assert!(matches!(cmp, Predicate::Compare { .. }));
    }
}
