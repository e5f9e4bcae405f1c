//! Predicate rendering.
//!
//! Comparisons against the NULL literal are normalised to IS [NOT] NULL
//! here, so dialects that rewrite `NULL IS NULL` see it structurally and
//! never by scanning text.

use super::context::RenderContext;
use super::expressions::build_expr_at;
use super::traits::SqlGenerator;
use crate::ast::{CompareOp, Expr, Precedence, Predicate};
use crate::error::RenderResult;

/// Render a predicate at the top level.
pub fn build_predicate(
    predicate: &Predicate,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    build_predicate_at(Precedence::Unknown, predicate, generator, ctx)
}

pub fn build_predicate_at(
    parent: Precedence,
    predicate: &Predicate,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    let wrap = predicate.precedence() < parent;
    if wrap {
        ctx.write("(");
    }
    build_node(predicate, generator, ctx)?;
    if wrap {
        ctx.write(")");
    }
    Ok(())
}

fn build_node(predicate: &Predicate, generator: &dyn SqlGenerator, ctx: &mut RenderContext) -> RenderResult<()> {
    let prec = predicate.precedence();
    match predicate {
        Predicate::Compare { left, op, right } => build_compare(left, *op, right, generator, ctx),
        Predicate::Like {
            expr,
            pattern,
            escape,
            negated,
        } => {
            let prefix = *negated && generator.negated_like_prefix();
            if prefix {
                ctx.write("NOT ");
            }
            build_expr_at(prec, expr, generator, ctx)?;
            if *negated && !prefix {
                ctx.write(" NOT LIKE ");
            } else {
                ctx.write(" LIKE ");
            }
            build_expr_at(prec, pattern, generator, ctx)?;
            if let Some(esc) = escape {
                ctx.write(" ESCAPE ");
                build_expr_at(prec, esc, generator, ctx)?;
            }
            Ok(())
        }
        Predicate::IsNull { expr, negated } => build_is_null(expr, *negated, generator, ctx),
        Predicate::Between {
            expr,
            low,
            high,
            negated,
        } => {
            build_expr_at(prec, expr, generator, ctx)?;
            ctx.write(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
            build_expr_at(prec, low, generator, ctx)?;
            ctx.write(" AND ");
            build_expr_at(prec, high, generator, ctx)
        }
        Predicate::InList {
            expr,
            values,
            negated,
        } => {
            if values.is_empty() {
                // Nothing is IN an empty list.
                ctx.write(if *negated { "1=1" } else { "1=0" });
                return Ok(());
            }
            build_expr_at(prec, expr, generator, ctx)?;
            ctx.write(if *negated { " NOT IN (" } else { " IN (" });
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    ctx.write(", ");
                }
                build_expr_at(Precedence::Unknown, value, generator, ctx)?;
            }
            ctx.write(")");
            Ok(())
        }
        Predicate::Not(inner) => {
            ctx.write("NOT ");
            build_predicate_at(Precedence::LogicalNegation, inner, generator, ctx)
        }
        Predicate::And(items) => build_junction(items, "AND", "1=1", generator, ctx),
        Predicate::Or(items) => build_junction(items, "OR", "1=0", generator, ctx),
        Predicate::Expr(expr) => build_expr_at(Precedence::Unknown, expr, generator, ctx),
    }
}

fn build_compare(
    left: &Expr,
    op: CompareOp,
    right: &Expr,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    let null_test = match op {
        CompareOp::Eq => Some(false),
        CompareOp::Ne => Some(true),
        _ => None,
    };
    if let Some(negated) = null_test {
        if right.is_null_literal() {
            return build_is_null(left, negated, generator, ctx);
        }
        if left.is_null_literal() {
            return build_is_null(right, negated, generator, ctx);
        }
    }

    build_expr_at(Precedence::Comparison, left, generator, ctx)?;
    ctx.write(" ");
    ctx.write(op.as_str());
    ctx.write(" ");
    build_expr_at(Precedence::Comparison, right, generator, ctx)
}

fn build_is_null(
    expr: &Expr,
    negated: bool,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    if expr.is_null_literal() && generator.rewrite_null_comparisons() {
        ctx.write(if negated { "1=0" } else { "1=1" });
        return Ok(());
    }
    build_expr_at(Precedence::Comparison, expr, generator, ctx)?;
    ctx.write(if negated { " IS NOT NULL" } else { " IS NULL" });
    Ok(())
}

fn build_junction(
    items: &[Predicate],
    keyword: &str,
    empty: &str,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    let prec = if keyword == "AND" {
        Precedence::LogicalConjunction
    } else {
        Precedence::LogicalDisjunction
    };
    match items {
        [] => {
            ctx.write(empty);
            Ok(())
        }
        [single] => build_node(single, generator, ctx),
        _ => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    ctx.write(" ");
                    ctx.write(keyword);
                    ctx.write(" ");
                }
                build_predicate_at(prec, item, generator, ctx)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::transpiler::Dialect;

    fn render(p: &Predicate, dialect: Dialect) -> String {
        let generator = dialect.generator();
        let mut ctx = RenderContext::new(&RenderConfig::for_dialect(dialect));
        build_predicate(p, generator.as_ref(), &mut ctx).unwrap();
        ctx.finish_statement().0
    }

    #[test]
    fn test_and_inside_or_stays_bare() {
        let p = Expr::column("a")
            .eq(Expr::lit(1))
            .and(Expr::column("b").eq(Expr::lit(2)))
            .or(Expr::column("c").eq(Expr::lit(3)));
        assert_eq!(render(&p, Dialect::Generic), "a = 1 AND b = 2 OR c = 3");
    }

    #[test]
    fn test_or_inside_and_is_wrapped() {
        let p = Predicate::And(vec![
            Expr::column("a")
                .eq(Expr::lit(1))
                .or(Expr::column("b").eq(Expr::lit(2))),
            Expr::column("c").eq(Expr::lit(3)),
        ]);
        assert_eq!(render(&p, Dialect::Generic), "(a = 1 OR b = 2) AND c = 3");
    }

    #[test]
    fn test_not_wraps_junctions_only() {
        let p = Expr::column("a").eq(Expr::lit(1)).not();
        assert_eq!(render(&p, Dialect::Generic), "NOT a = 1");
        let p = Expr::column("a")
            .eq(Expr::lit(1))
            .and(Expr::column("b").eq(Expr::lit(2)))
            .not();
        assert_eq!(render(&p, Dialect::Generic), "NOT (a = 1 AND b = 2)");
    }

    #[test]
    fn test_compare_with_null_becomes_is_null() {
        let p = Expr::column("a").eq(Expr::null());
        assert_eq!(render(&p, Dialect::Generic), "a IS NULL");
        let p = Expr::null().ne(Expr::column("a"));
        assert_eq!(render(&p, Dialect::Generic), "a IS NOT NULL");
    }

    #[test]
    fn test_null_is_null_rewrite_is_dialect_driven() {
        let p = Expr::null().is_null();
        assert_eq!(render(&p, Dialect::Generic), "NULL IS NULL");
        assert_eq!(render(&p, Dialect::Informix), "1=1");
        let p = Expr::null().is_not_null();
        assert_eq!(render(&p, Dialect::Informix), "1=0");
    }

    #[test]
    fn test_like_forms() {
        let p = Expr::column("name")
            .not_like(Expr::lit("a!%"))
            .escape(Expr::lit("!"));
        assert_eq!(render(&p, Dialect::Generic), "name NOT LIKE 'a!%' ESCAPE '!'");
        assert_eq!(render(&p, Dialect::Informix), "NOT name LIKE 'a!%' ESCAPE '!'");

        let p = Expr::column("name").like(Expr::param("pattern"));
        assert_eq!(render(&p, Dialect::Informix), "name LIKE ?");
    }

    #[test]
    fn test_empty_lists_and_junctions() {
        assert_eq!(render(&Expr::column("a").in_list(vec![]), Dialect::Generic), "1=0");
        assert_eq!(render(&Predicate::And(vec![]), Dialect::Generic), "1=1");
        assert_eq!(render(&Predicate::Or(vec![]), Dialect::Generic), "1=0");
    }

    #[test]
    fn test_between_and_in() {
        let p = Expr::column("a")
            .between(Expr::lit(1), Expr::lit(10))
            .and(Expr::column("b").in_list(vec![Expr::lit("x"), Expr::lit("y")]));
        assert_eq!(render(&p, Dialect::Generic), "a BETWEEN 1 AND 10 AND b IN ('x', 'y')");
    }
}
