//! Expression rendering with precedence-driven parenthesization.

use super::context::{ParamBinding, RenderContext};
use super::traits::SqlGenerator;
use super::types::format_literal;
use crate::ast::{BinaryOp, ColumnRef, Expr, Function, Param, Precedence, Table};
use crate::error::RenderResult;

/// Render `expr` at the top level (never parenthesized).
pub fn build_expr(
    expr: &Expr,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    build_expr_at(Precedence::Unknown, expr, generator, ctx)
}

/// Render `expr` as an operand of an operator with precedence `parent`.
pub fn build_expr_at(
    parent: Precedence,
    expr: &Expr,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    let wrap = expr.precedence() < parent;
    if wrap {
        ctx.write("(");
    }
    build_node(expr, generator, ctx)?;
    if wrap {
        ctx.write(")");
    }
    Ok(())
}

/// Render `expr` into a standalone string.
pub fn expr_fragment(
    parent: Precedence,
    expr: &Expr,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<String> {
    ctx.fragment(|c| build_expr_at(parent, expr, generator, c))
}

fn build_node(expr: &Expr, generator: &dyn SqlGenerator, ctx: &mut RenderContext) -> RenderResult<()> {
    match expr {
        Expr::Column(col) => {
            ctx.write(&column_name(col, generator));
            Ok(())
        }
        Expr::Literal(value) => {
            let text = format_literal(generator, value)?;
            ctx.write(&text);
            Ok(())
        }
        Expr::Param(param) => {
            build_param(param, generator, ctx);
            Ok(())
        }
        Expr::Function(func) => build_function(func, generator, ctx),
        Expr::Binary {
            op: BinaryOp::Concat,
            ..
        } => build_concat(expr, generator, ctx),
        Expr::Binary { left, op, right } => {
            let prec = op.precedence();
            build_expr_at(prec, left, generator, ctx)?;
            ctx.write(" ");
            ctx.write(op.as_str());
            ctx.write(" ");
            if right_needs_parens(*op, right) {
                ctx.write("(");
                build_node(right, generator, ctx)?;
                ctx.write(")");
                Ok(())
            } else {
                build_expr_at(prec, right, generator, ctx)
            }
        }
        Expr::Negate(inner) => {
            let text = ctx.fragment(|c| build_node(inner, generator, c))?;
            // `--x` would start a comment.
            if inner.precedence() < Precedence::Unary || text.starts_with('-') {
                ctx.write("-(");
                ctx.write(&text);
                ctx.write(")");
            } else {
                ctx.write("-");
                ctx.write(&text);
            }
            Ok(())
        }
        Expr::Raw { sql, .. } => {
            ctx.write(sql);
            Ok(())
        }
    }
}

/// Same precedence on the right only stays bare for `a + (b + c)` and
/// `a * (b * c)`.
fn right_needs_parens(op: BinaryOp, right: &Expr) -> bool {
    let prec = op.precedence();
    let rp = right.precedence();
    if rp != prec {
        return rp < prec;
    }
    match right {
        Expr::Binary { op: rop, .. } => *rop != op || op.is_left_associative_only(),
        _ => true,
    }
}

fn build_concat(expr: &Expr, generator: &dyn SqlGenerator, ctx: &mut RenderContext) -> RenderResult<()> {
    let mut operands = Vec::new();
    flatten_concat(expr, &mut operands);

    let mut parts = Vec::with_capacity(operands.len());
    for operand in operands {
        parts.push(expr_fragment(Precedence::Additive, operand, generator, ctx)?);
    }
    ctx.write(&generator.string_concat(&parts));
    Ok(())
}

fn flatten_concat<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Binary {
            left,
            op: BinaryOp::Concat,
            right,
        } => {
            flatten_concat(left, out);
            out.push(right);
        }
        other => out.push(other),
    }
}

fn build_param(param: &Param, generator: &dyn SqlGenerator, ctx: &mut RenderContext) {
    let marker = generator.placeholder(&param.name, ctx.next_param_index());
    ctx.write(&marker);
    ctx.bind(ParamBinding {
        name: param.name.clone(),
        marker,
        command_name: generator.command_parameter_name(&param.name),
        value: param.value.clone(),
    });
}

fn build_function(func: &Function, generator: &dyn SqlGenerator, ctx: &mut RenderContext) -> RenderResult<()> {
    let func = generator.convert_function(func.clone())?;
    ctx.write(&func.name);
    ctx.write("(");
    for (i, arg) in func.args.iter().enumerate() {
        if i > 0 {
            ctx.write(", ");
        }
        build_expr(arg, generator, ctx)?;
    }
    ctx.write(")");
    Ok(())
}

pub fn column_name(col: &ColumnRef, generator: &dyn SqlGenerator) -> String {
    match &col.table {
        Some(table) => format!(
            "{}.{}",
            generator.quote_identifier(table),
            generator.quote_identifier(&col.name)
        ),
        None => generator.quote_identifier(&col.name),
    }
}

/// `schema.name`, without alias.
pub fn table_name(table: &Table, generator: &dyn SqlGenerator) -> String {
    match &table.schema {
        Some(schema) => format!(
            "{}.{}",
            generator.quote_identifier(schema),
            generator.quote_identifier(&table.name)
        ),
        None => generator.quote_identifier(&table.name),
    }
}

/// Table reference as written in FROM/JOIN: name plus alias.
pub fn table_ref(table: &Table, generator: &dyn SqlGenerator) -> String {
    match &table.alias {
        Some(alias) => format!(
            "{} {}",
            table_name(table, generator),
            generator.quote_identifier(alias)
        ),
        None => table_name(table, generator),
    }
}
