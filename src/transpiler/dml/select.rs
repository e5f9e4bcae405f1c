//! SELECT SQL generation.

use super::{build_condition_clause, build_from};
use crate::ast::{Expr, Precedence, SelectQuery};
use crate::error::{RenderError, RenderResult};
use crate::transpiler::context::RenderContext;
use crate::transpiler::expressions::{build_expr, expr_fragment};
use crate::transpiler::template::Template;
use crate::transpiler::traits::{DummyTable, PaginationPlacement, SqlGenerator};

/// One side of the pagination pair.
enum PageValue<'a> {
    Expr(&'a Expr),
    Fixed(&'static str),
}

struct PagePlan<'a> {
    take: Option<(String, PageValue<'a>)>,
    skip: Option<(String, PageValue<'a>)>,
    placement: PaginationPlacement,
    skip_first: bool,
}

impl PagePlan<'_> {
    fn is_empty(&self) -> bool {
        self.take.is_none() && self.skip.is_none()
    }
}

/// Generate SELECT SQL.
pub fn build_select(
    query: &SelectQuery,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<()> {
    let dummy = if query.from.is_empty() {
        generator.dummy_table()
    } else {
        None
    };
    let plan = plan_pagination(query, dummy, generator, ctx)?;

    ctx.write("SELECT");
    if query.distinct {
        ctx.write(" DISTINCT");
    }
    if plan.placement == PaginationPlacement::BeforeColumns {
        for piece in render_pagination(&plan, generator, ctx)? {
            ctx.write(" ");
            ctx.write(&piece);
        }
    }

    // Columns
    ctx.open_body();
    if query.columns.is_empty() {
        ctx.write("*");
    }
    for (i, col) in query.columns.iter().enumerate() {
        if i > 0 {
            ctx.separator();
        }
        build_expr(&col.expr, generator, ctx)?;
        if let Some(alias) = &col.alias {
            ctx.write(" AS ");
            ctx.write(&generator.quote_identifier(alias));
        }
    }
    ctx.close_clause();

    // FROM
    if !query.from.is_empty() {
        build_from(&query.from, generator, ctx)?;
    } else if let Some(dummy) = dummy {
        ctx.clause("FROM");
        ctx.write(dummy.name);
        ctx.close_clause();
    }

    if let Some(w) = &query.where_ {
        build_condition_clause("WHERE", w, generator, ctx)?;
    }

    if !query.group_by.is_empty() {
        ctx.clause("GROUP BY");
        for (i, g) in query.group_by.iter().enumerate() {
            if i > 0 {
                ctx.separator();
            }
            build_expr(g, generator, ctx)?;
        }
        ctx.close_clause();
    }

    if let Some(h) = &query.having {
        build_condition_clause("HAVING", h, generator, ctx)?;
    }

    if !query.order_by.is_empty() {
        ctx.clause("ORDER BY");
        for (i, o) in query.order_by.iter().enumerate() {
            if i > 0 {
                ctx.separator();
            }
            build_expr(&o.expr, generator, ctx)?;
            if o.desc {
                ctx.write(" DESC");
            }
        }
        ctx.close_clause();
    }

    if plan.placement == PaginationPlacement::AfterQuery {
        for piece in render_pagination(&plan, generator, ctx)? {
            ctx.newline();
            ctx.write(&piece);
        }
    }

    Ok(())
}

fn plan_pagination<'a>(
    query: &'a SelectQuery,
    dummy: Option<DummyTable>,
    generator: &dyn SqlGenerator,
    ctx: &RenderContext,
) -> RenderResult<PagePlan<'a>> {
    let paging = generator.pagination();
    let take_template = ctx.take_override().unwrap_or(paging.take).to_string();
    let skip_template = ctx.skip_override().unwrap_or(paging.skip).to_string();

    // A many-row pseudo-table replaces any requested paging with one row.
    if let Some(DummyTable {
        single_row_hint: true,
        ..
    }) = dummy
    {
        return Ok(PagePlan {
            take: Some((take_template, PageValue::Fixed("1"))),
            skip: None,
            placement: paging.placement,
            skip_first: paging.skip_first,
        });
    }

    let take = match (&query.take, &query.skip, paging.take_for_skip_only) {
        (Some(t), _, _) => Some(PageValue::Expr(t)),
        (None, Some(_), Some(fixed)) => Some(PageValue::Fixed(fixed)),
        _ => None,
    };
    let skip = match (&query.skip, &query.take, paging.skip_for_take_only) {
        (Some(s), _, _) => Some(PageValue::Expr(s)),
        (None, Some(_), Some(fixed)) => Some(PageValue::Fixed(fixed)),
        _ => None,
    };

    if skip.is_some() && paging.requires_order_by && query.order_by.is_empty() {
        return Err(RenderError::unsupported(
            generator.name(),
            format!("'{}' without ORDER BY", skip_template),
        ));
    }

    Ok(PagePlan {
        take: take.map(|v| (take_template, v)),
        skip: skip.map(|v| (skip_template, v)),
        placement: paging.placement,
        skip_first: paging.skip_first,
    })
}

/// Pagination pieces in emission order. Parameters bind as they render.
fn render_pagination(
    plan: &PagePlan<'_>,
    generator: &dyn SqlGenerator,
    ctx: &mut RenderContext,
) -> RenderResult<Vec<String>> {
    if plan.is_empty() {
        return Ok(Vec::new());
    }
    let order: [&Option<(String, PageValue<'_>)>; 2] = if plan.skip_first {
        [&plan.skip, &plan.take]
    } else {
        [&plan.take, &plan.skip]
    };

    let mut pieces = Vec::with_capacity(2);
    for (template, value) in order.into_iter().flatten() {
        let arg = match value {
            PageValue::Expr(e) => expr_fragment(Precedence::Primary, e, generator, ctx)?,
            PageValue::Fixed(v) => v.to_string(),
        };
        pieces.push(Template::parse(template)?.apply(&[arg.as_str()])?);
    }
    Ok(pieces)
}
