//! Span layout: labeled rectangles stacked in bands below the token row

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::model::relations::{
    covers, covers_exactly, covers_semi, lexicographic_order, min_index, overlaps,
};
use crate::model::Edge;

use super::depth::Dominance;
use super::error::LayoutError;
use super::metrics::TextMetrics;
use super::types::{
    Bounds1D, Color, HitRegion, HitTarget, LayoutOutput, Point, Surface, TextAnchor, TokenBounds,
};
use super::LayoutContext;

/// Whether span `over` is stacked farther from the tokens than `under`.
///
/// An explicit type order always wins: a typed span dominates an untyped one and a higher
/// order dominates a lower one. Otherwise interval containment decides, and of two
/// overlapping spans the one starting first dominates.
pub fn dominates(over: &Edge, under: &Edge, type_order: &HashMap<String, i32>) -> bool {
    let order_over = type_order.get(over.type_prefix());
    let order_under = type_order.get(under.type_prefix());
    match (order_over, order_under) {
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (Some(a), Some(b)) if a != b => a > b,
        _ => {
            covers(over, under)
                || covers_semi(over, under)
                || (covers_exactly(over, under)
                    && lexicographic_order(over, under) == Ordering::Greater)
                || (overlaps(over, under) && min_index(over) < min_index(under))
        }
    }
}

/// Depth of every span plus the band geometry derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandPlan {
    pub depth: Vec<usize>,
    pub dominance: Dominance,
    pub max_depth: usize,
    pub max_height: i32,
}

impl BandPlan {
    /// Band number counted from the far edge; 1 is the band farthest from `baseline`
    pub fn level(&self, depth: usize, revert: bool) -> i32 {
        if revert {
            (self.max_depth - depth) as i32 + 1
        } else {
            depth as i32 + 1
        }
    }

    /// Top of the band holding spans of `depth`
    pub fn band_top(
        &self,
        depth: usize,
        baseline: i32,
        height_per_level: i32,
        revert: bool,
    ) -> i32 {
        baseline + self.max_height - self.level(depth, revert) * height_per_level
    }
}

pub fn plan(
    edges: &[Edge],
    height_per_level: i32,
    type_order: &HashMap<String, i32>,
) -> Result<BandPlan, LayoutError> {
    let mut dominance = Dominance::new(edges.len());
    for (a, over) in edges.iter().enumerate() {
        for (b, under) in edges.iter().enumerate() {
            if a != b && dominates(over, under, type_order) {
                dominance.add(a, b);
            }
        }
    }

    let depth = dominance.depths(|i| describe(&edges[i]))?;
    let max_depth = depth.iter().copied().max().unwrap_or(0);
    let max_height = if edges.is_empty() {
        1
    } else {
        (max_depth as i32 + 1) * height_per_level + 3
    };

    Ok(BandPlan {
        depth,
        dominance,
        max_depth,
        max_height,
    })
}

fn describe(edge: &Edge) -> String {
    format!("{}({}..{})", edge.label, edge.start, edge.end)
}

/// Extra token width so a single-token span's label fits
pub fn estimate_required_token_widths<M: TextMetrics>(
    edges: &[Edge],
    ctx: &LayoutContext<'_, M>,
) -> HashMap<usize, i32> {
    let config = &ctx.config.span;
    let mut widths = HashMap::new();
    for edge in edges.iter().filter(|e| e.is_loop()) {
        let width = config.total_text_margin
            + ctx.label_width(&edge.display_label(), config.font_size);
        let entry = widths.entry(edge.start).or_insert(0);
        *entry = width.max(*entry);
    }
    widths
}

/// Draw every span as a filled rectangle in its band, below `baseline`.
pub fn layout<M: TextMetrics>(
    edges: &[Edge],
    bounds: &TokenBounds,
    baseline: i32,
    ctx: &LayoutContext<'_, M>,
    surface: &mut impl Surface,
) -> Result<LayoutOutput, LayoutError> {
    let config = &ctx.config.span;
    let hpl = config.height_per_level;

    let mut extents = Vec::with_capacity(edges.len());
    for edge in edges {
        extents.push(extent(edge, bounds)?);
    }

    let plan = plan(edges, hpl, &config.type_order)?;
    debug!(
        edges = edges.len(),
        max_depth = plan.max_depth,
        max_height = plan.max_height,
        "span layout"
    );

    let rect_height = hpl - 2 * config.buffer_height;
    let corner_radius = if config.curve { config.corner_radius } else { 0 };
    let mut min_x = 0;
    let mut max_x = bounds.width();
    let mut hits = Vec::with_capacity(edges.len());

    for (i, edge) in edges.iter().enumerate() {
        let top = plan.band_top(plan.depth[i], baseline, hpl, config.revert) + config.buffer_height;

        let label = edge.display_label();
        let label_width = ctx.label_width(&label, config.font_size);
        let required = label_width + config.total_text_margin;
        let mut span = extents[i];
        if span.width() < required {
            let start = span.middle() - required / 2;
            span = Bounds1D::new(start, start + required);
        }
        min_x = min_x.min(span.start);
        max_x = max_x.max(span.end);

        let fill = ctx.stylesheet.edge_color(edge).unwrap_or(ctx.stylesheet.span_fill);
        let origin = Point::new(span.start, top);
        surface.rectangle(
            origin,
            span.width(),
            rect_height,
            Some(fill),
            Some(Color::BLACK),
            1,
            corner_radius,
        );
        surface.text(
            Point::new(span.middle(), top + rect_height / 2 + config.font_size as i32 / 3),
            &label,
            config.font_size,
            Color::BLACK,
            TextAnchor::Middle,
        );
        hits.push(HitRegion {
            origin,
            width: span.width(),
            height: rect_height,
            target: HitTarget::Edge(i),
        });
    }

    if config.separation_lines && !edges.is_empty() {
        let mut min_depths: BTreeMap<&str, usize> = BTreeMap::new();
        for (i, edge) in edges.iter().enumerate() {
            let entry = min_depths.entry(edge.type_prefix()).or_insert(plan.depth[i]);
            *entry = (*entry).min(plan.depth[i]);
        }
        let mut drawn = BTreeSet::new();
        for depth in min_depths.values() {
            let y = plan.band_top(*depth, baseline, hpl, config.revert);
            if drawn.insert(y) {
                surface.line(
                    Point::new(0, y),
                    Point::new(bounds.width(), y),
                    ctx.stylesheet.separator,
                );
            }
        }
    }

    Ok(LayoutOutput {
        min_x,
        width: max_x,
        height: plan.max_height,
        hits,
    })
}

/// Horizontal pixel range covered by both end tokens
fn extent(edge: &Edge, bounds: &TokenBounds) -> Result<Bounds1D, LayoutError> {
    let lookup = |token: usize| {
        bounds.get(token).ok_or_else(|| {
            LayoutError::invalid_reference(edge.label.clone(), edge.start, edge.end, token)
        })
    };
    let start = lookup(edge.start)?;
    let end = lookup(edge.end)?;
    Ok(Bounds1D::new(
        start.start.min(end.start),
        start.end.max(end.end),
    ))
}
