//! Whole-sentence composition: arcs on top, tokens in the middle, spans underneath

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::layout::{
    self, dependency, span, tokens, HitRegion, HitTarget, LayoutContext, LayoutError,
    LayoutOutput, Point, Scene, TextMetrics,
};
use crate::model::{Edge, Instance, RenderKind};

/// A laid-out sentence, ready to be replayed onto any surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentenceLayout {
    /// Leftmost x drawn, at most 0
    pub min_x: i32,
    /// Rightmost x drawn
    pub width: i32,
    pub height: i32,
    pub font_family: String,
    pub scene: Scene,
    /// Drawn edges: dependencies first, then spans. `HitTarget::Edge` indexes into this list.
    pub edges: Vec<Edge>,
    pub hits: Vec<HitRegion>,
}

impl SentenceLayout {
    /// The edge or token under `point`, if any
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        self.hits
            .iter()
            .find(|hit| hit.contains(point))
            .map(|hit| hit.target)
    }
}

fn merge_widths(into: &mut HashMap<usize, i32>, from: HashMap<usize, i32>) {
    for (token, width) in from {
        let entry = into.entry(token).or_insert(0);
        *entry = width.max(*entry);
    }
}

/// Lay out every token and edge of `instance`.
///
/// Edge references are checked before anything is drawn. A non-empty `visible` set further
/// restricts which edges are laid out.
pub fn render_sentence<M: TextMetrics>(
    instance: &Instance,
    ctx: &LayoutContext<'_, M>,
    visible: Option<&HashSet<Edge>>,
) -> Result<SentenceLayout, LayoutError> {
    layout::validate_references(&instance.tokens, &instance.edges)?;

    let edges = layout::filter_visible(instance.edges.clone(), visible);
    let (dependencies, spans): (Vec<Edge>, Vec<Edge>) = edges
        .into_iter()
        .partition(|e| e.kind == RenderKind::Dependency);

    let mut extra_widths = dependency::estimate_required_token_widths(&dependencies, ctx);
    merge_widths(
        &mut extra_widths,
        span::estimate_required_token_widths(&spans, ctx),
    );

    let bounds = tokens::estimate_bounds(&instance.tokens, &extra_widths, ctx);
    let mut scene = Scene::new();

    let arcs = dependency::layout(&dependencies, &bounds, 0, ctx, &mut scene)?;
    let token_row = tokens::layout(
        &instance.tokens,
        &extra_widths,
        ctx,
        Point::new(0, arcs.height),
        &mut scene,
    );
    let span_baseline = arcs.height + token_row.height;
    let bands = if spans.is_empty() {
        LayoutOutput::default()
    } else {
        span::layout(&spans, &bounds, span_baseline, ctx, &mut scene)?
    };

    let offset = dependencies.len();
    let mut hits = arcs.hits;
    hits.extend(token_row.hits);
    hits.extend(bands.hits.into_iter().map(|mut hit| {
        if let HitTarget::Edge(i) = hit.target {
            hit.target = HitTarget::Edge(offset + i);
        }
        hit
    }));

    let min_x = arcs.min_x.min(token_row.min_x).min(bands.min_x);
    let width = arcs.width.max(token_row.width).max(bands.width);
    let height = span_baseline + bands.height;
    debug!(
        tokens = instance.tokens.len(),
        dependencies = dependencies.len(),
        spans = spans.len(),
        min_x,
        width,
        height,
        "sentence layout"
    );

    let mut drawn = dependencies;
    drawn.extend(spans);
    Ok(SentenceLayout {
        min_x,
        width,
        height,
        font_family: ctx.config.font_family.clone(),
        scene,
        edges: drawn,
        hits,
    })
}
