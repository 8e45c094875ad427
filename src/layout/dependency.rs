//! Dependency layout: directed arcs stacked above the token row
//!
//! Arcs that contain other arcs are drawn higher. Crossing arcs at the same depth are nudged
//! apart vertically, and every token shares its top edge out between the arcs touching it.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace};

use crate::model::relations::{
    covers, covers_exactly, covers_semi, crosses, left_of, length, lexicographic_order, right_of,
};
use crate::model::Edge;

use super::depth::Dominance;
use super::error::LayoutError;
use super::metrics::TextMetrics;
use super::types::{
    Bounds1D, Color, HitRegion, HitTarget, LayoutOutput, Point, Surface, TextAnchor, TokenBounds,
};
use super::LayoutContext;

/// Whether `over` is drawn above `under`
pub fn dominates(over: &Edge, under: &Edge) -> bool {
    covers(over, under)
        || covers_semi(over, under)
        || (covers_exactly(over, under) && lexicographic_order(over, under) == Ordering::Greater)
}

/// Order of two edges touching `token`, left to right along its top edge.
///
/// Edges coming from the left precede edges leaving to the right. On either side the longer
/// edge comes first, ties broken by [`lexicographic_order`].
///
/// Nested arcs arriving from the left therefore cross just above the token: the longer arc
/// takes the outer slot on the left side instead of the one nearest the centre.
pub fn compare_on_token(e1: &Edge, e2: &Edge, token: usize) -> Ordering {
    let (l1, r1) = (left_of(e1, token), right_of(e1, token));
    let (l2, r2) = (left_of(e2, token), right_of(e2, token));
    if l1 && r2 && !(r1 && l2) {
        return Ordering::Less;
    }
    if r1 && l2 && !(l1 && r2) {
        return Ordering::Greater;
    }
    length(e2)
        .cmp(&length(e1))
        .then_with(|| lexicographic_order(e1, e2))
}

/// Vertical arrangement of a set of arcs, before any pixel x-coordinate is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcPlan {
    /// Per edge; self-loops sit at depth 0
    pub depth: Vec<usize>,
    /// Per edge; extra downward shift resolving crossings
    pub offset: Vec<i32>,
    pub dominance: Dominance,
    /// Positions in the edge slice of all non-loop edges; `dominance` is indexed by these
    pub proper: Vec<usize>,
    pub max_depth: usize,
    pub max_height: i32,
}

/// Compute depths, crossing offsets and overall height for `edges`
pub fn plan(edges: &[Edge], height_per_level: i32) -> Result<ArcPlan, LayoutError> {
    let proper: Vec<usize> = (0..edges.len()).filter(|&i| !edges[i].is_loop()).collect();
    let has_loops = proper.len() < edges.len();

    let mut dominance = Dominance::new(proper.len());
    for (a, &over) in proper.iter().enumerate() {
        for (b, &under) in proper.iter().enumerate() {
            if a != b && dominates(&edges[over], &edges[under]) {
                dominance.add(a, b);
            }
        }
    }

    let proper_depths = dominance.depths(|p| describe(&edges[proper[p]]))?;
    let mut depth = vec![0usize; edges.len()];
    for (p, &e) in proper.iter().enumerate() {
        depth[e] = proper_depths[p];
    }

    let max_depth = proper_depths.iter().copied().max().unwrap_or(0);
    let mut max_height = (max_depth as i32 + 1) * height_per_level + 3;
    if max_depth == 0 && has_loops {
        // Loops need a level and a half
        max_height += height_per_level / 2;
    }

    let offset = crossing_offsets(edges, &proper, &depth, height_per_level);

    Ok(ArcPlan {
        depth,
        offset,
        dominance,
        proper,
        max_depth,
        max_height,
    })
}

/// Pairwise crossing heuristic.
///
/// Two crossing arcs at one depth get distinct offsets. Three or more arcs crossing each
/// other at the same depth may still share an offset.
fn crossing_offsets(
    edges: &[Edge],
    proper: &[usize],
    depth: &[usize],
    height_per_level: i32,
) -> Vec<i32> {
    let mut offset = vec![0i32; edges.len()];
    for (a, &l) in proper.iter().enumerate() {
        for &r in &proper[a + 1..] {
            if depth[l] != depth[r] || !crosses(&edges[l], &edges[r]) {
                continue;
            }
            if offset[l] == 0 && offset[r] == 0 {
                offset[l] = height_per_level / 2;
            } else if offset[l] == offset[r] {
                offset[l] = height_per_level / 3;
                offset[r] = height_per_level * 2 / 3;
            }
            trace!(left = %describe(&edges[l]), right = %describe(&edges[r]), "crossing arcs");
        }
    }
    offset
}

/// Anchor x-coordinates on the token row, per edge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchors {
    pub start: Vec<Option<i32>>,
    pub end: Vec<Option<i32>>,
}

/// Share each token's top edge out between the arcs touching it.
///
/// Loop starts take the leftmost slots, loop ends the rightmost, so every loop reserves two
/// slots on its token.
pub fn assign_anchors(edges: &[Edge], bounds: &TokenBounds, vertex_extra_space: i32) -> Anchors {
    let mut anchors = Anchors {
        start: vec![None; edges.len()],
        end: vec![None; edges.len()],
    };

    let mut incident: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut loops: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, edge) in edges.iter().enumerate() {
        if edge.is_loop() {
            loops.entry(edge.start).or_default().push(i);
        } else {
            incident.entry(edge.start).or_default().push(i);
            incident.entry(edge.end).or_default().push(i);
        }
    }

    for (&token, token_bounds) in &bounds.bounds {
        let mut touching = incident.get(&token).cloned().unwrap_or_default();
        let token_loops = loops.get(&token).map(Vec::as_slice).unwrap_or(&[]);
        if touching.is_empty() && token_loops.is_empty() {
            continue;
        }
        touching.sort_by(|&a, &b| compare_on_token(&edges[a], &edges[b], token));

        let slots = (touching.len() + 1 + 2 * token_loops.len()) as i32;
        let slot_width = (token_bounds.width() + vertex_extra_space) / slots;
        let mut x = token_bounds.start - vertex_extra_space / 2 + slot_width;

        for &l in token_loops {
            anchors.start[l] = Some(x);
            x += slot_width;
        }
        for &e in &touching {
            if edges[e].start == token {
                anchors.start[e] = Some(x);
            } else {
                anchors.end[e] = Some(x);
            }
            x += slot_width;
        }
        for &l in token_loops {
            anchors.end[l] = Some(x);
            x += slot_width;
        }
    }

    anchors
}

/// Extra token width so a loop's label fits over its token
pub fn estimate_required_token_widths<M: TextMetrics>(
    edges: &[Edge],
    ctx: &LayoutContext<'_, M>,
) -> HashMap<usize, i32> {
    let mut widths = HashMap::new();
    for edge in edges.iter().filter(|e| e.is_loop()) {
        let width = ctx.label_width(&edge.display_label(), ctx.config.dependency.font_size);
        let entry = widths.entry(edge.start).or_insert(0);
        *entry = width.max(*entry);
    }
    widths
}

/// Draw all arcs with their anchors on the line `baseline + max_height`.
///
/// Returns the occupied width and height plus one hit region per label. No edges means a
/// zero-sized contribution.
pub fn layout<M: TextMetrics>(
    edges: &[Edge],
    bounds: &TokenBounds,
    baseline: i32,
    ctx: &LayoutContext<'_, M>,
    surface: &mut impl Surface,
) -> Result<LayoutOutput, LayoutError> {
    if edges.is_empty() {
        return Ok(LayoutOutput::default());
    }
    for edge in edges {
        ensure_bounds(edge, bounds)?;
    }

    let config = &ctx.config.dependency;
    let hpl = config.height_per_level;
    let plan = plan(edges, hpl)?;
    let anchors = assign_anchors(edges, bounds, config.vertex_extra_space);
    debug!(
        edges = edges.len(),
        max_depth = plan.max_depth,
        max_height = plan.max_height,
        "dependency layout"
    );

    let anchor_y = baseline + plan.max_height;
    let mut min_x = 0;
    let mut max_x = 0;
    let mut hits = Vec::with_capacity(edges.len());

    for (i, edge) in edges.iter().enumerate() {
        let (Some(x1), Some(x2)) = (anchors.start[i], anchors.end[i]) else {
            continue;
        };
        max_x = max_x.max(x1).max(x2);

        let mut apex = baseline + plan.max_height - (plan.depth[i] as i32 + 1) * hpl
            + plan.offset[i];
        if edge.is_loop() {
            apex -= hpl / 2;
        }

        let color = ctx.stylesheet.edge_color(edge).unwrap_or(Color::BLACK);
        let middle = Bounds1D::new(x1.min(x2), x1.max(x2)).middle();
        let from = Point::new(x1, anchor_y);
        let to = Point::new(x2, anchor_y);

        if config.curve {
            let top = Point::new(middle, apex);
            let corner1 = Point::new(x1, apex);
            let corner2 = Point::new(x2, apex);
            surface.curve(from, corner1, corner1, top, color);
            surface.curve(top, corner2, corner2, to, color);
        } else {
            surface.line(from, Point::new(x1, apex), color);
            surface.line(Point::new(x1, apex), Point::new(x2, apex), color);
            surface.line(Point::new(x2, apex), to, color);
        }

        let arrow = config.arrow_size;
        surface.line(Point::new(x2 - arrow, anchor_y - arrow), to, color);
        surface.line(Point::new(x2 + arrow, anchor_y - arrow), to, color);

        let label = edge.display_label();
        let label_width = ctx.label_width(&label, config.font_size);
        min_x = min_x.min(x2 - arrow).min(middle - label_width / 2);
        surface.text(
            Point::new(middle, apex + config.label_offset),
            &label,
            config.font_size,
            color,
            TextAnchor::Middle,
        );
        hits.push(HitRegion {
            origin: Point::new(middle - label_width / 2, apex),
            width: label_width,
            height: config.label_offset,
            target: HitTarget::Edge(i),
        });
    }

    Ok(LayoutOutput {
        min_x,
        width: max_x + config.arrow_size + 2,
        height: plan.max_height,
        hits,
    })
}

fn ensure_bounds(edge: &Edge, bounds: &TokenBounds) -> Result<(), LayoutError> {
    for token in [edge.start, edge.end] {
        if bounds.get(token).is_none() {
            return Err(LayoutError::invalid_reference(
                edge.label.clone(),
                edge.start,
                edge.end,
                token,
            ));
        }
    }
    Ok(())
}

fn describe(edge: &Edge) -> String {
    format!("{}({}->{})", edge.label, edge.start, edge.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::config::LayoutConfig;
    use crate::layout::types::{Primitive, Scene};
    use crate::stylesheet::Stylesheet;

    fn metrics(text: &str, _size: u32, _family: &str) -> i32 {
        text.len() as i32 * 6
    }

    fn bounds(count: usize) -> TokenBounds {
        let mut bounds = TokenBounds::default();
        for i in 0..count {
            let start = i as i32 * 50;
            bounds.bounds.insert(i, Bounds1D::new(start, start + 30));
        }
        bounds.height = 28;
        bounds
    }

    #[test]
    fn test_dominates() {
        let outer = Edge::dependency(0, 3, "A", "x");
        let inner = Edge::dependency(1, 2, "B", "x");
        let semi = Edge::dependency(0, 2, "C", "x");
        assert!(dominates(&outer, &inner));
        assert!(dominates(&outer, &semi));
        assert!(!dominates(&inner, &outer));

        let twin_a = Edge::dependency(0, 3, "A", "x");
        let twin_b = Edge::dependency(3, 0, "B", "x");
        assert!(dominates(&twin_a, &twin_b));
        assert!(!dominates(&twin_b, &twin_a));
    }

    #[test]
    fn test_compare_on_token_longer_first() {
        let long_left = Edge::dependency(0, 3, "a", "x");
        let short_left = Edge::dependency(2, 3, "b", "x");
        let short_right = Edge::dependency(3, 4, "c", "x");
        let long_right = Edge::dependency(5, 3, "d", "x");

        let mut edges = vec![
            long_right.clone(),
            short_right.clone(),
            long_left.clone(),
            short_left.clone(),
        ];
        edges.sort_by(|a, b| compare_on_token(a, b, 3));
        assert_eq!(edges, vec![long_left, short_left, long_right, short_right]);
    }

    #[test]
    fn test_compare_on_token_tie_is_lexicographic() {
        let a = Edge::dependency(3, 5, "A", "x");
        let b = Edge::dependency(3, 5, "B", "x");
        let mut edges = vec![a.clone(), b.clone()];
        edges.sort_by(|e1, e2| compare_on_token(e1, e2, 3));
        // labels sort descending
        assert_eq!(edges, vec![b.clone(), a.clone()]);

        let mut edges = vec![b.clone(), a.clone()];
        edges.sort_by(|e1, e2| compare_on_token(e1, e2, 5));
        assert_eq!(edges, vec![b, a]);
    }

    #[test]
    fn test_plan_depth_and_height() {
        let edges = vec![
            Edge::dependency(0, 3, "A", "x"),
            Edge::dependency(1, 2, "B", "x"),
        ];
        let plan = plan(&edges, 15).unwrap();
        assert_eq!(plan.depth, vec![1, 0]);
        assert_eq!(plan.dominance.dominated_by(0), &[1]);
        assert_eq!(plan.max_height, 33);
    }

    #[test]
    fn test_plan_loop_adds_half_level() {
        let edges = vec![Edge::dependency(1, 1, "REFL", "x")];
        let plan = plan(&edges, 15).unwrap();
        assert_eq!(plan.max_height, 18 + 7);
        assert_eq!(plan.offset, vec![0]);
    }

    #[test]
    fn test_single_crossing_offsets_first_edge() {
        let edges = vec![
            Edge::dependency(0, 2, "a", "x"),
            Edge::dependency(1, 3, "b", "x"),
        ];
        let plan = plan(&edges, 15).unwrap();
        assert_eq!(plan.depth, vec![0, 0]);
        assert_eq!(plan.offset, vec![7, 0]);
    }

    #[test]
    fn test_crossing_chain_is_resolved_pairwise() {
        // a crosses b, b crosses c; a and c only touch. The heuristic leaves a and b on the
        // same offset.
        let edges = vec![
            Edge::dependency(0, 2, "a", "x"),
            Edge::dependency(1, 3, "b", "x"),
            Edge::dependency(2, 4, "c", "x"),
        ];
        let plan = plan(&edges, 15).unwrap();
        assert_eq!(plan.offset, vec![7, 7, 0]);
    }

    #[test]
    fn test_crossing_at_different_depths_is_ignored() {
        let edges = vec![
            Edge::dependency(0, 3, "outer", "x"),
            Edge::dependency(1, 2, "inner", "x"),
            Edge::dependency(2, 5, "other", "x"),
        ];
        let plan = plan(&edges, 15).unwrap();
        // outer crosses other, but outer sits one level higher
        assert_eq!(plan.depth, vec![1, 0, 0]);
        assert_eq!(plan.offset, vec![0, 0, 0]);
    }

    #[test]
    fn test_loop_reserves_two_slots() {
        let edges = vec![Edge::dependency(1, 1, "REFL", "x")];
        let anchors = assign_anchors(&edges, &bounds(3), 12);
        // slot = (30 + 12) / 3 = 14, first slot at 50 - 6 + 14
        assert_eq!(anchors.start[0], Some(58));
        assert_eq!(anchors.end[0], Some(72));
    }

    #[test]
    fn test_layout_rectangular_path_and_arrow() {
        let config = LayoutConfig::default().with_curve(false);
        let stylesheet = Stylesheet::default();
        let ctx = LayoutContext::new(&config, &stylesheet, &metrics);
        let edges = vec![Edge::dependency(0, 2, "A", "dep")];
        let mut scene = Scene::new();
        let output = layout(&edges, &bounds(3), 0, &ctx, &mut scene).unwrap();

        // slot = (30 + 12) / 2 = 21: token 0 anchor at -6 + 21, token 2 at 94 + 21
        let lines: Vec<_> = scene.lines().collect();
        assert_eq!(lines[0], (Point::new(15, 18), Point::new(15, 3)));
        assert_eq!(lines[1], (Point::new(15, 3), Point::new(115, 3)));
        assert_eq!(lines[2], (Point::new(115, 3), Point::new(115, 18)));
        assert_eq!(lines[3], (Point::new(113, 16), Point::new(115, 18)));
        assert_eq!(lines[4], (Point::new(117, 16), Point::new(115, 18)));

        assert_eq!(scene.texts().collect::<Vec<_>>(), vec![("A", Point::new(65, 13))]);
        assert_eq!(output.height, 18);
        assert_eq!(output.width, 115 + 2 + 2);
        assert_eq!(output.hits[0].target, HitTarget::Edge(0));
    }

    #[test]
    fn test_layout_curve_meets_at_midpoint() {
        let (config, stylesheet) = (LayoutConfig::default(), Stylesheet::default());
        let ctx = LayoutContext::new(&config, &stylesheet, &metrics);
        let edges = vec![Edge::dependency(0, 2, "A", "dep")];
        let mut scene = Scene::new();
        layout(&edges, &bounds(3), 0, &ctx, &mut scene).unwrap();

        let curves: Vec<_> = scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Curve { start, end, .. } => Some((*start, *end)),
                _ => None,
            })
            .collect();
        assert_eq!(
            curves,
            vec![
                (Point::new(15, 18), Point::new(65, 3)),
                (Point::new(65, 3), Point::new(115, 18)),
            ]
        );
    }

    #[test]
    fn test_layout_uses_edge_color() {
        let (config, stylesheet) = (LayoutConfig::default(), Stylesheet::default());
        let ctx = LayoutContext::new(&config, &stylesheet, &metrics);
        let edges = vec![Edge::dependency(0, 1, "A", "dep:FP").with_property("FP")];
        let mut scene = Scene::new();
        layout(&edges, &bounds(2), 0, &ctx, &mut scene).unwrap();
        assert!(scene.primitives.iter().all(|p| match p {
            Primitive::Line { color, .. } | Primitive::Curve { color, .. } => *color == Color::RED,
            Primitive::Text { color, .. } => *color == Color::RED,
            Primitive::Rectangle { .. } => true,
        }));
    }

    #[test]
    fn test_layout_rejects_unknown_token() {
        let (config, stylesheet) = (LayoutConfig::default(), Stylesheet::default());
        let ctx = LayoutContext::new(&config, &stylesheet, &metrics);
        let edges = vec![Edge::dependency(0, 9, "A", "dep")];
        let mut scene = Scene::new();
        let err = layout(&edges, &bounds(3), 0, &ctx, &mut scene).unwrap_err();
        assert_eq!(err, LayoutError::invalid_reference("A", 0, 9, 9));
        assert!(scene.primitives.is_empty());
    }

    #[test]
    fn test_loop_label_width_is_required() {
        let (config, stylesheet) = (LayoutConfig::default(), Stylesheet::default());
        let ctx = LayoutContext::new(&config, &stylesheet, &metrics);
        let edges = vec![
            Edge::dependency(1, 1, "REFL", "x"),
            Edge::dependency(1, 1, "LONGER", "x"),
            Edge::dependency(0, 1, "ignored", "x"),
        ];
        let widths = estimate_required_token_widths(&edges, &ctx);
        assert_eq!(widths, HashMap::from([(1, 36)]));
    }
}
