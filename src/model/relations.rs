//! Interval relations between edges
//!
//! Every edge is treated as the closed interval `[min_index, max_index]` over token indices.
//! All predicates are pure; callers must only compare edges of the same instance.

use std::cmp::Ordering;

use super::edge::Edge;

pub fn min_index(e: &Edge) -> usize {
    e.start.min(e.end)
}

pub fn max_index(e: &Edge) -> usize {
    e.start.max(e.end)
}

/// Both endpoints at or before `token`
pub fn left_of(e: &Edge, token: usize) -> bool {
    e.start <= token && e.end <= token
}

/// Both endpoints at or after `token`
pub fn right_of(e: &Edge, token: usize) -> bool {
    e.start >= token && e.end >= token
}

pub fn length(e: &Edge) -> usize {
    e.start.abs_diff(e.end)
}

/// Strict containment of `b` in `a`
pub fn covers(a: &Edge, b: &Edge) -> bool {
    min_index(a) < min_index(b) && max_index(b) < max_index(a)
}

pub fn covers_exactly(a: &Edge, b: &Edge) -> bool {
    min_index(a) == min_index(b) && max_index(a) == max_index(b)
}

/// Containment aligned on exactly one side
pub fn covers_semi(a: &Edge, b: &Edge) -> bool {
    (min_index(a) < min_index(b) && max_index(b) == max_index(a))
        || (min_index(a) == min_index(b) && max_index(b) < max_index(a))
}

pub fn overlaps(a: &Edge, b: &Edge) -> bool {
    let (amin, amax, bmin, bmax) = (min_index(a), max_index(a), min_index(b), max_index(b));
    (amin <= bmin && bmin <= amax && amax <= bmax) || (bmin <= amin && amin <= bmax && bmax <= amax)
}

/// Proper crossing: the intervals interleave and neither contains the other
pub fn crosses(a: &Edge, b: &Edge) -> bool {
    let (amin, amax, bmin, bmax) = (min_index(a), max_index(a), min_index(b), max_index(b));
    (amin < bmin && bmin < amax && amax < bmax) || (bmin < amin && amin < bmax && bmax < amax)
}

/// Tie-break between edges that the interval relations cannot order.
///
/// Type sorts ascending but label and note sort DESCENDING (`Greater` when `a.label < b.label`).
/// The asymmetry is deliberate: anchor placement and exact-cover dominance depend on it, so
/// do not flip it.
pub fn lexicographic_order(a: &Edge, b: &Edge) -> Ordering {
    a.edge_type
        .cmp(&b.edge_type)
        .then_with(|| b.label.cmp(&a.label))
        .then_with(|| b.note.cmp(&a.note))
}
