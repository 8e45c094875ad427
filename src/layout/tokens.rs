//! Token layout: horizontal extent of each token and its stacked property rows

use std::collections::HashMap;

use crate::model::Token;

use super::config::LayoutConfig;
use super::metrics::TextMetrics;
use super::LayoutContext;
use super::types::{
    Bounds1D, HitRegion, HitTarget, LayoutOutput, Point, Surface, TextAnchor, TokenBounds,
};

/// Tokens in index order, whatever order the caller supplied them in
fn in_index_order(tokens: &[Token]) -> Vec<&Token> {
    let mut ordered: Vec<&Token> = tokens.iter().collect();
    ordered.sort_by_key(|t| t.index);
    ordered
}

fn token_width(
    token: &Token,
    extra_widths: &HashMap<usize, i32>,
    metrics: &impl TextMetrics,
    config: &LayoutConfig,
) -> i32 {
    let text_width = token
        .properties()
        .iter()
        .map(|p| metrics.text_width(&p.value, config.tokens.font_size, &config.font_family))
        .max()
        .unwrap_or(0);
    text_width.max(extra_widths.get(&token.index).copied().unwrap_or(0))
}

fn stack_height(token: &Token, config: &LayoutConfig) -> i32 {
    config.tokens.row_height * (token.properties().len() as i32 + 1)
}

/// Compute horizontal bounds and the tallest stack without drawing anything.
///
/// Tokens are placed left to right starting at x = 0, separated by the configured margin.
/// An empty token list yields height 1.
pub fn estimate_bounds<M: TextMetrics>(
    tokens: &[Token],
    extra_widths: &HashMap<usize, i32>,
    ctx: &LayoutContext<'_, M>,
) -> TokenBounds {
    let config = ctx.config;
    let mut bounds = TokenBounds::default();
    let mut x = 0;
    let mut height = 0;

    for token in in_index_order(tokens) {
        let width = token_width(token, extra_widths, ctx.metrics, config);
        bounds.bounds.insert(token.index, Bounds1D::new(x, x + width));
        x += width + config.tokens.margin;
        height = height.max(stack_height(token, config));
    }

    bounds.height = height.max(1);
    bounds
}

/// Draw every token at `origin`: one text row per property plus an invisible hit box.
///
/// The first property uses the stylesheet's primary token color, the rest the secondary one.
pub fn layout<M: TextMetrics>(
    tokens: &[Token],
    extra_widths: &HashMap<usize, i32>,
    ctx: &LayoutContext<'_, M>,
    origin: Point,
    surface: &mut impl Surface,
) -> LayoutOutput {
    let (config, stylesheet) = (ctx.config, ctx.stylesheet);
    if tokens.is_empty() {
        return LayoutOutput {
            min_x: 0,
            width: 1,
            height: 1,
            hits: vec![],
        };
    }

    let estimated = estimate_bounds(tokens, extra_widths, ctx);
    let row_height = config.tokens.row_height;
    let mut hits = Vec::with_capacity(tokens.len());

    for token in in_index_order(tokens) {
        let Some(local) = estimated.get(token.index) else {
            continue;
        };
        let bounds = Bounds1D::new(origin.x + local.start, origin.x + local.end);

        for (row, property) in token.properties().iter().enumerate() {
            let color = if row == 0 {
                stylesheet.token_primary
            } else {
                stylesheet.token_secondary
            };
            surface.text(
                Point::new(bounds.middle(), origin.y + row_height * (row as i32 + 1)),
                &property.value,
                config.tokens.font_size,
                color,
                TextAnchor::Middle,
            );
        }

        let top_left = Point::new(bounds.start, origin.y);
        surface.rectangle(top_left, bounds.width(), estimated.height, None, None, 0, 0);
        hits.push(HitRegion {
            origin: top_left,
            width: bounds.width(),
            height: estimated.height,
            target: HitTarget::Token(token.index),
        });
    }

    LayoutOutput {
        min_x: origin.x.min(0),
        width: estimated.width().max(1),
        height: estimated.height,
        hits,
    }
}
