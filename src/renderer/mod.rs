//! Sentence composition and SVG output
//!
//! [`render_sentence`] runs the layout passes onto a recorded [`crate::layout::Scene`];
//! [`render_svg`] replays that scene into an SVG string.

pub mod config;
pub mod sentence;
pub mod svg;

pub use config::SvgConfig;
pub use sentence::{render_sentence, SentenceLayout};
pub use svg::{render_svg, SvgBuilder};
