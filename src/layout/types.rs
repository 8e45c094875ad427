//! Core types for the layout engine

use std::collections::BTreeMap;
use std::fmt;

/// A pixel position; y grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A horizontal pixel interval occupied by a token or a drawn shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds1D {
    pub start: i32,
    pub end: i32,
}

impl Bounds1D {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> i32 {
        self.end - self.start
    }

    /// Integer midpoint, rounded towards `start`
    pub fn middle(&self) -> i32 {
        self.start + (self.end - self.start).div_euclid(2)
    }
}

/// Horizontal bounds for every token plus the height of the tallest token stack
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenBounds {
    /// Keyed by token index
    pub bounds: BTreeMap<usize, Bounds1D>,
    pub height: i32,
}

impl TokenBounds {
    pub fn get(&self, token: usize) -> Option<Bounds1D> {
        self.bounds.get(&token).copied()
    }

    /// Right edge of the last token, 0 when there are none
    pub fn width(&self) -> i32 {
        self.bounds.values().map(|b| b.end).max().unwrap_or(0)
    }
}

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` or one of a few named colors
    pub fn parse(value: &str) -> Option<Color> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        match value.to_ascii_lowercase().as_str() {
            "black" => Some(Color::BLACK),
            "white" => Some(Color::WHITE),
            "gray" | "grey" => Some(Color::GRAY),
            "lightgray" | "lightgrey" => Some(Color::LIGHT_GRAY),
            "red" => Some(Color::RED),
            "blue" => Some(Color::BLUE),
            "green" => Some(Color::rgb(0, 128, 0)),
            "orange" => Some(Color::rgb(255, 165, 0)),
            "magenta" => Some(Color::rgb(255, 0, 255)),
            "cyan" => Some(Color::rgb(0, 255, 255)),
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Color> {
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Color::rgb(digits.next()??, digits.next()??, digits.next()??))
            }
            6 => Some(Color::rgb(
                channel(hex.get(0..2)?)?,
                channel(hex.get(2..4)?)?,
                channel(hex.get(4..6)?)?,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value).ok_or_else(|| format!("invalid color '{}'", value))
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Color::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// Text anchor position for labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    /// Bezier segment with two control points
    Curve {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
        color: Color,
    },
    Rectangle {
        origin: Point,
        width: i32,
        height: i32,
        fill: Option<Color>,
        stroke: Option<Color>,
        line_width: i32,
        corner_radius: i32,
    },
    /// `origin` is the baseline point the anchor refers to
    Text {
        origin: Point,
        text: String,
        font_size: u32,
        color: Color,
        anchor: TextAnchor,
    },
}

/// Consumer of drawing primitives; calls are fire-and-forget
pub trait Surface {
    fn line(&mut self, from: Point, to: Point, color: Color);

    fn curve(&mut self, start: Point, control1: Point, control2: Point, end: Point, color: Color);

    #[allow(clippy::too_many_arguments)]
    fn rectangle(
        &mut self,
        origin: Point,
        width: i32,
        height: i32,
        fill: Option<Color>,
        stroke: Option<Color>,
        line_width: i32,
        corner_radius: i32,
    );

    fn text(&mut self, origin: Point, text: &str, font_size: u32, color: Color, anchor: TextAnchor);

    /// Forward a recorded primitive to the matching call
    fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Line { from, to, color } => self.line(*from, *to, *color),
            Primitive::Curve {
                start,
                control1,
                control2,
                end,
                color,
            } => self.curve(*start, *control1, *control2, *end, *color),
            Primitive::Rectangle {
                origin,
                width,
                height,
                fill,
                stroke,
                line_width,
                corner_radius,
            } => self.rectangle(
                *origin,
                *width,
                *height,
                *fill,
                *stroke,
                *line_width,
                *corner_radius,
            ),
            Primitive::Text {
                origin,
                text,
                font_size,
                color,
                anchor,
            } => self.text(*origin, text, *font_size, *color, *anchor),
        }
    }
}

/// A surface that records primitives in call order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw every recorded primitive onto another surface
    pub fn replay(&self, target: &mut impl Surface) {
        for primitive in &self.primitives {
            target.draw(primitive);
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, origin, .. } => Some((text.as_str(), *origin)),
            _ => None,
        })
    }
}

impl Surface for Scene {
    fn line(&mut self, from: Point, to: Point, color: Color) {
        self.primitives.push(Primitive::Line { from, to, color });
    }

    fn curve(&mut self, start: Point, control1: Point, control2: Point, end: Point, color: Color) {
        self.primitives.push(Primitive::Curve {
            start,
            control1,
            control2,
            end,
            color,
        });
    }

    fn rectangle(
        &mut self,
        origin: Point,
        width: i32,
        height: i32,
        fill: Option<Color>,
        stroke: Option<Color>,
        line_width: i32,
        corner_radius: i32,
    ) {
        self.primitives.push(Primitive::Rectangle {
            origin,
            width,
            height,
            fill,
            stroke,
            line_width,
            corner_radius,
        });
    }

    fn text(
        &mut self,
        origin: Point,
        text: &str,
        font_size: u32,
        color: Color,
        anchor: TextAnchor,
    ) {
        self.primitives.push(Primitive::Text {
            origin,
            text: text.to_string(),
            font_size,
            color,
            anchor,
        });
    }
}

/// What a hit region points back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Index into the edge slice handed to the layout call
    Edge(usize),
    /// Token index
    Token(usize),
}

/// A clickable rectangle the caller may keep for mouse interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
    pub target: HitTarget,
}

impl HitRegion {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.height
    }
}

/// Size and hit regions produced by one layout pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOutput {
    /// Leftmost x drawn; negative when a label or span overhangs the first token
    pub min_x: i32,
    pub width: i32,
    pub height: i32,
    pub hits: Vec<HitRegion>,
}
