//! SVG generation from a laid-out sentence

use crate::layout::{Color, Point, Surface, TextAnchor};

use super::sentence::SentenceLayout;
use super::SvgConfig;

/// Build SVG elements incrementally; every [`Surface`] call appends one element
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Use `family` for every text element
    pub fn add_font_family(&mut self, family: &str) {
        self.styles
            .push(format!("text {{ font-family: {}; }}", escape_xml(family)));
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn push(&mut self, element: String) {
        let indented = format!("{}{}", self.indent_str(), element);
        self.elements.push(indented);
    }

    /// Red outline used to visualize hit regions
    pub fn add_outline(&mut self, origin: Point, width: i32, height: i32) {
        let prefix = self.prefix();
        self.push(format!(
            r#"<rect class="{}hit" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="0.5"/>"#,
            prefix,
            origin.x,
            origin.y,
            width,
            height,
            Color::RED
        ));
    }

    /// Finish the document for a drawing of `width` x `height` whose left edge is at `left`
    pub fn build(self, left: i32, width: i32, height: i32) -> String {
        let padding = self.config.padding;
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            width + 2 * padding,
            height + 2 * padding,
            left - padding,
            -padding,
            width + 2 * padding,
            height + 2 * padding
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

impl Surface for SvgBuilder {
    fn line(&mut self, from: Point, to: Point, color: Color) {
        let prefix = self.prefix();
        self.push(format!(
            r#"<line class="{}line" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
            prefix, from.x, from.y, to.x, to.y, color
        ));
    }

    fn curve(&mut self, start: Point, control1: Point, control2: Point, end: Point, color: Color) {
        let prefix = self.prefix();
        self.push(format!(
            r#"<path class="{}arc" d="{}" fill="none" stroke="{}"/>"#,
            prefix,
            curve_to_d(start, control1, control2, end),
            color
        ));
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
        // token hit boxes carry neither fill nor stroke
        if fill.is_none() && stroke.is_none() {
            return;
        }
        let prefix = self.prefix();
        let radius = if corner_radius > 0 {
            format!(r#" rx="{0}" ry="{0}""#, corner_radius)
        } else {
            String::new()
        };
        let paint = |c: Option<Color>| c.map(|c| c.to_string()).unwrap_or_else(|| "none".into());
        self.push(format!(
            r#"<rect class="{}span" x="{}" y="{}" width="{}" height="{}"{} fill="{}" stroke="{}" stroke-width="{}"/>"#,
            prefix,
            origin.x,
            origin.y,
            width,
            height,
            radius,
            paint(fill),
            paint(stroke),
            line_width
        ));
    }

    fn text(
        &mut self,
        origin: Point,
        text: &str,
        font_size: u32,
        color: Color,
        anchor: TextAnchor,
    ) {
        let prefix = self.prefix();
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        self.push(format!(
            r#"<text class="{}label" x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{}">{}</text>"#,
            prefix,
            origin.x,
            origin.y,
            font_size,
            color,
            anchor,
            escape_xml(text)
        ));
    }
}

/// Render a laid-out sentence to an SVG string
pub fn render_svg(layout: &SentenceLayout, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_font_family(&layout.font_family);

    layout.scene.replay(&mut builder);

    if config.show_hits {
        for hit in &layout.hits {
            builder.add_outline(hit.origin, hit.width, hit.height);
        }
    }

    builder.build(layout.min_x, layout.width - layout.min_x, layout.height)
}

/// Convert a cubic segment to an SVG path `d` attribute
fn curve_to_d(start: Point, control1: Point, control2: Point, end: Point) -> String {
    format!(
        "M{} {} C{} {} {} {} {} {}",
        start.x, start.y, control1.x, control1.y, control2.x, control2.y, end.x, end.y
    )
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{HitRegion, HitTarget, LayoutConfig, LayoutContext, Scene};
    use crate::model::{Edge, Instance};
    use crate::renderer::render_sentence;
    use crate::stylesheet::Stylesheet;

    fn compact() -> SvgConfig {
        SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
    }

    #[test]
    fn test_curve_to_d() {
        let d = curve_to_d(
            Point::new(0, 20),
            Point::new(0, 5),
            Point::new(0, 5),
            Point::new(10, 5),
        );
        assert_eq!(d, "M0 20 C0 5 0 5 10 5");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_elements() {
        let mut builder = SvgBuilder::new(compact());
        builder.line(Point::new(1, 2), Point::new(3, 4), Color::BLACK);
        builder.rectangle(
            Point::new(0, 0),
            10,
            5,
            Some(Color::LIGHT_GRAY),
            Some(Color::BLACK),
            1,
            5,
        );
        builder.text(Point::new(5, 3), "R&D", 9, Color::RED, TextAnchor::Middle);
        let svg = builder.build(0, 10, 5);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r##"<line class="as-line" x1="1" y1="2" x2="3" y2="4" stroke="#000000"/>"##));
        assert!(svg.contains(r##"rx="5" ry="5" fill="#d3d3d3""##));
        assert!(svg.contains(r#"text-anchor="middle">R&amp;D</text>"#));
        assert!(svg.contains(r#"viewBox="-5 -5 20 15""#));
    }

    #[test]
    fn test_view_box_includes_overhanging_span() {
        let metrics = |text: &str, _size: u32, _family: &str| text.len() as i32 * 6;
        let (config, stylesheet) = (LayoutConfig::default(), Stylesheet::default());
        let ctx = LayoutContext::new(&config, &stylesheet, &metrics);
        let mut instance = Instance::new();
        instance.push_token(&[("word", "a")]);
        instance.push_token(&[("word", "b")]);
        instance.add_edge(Edge::span(0, 1, "VERY-LONG-LABEL", "chunk"));

        let layout = render_sentence(&instance, &ctx, None).unwrap();
        assert_eq!(layout.min_x, -32);
        assert_eq!(layout.width, 64);

        let svg = render_svg(&layout, &compact());
        assert!(svg.contains(r#"<rect class="as-span" x="-32""#));
        assert!(svg.contains(&format!(r#"viewBox="-37 -5 106 {}""#, layout.height + 10)));
    }

    #[test]
    fn test_invisible_rectangle_is_skipped() {
        let mut builder = SvgBuilder::new(compact());
        builder.rectangle(Point::new(0, 0), 10, 5, None, None, 0, 0);
        assert!(!builder.build(0, 10, 5).contains("<rect"));
    }

    #[test]
    fn test_render_svg_with_hits() {
        let mut scene = Scene::new();
        scene.text(Point::new(5, 14), "dog", 12, Color::BLACK, TextAnchor::Middle);
        let layout = SentenceLayout {
            min_x: 0,
            width: 20,
            height: 28,
            font_family: "serif".into(),
            scene,
            edges: vec![],
            hits: vec![HitRegion {
                origin: Point::new(0, 0),
                width: 20,
                height: 28,
                target: HitTarget::Token(0),
            }],
        };

        let plain = render_svg(&layout, &compact());
        assert!(plain.contains("font-family: serif"));
        assert!(plain.contains(">dog</text>"));
        assert!(!plain.contains("as-hit"));

        let debug = render_svg(&layout, &compact().with_show_hits(true));
        assert!(debug.contains(r#"class="as-hit""#));
    }
}
