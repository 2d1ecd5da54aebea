//! Deferred SVG drawing surface. Coordinates are in points, with the origin in the upper left
//! corner.

use crate::axes::{Color, Dash};
use std::fmt::{self, Write};

/// Stroke of lines and outlines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
    pub dash: Dash,
}

impl Stroke {
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            dash: Dash::Solid,
        }
    }
}

/// Fill and optional outline of areas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub fill: Option<(Color, f64)>,
    pub stroke: Option<Stroke>,
}

impl Paint {
    pub const fn filled(color: Color, opacity: f64) -> Self {
        Self {
            fill: Some((color, opacity)),
            stroke: None,
        }
    }
}

/// Horizontal alignment of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Vertical alignment of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

impl Baseline {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "hanging",
            Self::Middle => "central",
            Self::Bottom => "alphabetic",
        }
    }
}

/// Appearance of text.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub anchor: Anchor,
    pub baseline: Baseline,
}

impl Font {
    /// Returns a rough estimate of the width of `content` in points.
    pub fn width(&self, content: &str) -> f64 {
        0.55 * self.size * crate::convert::f64_from_usize(content.chars().count())
    }
}

#[derive(Clone, Debug)]
enum SvgElement {
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        paint: Paint,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        paint: Paint,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        paint: Paint,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        font: Font,
        rotate: Option<f64>,
    },
    Group {
        clip_id: String,
        children: Vec<SvgElement>,
    },
}

/// Collects elements and writes them as a standalone SVG document.
pub struct Canvas {
    width: f64,
    height: f64,
    elements: Vec<SvgElement>,
    defs: Vec<String>,
    clipped: Option<(String, Vec<SvgElement>)>,
    next_clip_id: usize,
}

impl Canvas {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
            defs: Vec::new(),
            clipped: None,
            next_clip_id: 0,
        }
    }

    fn push(&mut self, element: SvgElement) {
        if let Some((_, children)) = &mut self.clipped {
            children.push(element);
        } else {
            self.elements.push(element);
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, paint: Paint) {
        self.push(SvgElement::Rect { x, y, w, h, paint });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) {
        self.push(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        });
    }

    pub fn polyline(&mut self, points: Vec<(f64, f64)>, stroke: Stroke) {
        if points.len() > 1 {
            self.push(SvgElement::Polyline { points, stroke });
        }
    }

    pub fn polygon(&mut self, points: Vec<(f64, f64)>, paint: Paint) {
        if points.len() > 2 {
            self.push(SvgElement::Polygon { points, paint });
        }
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, paint: Paint) {
        self.push(SvgElement::Circle { cx, cy, r, paint });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, font: &Font) {
        self.push(SvgElement::Text {
            x,
            y,
            content: content.to_owned(),
            font: font.clone(),
            rotate: None,
        });
    }

    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, font: &Font, angle: f64) {
        self.push(SvgElement::Text {
            x,
            y,
            content: content.to_owned(),
            font: font.clone(),
            rotate: Some(angle),
        });
    }

    /// Vertical error bar with caps of width `cap`.
    pub fn error_bar(&mut self, x: f64, y_lo: f64, y_hi: f64, cap: f64, stroke: Stroke) {
        self.line(x, y_lo, x, y_hi, stroke);
        if cap > 0.0 {
            let half = cap / 2.0;
            self.line(x - half, y_lo, x + half, y_lo, stroke);
            self.line(x - half, y_hi, x + half, y_hi, stroke);
        }
    }

    /// Horizontal error bar with caps of height `cap`.
    pub fn error_bar_h(&mut self, x_lo: f64, x_hi: f64, y: f64, cap: f64, stroke: Stroke) {
        self.line(x_lo, y, x_hi, y, stroke);
        if cap > 0.0 {
            let half = cap / 2.0;
            self.line(x_lo, y - half, x_lo, y + half, stroke);
            self.line(x_hi, y - half, x_hi, y + half, stroke);
        }
    }

    /// Clips everything drawn until [`Canvas::end_clip`] to the given rectangle.
    pub fn begin_clip(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let id = format!("clip{}", self.next_clip_id);
        self.next_clip_id += 1;
        self.defs.push(format!(
            r#"<clipPath id="{id}"><rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" /></clipPath>"#
        ));
        self.end_clip();
        self.clipped = Some((id, Vec::new()));
    }

    pub fn end_clip(&mut self) {
        if let Some((clip_id, children)) = self.clipped.take() {
            self.elements.push(SvgElement::Group { clip_id, children });
        }
    }

    /// Writes the document.
    pub fn finish_svg(mut self) -> Result<String, fmt::Error> {
        self.end_clip();

        let mut out = String::with_capacity(32 * 1024);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}pt" height="{h:.2}pt" viewBox="0 0 {w:.2} {h:.2}">"#,
            w = self.width,
            h = self.height,
        )?;

        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            for def in &self.defs {
                writeln!(out, "{def}")?;
            }
            out.push_str("</defs>\n");
        }

        writeln!(
            out,
            r#"<rect width="{:.2}" height="{:.2}" fill="white" />"#,
            self.width, self.height
        )?;

        for element in &self.elements {
            render_element(&mut out, element)?;
        }

        out.push_str("</svg>\n");
        Ok(out)
    }
}

fn write_points(out: &mut String, points: &[(f64, f64)]) -> fmt::Result {
    out.push_str(r#" points=""#);
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{x:.2},{y:.2}")?;
    }
    out.push('"');
    Ok(())
}

fn write_stroke(out: &mut String, stroke: &Stroke) -> fmt::Result {
    write!(
        out,
        r#" stroke="{}" stroke-width="{:.2}""#,
        stroke.color.0, stroke.width
    )?;
    if stroke.opacity < 1.0 {
        write!(out, r#" stroke-opacity="{:.3}""#, stroke.opacity)?;
    }
    // dash lengths are multiples of the line width
    let pattern = match stroke.dash {
        Dash::Solid => None,
        Dash::Dashed => Some((3.7, 1.6)),
        Dash::Dotted => Some((1.0, 1.65)),
    };
    if let Some((on, off)) = pattern {
        write!(
            out,
            r#" stroke-dasharray="{:.2} {:.2}""#,
            on * stroke.width,
            off * stroke.width
        )?;
    }
    Ok(())
}

fn write_paint(out: &mut String, paint: &Paint) -> fmt::Result {
    if let Some((color, opacity)) = paint.fill {
        write!(out, r#" fill="{}""#, color.0)?;
        if opacity < 1.0 {
            write!(out, r#" fill-opacity="{opacity:.3}""#)?;
        }
    } else {
        out.push_str(r#" fill="none""#);
    }
    if let Some(stroke) = &paint.stroke {
        write_stroke(out, stroke)?;
    }
    Ok(())
}

fn escape_xml(out: &mut String, content: &str) {
    for ch in content.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

fn render_element(out: &mut String, element: &SvgElement) -> fmt::Result {
    match element {
        SvgElement::Rect { x, y, w, h, paint } => {
            write!(
                out,
                r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#
            )?;
            write_paint(out, paint)?;
            out.push_str(" />\n");
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => {
            write!(
                out,
                r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#
            )?;
            write_stroke(out, stroke)?;
            out.push_str(" />\n");
        }
        SvgElement::Polyline { points, stroke } => {
            out.push_str("<polyline");
            write_points(out, points)?;
            out.push_str(r#" fill="none" stroke-linejoin="miter""#);
            write_stroke(out, stroke)?;
            out.push_str(" />\n");
        }
        SvgElement::Polygon { points, paint } => {
            out.push_str("<polygon");
            write_points(out, points)?;
            write_paint(out, paint)?;
            out.push_str(" />\n");
        }
        SvgElement::Circle { cx, cy, r, paint } => {
            write!(out, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}""#)?;
            write_paint(out, paint)?;
            out.push_str(" />\n");
        }
        SvgElement::Text {
            x,
            y,
            content,
            font,
            rotate,
        } => {
            write!(out, r#"<text x="{x:.2}" y="{y:.2}" font-family=""#)?;
            escape_xml(out, &font.family);
            write!(
                out,
                r#"" font-size="{:.1}" text-anchor="{}" dominant-baseline="{}""#,
                font.size,
                font.anchor.as_str(),
                font.baseline.as_str()
            )?;
            if let Some(angle) = rotate {
                write!(out, r#" transform="rotate({angle:.1},{x:.2},{y:.2})""#)?;
            }
            out.push('>');
            escape_xml(out, content);
            out.push_str("</text>\n");
        }
        SvgElement::Group { clip_id, children } => {
            writeln!(out, r#"<g clip-path="url(#{clip_id})">"#)?;
            for child in children {
                render_element(out, child)?;
            }
            out.push_str("</g>\n");
        }
    }

    Ok(())
}
