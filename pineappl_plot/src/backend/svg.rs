//! Standalone SVG documents, optionally gzip-compressed.

use super::Backend;
use super::canvas::{Anchor, Baseline, Canvas, Font, Paint, Stroke};
use super::tex::untex;
use super::ticks::Ticks;
use crate::axes::{Artist, Axes, Color, Dash, ErrorBars, LegendLoc, Orientation, Scale};
use crate::convert::f64_from_usize;
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::style::StyleConfig;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::path::Path;

const POINTS_PER_INCH: f64 = 72.0;
const MAJOR_TICK: f64 = 3.5;
const MINOR_TICK: f64 = 2.0;
const TICK_WIDTH: f64 = 0.5;
const SPINE_WIDTH: f64 = 0.8;
const GRID_COLOR: Color = Color("#b0b0b0");
const BLACK: Color = Color("#000000");
const PAD: f64 = 4.0;

/// Writes figures as SVG documents. Labels are converted from TeX into plain text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SvgBackend;

impl Backend for SvgBackend {
    fn extension(&self, style: &StyleConfig) -> &'static str {
        if style.output_compression > 0 {
            "svgz"
        } else {
            "svg"
        }
    }

    fn render(&self, figure: &Figure, style: &StyleConfig, stem: &Path) -> Result<Vec<u8>> {
        let document = draw(figure, style)?;

        if style.output_compression == 0 {
            return Ok(document.into_bytes());
        }

        let io_error = |source| Error::Io {
            path: stem.to_path_buf(),
            source,
        };
        let mut encoder = GzEncoder::new(
            Vec::new(),
            Compression::new(style.output_compression.min(9)),
        );
        encoder.write_all(document.as_bytes()).map_err(io_error)?;
        encoder.finish().map_err(io_error)
    }
}

/// Plot area of a panel.
#[derive(Clone, Copy, Debug)]
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Maps data values onto one direction of a frame.
#[derive(Clone, Copy, Debug)]
struct Mapping {
    scale: Scale,
    lo: f64,
    hi: f64,
    from: f64,
    to: f64,
}

impl Mapping {
    fn new(scale: Scale, (min, max): (f64, f64), (from, to): (f64, f64)) -> Self {
        let (lo, hi) = match (scale.forward(min), scale.forward(max)) {
            (Some(lo), Some(hi)) if hi > lo => (lo, hi),
            _ => (0.0, 1.0),
        };

        Self {
            scale,
            lo,
            hi,
            from,
            to,
        }
    }

    fn map(&self, value: f64) -> Option<f64> {
        let value = self.scale.forward(value)?;
        Some((value - self.lo) / (self.hi - self.lo) * (self.to - self.from) + self.from)
    }
}

/// Sizes of all text elements in points.
struct Fonts {
    family: String,
    tick: f64,
    label: f64,
    title: f64,
}

impl Fonts {
    fn font(&self, size: f64, anchor: Anchor, baseline: Baseline) -> Font {
        Font {
            family: self.family.clone(),
            size,
            anchor,
            baseline,
        }
    }
}

fn legend_rows(axes: &Axes) -> usize {
    axes.legend.map_or(0, |legend| {
        axes.legend_entries().count().div_ceil(legend.columns.max(1))
    })
}

fn legend_band(axes: &Axes, loc: LegendLoc, style: &StyleConfig) -> f64 {
    match axes.legend {
        Some(legend) if legend.loc == loc && legend_rows(axes) > 0 => {
            f64_from_usize(legend_rows(axes)) * 1.4 * style.relative_size(legend.font_size) + PAD
        }
        _ => 0.0,
    }
}

fn yticks(axes: &Axes, (min, max): (f64, f64)) -> Ticks {
    if !axes.ycategories.is_empty() {
        Ticks::categorical(&axes.ycategories)
    } else if let Some(ticks) = &axes.yticks {
        Ticks::fixed(ticks, min, max)
    } else {
        Ticks::auto(axes.yscale, min, max, 5)
    }
}

fn draw(figure: &Figure, style: &StyleConfig) -> Result<String> {
    let width = figure.size.0 * POINTS_PER_INCH;
    let height = figure.size.1 * POINTS_PER_INCH;
    let fonts = Fonts {
        family: style.font_family.clone(),
        tick: style.font_size,
        label: style.label_font_size(),
        title: style.relative_size("large"),
    };

    let xlim = figure.xlim();
    let xticks = Ticks::auto(figure.xscale, xlim.0, xlim.1, 6);
    let ylims: Vec<_> = figure.panels.iter().map(Axes::view_ylim).collect();
    let yticks: Vec<_> = figure
        .panels
        .iter()
        .zip(&ylims)
        .map(|(axes, &ylim)| yticks(axes, ylim))
        .collect();

    let tick_label_width = yticks
        .iter()
        .flat_map(|ticks| &ticks.labels)
        .map(|label| {
            fonts
                .font(fonts.tick, Anchor::End, Baseline::Middle)
                .width(&untex(label))
        })
        .fold(0.0, f64::max);
    let left = 2.0f64.mul_add(PAD, fonts.label) + tick_label_width + PAD;
    let right = 3.0 * PAD;

    let has_title = figure.panels.first().is_some_and(|axes| !axes.title.is_empty());
    let has_xlabel = figure.panels.last().is_some_and(|axes| !axes.xlabel.is_empty());
    let top = 2.0f64.mul_add(PAD, if has_title { fonts.title + PAD } else { 0.0 });
    let bottom = fonts.tick
        + 2.0 * PAD
        + if has_xlabel { fonts.label + PAD } else { 0.0 };

    let bands: Vec<_> = figure
        .panels
        .iter()
        .map(|axes| {
            (
                legend_band(axes, LegendLoc::Above, style),
                legend_band(axes, LegendLoc::Below, style),
            )
        })
        .collect();
    let band_total: f64 = bands.iter().map(|(above, below)| above + below).sum();
    let panel_height = ((height - top - bottom - band_total)
        / f64_from_usize(figure.panels.len().max(1)))
    .max(10.0);

    let mut canvas = Canvas::new(width, height);
    let mut y = top;
    let count = figure.panels.len();

    for (index, axes) in figure.panels.iter().enumerate() {
        let (above, below) = bands[index];
        y += above;

        let frame = Frame {
            left,
            top: y,
            width: (width - left - right).max(10.0),
            height: panel_height,
        };
        let panel = PanelView {
            axes,
            frame,
            xmap: Mapping::new(figure.xscale, xlim, (frame.left, frame.right())),
            ymap: Mapping::new(axes.yscale, ylims[index], (frame.bottom(), frame.top)),
            xticks: &xticks,
            yticks: &yticks[index],
            bottom: index + 1 == count,
            above,
        };

        panel.draw(&mut canvas, &fonts, style);

        y += panel_height + below;
    }

    Ok(canvas.finish_svg()?)
}

struct PanelView<'a> {
    axes: &'a Axes,
    frame: Frame,
    xmap: Mapping,
    ymap: Mapping,
    xticks: &'a Ticks,
    yticks: &'a Ticks,
    bottom: bool,
    above: f64,
}

impl PanelView<'_> {
    fn point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        Some((self.xmap.map(x)?, self.ymap.map(y)?))
    }

    fn draw(&self, canvas: &mut Canvas, fonts: &Fonts, style: &StyleConfig) {
        let frame = self.frame;

        if self.axes.framed {
            self.draw_grid(canvas);
        }

        canvas.begin_clip(frame.left, frame.top, frame.width, frame.height);

        let mut artists: Vec<_> = self.axes.artists.iter().collect();
        artists.sort_by(|a, b| zorder(a).total_cmp(&zorder(b)));

        for artist in &artists {
            self.draw_artist(canvas, artist);
        }

        canvas.end_clip();

        self.draw_spines_and_ticks(canvas, fonts);
        self.draw_labels(canvas, fonts);

        if let Some(legend) = self.axes.legend {
            self.draw_legend(canvas, fonts, style, legend.loc, legend.columns, legend.font_size);
        }

        for artist in &artists {
            if let Artist::Annotation { content, font_size } = artist {
                let size = style.relative_size(font_size);
                let text = untex(content);
                let font = fonts.font(size, Anchor::End, Baseline::Top);
                let x = 0.02f64.mul_add(-frame.width, frame.right());
                let y = 0.02f64.mul_add(frame.height, frame.top);

                canvas.rect(
                    x - font.width(&text),
                    y,
                    font.width(&text),
                    size * 1.2,
                    Paint::filled(Color::WHITE, 0.7),
                );
                canvas.text(x, y, &text, &font);
            }
        }
    }

    fn draw_grid(&self, canvas: &mut Canvas) {
        let frame = self.frame;
        let stroke = Stroke {
            dash: Dash::Dotted,
            ..Stroke::solid(GRID_COLOR, 0.8)
        };

        for px in self.xticks.major.iter().filter_map(|&x| self.xmap.map(x)) {
            canvas.line(px, frame.top, px, frame.bottom(), stroke);
        }

        for py in self.yticks.major.iter().filter_map(|&y| self.ymap.map(y)) {
            if py >= frame.top - 0.5 && py <= frame.bottom() + 0.5 {
                canvas.line(frame.left, py, frame.right(), py, stroke);
            }
        }
    }

    fn draw_artist(&self, canvas: &mut Canvas, artist: &Artist) {
        match artist {
            Artist::Step { x, y, line, .. } => {
                let stroke = Stroke {
                    dash: line.dash,
                    ..Stroke::solid(line.color, line.width)
                };

                for run in runs(step_vertices(x, y).map(|(x, y)| self.point(x, y))) {
                    canvas.polyline(run, stroke);
                }
            }
            Artist::StepFill {
                x, y1, y2, fill, ..
            } => {
                let paint = Paint {
                    fill: Some((fill.color, fill.alpha)),
                    stroke: (fill.line_width > 0.0).then_some(Stroke {
                        opacity: fill.alpha,
                        ..Stroke::solid(fill.color, fill.line_width)
                    }),
                };

                for polygon in self.fill_polygons(x, y1, y2) {
                    canvas.polygon(polygon, paint);
                }
            }
            Artist::ErrorBars(bars) => self.draw_error_bars(canvas, bars),
            Artist::VSpan { xmin, xmax, fill } => {
                if let (Some(left), Some(right)) = (self.xmap.map(*xmin), self.xmap.map(*xmax)) {
                    canvas.rect(
                        left.min(right),
                        self.frame.top,
                        (right - left).abs(),
                        self.frame.height,
                        Paint::filled(fill.color, fill.alpha),
                    );
                }
            }
            // drawn on top of everything else
            Artist::Annotation { .. } => {}
        }
    }

    /// One polygon per run of consecutive bins in which both step lines can be shown.
    fn fill_polygons(&self, x: &[f64], y1: &[f64], y2: &[f64]) -> Vec<Vec<(f64, f64)>> {
        let bins = x.len().saturating_sub(1).min(y1.len()).min(y2.len());
        let mut polygons = Vec::new();
        let mut upper = Vec::new();
        let mut lower = Vec::new();

        for bin in 0..bins {
            let corners = (
                self.point(x[bin], y2[bin]),
                self.point(x[bin + 1], y2[bin]),
                self.point(x[bin], y1[bin]),
                self.point(x[bin + 1], y1[bin]),
            );

            if let (Some(a), Some(b), Some(c), Some(d)) = corners {
                upper.extend([a, b]);
                lower.extend([c, d]);
            } else if !upper.is_empty() {
                polygons.push(close_polygon(&mut upper, &mut lower));
            }
        }

        if !upper.is_empty() {
            polygons.push(close_polygon(&mut upper, &mut lower));
        }

        polygons
    }

    fn draw_error_bars(&self, canvas: &mut Canvas, bars: &ErrorBars) {
        let stroke = Stroke::solid(bars.color, bars.line_width);
        // caps extend `cap_size` points to both sides
        let cap = 2.0 * bars.cap_size;

        for (((&x, &y), &lower), &upper) in
            bars.x.iter().zip(&bars.y).zip(&bars.lower).zip(&bars.upper)
        {
            let Some((px, py)) = self.point(x, y) else {
                continue;
            };

            match bars.orientation {
                Orientation::Vertical => {
                    if let (Some(lo), Some(hi)) =
                        (self.ymap.map(y - lower), self.ymap.map(y + upper))
                    {
                        canvas.error_bar(px, lo, hi, cap, stroke);
                    }
                }
                Orientation::Horizontal => {
                    if let (Some(lo), Some(hi)) =
                        (self.xmap.map(x - lower), self.xmap.map(x + upper))
                    {
                        canvas.error_bar_h(lo, hi, py, cap, stroke);
                    }
                }
            }

            if bars.marker_size > 0.0 {
                // point markers are half as large as regular ones
                canvas.circle(px, py, 0.25 * bars.marker_size, Paint::filled(bars.color, 1.0));
            }
        }
    }

    fn draw_spines_and_ticks(&self, canvas: &mut Canvas, fonts: &Fonts) {
        let frame = self.frame;
        let spine = Stroke::solid(BLACK, SPINE_WIDTH);
        let tick = Stroke::solid(BLACK, TICK_WIDTH);
        let framed = self.axes.framed;

        canvas.line(frame.left, frame.top, frame.right(), frame.top, spine);
        canvas.line(frame.left, frame.bottom(), frame.right(), frame.bottom(), spine);
        canvas.line(frame.left, frame.top, frame.left, frame.bottom(), spine);
        canvas.line(frame.right(), frame.top, frame.right(), frame.bottom(), spine);

        let inside_x = |px: f64| px >= frame.left - 0.5 && px <= frame.right() + 0.5;
        let inside_y = |py: f64| py >= frame.top - 0.5 && py <= frame.bottom() + 0.5;

        let xticks = self
            .xticks
            .major
            .iter()
            .map(|&x| (x, MAJOR_TICK))
            .chain(
                self.xticks
                    .minor
                    .iter()
                    .filter(|_| framed)
                    .map(|&x| (x, MINOR_TICK)),
            );

        for (x, length) in xticks {
            let Some(px) = self.xmap.map(x).filter(|&px| inside_x(px)) else {
                continue;
            };

            if framed {
                canvas.line(px, frame.bottom(), px, frame.bottom() - length, tick);
                canvas.line(px, frame.top, px, frame.top + length, tick);
            } else {
                canvas.line(px, frame.bottom(), px, frame.bottom() + length, tick);
            }
        }

        let yticks = self
            .yticks
            .major
            .iter()
            .map(|&y| (y, MAJOR_TICK))
            .chain(
                self.yticks
                    .minor
                    .iter()
                    .filter(|_| framed)
                    .map(|&y| (y, MINOR_TICK)),
            );

        for (y, length) in yticks {
            let Some(py) = self.ymap.map(y).filter(|&py| inside_y(py)) else {
                continue;
            };

            if framed {
                canvas.line(frame.left, py, frame.left + length, py, tick);
                canvas.line(frame.right(), py, frame.right() - length, py, tick);
            } else {
                canvas.line(frame.left, py, frame.left - length, py, tick);
            }
        }

        let ylabel_font = fonts.font(fonts.tick, Anchor::End, Baseline::Middle);

        for (&y, label) in self.yticks.major.iter().zip(&self.yticks.labels) {
            if let Some(py) = self.ymap.map(y).filter(|&py| inside_y(py)) {
                canvas.text(frame.left - PAD, py, &untex(label), &ylabel_font);
            }
        }

        // the x-axis is shared, only the bottom panel shows its labels
        if self.bottom {
            let xlabel_font = fonts.font(fonts.tick, Anchor::Middle, Baseline::Top);

            for (&x, label) in self.xticks.major.iter().zip(&self.xticks.labels) {
                if let Some(px) = self.xmap.map(x).filter(|&px| inside_x(px)) {
                    canvas.text(px, frame.bottom() + PAD, &untex(label), &xlabel_font);
                }
            }
        }
    }

    fn draw_labels(&self, canvas: &mut Canvas, fonts: &Fonts) {
        let frame = self.frame;
        let axes = self.axes;

        if !axes.title.is_empty() {
            canvas.text(
                frame.left + 0.5 * frame.width,
                frame.top - self.above - PAD,
                &untex(&axes.title),
                &fonts.font(fonts.title, Anchor::Middle, Baseline::Bottom),
            );
        }

        if !axes.ylabel.is_empty() {
            canvas.text_rotated(
                PAD + 0.5 * fonts.label,
                frame.top + 0.5 * frame.height,
                &untex(&axes.ylabel),
                &fonts.font(fonts.label, Anchor::Middle, Baseline::Middle),
                -90.0,
            );
        }

        if !axes.xlabel.is_empty() {
            canvas.text(
                frame.left + 0.5 * frame.width,
                frame.bottom() + fonts.tick + 2.0 * PAD,
                &untex(&axes.xlabel),
                &fonts.font(fonts.label, Anchor::Middle, Baseline::Top),
            );
        }
    }

    fn draw_legend(
        &self,
        canvas: &mut Canvas,
        fonts: &Fonts,
        style: &StyleConfig,
        loc: LegendLoc,
        columns: usize,
        font_size: &str,
    ) {
        let entries: Vec<_> = self
            .axes
            .legend_entries()
            .map(|(label, artist)| (untex(label), artist))
            .collect();

        if entries.is_empty() {
            return;
        }

        let frame = self.frame;
        let size = style.relative_size(font_size);
        let font = fonts.font(size, Anchor::Start, Baseline::Middle);
        let row_height = 1.4 * size;
        let swatch = 2.0 * size;
        let columns = columns.max(1);
        let rows = f64_from_usize(entries.len().div_ceil(columns));

        let (left, top, column_width) = match loc {
            LegendLoc::Above => (
                frame.left,
                rows.mul_add(-row_height, frame.top) - PAD,
                frame.width / f64_from_usize(columns),
            ),
            LegendLoc::Below => {
                let offset = if self.bottom {
                    fonts.tick + fonts.label + 4.0 * PAD
                } else {
                    PAD
                };
                (frame.left, frame.bottom() + offset, frame.width / f64_from_usize(columns))
            }
            LegendLoc::Best => {
                let column_width = entries
                    .iter()
                    .map(|(label, _)| font.width(label))
                    .fold(0.0, f64::max)
                    + swatch
                    + 2.0 * PAD;
                (
                    f64_from_usize(columns).mul_add(-column_width, frame.right()) - PAD,
                    frame.top + PAD,
                    column_width,
                )
            }
        };

        for (index, (label, artist)) in entries.iter().enumerate() {
            let x = f64_from_usize(index % columns).mul_add(column_width, left);
            let y = (f64_from_usize(index / columns) + 0.5).mul_add(row_height, top);

            draw_handle(canvas, artist, x, y, swatch, 0.7 * size);
            canvas.text(x + swatch + PAD, y, label, &font);
        }
    }
}

fn draw_handle(canvas: &mut Canvas, artist: &Artist, x: f64, y: f64, width: f64, height: f64) {
    match artist {
        Artist::Step { line, .. } => {
            canvas.line(
                x,
                y,
                x + width,
                y,
                Stroke {
                    dash: line.dash,
                    ..Stroke::solid(line.color, line.width)
                },
            );
        }
        Artist::StepFill { fill, .. } => {
            canvas.rect(
                x,
                y - 0.5 * height,
                width,
                height,
                Paint {
                    fill: Some((fill.color, fill.alpha)),
                    stroke: (fill.line_width > 0.0).then_some(Stroke {
                        opacity: fill.alpha,
                        ..Stroke::solid(fill.color, fill.line_width)
                    }),
                },
            );
        }
        Artist::ErrorBars(bars) => {
            let stroke = Stroke::solid(bars.color, bars.line_width);
            let center = 0.5f64.mul_add(width, x);

            match bars.orientation {
                Orientation::Vertical => {
                    canvas.error_bar(center, y - 0.5 * height, y + 0.5 * height, bars.cap_size, stroke);
                }
                Orientation::Horizontal => {
                    canvas.error_bar_h(x, x + width, y, height, stroke);
                }
            }
        }
        Artist::VSpan { .. } | Artist::Annotation { .. } => {}
    }
}

/// Default drawing order: areas below lines.
fn zorder(artist: &Artist) -> f64 {
    match artist {
        Artist::Step { zorder, .. } => zorder.unwrap_or(2.0),
        Artist::ErrorBars(_) => 2.0,
        Artist::StepFill { .. } | Artist::VSpan { .. } => 1.0,
        Artist::Annotation { .. } => 3.0,
    }
}

/// Vertices of a step line that holds `y[i]` until `x[i + 1]`.
fn step_vertices<'a>(x: &'a [f64], y: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
    let len = x.len().min(y.len());

    (0..len).flat_map(move |i| {
        let corner = (i + 1 < len).then(|| (x[i + 1], y[i]));
        std::iter::once((x[i], y[i])).chain(corner)
    })
}

/// Splits a line at the vertices that can not be shown.
fn runs(points: impl Iterator<Item = Option<(f64, f64)>>) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut run = Vec::new();

    for point in points {
        if let Some(point) = point {
            run.push(point);
        } else if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }

    runs.push(run);
    runs.retain(|run| run.len() > 1);
    runs
}

fn close_polygon(upper: &mut Vec<(f64, f64)>, lower: &mut Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let mut polygon = std::mem::take(upper);
    polygon.extend(lower.drain(..).rev());
    polygon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::{Fill, Legend, Line};
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn figure() -> Figure {
        let mut top = Axes::default();
        top.style_frame();
        top.title = r"Drell--Yan".to_owned();
        top.ylabel = r"$\sigma$ [\si{\pico\barn}]".to_owned();
        top.yscale = Scale::Log;
        top.step(
            &[1.0, 10.0, 100.0],
            &[5.0, 0.5, 0.5],
            Line::solid(Color::ROYALBLUE, 1.0),
            Some(r"$0 < y < 1$"),
        );
        top.fill_between(
            &[1.0, 10.0, 100.0],
            &[4.0, 0.4, 0.4],
            &[6.0, 0.6, 0.6],
            Fill {
                color: Color::ROYALBLUE,
                alpha: 0.4,
                line_width: 0.5,
            },
            None,
        );
        top.legend = Some(Legend {
            loc: LegendLoc::Best,
            columns: 1,
            font_size: "xx-small",
        });

        let mut bottom = Axes::default();
        bottom.style_frame();
        bottom.xlabel = r"$M$ [\si{\giga\electronvolt}]".to_owned();
        bottom.step(
            &[1.0, 10.0, 100.0],
            &[f64::NAN, 2.0, 2.0],
            Line::solid(Color::RED, 1.0),
            Some("NLO QCD"),
        );
        bottom.legend = Some(Legend {
            loc: LegendLoc::Above,
            columns: 4,
            font_size: "x-small",
        });

        Figure {
            size: (6.4, 4.8),
            panels: vec![top, bottom],
            xscale: Scale::Log,
        }
    }

    #[test]
    fn step_vertices_hold_values_until_next_edge() {
        let vertices: Vec<_> = step_vertices(&[0.0, 1.0, 2.0], &[3.0, 4.0, 4.0]).collect();

        assert_eq!(
            vertices,
            vec![(0.0, 3.0), (1.0, 3.0), (1.0, 4.0), (2.0, 4.0), (2.0, 4.0)]
        );
    }

    #[test]
    fn runs_split_at_gaps() {
        let runs = runs(
            [
                Some((0.0, 0.0)),
                Some((1.0, 0.0)),
                None,
                Some((2.0, 0.0)),
                None,
                Some((3.0, 0.0)),
                Some((4.0, 0.0)),
            ]
            .into_iter(),
        );

        assert_eq!(
            runs,
            vec![vec![(0.0, 0.0), (1.0, 0.0)], vec![(3.0, 0.0), (4.0, 0.0)]]
        );
    }

    #[test]
    fn mapping_on_log_scale() {
        let mapping = Mapping::new(Scale::Log, (1.0, 100.0), (0.0, 200.0));

        assert_eq!(mapping.map(10.0), Some(100.0));
        assert_eq!(mapping.map(0.0), None);
        assert_eq!(mapping.map(-1.0), None);
    }

    #[test]
    fn document_contains_plain_text_labels() {
        let style = StyleConfig::default();
        let bytes = SvgBackend
            .render(&figure(), &style, Path::new("unused"))
            .unwrap();
        let svg = String::from_utf8(bytes).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Drell\u{2013}Yan</text>"));
        assert!(svg.contains("\u{3c3} [pb]</text>"));
        assert!(svg.contains("M [GeV]</text>"));
        assert!(svg.contains("NLO QCD</text>"));
        assert!(svg.contains("0 &lt; y &lt; 1</text>"));
        assert!(svg.contains(r##"stroke="#4169e1""##));
        assert!(svg.contains(r#"fill-opacity="0.400""#));
        assert!(svg.contains("10^1</text>"));
        assert_eq!(svg.matches("<clipPath").count(), 2);
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn compressed_documents() {
        let style = StyleConfig {
            output_compression: 6,
            ..StyleConfig::default()
        };

        assert_eq!(SvgBackend.extension(&style), "svgz");
        assert_eq!(SvgBackend.extension(&StyleConfig::default()), "svg");

        let bytes = SvgBackend
            .render(&figure(), &style, Path::new("unused"))
            .unwrap();
        let mut svg = String::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_string(&mut svg)
            .unwrap();

        assert!(svg.ends_with("</svg>\n"));
    }
}
