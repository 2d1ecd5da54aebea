//! Drawing primitives recorded per panel.
//!
//! An [`Axes`] does not draw anything itself, it records what a panel contains. Backends
//! replay the recorded [`Artist`]s into their own output format.

use super::scaler::{self, YLimits};

/// Color given as an SVG/matplotlib compatible hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub &'static str);

impl Color {
    /// `royalblue`, used for the prediction.
    pub const ROYALBLUE: Self = Self("#4169e1");
    /// `red`, used for the QCD-only reference.
    pub const RED: Self = Self("#ff0000");
    /// White, used as background of annotations.
    pub const WHITE: Self = Self("#ffffff");

    /// Returns the `index`-th color of the default color cycle, wrapping around at its end.
    #[must_use]
    pub const fn cycle(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }
}

/// The default color cycle.
pub const PALETTE: [Color; 10] = [
    Color("#1f77b4"),
    Color("#ff7f0e"),
    Color("#2ca02c"),
    Color("#d62728"),
    Color("#9467bd"),
    Color("#8c564b"),
    Color("#e377c2"),
    Color("#7f7f7f"),
    Color("#bcbd22"),
    Color("#17becf"),
];

/// Scale of an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scale {
    /// Linear scale.
    #[default]
    Linear,
    /// Logarithmic scale, non-positive values are not shown.
    Log,
}

impl Scale {
    /// Maps `value` into the space in which the axis is linear. Values that can not be shown
    /// are mapped to `None`.
    #[must_use]
    pub fn forward(self, value: f64) -> Option<f64> {
        let result = match self {
            Self::Linear => value,
            Self::Log => value.log10(),
        };

        result.is_finite().then_some(result)
    }

    /// Inverse of [`Scale::forward`].
    #[must_use]
    pub fn inverse(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log => 10.0_f64.powf(value),
        }
    }
}

/// Dash pattern of lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dash {
    /// Solid line.
    #[default]
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
}

/// Appearance of a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Color.
    pub color: Color,
    /// Width in points.
    pub width: f64,
    /// Dash pattern.
    pub dash: Dash,
}

impl Line {
    /// Solid line with the given `color` and `width`.
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Dash::Solid,
        }
    }
}

/// Appearance of a filled area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    /// Color.
    pub color: Color,
    /// Opacity between `0` and `1`.
    pub alpha: f64,
    /// Width of the outline in points.
    pub line_width: f64,
}

/// Direction in which error bars extend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Error bars along the x-axis.
    Horizontal,
    /// Error bars along the y-axis.
    Vertical,
}

/// Points with asymmetric error bars.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorBars {
    /// Positions along the x-axis.
    pub x: Vec<f64>,
    /// Positions along the y-axis.
    pub y: Vec<f64>,
    /// Direction of the error bars.
    pub orientation: Orientation,
    /// Distances from each point to the lower end of its error bar.
    pub lower: Vec<f64>,
    /// Distances from each point to the upper end of its error bar.
    pub upper: Vec<f64>,
    /// Color of markers and bars.
    pub color: Color,
    /// Width of the bars in points.
    pub line_width: f64,
    /// Length of the caps in points.
    pub cap_size: f64,
    /// Size of the markers in points; `0` hides them.
    pub marker_size: f64,
    /// Legend label.
    pub label: Option<String>,
}

/// Position of a legend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendLoc {
    /// Inside the panel, where it covers the least data.
    Best,
    /// In a row right above the panel, spanning its width.
    Above,
    /// In a row right below the panel, spanning its width.
    Below,
}

/// Legend of a panel, its entries are the labelled artists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Legend {
    /// Position.
    pub loc: LegendLoc,
    /// Number of columns.
    pub columns: usize,
    /// Relative font size, using matplotlib's names.
    pub font_size: &'static str,
}

/// A recorded drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Artist {
    /// Step line that holds `y[i]` from `x[i]` to `x[i + 1]`.
    Step {
        /// Bin limits.
        x: Vec<f64>,
        /// Values, the last one only closes the line.
        y: Vec<f64>,
        /// Appearance.
        line: Line,
        /// Legend label.
        label: Option<String>,
        /// Drawing order, higher values are drawn on top.
        zorder: Option<f64>,
    },
    /// Area between two step lines.
    StepFill {
        /// Bin limits.
        x: Vec<f64>,
        /// Lower step line.
        y1: Vec<f64>,
        /// Upper step line.
        y2: Vec<f64>,
        /// Appearance.
        fill: Fill,
        /// Legend label.
        label: Option<String>,
    },
    /// Points with error bars.
    ErrorBars(ErrorBars),
    /// Band covering the full height of the panel between `xmin` and `xmax`.
    VSpan {
        /// Left end.
        xmin: f64,
        /// Right end.
        xmax: f64,
        /// Appearance.
        fill: Fill,
    },
    /// Text in the upper right corner of the panel on a white, semi-transparent box.
    Annotation {
        /// Text.
        content: String,
        /// Relative font size, using matplotlib's names.
        font_size: &'static str,
    },
}

impl Artist {
    /// Returns the legend label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Step { label, .. } | Self::StepFill { label, .. } => label.as_deref(),
            Self::ErrorBars(bars) => bars.label.as_deref(),
            Self::VSpan { .. } | Self::Annotation { .. } => None,
        }
    }
}

/// Widens a degenerate range, the same way matplotlib does before it chooses ticks.
#[must_use]
pub fn nonsingular(min: f64, max: f64) -> (f64, f64) {
    const EXPANDER: f64 = 0.05;

    if max - min > f64::EPSILON * min.abs().max(max.abs()) {
        (min, max)
    } else if min == 0.0 && max == 0.0 {
        (-EXPANDER, EXPANDER)
    } else {
        (min - EXPANDER * min.abs(), max + EXPANDER * max.abs())
    }
}

/// Adds `margin` times the range of `(min, max)` on both sides, measured in the space in which
/// `scale` is linear.
#[must_use]
pub fn expand((min, max): (f64, f64), margin: f64, scale: Scale) -> (f64, f64) {
    match (scale.forward(min), scale.forward(max)) {
        (Some(lo), Some(hi)) => {
            let delta = margin * (hi - lo);
            (scale.inverse(lo - delta), scale.inverse(hi + delta))
        }
        _ => (min, max),
    }
}

fn extent(values: impl IntoIterator<Item = f64>, scale: Scale) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|&value| scale.forward(value).is_some())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((value.min(min), value.max(max))),
        })
}

fn union(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((a0, a1)), Some((b0, b1))) => Some((a0.min(b0), a1.max(b1))),
        (a, None) => a,
        (None, b) => b,
    }
}

/// A single panel of a figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    /// The recorded primitives in drawing order.
    pub artists: Vec<Artist>,
    /// Title above the panel, empty for none.
    pub title: String,
    /// Label of the x-axis, empty for none.
    pub xlabel: String,
    /// Label of the y-axis, empty for none.
    pub ylabel: String,
    /// Scale of the y-axis.
    pub yscale: Scale,
    /// Fixed y-range; if `None` it is determined from the data and the margins.
    pub ylim: Option<(f64, f64)>,
    /// Fixed positions of the major y-ticks.
    pub yticks: Option<Vec<f64>>,
    /// Category names for a categorical y-axis; the `i`-th category is at `y = i`.
    pub ycategories: Vec<String>,
    /// Legend, if any.
    pub legend: Option<Legend>,
    /// Relative margins added to the data range along x and y.
    pub margins: (f64, f64),
    /// Draw inward-facing major and minor ticks on all sides and a dotted grid below the data.
    pub framed: bool,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            artists: Vec::new(),
            title: String::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            yscale: Scale::Linear,
            ylim: None,
            yticks: None,
            ycategories: Vec::new(),
            legend: None,
            margins: (0.05, 0.05),
            framed: false,
        }
    }
}

impl Axes {
    /// Applies the frame style that all panels share: ticks facing inwards on all four sides,
    /// minor ticks, and a dotted grid drawn below the data.
    pub const fn style_frame(&mut self) {
        self.framed = true;
    }

    /// Records a step line.
    pub fn step(&mut self, x: &[f64], y: &[f64], line: Line, label: Option<&str>) {
        self.artists.push(Artist::Step {
            x: x.to_vec(),
            y: y.to_vec(),
            line,
            label: label.map(ToOwned::to_owned),
            zorder: None,
        });
    }

    /// Records a step line drawn in the given order.
    pub fn step_ordered(&mut self, x: &[f64], y: &[f64], line: Line, label: &str, zorder: f64) {
        self.artists.push(Artist::Step {
            x: x.to_vec(),
            y: y.to_vec(),
            line,
            label: Some(label.to_owned()),
            zorder: Some(zorder),
        });
    }

    /// Records the area between the step lines `y1` and `y2`.
    pub fn fill_between(
        &mut self,
        x: &[f64],
        y1: &[f64],
        y2: &[f64],
        fill: Fill,
        label: Option<&str>,
    ) {
        self.artists.push(Artist::StepFill {
            x: x.to_vec(),
            y1: y1.to_vec(),
            y2: y2.to_vec(),
            fill,
            label: label.map(ToOwned::to_owned),
        });
    }

    /// Records points with error bars.
    pub fn errorbar(&mut self, bars: ErrorBars) {
        self.artists.push(Artist::ErrorBars(bars));
    }

    /// Records a vertical band spanning the full height of the panel.
    pub fn axvspan(&mut self, xmin: f64, xmax: f64, fill: Fill) {
        self.artists.push(Artist::VSpan { xmin, xmax, fill });
    }

    /// Records an annotation in the upper right corner.
    pub fn annotate(&mut self, content: &str, font_size: &'static str) {
        self.artists.push(Artist::Annotation {
            content: content.to_owned(),
            font_size,
        });
    }

    /// Returns the labelled artists, which make up the legend.
    pub fn legend_entries(&self) -> impl Iterator<Item = (&str, &Artist)> {
        self.artists
            .iter()
            .filter_map(|artist| artist.label().map(|label| (label, artist)))
    }

    /// Returns the range of x-values covered by the data, ignoring values that can not be shown
    /// on an axis with the given `scale`.
    #[must_use]
    pub fn data_xlim(&self, scale: Scale) -> Option<(f64, f64)> {
        self.artists.iter().fold(None, |acc, artist| {
            let artist_extent = match artist {
                Artist::Step { x, .. } | Artist::StepFill { x, .. } => {
                    extent(x.iter().copied(), scale)
                }
                Artist::ErrorBars(bars) => match bars.orientation {
                    Orientation::Horizontal => extent(
                        bars.x
                            .iter()
                            .zip(&bars.lower)
                            .zip(&bars.upper)
                            .flat_map(|((&x, &lo), &hi)| [x - lo, x + hi]),
                        scale,
                    ),
                    Orientation::Vertical => extent(bars.x.iter().copied(), scale),
                },
                Artist::VSpan { xmin, xmax, .. } => extent([*xmin, *xmax], scale),
                Artist::Annotation { .. } => None,
            };

            union(acc, artist_extent)
        })
    }

    /// Returns the range of y-values covered by the data, excluding margins and ignoring
    /// values that can not be shown with the panel's y-scale.
    #[must_use]
    pub fn data_ylim(&self) -> Option<(f64, f64)> {
        let scale = self.yscale;

        self.artists.iter().fold(None, |acc, artist| {
            let artist_extent = match artist {
                Artist::Step { y, .. } => extent(y.iter().copied(), scale),
                Artist::StepFill { y1, y2, .. } => {
                    extent(y1.iter().chain(y2.iter()).copied(), scale)
                }
                Artist::ErrorBars(bars) => match bars.orientation {
                    Orientation::Horizontal => extent(bars.y.iter().copied(), scale),
                    Orientation::Vertical => extent(
                        bars.y
                            .iter()
                            .zip(&bars.lower)
                            .zip(&bars.upper)
                            .flat_map(|((&y, &lo), &hi)| [y - lo, y + hi]),
                        scale,
                    ),
                },
                Artist::VSpan { .. } | Artist::Annotation { .. } => None,
            };

            union(acc, artist_extent)
        })
    }

    /// Computes the tick scheme of the panel from the range of its data.
    #[must_use]
    pub fn ylimits(&self) -> YLimits {
        let (min, max) = self.data_ylim().map_or_else(
            || {
                tracing::warn!(ylabel = %self.ylabel, "panel does not contain finite data");
                (0.0, 1.0)
            },
            |(min, max)| nonsingular(min, max),
        );

        scaler::ylimits(min, max)
    }

    /// Fixes the y-ticks to the scheme `limits` and the y-range to its padded range.
    pub fn apply_ylimits(&mut self, limits: &YLimits) {
        self.yticks = Some(limits.ticks());
        self.ylim = Some(limits.padded());
    }

    /// Returns the y-range that backends should show.
    #[must_use]
    pub fn view_ylim(&self) -> (f64, f64) {
        if let Some(ylim) = self.ylim {
            return ylim;
        }

        let (min, max) = self.data_ylim().unwrap_or(match self.yscale {
            Scale::Linear => (0.0, 1.0),
            Scale::Log => (1.0, 10.0),
        });
        let (min, max) = nonsingular(min, max);

        expand((min, max), self.margins.1, self.yscale)
    }
}
