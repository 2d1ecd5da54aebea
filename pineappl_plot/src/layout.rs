//! Selection of the panels a figure is composed of.

use super::axes::Scale;
use super::convert::f64_from_usize;
use super::metadata::Labels;
use super::panel::Panel;
use super::slice::DataSlice;

/// Width of figures with stacked panels, in inches.
const FIGURE_WIDTH: f64 = 6.4;
/// Height of each stacked panel, in inches.
const PANEL_HEIGHT: f64 = 2.4;
/// Size of figures showing a single integrated bin, in inches.
const INTEGRATED_SIZE: (f64, f64) = (4.2, 2.6);

/// Choices that change which panels are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Show every PDF result and the channel breakdown in the absolute panel.
    pub pdf_overlay: bool,
}

/// Panels and dimensions of a figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// The panels, from top to bottom.
    pub panels: Vec<Panel>,
    /// Width and height in inches.
    pub figsize: (f64, f64),
    /// Whether the shared x-axis of differential slices is logarithmic, which is the case if it
    /// has a unit. Integrated slices always use a linear x-axis, see [`Layout::xscale`].
    pub xlog: bool,
    /// Label of the shared x-axis.
    pub xlabel: String,
}

impl Layout {
    /// Selects the panels for `slice`.
    #[must_use]
    pub fn select(slice: &DataSlice, labels: &Labels, options: LayoutOptions) -> Self {
        if slice.is_integrated() {
            // the only panel shows the values along the x-axis
            return Self {
                panels: vec![Panel::Integrated],
                figsize: INTEGRATED_SIZE,
                xlog: !labels.xunit.is_empty(),
                xlabel: labels.ylabel.clone(),
            };
        }

        let mut panels = vec![
            if options.pdf_overlay {
                Panel::AbsolutePdfs
            } else {
                Panel::Absolute
            },
            Panel::EwRatio,
        ];

        if slice.pdf_results.len() > 1 {
            panels.extend([Panel::PdfUncertainty, Panel::PdfPull]);
        }

        let height = f64_from_usize(panels.len()) * PANEL_HEIGHT;

        Self {
            panels,
            figsize: (FIGURE_WIDTH, height),
            xlog: !labels.xunit.is_empty(),
            xlabel: labels.xlabel.clone(),
        }
    }

    /// Returns the scale of the shared x-axis for `slice`.
    #[must_use]
    pub fn xscale(&self, slice: &DataSlice) -> Scale {
        if self.xlog && !slice.is_integrated() {
            Scale::Log
        } else {
            Scale::Linear
        }
    }
}
