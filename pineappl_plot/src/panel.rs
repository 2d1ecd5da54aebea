//! The panels a figure can be composed of, and how each of them is drawn.

use super::axes::{Axes, Color, Dash, ErrorBars, Fill, Legend, LegendLoc, Line, Orientation, Scale};
use super::convert::f64_from_usize;
use super::error::Result;
use super::slice::DataSlice;
use super::transform;
use std::fmt::{self, Display, Formatter};

/// Label of the PDF result that is highlighted with one- and two-sigma bands in integrated
/// panels.
pub const CENTRAL_PDF_LABEL: &str = "CENTRAL-PDF";

/// Everything a panel needs to draw one slice.
#[derive(Clone, Copy, Debug)]
pub struct SliceContext<'a> {
    /// The slice that is drawn.
    pub slice: &'a DataSlice,
    /// Label of the shared x-axis.
    pub xlabel: &'a str,
    /// Label of the absolute prediction.
    pub ylabel: &'a str,
    /// Whether absolute predictions are drawn with a logarithmic y-axis.
    pub ylog: bool,
}

/// Kinds of panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    /// Horizontal error bars of each PDF result for a single, integrated bin.
    Integrated,
    /// Prediction with its scale uncertainty.
    Absolute,
    /// Prediction of every PDF result with its uncertainty, and the channel breakdown.
    AbsolutePdfs,
    /// Relative size of the EW corrections with respect to the QCD-only prediction.
    EwRatio,
    /// Relative PDF uncertainty of every PDF result.
    PdfUncertainty,
    /// Pull of every PDF result with respect to the first one.
    PdfPull,
}

impl Panel {
    /// Draws this panel for the slice in `ctx` into `axes`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPdfResults`](super::Error::NoPdfResults) if the panel needs a
    /// reference PDF result but the slice has none.
    pub fn render(self, axes: &mut Axes, ctx: &SliceContext) -> Result<()> {
        axes.style_frame();

        match self {
            Self::Integrated => plot_int(axes, ctx),
            Self::Absolute => plot_abs(axes, ctx),
            Self::AbsolutePdfs => plot_abs_pdfs(axes, ctx),
            Self::EwRatio => plot_rel_ewonoff(axes, ctx),
            Self::PdfUncertainty => plot_rel_pdfunc(axes, ctx),
            Self::PdfPull => plot_rel_pdfpull(axes, ctx),
        }
    }

    /// Returns a short, human-readable name of the panel.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integrated => "integrated",
            Self::Absolute => "absolute",
            Self::AbsolutePdfs => "absolute-pdfs",
            Self::EwRatio => "ew-ratio",
            Self::PdfUncertainty => "pdf-uncertainty",
            Self::PdfPull => "pdf-pull",
        }
    }
}

impl Display for Panel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strips the entry that only closes step lines.
fn bin_values(values: &[f64]) -> &[f64] {
    &values[..values.len().saturating_sub(1)]
}

fn non_empty(label: &str) -> Option<&str> {
    (!label.is_empty()).then_some(label)
}

fn plot_int(axes: &mut Axes, ctx: &SliceContext) -> Result<()> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut xmin = Vec::new();
    let mut xmax = Vec::new();

    for result in &ctx.slice.pdf_results {
        let index = axes
            .ycategories
            .iter()
            .position(|category| *category == result.label)
            .unwrap_or_else(|| {
                axes.ycategories.push(result.label.clone());
                axes.ycategories.len() - 1
            });

        for ((&central, &min), &max) in bin_values(&result.y)
            .iter()
            .zip(bin_values(&result.ymin))
            .zip(bin_values(&result.ymax))
        {
            x.push(central);
            xmin.push(min);
            xmax.push(max);
            y.push(f64_from_usize(index));

            if result.label == CENTRAL_PDF_LABEL {
                axes.axvspan(
                    min,
                    max,
                    Fill {
                        color: Color::ROYALBLUE,
                        alpha: 0.3,
                        line_width: 0.0,
                    },
                );
                // doubling the one-sigma distances is only correct for MC PDF uncertainties
                axes.axvspan(
                    2.0f64.mul_add(-(central - min), central),
                    2.0f64.mul_add(max - central, central),
                    Fill {
                        color: Color::ROYALBLUE,
                        alpha: 0.1,
                        line_width: 0.0,
                    },
                );
            }
        }
    }

    axes.errorbar(ErrorBars {
        lower: x.iter().zip(&xmin).map(|(x, min)| x - min).collect(),
        upper: x.iter().zip(&xmax).map(|(x, max)| max - x).collect(),
        x,
        y,
        orientation: Orientation::Horizontal,
        color: Color::cycle(0),
        line_width: 1.5,
        cap_size: 3.0,
        marker_size: 5.0,
        label: None,
    });
    axes.margins = (0.1, 0.1);

    Ok(())
}

fn plot_abs(axes: &mut Axes, ctx: &SliceContext) -> Result<()> {
    let slice = ctx.slice;

    axes.yscale = if ctx.ylog { Scale::Log } else { Scale::Linear };
    axes.step(
        &slice.x,
        &slice.y,
        Line::solid(Color::ROYALBLUE, 1.0),
        non_empty(&slice.slice_label),
    );
    axes.fill_between(
        &slice.x,
        &slice.ymin,
        &slice.ymax,
        Fill {
            color: Color::ROYALBLUE,
            alpha: 0.4,
            line_width: 0.5,
        },
        None,
    );
    ctx.ylabel.clone_into(&mut axes.ylabel);

    if !slice.slice_label.is_empty() {
        axes.legend = Some(Legend {
            loc: LegendLoc::Best,
            columns: 1,
            font_size: "xx-small",
        });
    }

    Ok(())
}

fn plot_abs_pdfs(axes: &mut Axes, ctx: &SliceContext) -> Result<()> {
    const CHANNEL_DASHES: [Dash; 2] = [Dash::Dashed, Dash::Dotted];

    let slice = ctx.slice;

    axes.yscale = if ctx.ylog { Scale::Log } else { Scale::Linear };
    ctx.ylabel.clone_into(&mut axes.ylabel);

    for (index, result) in slice.pdf_results.iter().enumerate() {
        let color = Color::cycle(index);

        axes.step(&slice.x, &result.y, Line::solid(color, 1.0), None);
        axes.fill_between(
            &slice.x,
            &result.ymin,
            &result.ymax,
            Fill {
                color,
                alpha: 0.4,
                line_width: 0.5,
            },
            Some(&result.label),
        );
    }

    for (channel, dash) in slice.channels.iter().zip(CHANNEL_DASHES) {
        axes.step(
            &slice.x,
            &channel.y,
            Line {
                color: Color::cycle(0),
                width: 1.0,
                dash,
            },
            Some(&channel.label),
        );
    }

    axes.legend = Some(Legend {
        loc: LegendLoc::Below,
        columns: 4.min(slice.pdf_results.len() + 2),
        font_size: "x-small",
    });

    if !slice.slice_label.is_empty() {
        axes.annotate(&slice.slice_label, "x-small");
    }

    Ok(())
}

fn plot_rel_ewonoff(axes: &mut Axes, ctx: &SliceContext) -> Result<()> {
    let slice = ctx.slice;
    let reference = slice.reference()?;

    let y = transform::percent_diffs(&slice.y, &slice.qcd_y);
    let qcd_y = transform::percent_diffs(&slice.qcd_y, &slice.qcd_y);
    let ymin = transform::percent_diffs(&slice.ymin, &slice.qcd_y);
    let ymax = transform::percent_diffs(&slice.ymax, &slice.qcd_y);
    let pdf_min: Vec<_> = transform::percent_diffs(bin_values(&reference.ymin), &reference.y)
        .into_iter()
        .map(f64::abs)
        .collect();
    let pdf_max: Vec<_> = transform::percent_diffs(bin_values(&reference.ymax), &reference.y)
        .into_iter()
        .map(f64::abs)
        .collect();

    axes.step(&slice.x, &qcd_y, Line::solid(Color::RED, 1.0), Some("NLO QCD"));
    axes.step(
        &slice.x,
        &y,
        Line::solid(Color::ROYALBLUE, 1.0),
        Some("NLO QCD+EW"),
    );
    axes.fill_between(
        &slice.x,
        &ymin,
        &ymax,
        Fill {
            color: Color::ROYALBLUE,
            alpha: 0.4,
            line_width: 0.5,
        },
        Some(r"7-p.\ scale var."),
    );
    axes.errorbar(ErrorBars {
        x: slice.mid.clone(),
        y: bin_values(&y).to_vec(),
        orientation: Orientation::Vertical,
        lower: pdf_min,
        upper: pdf_max,
        color: Color::ROYALBLUE,
        line_width: 1.0,
        cap_size: 1.0,
        marker_size: 0.0,
        label: Some("PDF uncertainty".to_owned()),
    });
    r"NLO EW on/off [\si{\percent}]".clone_into(&mut axes.ylabel);
    axes.legend = Some(Legend {
        loc: LegendLoc::Above,
        columns: 4,
        font_size: "x-small",
    });

    Ok(())
}

fn plot_rel_pdfunc(axes: &mut Axes, ctx: &SliceContext) -> Result<()> {
    let slice = ctx.slice;

    for (index, result) in slice.pdf_results.iter().enumerate() {
        let line = Line::solid(Color::cycle(index), 1.0);
        let ymin = transform::percent_diffs(&result.ymin, &result.y);
        let ymax = transform::percent_diffs(&result.ymax, &result.y);

        axes.step(&slice.x, &ymax, line, Some(&result.label));
        axes.step(&slice.x, &ymin, line, None);
    }

    r"PDF uncertainty [\si{\percent}]".clone_into(&mut axes.ylabel);

    let limits = axes.ylimits();
    axes.apply_ylimits(&limits);

    Ok(())
}

fn plot_rel_pdfpull(axes: &mut Axes, ctx: &SliceContext) -> Result<()> {
    let slice = ctx.slice;
    let reference = slice.reference()?;

    for (index, result) in slice.pdf_results.iter().enumerate() {
        let pull = transform::pulls(result, reference);

        axes.step_ordered(
            &slice.x,
            &pull,
            Line::solid(Color::cycle(index), 1.0),
            &result.label,
            f64_from_usize(2 * index + 1),
        );
    }

    axes.legend = Some(Legend {
        loc: LegendLoc::Above,
        columns: slice.pdf_results.len(),
        font_size: "x-small",
    });
    r"Pull [$\sigma$]".clone_into(&mut axes.ylabel);

    let limits = axes.ylimits();
    axes.apply_ylimits(&limits);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::Artist;
    use crate::slice::{Channel, PdfResult};
    use crate::Error;

    fn pdf_result(label: &str, scale: f64) -> PdfResult {
        PdfResult {
            label: label.to_owned(),
            y: vec![8.0 * scale, 16.0 * scale, 16.0 * scale],
            ymin: vec![6.0 * scale, 12.0 * scale, 12.0 * scale],
            ymax: vec![10.0 * scale, 20.0 * scale, 20.0 * scale],
        }
    }

    fn slice(pdf_results: Vec<PdfResult>) -> DataSlice {
        DataSlice {
            x: vec![0.0, 1.0, 2.0],
            y: vec![10.0, 20.0, 20.0],
            ymin: vec![9.0, 18.0, 18.0],
            ymax: vec![11.0, 22.0, 22.0],
            qcd_y: vec![10.0, 10.0, 10.0],
            qcd_min: vec![9.0, 9.0, 9.0],
            qcd_max: vec![11.0, 11.0, 11.0],
            pdf_results,
            channels: vec![Channel {
                label: "gg".to_owned(),
                y: vec![1.0, 2.0, 2.0],
            }],
            mid: vec![0.5, 1.5],
            slice_label: String::new(),
        }
    }

    fn context(slice: &DataSlice) -> SliceContext<'_> {
        SliceContext {
            slice,
            xlabel: "$x$",
            ylabel: r"$\sigma$ [\si{\pico\barn}]",
            ylog: false,
        }
    }

    #[test]
    fn every_panel_is_framed() {
        let slice = slice(vec![pdf_result("A", 1.0), pdf_result("B", 2.0)]);

        for panel in [
            Panel::Absolute,
            Panel::AbsolutePdfs,
            Panel::EwRatio,
            Panel::PdfUncertainty,
            Panel::PdfPull,
        ] {
            let mut axes = Axes::default();
            panel.render(&mut axes, &context(&slice)).unwrap();
            assert!(axes.framed, "{panel} is not framed");
        }
    }

    #[test]
    fn absolute_panel() {
        let mut slice = slice(vec![pdf_result("A", 1.0)]);
        let mut axes = Axes::default();
        let ctx = SliceContext {
            ylog: true,
            ..context(&slice)
        };
        Panel::Absolute.render(&mut axes, &ctx).unwrap();

        assert_eq!(axes.yscale, Scale::Log);
        assert_eq!(axes.ylabel, r"$\sigma$ [\si{\pico\barn}]");
        assert_eq!(axes.artists.len(), 2);
        assert_eq!(axes.legend, None);
        assert_eq!(axes.legend_entries().count(), 0);

        slice.slice_label = "$0 < y < 1$".to_owned();
        let mut axes = Axes::default();
        Panel::Absolute.render(&mut axes, &context(&slice)).unwrap();

        assert_eq!(axes.yscale, Scale::Linear);
        assert_eq!(axes.legend.map(|legend| legend.loc), Some(LegendLoc::Best));
        assert_eq!(
            axes.legend_entries().map(|(label, _)| label).collect::<Vec<_>>(),
            vec!["$0 < y < 1$"]
        );
    }

    #[test]
    fn absolute_pdfs_panel_overlays_results_and_channels() {
        let mut slice = slice(vec![pdf_result("A", 1.0), pdf_result("B", 2.0)]);
        slice.slice_label = "$0 < y < 1$".to_owned();
        slice.channels.extend([
            Channel {
                label: "qg".to_owned(),
                y: vec![3.0, 4.0, 4.0],
            },
            Channel {
                label: "qq".to_owned(),
                y: vec![5.0, 6.0, 6.0],
            },
        ]);
        let mut axes = Axes::default();
        Panel::AbsolutePdfs.render(&mut axes, &context(&slice)).unwrap();

        // only the first two channels are shown
        assert_eq!(
            axes.legend_entries().map(|(label, _)| label).collect::<Vec<_>>(),
            vec!["A", "B", "gg", "qg"]
        );
        assert_eq!(axes.legend.map(|legend| legend.columns), Some(4));
        assert!(matches!(
            axes.artists.last(),
            Some(Artist::Annotation { content, .. }) if content == "$0 < y < 1$"
        ));
    }

    #[test]
    fn ew_ratio_panel() {
        let slice = slice(vec![pdf_result("A", 1.0)]);
        let mut axes = Axes::default();
        Panel::EwRatio.render(&mut axes, &context(&slice)).unwrap();

        let Artist::Step { y: qcd, .. } = &axes.artists[0] else {
            panic!("first artist must be the QCD reference");
        };
        assert_eq!(qcd, &vec![0.0, 0.0, 0.0]);

        let Artist::Step { y, .. } = &axes.artists[1] else {
            panic!("second artist must be the EW-corrected prediction");
        };
        assert_eq!(y, &vec![0.0, 100.0, 100.0]);

        let Artist::ErrorBars(bars) = &axes.artists[3] else {
            panic!("fourth artist must be the PDF uncertainty");
        };
        assert_eq!(bars.x, vec![0.5, 1.5]);
        assert_eq!(bars.y, vec![0.0, 100.0]);
        assert_eq!(bars.lower.len(), 2);
        assert_eq!(bars.lower, vec![25.0, 25.0]);
        assert_eq!(bars.upper, vec![25.0, 25.0]);
        assert_eq!(axes.legend.map(|legend| legend.loc), Some(LegendLoc::Above));
    }

    #[test]
    fn ew_ratio_panel_needs_reference() {
        let slice = slice(Vec::new());
        let mut axes = Axes::default();

        assert!(matches!(
            Panel::EwRatio.render(&mut axes, &context(&slice)),
            Err(Error::NoPdfResults)
        ));
    }

    #[test]
    fn pdf_uncertainty_panel_uses_fixed_ticks() {
        let slice = slice(vec![pdf_result("A", 1.0), pdf_result("B", 2.0)]);
        let mut axes = Axes::default();
        Panel::PdfUncertainty.render(&mut axes, &context(&slice)).unwrap();

        // uncertainties span from -25 % to +25 %
        assert_eq!(axes.artists.len(), 4);
        assert_eq!(
            axes.yticks,
            Some(vec![-30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0])
        );
        let (min, max) = axes.ylim.unwrap();
        assert!((min + 33.0).abs() < 1e-9);
        assert!((max - 33.0).abs() < 1e-9);
    }

    #[test]
    fn pdf_pull_panel() {
        let slice = slice(vec![pdf_result("A", 1.0), pdf_result("B", 2.0)]);
        let mut axes = Axes::default();
        Panel::PdfPull.render(&mut axes, &context(&slice)).unwrap();

        let Artist::Step { y, zorder, .. } = &axes.artists[0] else {
            panic!("pulls must be step lines");
        };
        assert_eq!(y, &vec![0.0, 0.0, 0.0]);
        assert_eq!(*zorder, Some(1.0));

        let Artist::Step { y, zorder, .. } = &axes.artists[1] else {
            panic!("pulls must be step lines");
        };
        // B lies above A, so its lower uncertainty counts: (16 - 8) / sqrt(4^2 + 2^2)
        assert!((y[0] - 8.0 / 4.0_f64.hypot(2.0)).abs() < 1e-12);
        assert_eq!(*zorder, Some(3.0));
        assert_eq!(axes.legend.map(|legend| legend.columns), Some(2));
        assert_eq!(axes.ylim, Some(axes.ylimits().padded()));
    }

    #[test]
    fn integrated_panel_draws_bands_for_central_pdf() {
        let slice = DataSlice {
            x: vec![0.0, 10.0],
            y: vec![5.0, 5.0],
            ymin: vec![4.5, 4.5],
            ymax: vec![5.5, 5.5],
            qcd_y: vec![4.9, 4.9],
            qcd_min: vec![4.4, 4.4],
            qcd_max: vec![5.4, 5.4],
            pdf_results: vec![
                PdfResult {
                    label: CENTRAL_PDF_LABEL.to_owned(),
                    y: vec![5.0, 5.0],
                    ymin: vec![4.8, 4.8],
                    ymax: vec![5.4, 5.4],
                },
                PdfResult {
                    label: "NNPDF40".to_owned(),
                    y: vec![5.2, 5.2],
                    ymin: vec![5.0, 5.0],
                    ymax: vec![5.3, 5.3],
                },
            ],
            channels: Vec::new(),
            mid: vec![5.0],
            slice_label: String::new(),
        };
        let mut axes = Axes::default();
        Panel::Integrated.render(&mut axes, &context(&slice)).unwrap();

        assert_eq!(axes.ycategories, vec![CENTRAL_PDF_LABEL, "NNPDF40"]);
        assert_eq!(axes.margins, (0.1, 0.1));

        let spans: Vec<_> = axes
            .artists
            .iter()
            .filter_map(|artist| match artist {
                Artist::VSpan { xmin, xmax, .. } => Some((*xmin, *xmax)),
                _ => None,
            })
            .collect();
        assert_eq!(spans.len(), 2);
        assert!((spans[0].0 - 4.8).abs() < 1e-12);
        assert!((spans[0].1 - 5.4).abs() < 1e-12);
        assert!((spans[1].0 - 4.6).abs() < 1e-12);
        assert!((spans[1].1 - 5.8).abs() < 1e-12);

        let Some(Artist::ErrorBars(bars)) = axes.artists.last() else {
            panic!("last artist must be the error bars");
        };
        assert_eq!(bars.orientation, Orientation::Horizontal);
        assert_eq!(bars.x, vec![5.0, 5.2]);
        assert_eq!(bars.y, vec![0.0, 1.0]);
    }
}
