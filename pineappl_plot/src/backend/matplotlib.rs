//! Python scripts that draw figures with matplotlib and save them as PDF.

use super::Backend;
use super::tex::untex;
use crate::axes::{Artist, Axes, Dash, ErrorBars, LegendLoc, Orientation, Scale};
use crate::error::Result;
use crate::figure::Figure;
use crate::style::StyleConfig;
use itertools::Itertools;
use std::fmt::Write;
use std::path::Path;

/// Writes figures as matplotlib scripts. Running a script saves the figure next to it, with the
/// extension `.pdf`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatplotlibBackend;

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "np.nan".to_owned()
    } else if value.is_infinite() {
        (if value > 0.0 { "np.inf" } else { "-np.inf" }).to_owned()
    } else {
        format!("{value:e}")
    }
}

fn map_format_e_join(slice: &[f64]) -> String {
    slice.iter().copied().map(format_value).join(", ")
}

fn array(slice: &[f64]) -> String {
    format!("np.array([{}])", map_format_e_join(slice))
}

/// Quotes `text` as a Python string literal, raw if possible so that TeX needs no escaping.
fn quote(text: &str) -> String {
    if !text.contains(|c: char| c == '\'' || c.is_control()) && !text.ends_with('\\') {
        return format!("r'{text}'");
    }

    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('\'');

    for c in text.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            // control characters are all below U+0100
            c if c.is_control() => literal.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => literal.push(c),
        }
    }

    literal.push('\'');
    literal
}

const fn linestyle(dash: Dash) -> &'static str {
    match dash {
        Dash::Solid => "-",
        Dash::Dashed => "--",
        Dash::Dotted => ":",
    }
}

struct Script<'a> {
    out: String,
    style: &'a StyleConfig,
}

/// Quotes a label, which is converted into plain text if TeX is not used.
fn label(style: &StyleConfig, text: &str) -> String {
    if style.use_tex {
        quote(text)
    } else {
        quote(&untex(text))
    }
}

fn label_kwarg(style: &StyleConfig, text: Option<&str>) -> String {
    text.map_or_else(String::new, |text| format!(", label={}", label(style, text)))
}

impl Script<'_> {
    fn preamble(&mut self) -> std::fmt::Result {
        let style = self.style;

        writeln!(
            self.out,
            "#!/usr/bin/env python3

import matplotlib.pyplot as plt
import numpy as np

plt.rc('text', usetex={usetex})",
            usetex = if style.use_tex { "True" } else { "False" },
        )?;

        if style.use_tex {
            writeln!(
                self.out,
                r"plt.rc('text.latex', preamble=r'\usepackage{{siunitx}}\usepackage{{lmodern}}')"
            )?;
        }

        writeln!(
            self.out,
            "plt.rc('font', family={family}, size={size})
plt.rc('axes', labelsize={labelsize})
plt.rc('pdf', compression={compression})",
            family = quote(&style.font_family),
            size = style.font_size,
            labelsize = quote(&style.label_size),
            compression = style.output_compression.min(9),
        )
    }

    fn error_bars(&mut self, bars: &ErrorBars) -> std::fmt::Result {
        let style = self.style;
        let err = match bars.orientation {
            Orientation::Horizontal => "xerr",
            Orientation::Vertical => "yerr",
        };

        writeln!(
            self.out,
            "axis.errorbar({x}, {y}, {err}=({lower}, {upper}), color='{color}', fmt='.', capsize={capsize}, markersize={markersize}, linewidth={linewidth}{label})",
            x = array(&bars.x),
            y = array(&bars.y),
            lower = array(&bars.lower),
            upper = array(&bars.upper),
            color = bars.color.0,
            capsize = bars.cap_size,
            markersize = bars.marker_size,
            linewidth = bars.line_width,
            label = label_kwarg(style, bars.label.as_deref()),
        )
    }

    fn artist(&mut self, artist: &Artist) -> std::fmt::Result {
        let style = self.style;

        match artist {
            Artist::Step {
                x,
                y,
                line,
                label,
                zorder,
            } => writeln!(
                self.out,
                "axis.step({x}, {y}, color='{color}', linewidth={linewidth}, linestyle='{linestyle}', where='post'{label}{zorder})",
                x = array(x),
                y = array(y),
                color = line.color.0,
                linewidth = line.width,
                linestyle = linestyle(line.dash),
                label = label_kwarg(style, label.as_deref()),
                zorder = zorder.map_or_else(String::new, |zorder| format!(", zorder={zorder}")),
            ),
            Artist::StepFill {
                x,
                y1,
                y2,
                fill,
                label,
            } => writeln!(
                self.out,
                "axis.fill_between({x}, {y1}, {y2}, alpha={alpha}, color='{color}', linewidth={linewidth}, step='post'{label})",
                x = array(x),
                y1 = array(y1),
                y2 = array(y2),
                alpha = fill.alpha,
                color = fill.color.0,
                linewidth = fill.line_width,
                label = label_kwarg(style, label.as_deref()),
            ),
            Artist::ErrorBars(bars) => self.error_bars(bars),
            Artist::VSpan { xmin, xmax, fill } => writeln!(
                self.out,
                "axis.axvspan({xmin}, {xmax}, alpha={alpha}, color='{color}', linewidth={linewidth})",
                xmin = format_value(*xmin),
                xmax = format_value(*xmax),
                alpha = fill.alpha,
                color = fill.color.0,
                linewidth = fill.line_width,
            ),
            Artist::Annotation { content, font_size } => writeln!(
                self.out,
                "t = axis.text(0.98, 0.98, {content}, horizontalalignment='right', verticalalignment='top', transform=axis.transAxes, fontsize='{font_size}')
t.set_bbox({{'alpha': 0.7, 'boxstyle': 'square, pad=0.0', 'edgecolor': 'white', 'facecolor': 'white'}})",
                content = label(style, content),
            ),
        }
    }

    fn axes(&mut self, index: usize, axes: &Axes) -> std::fmt::Result {
        let style = self.style;

        writeln!(self.out, "\naxis = axes[{index}]")?;

        if axes.framed {
            writeln!(
                self.out,
                "axis.set_axisbelow(True)
axis.grid(linestyle='dotted')
axis.tick_params(axis='both', left=True, right=True, top=True, bottom=True, which='both', direction='in', width=0.5, zorder=10.0)
axis.minorticks_on()"
            )?;
        }

        if axes.yscale == Scale::Log {
            writeln!(self.out, "axis.set_yscale('log')")?;
        }

        for artist in &axes.artists {
            self.artist(artist)?;
        }

        if !axes.ycategories.is_empty() {
            writeln!(
                self.out,
                "axis.set_yticks(range({}))\naxis.set_yticklabels([{}])",
                axes.ycategories.len(),
                axes.ycategories
                    .iter()
                    .map(|category| label(style, category))
                    .join(", ")
            )?;
        }

        if axes.margins != Axes::default().margins {
            writeln!(
                self.out,
                "axis.margins(x={}, y={})",
                axes.margins.0, axes.margins.1
            )?;
        }

        if let Some(ticks) = &axes.yticks {
            writeln!(self.out, "axis.set_yticks([{}])", map_format_e_join(ticks))?;
        }

        if let Some((min, max)) = axes.ylim {
            writeln!(
                self.out,
                "axis.set_ylim({}, {})",
                format_value(min),
                format_value(max)
            )?;
        }

        for (method, text) in [
            ("set_title", &axes.title),
            ("set_xlabel", &axes.xlabel),
            ("set_ylabel", &axes.ylabel),
        ] {
            if !text.is_empty() {
                writeln!(self.out, "axis.{method}({})", label(style, text))?;
            }
        }

        if let Some(legend) = axes.legend {
            let placement = match legend.loc {
                LegendLoc::Best => String::new(),
                LegendLoc::Above => format!(
                    "bbox_to_anchor=(0,1.03,1,0.2), loc='lower left', mode='expand', borderaxespad=0, ncol={}, borderpad=0, ",
                    legend.columns
                ),
                LegendLoc::Below => format!(
                    "bbox_to_anchor=(0,-0.24,1,0.2), loc='upper left', mode='expand', borderaxespad=0, ncol={}, borderpad=0, ",
                    legend.columns
                ),
            };

            writeln!(
                self.out,
                "axis.legend({placement}fontsize='{}', frameon=False)",
                legend.font_size
            )?;
        }

        Ok(())
    }
}

impl Backend for MatplotlibBackend {
    fn extension(&self, _: &StyleConfig) -> &'static str {
        "py"
    }

    fn render(&self, figure: &Figure, style: &StyleConfig, stem: &Path) -> Result<Vec<u8>> {
        let mut script = Script {
            out: String::new(),
            style,
        };

        script.preamble()?;

        writeln!(
            script.out,
            "
fig, axes = plt.subplots({rows}, 1, sharex=True, squeeze=False, constrained_layout=True, figsize=({width}, {height}))
fig.set_constrained_layout_pads(hspace=0, wspace=0)
axes = axes[:, 0]",
            rows = figure.panels.len(),
            width = figure.size.0,
            height = figure.size.1,
        )?;

        if figure.xscale == Scale::Log {
            writeln!(script.out, "axes[0].set_xscale('log')")?;
        }

        for (index, axes) in figure.panels.iter().enumerate() {
            script.axes(index, axes)?;
        }

        writeln!(
            script.out,
            "\nfig.savefig({})\nplt.close(fig)",
            quote(&format!("{}.pdf", stem.display()))
        )?;

        Ok(script.out.into_bytes())
    }
}
