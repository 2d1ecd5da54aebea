use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::Result;
use clap::{Parser, ValueEnum, ValueHint};
use pineappl_plot::backend::{BackendEnum, MatplotlibBackend, SvgBackend};
use pineappl_plot::figure::{self, RenderOptions};
use pineappl_plot::layout::LayoutOptions;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Matplotlib,
}

impl From<Format> for BackendEnum {
    fn from(format: Format) -> Self {
        match format {
            Format::Svg => Self::Svg(SvgBackend),
            Format::Matplotlib => Self::Matplotlib(MatplotlibBackend),
        }
    }
}

/// Renders every slice of a payload into a figure.
#[derive(Parser)]
pub struct Opts {
    /// Path to the payload.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Path of the artifacts without extension [default: INPUT without .yaml].
    #[arg(long, short, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
    /// Format of the artifacts.
    #[arg(default_value = "svg", long, value_enum)]
    format: Format,
    /// Show every PDF set and the channel breakdown in the top panel.
    #[arg(long)]
    pdf_overlay: bool,
    /// Number of threads rendering slices in parallel.
    #[arg(default_value_t = 1, long)]
    threads: usize,
}

impl Subcommand for Opts {
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode> {
        helpers::init_style(cfg)?;

        let (dataset, metadata) = helpers::read_payload(&self.input)?;
        let options = RenderOptions {
            output: self
                .output
                .clone()
                .unwrap_or_else(|| helpers::default_output(&self.input)),
            layout: LayoutOptions {
                pdf_overlay: self.pdf_overlay,
            },
            threads: self.threads,
        };

        let paths =
            figure::render_dataset(&dataset, &metadata, &options, &self.format.into())?;

        for path in paths {
            println!("{}", path.display());
        }

        Ok(ExitCode::SUCCESS)
    }
}
