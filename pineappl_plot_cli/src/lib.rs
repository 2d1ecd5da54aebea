//! Command-line interface of `pineappl_plot`.

mod helpers;
mod layout;
mod limits;
mod render;

use anyhow::Result;
use clap::Parser;
use enum_dispatch::enum_dispatch;
use git_version::git_version;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Options shared by every subcommand.
#[derive(Parser)]
pub struct GlobalConfiguration {
    /// Log verbosity level (trace, debug, info, warn, error).
    #[arg(default_value_t = Level::WARN, long, value_name = "LEVEL")]
    pub log_level: Level,
    /// Read the drawing style from a YAML file.
    #[arg(long, value_name = "FILE")]
    pub style: Option<PathBuf>,
    /// Do not typeset labels with TeX.
    #[arg(long)]
    pub no_tex: bool,
    /// Override the font family.
    #[arg(long, value_name = "FAMILY")]
    pub font_family: Option<String>,
    /// Override the base font size in points.
    #[arg(long, value_name = "SIZE")]
    pub font_size: Option<f64>,
    /// Compress the artifacts with the given level (0 disables compression).
    #[arg(long, value_name = "LEVEL")]
    pub compression: Option<u32>,
}

/// A subcommand of `pineappl-plot`.
#[enum_dispatch]
pub trait Subcommand {
    /// Runs the subcommand.
    ///
    /// # Errors
    ///
    /// Returns any error that prevented the subcommand from finishing.
    fn run(&self, cfg: &GlobalConfiguration) -> Result<ExitCode>;
}

#[allow(missing_docs)]
#[enum_dispatch(Subcommand)]
#[derive(Parser)]
pub enum SubcommandEnum {
    Layout(layout::Opts),
    Limits(limits::Opts),
    Render(render::Opts),
}

#[allow(missing_docs)]
#[derive(Parser)]
#[command(
    arg_required_else_help = true,
    author,
    about,
    disable_help_subcommand = true,
    name = "pineappl-plot",
    version = git_version!(
        args = ["--always", "--dirty", "--long", "--tags"],
        cargo_prefix = "",
        fallback = "unknown"
    )
)]
pub struct Opts {
    #[command(flatten)]
    pub configuration: GlobalConfiguration,
    #[command(subcommand)]
    pub subcommand: SubcommandEnum,
}
