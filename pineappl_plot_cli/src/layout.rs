use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::{Result, bail};
use clap::{Parser, ValueHint};
use pineappl_plot::axes::Scale;
use pineappl_plot::layout::{Layout, LayoutOptions};
use prettytable::{cell, row};
use std::path::PathBuf;
use std::process::ExitCode;

/// Shows which panels are drawn for every slice of a payload.
#[derive(Parser)]
pub struct Opts {
    /// Path to the payload.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Show every PDF set and the channel breakdown in the top panel.
    #[arg(long)]
    pdf_overlay: bool,
}

impl Subcommand for Opts {
    fn run(&self, _: &GlobalConfiguration) -> Result<ExitCode> {
        let (dataset, metadata) = helpers::read_payload(&self.input)?;
        let labels = metadata.labels(&dataset.xaxis)?;

        let Some(first) = dataset.slices.first() else {
            bail!("'{}' does not contain any slices", self.input.display());
        };

        let layout = Layout::select(
            first,
            &labels,
            LayoutOptions {
                pdf_overlay: self.pdf_overlay,
            },
        );

        let mut table = helpers::create_table();
        table.set_titles(row![c => "p", "panel"]);

        for (index, panel) in layout.panels.iter().enumerate() {
            table.add_row(row![r->index, l->panel]);
        }

        table.printstd();

        let (width, height) = layout.figsize;

        println!();
        println!("slices: {}", dataset.slices.len());
        println!("figure: {width} x {height} in");
        println!(
            "x-axis: {}",
            match layout.xscale(first) {
                Scale::Linear => "linear",
                Scale::Log => "log",
            }
        );

        Ok(ExitCode::SUCCESS)
    }
}
