use super::helpers;
use super::{GlobalConfiguration, Subcommand};
use anyhow::{Result, ensure};
use clap::Parser;
use itertools::Itertools;
use pineappl_plot::scaler;
use prettytable::{Row, cell, row};
use std::process::ExitCode;

/// Shows the y-axis limits and ticks chosen for a range of relative values.
#[derive(Parser)]
#[command(allow_negative_numbers = true)]
pub struct Opts {
    /// Smallest value shown.
    min: f64,
    /// Largest value shown.
    max: f64,
}

impl Subcommand for Opts {
    fn run(&self, _: &GlobalConfiguration) -> Result<ExitCode> {
        ensure!(
            self.min <= self.max,
            "minimum {} is larger than maximum {}",
            self.min,
            self.max
        );

        let limits = scaler::ylimits(self.min, self.max);
        let (lower, upper) = limits.padded();

        let mut table = helpers::create_table();
        table.set_titles(row![c => "min", "max", "inc", "view"]);
        table.add_row(Row::new(vec![
            cell!(r->limits.min.to_string()),
            cell!(r->limits.max.to_string()),
            cell!(r->limits.inc.to_string()),
            cell!(r->format!("{lower} .. {upper}")),
        ]));
        table.printstd();

        println!();
        println!("ticks: {}", limits.ticks().iter().join(", "));

        Ok(ExitCode::SUCCESS)
    }
}
