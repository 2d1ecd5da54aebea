use clap::Parser;
use pineappl_plot_cli::{Opts, Subcommand};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_max_level(opts.configuration.log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match opts.subcommand.run(&opts.configuration) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:?}");
            ExitCode::FAILURE
        }
    }
}
