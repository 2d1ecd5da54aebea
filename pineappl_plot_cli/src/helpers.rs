use super::GlobalConfiguration;
use anyhow::{Context, Result};
use pineappl_plot::metadata::Metadata;
use pineappl_plot::payload::Payload;
use pineappl_plot::slice::Dataset;
use pineappl_plot::style::{self, StyleConfig};
use prettytable::Table;
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
use std::path::{Path, PathBuf};

pub fn create_table() -> Table {
    let mut table = Table::new();
    table.set_format(
        FormatBuilder::new()
            .column_separator(' ')
            .separator(LinePosition::Title, LineSeparator::new('-', '+', ' ', ' '))
            .build(),
    );
    table
}

pub fn read_payload(input: &Path) -> Result<(Dataset, Metadata)> {
    Payload::read(input)
        .and_then(Payload::into_parts)
        .with_context(|| format!("unable to read '{}'", input.display()))
}

/// Builds the style from the style file and the command-line overrides and makes it the global
/// one.
pub fn init_style(cfg: &GlobalConfiguration) -> Result<()> {
    let mut config = match &cfg.style {
        Some(path) => StyleConfig::read(path)
            .with_context(|| format!("unable to read style '{}'", path.display()))?,
        None => StyleConfig::default(),
    };

    if cfg.no_tex {
        config.use_tex = false;
    }

    if let Some(family) = &cfg.font_family {
        family.clone_into(&mut config.font_family);
    }

    if let Some(size) = cfg.font_size {
        config.font_size = size;
    }

    if let Some(level) = cfg.compression {
        config.output_compression = level;
    }

    tracing::debug!(style = ?config, "drawing style");

    Ok(style::init(config)?)
}

/// Returns the output path of `input` with a `.yaml` or `.yml` extension removed.
pub fn default_output(input: &Path) -> PathBuf {
    match input.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => input.with_extension(""),
        _ => input.to_path_buf(),
    }
}
