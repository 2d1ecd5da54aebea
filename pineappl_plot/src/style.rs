//! Global drawing style shared by every figure of a process.
//!
//! The style is set once with [`init`] before the first figure is rendered and only read
//! afterwards, which makes it safe to render slices on several threads.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

static STYLE: OnceLock<StyleConfig> = OnceLock::new();

/// Appearance of text and compression of the artifacts.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Typeset labels with TeX.
    pub use_tex: bool,
    /// Font family of all text.
    pub font_family: String,
    /// Base font size in points.
    pub font_size: f64,
    /// Size of axis labels relative to the base font size, using matplotlib's names.
    pub label_size: String,
    /// Compression level of the artifacts; `0` writes uncompressed documents.
    pub output_compression: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            use_tex: true,
            font_family: "serif".to_owned(),
            font_size: 14.0,
            label_size: "small".to_owned(),
            output_compression: 0,
        }
    }
}

impl StyleConfig {
    /// Reads a style from a YAML file. Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file can not be opened and [`Error::Yaml`] if it can not be
    /// parsed.
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }

    /// Returns the font size in points for one of matplotlib's relative size names.
    #[must_use]
    pub fn relative_size(&self, name: &str) -> f64 {
        let scale = match name {
            "xx-small" => 0.579,
            "x-small" => 0.694,
            "small" => 0.833,
            "large" => 1.2,
            "x-large" => 1.44,
            "xx-large" => 1.728,
            _ => 1.0,
        };

        scale * self.font_size
    }

    /// Returns the font size of axis labels in points.
    #[must_use]
    pub fn label_font_size(&self) -> f64 {
        self.relative_size(&self.label_size)
    }
}

/// Sets the global style.
///
/// # Errors
///
/// Returns [`Error::StyleAlreadyInitialized`] if the style was set before, or if [`global`] was
/// already called and locked in the default style.
pub fn init(style: StyleConfig) -> Result<()> {
    tracing::debug!(?style, "initializing global style");
    STYLE.set(style).map_err(|_| Error::StyleAlreadyInitialized)
}

/// Returns the global style. If [`init`] was never called the default style is used from then
/// on.
pub fn global() -> &'static StyleConfig {
    STYLE.get_or_init(StyleConfig::default)
}
