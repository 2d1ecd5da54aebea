//! Output formats of figures.

mod canvas;
mod matplotlib;
mod svg;
mod tex;
mod ticks;

pub use matplotlib::MatplotlibBackend;
pub use svg::SvgBackend;

use super::error::{Error, Result};
use super::figure::Figure;
use super::style::StyleConfig;
use enum_dispatch::enum_dispatch;
use std::fs;
use std::path::{Path, PathBuf};

/// Serializes figures into documents.
#[enum_dispatch]
pub trait Backend {
    /// Returns the file extension of the documents written with `style`.
    fn extension(&self, style: &StyleConfig) -> &'static str;

    /// Serializes `figure`. `stem` is the path of the artifact without its extension, which
    /// backends may embed into the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document can not be generated.
    fn render(&self, figure: &Figure, style: &StyleConfig, stem: &Path) -> Result<Vec<u8>>;

    /// Serializes `figure` and writes it to `stem` with the backend's extension appended.
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file can not be written.
    fn export(&self, figure: &Figure, style: &StyleConfig, stem: &Path) -> Result<PathBuf> {
        let mut path = stem.as_os_str().to_owned();
        path.push(".");
        path.push(self.extension(style));
        let path = PathBuf::from(path);

        let document = self.render(figure, style, stem)?;
        fs::write(&path, document).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "exported figure");

        Ok(path)
    }
}

/// All available backends.
#[enum_dispatch(Backend)]
#[derive(Clone, Copy, Debug)]
pub enum BackendEnum {
    /// Standalone SVG documents.
    Svg(SvgBackend),
    /// Python scripts that draw the figure with matplotlib.
    Matplotlib(MatplotlibBackend),
}

impl Default for BackendEnum {
    fn default() -> Self {
        Self::Svg(SvgBackend)
    }
}
