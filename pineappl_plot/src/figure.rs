//! Assembly of figures from slices, and rendering of whole datasets.

use super::axes::{self, Axes, Scale};
use super::backend::{Backend, BackendEnum};
use super::error::{Error, Result};
use super::layout::{Layout, LayoutOptions};
use super::metadata::{Labels, Metadata};
use super::panel::SliceContext;
use super::slice::{DataSlice, Dataset};
use super::style;
use rayon::{ThreadPoolBuilder, prelude::*};
use std::path::{Path, PathBuf};

/// Stacked panels sharing one x-axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    /// Width and height in inches.
    pub size: (f64, f64),
    /// The panels, from top to bottom.
    pub panels: Vec<Axes>,
    /// Scale of the shared x-axis.
    pub xscale: Scale,
}

impl Figure {
    /// Returns the range of the shared x-axis, which covers the data of every panel.
    #[must_use]
    pub fn xlim(&self) -> (f64, f64) {
        let data = self
            .panels
            .iter()
            .filter_map(|axes| axes.data_xlim(self.xscale))
            .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)));
        let margin = self
            .panels
            .iter()
            .map(|axes| axes.margins.0)
            .fold(0.0, f64::max);

        let (min, max) = data.unwrap_or(match self.xscale {
            Scale::Linear => (0.0, 1.0),
            Scale::Log => (1.0, 10.0),
        });
        let (min, max) = axes::nonsingular(min, max);

        axes::expand((min, max), margin, self.xscale)
    }
}

/// Builds the figure of `slice` with the panels of `layout`.
///
/// # Errors
///
/// Returns the first error of a panel that could not be drawn.
pub fn compose(slice: &DataSlice, layout: &Layout, labels: &Labels) -> Result<Figure> {
    let ctx = SliceContext {
        slice,
        xlabel: &layout.xlabel,
        ylabel: &labels.ylabel,
        ylog: labels.ylog,
    };

    let mut panels = Vec::with_capacity(layout.panels.len());

    for panel in &layout.panels {
        let mut axes = Axes::default();
        panel.render(&mut axes, &ctx)?;
        panels.push(axes);
    }

    if let Some(top) = panels.first_mut() {
        labels.description.clone_into(&mut top.title);
    }

    if let Some(bottom) = panels.last_mut() {
        layout.xlabel.clone_into(&mut bottom.xlabel);
    }

    Ok(Figure {
        size: layout.figsize,
        panels,
        xscale: layout.xscale(slice),
    })
}

/// Returns the path of the `index`-th artifact of `count` without extension.
#[must_use]
pub fn artifact_stem(output: &Path, index: usize, count: usize) -> PathBuf {
    if count == 1 {
        output.to_path_buf()
    } else {
        let mut stem = output.as_os_str().to_owned();
        stem.push(format!("-{index}"));
        PathBuf::from(stem)
    }
}

/// Options for [`render_dataset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Path of the artifacts without extension and slice index.
    pub output: PathBuf,
    /// Options for the panel selection.
    pub layout: LayoutOptions,
    /// Number of threads rendering slices; `0` and `1` render sequentially.
    pub threads: usize,
}

/// Renders every slice of `dataset` into its own artifact and returns their paths, in the
/// order of the slices.
///
/// The panels are selected once, from the first slice. The global style is read, and locked in,
/// before the first slice is rendered.
///
/// # Errors
///
/// Fails before anything is written if metadata needed for the labels is missing or the
/// dataset is empty. Otherwise the first slice that can not be drawn or written aborts the
/// rendering.
pub fn render_dataset(
    dataset: &Dataset,
    metadata: &Metadata,
    options: &RenderOptions,
    backend: &BackendEnum,
) -> Result<Vec<PathBuf>> {
    let labels = metadata.labels(&dataset.xaxis)?;
    let first = dataset.slices.first().ok_or(Error::EmptyDataset)?;
    let layout = Layout::select(first, &labels, options.layout);
    let count = dataset.slices.len();
    let style = style::global();

    tracing::debug!(panels = ?layout.panels, figsize = ?layout.figsize, xlog = layout.xlog, "selected layout");
    tracing::info!(slices = count, output = %options.output.display(), "rendering dataset");

    let render = |(index, slice): (usize, &DataSlice)| {
        let figure = compose(slice, &layout, &labels)?;
        backend.export(&figure, style, &artifact_stem(&options.output, index, count))
    };

    if options.threads > 1 {
        ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build()?
            .install(|| dataset.slices.par_iter().enumerate().map(&render).collect())
    } else {
        dataset.slices.iter().enumerate().map(&render).collect()
    }
}
