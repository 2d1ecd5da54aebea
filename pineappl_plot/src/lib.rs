//! `pineappl_plot` draws multi-panel comparison figures of differential predictions.
//!
//! Every [`DataSlice`](slice::DataSlice) of a [`Dataset`](slice::Dataset) becomes one figure
//! with stacked panels that share the x-axis: the absolute prediction, the ratio of the
//! EW-corrected over the QCD-only prediction and, if more than one PDF set was used, the PDF
//! uncertainties and the pulls with respect to the first PDF set. Which panels are drawn is
//! decided by [`Layout::select`](layout::Layout::select), the drawing itself is recorded in
//! [`Axes`](axes::Axes) and serialized by a [`Backend`](backend::Backend).

mod convert;

pub mod axes;
pub mod backend;
pub mod error;
pub mod figure;
pub mod layout;
pub mod metadata;
pub mod panel;
pub mod payload;
pub mod scaler;
pub mod slice;
pub mod style;
pub mod transform;

pub use error::{Error, Result};
