//! Data model of the figures: one [`DataSlice`] per figure, grouped in a [`Dataset`].

use super::error::{Error, Result};
use super::metadata::{self, Metadata};
use float_cmp::approx_eq;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Prediction of a single PDF set.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PdfResult {
    /// Label shown in legends.
    pub label: String,
    /// Central values.
    pub y: Vec<f64>,
    /// Lower end of the PDF uncertainty.
    pub ymin: Vec<f64>,
    /// Upper end of the PDF uncertainty.
    pub ymax: Vec<f64>,
}

/// Contribution of a single partonic channel.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Channel {
    /// Label shown in legends.
    pub label: String,
    /// Values of the channel.
    pub y: Vec<f64>,
}

/// Everything that is drawn in one figure.
///
/// All arrays indexed by bin contain one more entry than there are bins: the last value
/// repeats the value of the last bin so that step lines close the last bin.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DataSlice {
    /// Bin limits.
    pub x: Vec<f64>,
    /// Central values of the prediction.
    pub y: Vec<f64>,
    /// Lower end of the scale uncertainty of the prediction.
    pub ymin: Vec<f64>,
    /// Upper end of the scale uncertainty of the prediction.
    pub ymax: Vec<f64>,
    /// Central values of the QCD-only prediction.
    pub qcd_y: Vec<f64>,
    /// Lower end of the scale uncertainty of the QCD-only prediction.
    pub qcd_min: Vec<f64>,
    /// Upper end of the scale uncertainty of the QCD-only prediction.
    pub qcd_max: Vec<f64>,
    /// Predictions of each PDF set, the first one is the reference.
    pub pdf_results: Vec<PdfResult>,
    /// Optional channel breakdown.
    #[serde(default)]
    pub channels: Vec<Channel>,
    /// Bin midpoints, one per bin.
    pub mid: Vec<f64>,
    /// Identifies the slice among its siblings; empty if there is nothing to show.
    #[serde(default)]
    pub slice_label: String,
}

impl DataSlice {
    /// Returns the number of bins.
    #[must_use]
    pub fn bins(&self) -> usize {
        self.x.len().saturating_sub(1)
    }

    /// Returns `true` if this slice is a single, integrated bin.
    #[must_use]
    pub fn is_integrated(&self) -> bool {
        self.x.len() == 2
    }

    /// Returns the reference PDF result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPdfResults`] if there are no PDF results.
    pub fn reference(&self) -> Result<&PdfResult> {
        self.pdf_results.first().ok_or(Error::NoPdfResults)
    }
}

/// All slices of an observable, sharing the metadata key prefix `xaxis`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    /// Prefix of the metadata keys describing the x-axis, for instance `x1`.
    pub xaxis: String,
    /// The slices, one figure each.
    pub slices: Vec<DataSlice>,
}

/// Predictions for all bins of a possibly multi-dimensional observable, before they are split
/// into slices.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BinnedPrediction {
    /// Left bin limits, one vector per dimension.
    pub left: Vec<Vec<f64>>,
    /// Right bin limits, one vector per dimension.
    pub right: Vec<Vec<f64>>,
    /// Lower end of the scale uncertainty.
    pub min: Vec<f64>,
    /// Upper end of the scale uncertainty.
    pub max: Vec<f64>,
    /// Central values of the QCD-only prediction.
    pub qcd_central: Vec<f64>,
    /// Lower end of the scale uncertainty of the QCD-only prediction.
    pub qcd_min: Vec<f64>,
    /// Upper end of the scale uncertainty of the QCD-only prediction.
    pub qcd_max: Vec<f64>,
    /// Predictions of each PDF set. Labels of the form `name=label` are shortened to `label`.
    pub pdf_results: Vec<PdfResult>,
}

fn with_sentinel(values: &[f64], begin: usize, end: usize) -> Vec<f64> {
    let mut result = values[begin..end].to_vec();
    result.push(values[end - 1]);
    result
}

impl BinnedPrediction {
    /// Returns the number of dimensions.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.left.len()
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn bins(&self) -> usize {
        self.left.first().map_or(0, Vec::len)
    }

    /// Returns the half-open bin ranges of the slices. Consecutive bins belong to the same slice
    /// if their limits agree in every dimension except the last one.
    #[must_use]
    pub fn slices(&self) -> Vec<(usize, usize)> {
        let bins = self.bins();

        if bins == 0 {
            return Vec::new();
        }

        let outer = self.dimensions().saturating_sub(1);
        let mut slices = Vec::new();
        let mut begin = 0;

        for bin in 1..bins {
            let same = (0..outer).all(|d| {
                approx_eq!(f64, self.left[d][bin], self.left[d][bin - 1], ulps = 8)
                    && approx_eq!(f64, self.right[d][bin], self.right[d][bin - 1], ulps = 8)
            });

            if !same {
                slices.push((begin, bin));
                begin = bin;
            }
        }

        slices.push((begin, bins));
        slices
    }

    fn slice_label(&self, metadata: &Metadata, (begin, end): (usize, usize)) -> String {
        (0..self.dimensions() - 1)
            .map(|d| {
                let label = metadata
                    .get(&format!("x{}_label_tex", d + 1))
                    .map_or_else(|| format!("x{}", d + 1), ToOwned::to_owned)
                    .replace('$', "");

                format!(
                    "${} < {} < {}$",
                    self.left[d][begin],
                    label,
                    self.right[d][end - 1]
                )
            })
            .join(r"\\")
    }

    fn validate(&self) -> Result<()> {
        let bins = self.bins();

        if self.dimensions() == 0 || bins == 0 {
            return Err(Error::InvalidPayload("no bins given".to_owned()));
        }

        if self.right.len() != self.dimensions() {
            return Err(Error::InvalidPayload(format!(
                "{} dimensions of left limits, but {} of right limits",
                self.dimensions(),
                self.right.len()
            )));
        }

        let lengths = self
            .left
            .iter()
            .chain(&self.right)
            .chain([
                &self.min,
                &self.max,
                &self.qcd_central,
                &self.qcd_min,
                &self.qcd_max,
            ])
            .chain(
                self.pdf_results
                    .iter()
                    .flat_map(|result| [&result.y, &result.ymin, &result.ymax]),
            )
            .map(Vec::len);

        for len in lengths {
            if len != bins {
                return Err(Error::InvalidPayload(format!(
                    "found an array with {len} entries, expected {bins}"
                )));
            }
        }

        if self.pdf_results.is_empty() {
            return Err(Error::NoPdfResults);
        }

        Ok(())
    }

    /// Splits the prediction into slices and appends the closing entry to every array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPayload`] if the arrays do not all have one entry per bin and
    /// [`Error::NoPdfResults`] if there are no PDF results.
    pub fn into_dataset(self, metadata: &Metadata) -> Result<Dataset> {
        self.validate()?;

        let last = self.dimensions() - 1;
        let slices = self
            .slices()
            .into_iter()
            .map(|range @ (begin, end)| {
                let left = &self.left[last];
                let right = &self.right[last];
                let mut x = left[begin..end].to_vec();
                x.push(right[end - 1]);

                DataSlice {
                    x,
                    y: with_sentinel(&self.pdf_results[0].y, begin, end),
                    ymin: with_sentinel(&self.min, begin, end),
                    ymax: with_sentinel(&self.max, begin, end),
                    qcd_y: with_sentinel(&self.qcd_central, begin, end),
                    qcd_min: with_sentinel(&self.qcd_min, begin, end),
                    qcd_max: with_sentinel(&self.qcd_max, begin, end),
                    pdf_results: self
                        .pdf_results
                        .iter()
                        .map(|result| PdfResult {
                            label: metadata::tex_escape(metadata::pdfset_label(&result.label)),
                            y: with_sentinel(&result.y, begin, end),
                            ymin: with_sentinel(&result.ymin, begin, end),
                            ymax: with_sentinel(&result.ymax, begin, end),
                        })
                        .collect(),
                    channels: Vec::new(),
                    mid: (begin..end)
                        .map(|bin| 0.5 * (left[bin] + right[bin]))
                        .collect(),
                    slice_label: self.slice_label(metadata, range),
                }
            })
            .collect();

        Ok(Dataset {
            xaxis: format!("x{}", self.dimensions()),
            slices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_dimensional() -> BinnedPrediction {
        BinnedPrediction {
            left: vec![vec![0.0, 0.0, 0.0, 1.0, 1.0], vec![0.0, 10.0, 20.0, 0.0, 10.0]],
            right: vec![vec![1.0, 1.0, 1.0, 2.0, 2.0], vec![10.0, 20.0, 30.0, 10.0, 20.0]],
            min: vec![0.9, 1.8, 2.7, 3.6, 4.5],
            max: vec![1.1, 2.2, 3.3, 4.4, 5.5],
            qcd_central: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            qcd_min: vec![0.9, 1.8, 2.7, 3.6, 4.5],
            qcd_max: vec![1.1, 2.2, 3.3, 4.4, 5.5],
            pdf_results: vec![PdfResult {
                label: "324900=NNPDF31_nlo".to_owned(),
                y: vec![1.01, 2.02, 3.03, 4.04, 5.05],
                ymin: vec![0.99, 1.98, 2.97, 3.96, 4.95],
                ymax: vec![1.03, 2.06, 3.09, 4.12, 5.15],
            }],
        }
    }

    #[test]
    fn slices_of_two_dimensional_bins() {
        assert_eq!(two_dimensional().slices(), vec![(0, 3), (3, 5)]);
    }

    #[test]
    fn one_dimensional_bins_form_one_slice() {
        let mut prediction = two_dimensional();
        prediction.left.remove(0);
        prediction.right.remove(0);

        assert_eq!(prediction.slices(), vec![(0, 5)]);
    }

    #[test]
    fn into_dataset_appends_sentinels() {
        let metadata: Metadata = [("x1_label_tex".to_owned(), "$y$".to_owned())]
            .into_iter()
            .collect();
        let dataset = two_dimensional().into_dataset(&metadata).unwrap();

        assert_eq!(dataset.xaxis, "x2");
        assert_eq!(dataset.slices.len(), 2);

        let first = &dataset.slices[0];
        assert_eq!(first.x, vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(first.y, vec![1.01, 2.02, 3.03, 3.03]);
        assert_eq!(first.qcd_y, vec![1.0, 2.0, 3.0, 3.0]);
        assert_eq!(first.mid, vec![5.0, 15.0, 25.0]);
        assert_eq!(first.slice_label, "$0 < y < 1$");
        assert_eq!(first.pdf_results[0].label, r"NNPDF31\_nlo");
        assert_eq!(first.bins(), 3);

        let second = &dataset.slices[1];
        assert_eq!(second.x, vec![0.0, 10.0, 20.0]);
        assert_eq!(second.ymax, vec![4.4, 5.5, 5.5]);
        assert_eq!(second.slice_label, "$1 < y < 2$");
    }

    #[test]
    fn inconsistent_lengths_are_rejected() {
        let mut prediction = two_dimensional();
        prediction.qcd_max.pop();

        assert!(matches!(
            prediction.into_dataset(&Metadata::default()),
            Err(Error::InvalidPayload(_))
        ));
    }

    #[test]
    fn missing_pdf_results_are_rejected() {
        let mut prediction = two_dimensional();
        prediction.pdf_results.clear();

        assert!(matches!(
            prediction.into_dataset(&Metadata::default()),
            Err(Error::NoPdfResults)
        ));
    }
}
