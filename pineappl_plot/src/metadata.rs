//! Process-wide metadata and the axis labels derived from it.

use super::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key-value metadata shared by all slices of a dataset.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

/// Labels and scales that every figure of a dataset shares.
#[derive(Clone, Debug, PartialEq)]
pub struct Labels {
    /// Label of the x-axis including its unit.
    pub xlabel: String,
    /// Label of the y-axis including its unit.
    pub ylabel: String,
    /// Unit of the x-axis, empty for dimensionless observables.
    pub xunit: String,
    /// Whether absolute predictions are drawn with a logarithmic y-axis.
    pub ylog: bool,
    /// Title of the figures.
    pub description: String,
}

impl Metadata {
    /// Constructor. The entries are used as they are.
    #[must_use]
    pub const fn new(entries: BTreeMap<String, String>) -> Self {
        Self(entries)
    }

    /// Constructor that converts raw grid metadata into TeX-ready metadata: entries spanning
    /// multiple lines are dropped, dashes in the description are replaced by their TeX
    /// ligatures and units are converted into `siunitx` macros.
    #[must_use]
    pub fn sanitized(entries: BTreeMap<String, String>) -> Self {
        Self(
            entries
                .into_iter()
                // skip multi-line entries
                .filter(|(_, value)| !value.contains('\n'))
                .map(|(key, value)| {
                    let value = if key == "description" {
                        value.replace('\u{2013}', "--").replace('\u{2014}', "---")
                    } else if key.ends_with("_unit") {
                        value
                            .replace("GeV", r"\giga\electronvolt")
                            .replace('/', r"\per")
                            .replace("pb", r"\pico\barn")
                    } else {
                        value
                    };

                    (key, value)
                })
                .collect(),
        )
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMetadata`] if `key` is not present.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| Error::MissingMetadata(key.to_owned()))
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Builds the labels of the figures whose x-axis is described by the keys starting with
    /// `xaxis`, for instance `x1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMetadata`] if one of the keys `<xaxis>_label_tex`,
    /// `y_label_tex`, `y_unit` or `description` is missing.
    pub fn labels(&self, xaxis: &str) -> Result<Labels> {
        let xunit = self.get(&format!("{xaxis}_unit")).unwrap_or_default();
        let xlabel_tex = self.require(&format!("{xaxis}_label_tex"))?;
        let xlabel = if xunit.is_empty() {
            xlabel_tex.to_owned()
        } else {
            format!(r"{xlabel_tex} [\si{{{xunit}}}]")
        };
        let ylabel = format!(
            r"{} [\si{{{}}}]",
            self.require("y_label_tex")?,
            self.require("y_unit")?
        );

        Ok(Labels {
            xlabel,
            ylabel,
            xunit: xunit.to_owned(),
            ylog: !xunit.is_empty(),
            description: self.require("description")?.to_owned(),
        })
    }
}

impl FromIterator<(String, String)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Returns the display label of a PDF set given as `name` or `name=label`.
#[must_use]
pub fn pdfset_label(pdfset: &str) -> &str {
    pdfset.rsplit_once('=').map_or(pdfset, |(_, label)| label)
}

/// Escapes characters that TeX would otherwise interpret.
#[must_use]
pub fn tex_escape(text: &str) -> String {
    text.replace('_', r"\_")
}
