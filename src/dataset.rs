//! Labeled pattern datasets
//!
//! CSV-backed training data for the Lernmatrix: one row per example,
//! feature columns first, the class index in the last column.

use std::io::Read;

use crate::encoding::one_hot;
use crate::error::{Error, Result};

/// Training examples with integer class labels
#[derive(Debug, Clone)]
pub struct LabeledPatterns {
    /// Feature vectors, one per example
    pub patterns: Vec<Vec<f64>>,
    /// Class index of each example
    pub classes: Vec<usize>,
    /// Number of distinct classes (highest index + 1)
    pub n_classes: usize,
}

impl LabeledPatterns {
    /// Load from a CSV file with a header row.
    ///
    /// All columns but the last are parsed as f64 features; the last column
    /// is the class index.
    ///
    /// # Errors
    /// [`Error::Io`] when the file cannot be opened, otherwise the failures
    /// of [`LabeledPatterns::from_reader`].
    pub fn from_csv(path: &str) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load from any CSV reader with a header row.
    ///
    /// # Errors
    /// [`Error::Csv`] on malformed CSV (including rows whose field count
    /// differs from the header), [`Error::InvalidType`] when a feature or
    /// class token does not parse or a row has fewer than two columns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut patterns = Vec::new();
        let mut classes = Vec::new();

        for result in rdr.records() {
            let record = result?;

            if record.len() < 2 {
                return Err(Error::InvalidType(
                    "each row needs at least one feature column and a class column".to_string(),
                ));
            }

            let n_features = record.len() - 1;
            let mut pattern = Vec::with_capacity(n_features);
            for token in record.iter().take(n_features) {
                let value: f64 = token
                    .parse()
                    .map_err(|_| Error::InvalidType(format!("'{}' is not a number", token)))?;
                pattern.push(value);
            }

            let class_token = &record[n_features];
            let class: usize = class_token.parse().map_err(|_| {
                Error::InvalidType(format!("'{}' is not a class index", class_token))
            })?;

            patterns.push(pattern);
            classes.push(class);
        }

        let n_classes = classes.iter().max().map_or(0, |&max| max + 1);

        Ok(Self {
            patterns,
            classes,
            n_classes,
        })
    }

    /// Number of examples
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the dataset holds no examples
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Feature vector length (0 when empty)
    pub fn x_length(&self) -> usize {
        self.patterns.first().map_or(0, |p| p.len())
    }

    /// Class labels as one-hot vectors of length `n_classes`
    pub fn one_hot_labels(&self) -> Vec<Vec<f64>> {
        self.classes
            .iter()
            .map(|&class| one_hot(class, self.n_classes))
            .collect()
    }
}
