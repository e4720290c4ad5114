//! Pattern encoding helpers
//!
//! Utilities for moving between class indices, binary class vectors and
//! textual patterns.

use crate::error::{Error, Result};

/// Build a one-hot class vector of length `n_classes`
pub fn one_hot(class: usize, n_classes: usize) -> Vec<f64> {
    assert!(
        class < n_classes,
        "class {} out of range for {} classes",
        class,
        n_classes
    );

    let mut encoded = vec![0.0; n_classes];
    encoded[class] = 1.0;
    encoded
}

/// Binarize a continuous pattern against a threshold
pub fn binarize(pattern: &[f64], threshold: f64) -> Vec<f64> {
    pattern
        .iter()
        .map(|&v| if v >= threshold { 1.0 } else { 0.0 })
        .collect()
}

/// Indices of the active (1-valued) positions of a class vector.
///
/// A clean recall yields one index; ties yield several.
pub fn active_classes(class_vector: &[f64]) -> Vec<usize> {
    class_vector
        .iter()
        .enumerate()
        .filter_map(|(idx, &v)| if v == 1.0 { Some(idx) } else { None })
        .collect()
}

/// Parse a pattern from text, accepting comma or whitespace separators.
///
/// # Errors
/// [`Error::InvalidType`] when the text is empty or a token is not a number.
pub fn parse_pattern(text: &str) -> Result<Vec<f64>> {
    let tokens: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(Error::InvalidType("empty pattern text".to_string()));
    }

    tokens
        .iter()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| Error::InvalidType(format!("'{}' is not a number", token)))
        })
        .collect()
}
