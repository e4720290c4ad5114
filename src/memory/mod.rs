//! Lernmatrix associative memory
//!
//! Provides:
//! - Steinbuch Lernmatrix for hetero- and auto-associative recall
//! - Random bit-flip noise for patterns
//! - Engine configuration and weight statistics

pub mod lernmatrix;
pub mod noise;

pub use lernmatrix::*;
pub use noise::*;

use crate::error::{Error, Result};

/// Accepted value domain for input patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Inputs must be composed of 0s and 1s
    Binary,
    /// Inputs may hold arbitrary finite values
    RealValued,
}

/// Configuration for a [`Lernmatrix`] engine
#[derive(Debug, Clone)]
pub struct LernmatrixConfig {
    /// Input pattern length (matrix columns)
    pub x_length: usize,
    /// Output pattern length (matrix rows)
    pub y_length: usize,
    /// Correction increment for binary learning and zero-value substitution
    pub epsilon: f64,
    /// Accepted value domain for input patterns
    pub mode: InputMode,
    /// Train and recall with an extra noise-correction pass
    pub autoassociate: bool,
    /// Fraction of output bits perturbed per auto-associative pass
    pub bit_error: f64,
}

impl LernmatrixConfig {
    /// Create a configuration with default learning parameters
    pub fn new(x_length: usize, y_length: usize) -> Self {
        Self {
            x_length,
            y_length,
            epsilon: 1.0,
            mode: InputMode::RealValued,
            autoassociate: false,
            bit_error: 0.01,
        }
    }

    /// Set the correction increment
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the accepted input domain
    pub fn with_mode(mut self, mode: InputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable auto-associative operation
    pub fn with_autoassociate(mut self, autoassociate: bool) -> Self {
        self.autoassociate = autoassociate;
        self
    }

    /// Set the bit error rate for auto-associative training
    pub fn with_bit_error(mut self, bit_error: f64) -> Self {
        self.bit_error = bit_error;
        self
    }

    /// Check the configuration for internal consistency.
    ///
    /// # Errors
    /// [`Error::Configuration`] when a dimension is zero, `epsilon` or
    /// `bit_error` is out of range, or auto-association is requested on a
    /// non-square matrix.
    pub fn validate(&self) -> Result<()> {
        if self.x_length == 0 || self.y_length == 0 {
            return Err(Error::Configuration(format!(
                "matrix dimensions must be positive, got {}x{}",
                self.y_length, self.x_length
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::Configuration(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        if !self.bit_error.is_finite() || self.bit_error <= 0.0 || self.bit_error > 1.0 {
            return Err(Error::Configuration(format!(
                "bit error rate must lie in (0, 1], got {}",
                self.bit_error
            )));
        }
        if self.autoassociate && self.x_length != self.y_length {
            return Err(Error::Configuration(format!(
                "auto-association requires a square matrix, got {}x{}",
                self.y_length, self.x_length
            )));
        }
        Ok(())
    }
}

/// Summary statistics of a trained engine
#[derive(Debug, Clone)]
pub struct LernmatrixStats {
    /// Input pattern length
    pub x_length: usize,
    /// Output pattern length
    pub y_length: usize,
    /// Number of examples learned so far
    pub examples_seen: usize,
    /// Number of nonzero weight cells
    pub nonzero_cells: usize,
    /// Smallest weight in the matrix
    pub weight_min: f64,
    /// Largest weight in the matrix
    pub weight_max: f64,
}
