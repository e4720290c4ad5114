//! Steinbuch Lernmatrix Library
//!
//! This library implements the Steinbuch Lernmatrix, an associative memory
//! that learns input/class associations through additive corrections on a
//! dense weight matrix. It supports binary and real-valued inputs, with the
//! update and recall rules chosen per call from the input's value domain,
//! plus an optional auto-associative mode that tolerates noisy labels and
//! queries.
//!
//! # Modules
//!
//! - `dataset`: CSV-backed labeled pattern loading
//! - `encoding`: Class vector and pattern text helpers
//! - `error`: Crate error and result types
//! - `memory`: The Lernmatrix engine, configuration and noise helpers
//! - `validate`: Input validation and value-domain classification
//!
//! # Example
//!
//! ```
//! use lernmatrix::{InputMode, Lernmatrix, LernmatrixConfig};
//!
//! let config = LernmatrixConfig::new(4, 3).with_mode(InputMode::Binary);
//! let mut lm = Lernmatrix::with_config(config)?;
//!
//! lm.learn(&[1.0, 1.0, 0.0, 0.0], &[1.0, 0.0, 0.0])?;
//! lm.learn(&[0.0, 0.0, 1.0, 1.0], &[0.0, 1.0, 0.0])?;
//!
//! assert_eq!(lm.recall(&[1.0, 1.0, 0.0, 0.0])?, vec![1.0, 0.0, 0.0]);
//! # Ok::<(), lernmatrix::Error>(())
//! ```

pub mod dataset;
pub mod encoding;
pub mod error;
pub mod memory;
pub mod validate;

pub use dataset::*;
pub use encoding::*;
pub use error::*;
pub use memory::*;
pub use validate::*;
