//! Input validation and value-domain classification
//!
//! Every sequence entering the engine passes through [`validate`] before any
//! matrix access: length first, then element checks. The returned
//! [`DomainKind`] tells the engine which update/recall rule applies for the
//! current call.

use crate::error::{Error, Result};

/// Value domain of a validated sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainKind {
    /// Every element is 0 or 1
    Binary,
    /// At least one element lies outside {0, 1}
    RealValued,
}

/// Validate a sequence against an expected length and value domain.
///
/// Pure function with no side effects. Checks run in order: length, element
/// usability, binary constraint. When `require_binary` is false the sequence
/// is classified instead of rejected, so an all-{0,1} input counts as
/// [`DomainKind::Binary`] even on an engine configured for real values.
///
/// # Arguments
/// * `seq` - Input sequence (X or Y role)
/// * `expected_len` - Length required by the matrix dimension
/// * `require_binary` - Reject any element outside {0, 1}
///
/// # Errors
/// [`Error::LengthMismatch`] when the length differs from `expected_len`,
/// [`Error::InvalidType`] when an element is not a finite number,
/// [`Error::NonBinaryValue`] when `require_binary` is violated.
pub fn validate(seq: &[f64], expected_len: usize, require_binary: bool) -> Result<DomainKind> {
    if seq.len() != expected_len {
        return Err(Error::LengthMismatch {
            expected: expected_len,
            actual: seq.len(),
        });
    }

    let mut domain = DomainKind::Binary;

    for (index, &value) in seq.iter().enumerate() {
        if !value.is_finite() {
            return Err(Error::InvalidType(format!(
                "element at index {} is not a finite number",
                index
            )));
        }

        if value != 0.0 && value != 1.0 {
            if require_binary {
                return Err(Error::NonBinaryValue { index, value });
            }
            domain = DomainKind::RealValued;
        }
    }

    Ok(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch() {
        let err = validate(&[1.0, 0.0, 1.0], 4, false).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_binary_classification() {
        let domain = validate(&[1.0, 0.0, 0.0, 1.0], 4, false).unwrap();
        assert_eq!(domain, DomainKind::Binary);
    }

    #[test]
    fn test_real_classification() {
        let domain = validate(&[1.0, 0.5, 0.0, -4.0], 4, false).unwrap();
        assert_eq!(domain, DomainKind::RealValued);
    }

    #[test]
    fn test_real_values_rejected_when_binary_required() {
        let err = validate(&[1.0, 0.0, 2.0], 3, true).unwrap_err();
        assert!(matches!(err, Error::NonBinaryValue { index: 2, .. }));
    }

    #[test]
    fn test_binary_accepted_when_binary_required() {
        let domain = validate(&[0.0, 1.0, 1.0], 3, true).unwrap();
        assert_eq!(domain, DomainKind::Binary);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            validate(&[1.0, f64::NAN], 2, false),
            Err(Error::InvalidType(_))
        ));
        assert!(matches!(
            validate(&[f64::INFINITY, 0.0], 2, true),
            Err(Error::InvalidType(_))
        ));
    }

    #[test]
    fn test_length_checked_before_values() {
        // A sequence that is both too short and non-binary reports the
        // length problem first.
        let err = validate(&[5.0], 2, true).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { .. }));
    }
}
