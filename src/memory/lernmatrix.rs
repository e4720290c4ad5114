//! Steinbuch Lernmatrix implementation
//!
//! Based on "Die Lernmatrix" (Steinbuch, 1961), a binary associative memory
//! trained with additive Hebbian corrections, extended with a real-valued
//! input rule and optional noise-tolerant auto-association.

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::memory::noise::flip_random_bits;
use crate::memory::{InputMode, LernmatrixConfig, LernmatrixStats};
use crate::validate::{validate, DomainKind};

/// Steinbuch Lernmatrix for supervised pattern association
#[derive(Debug, Clone)]
pub struct Lernmatrix {
    /// Engine configuration, immutable after construction
    config: LernmatrixConfig,
    /// Weight matrix (y_length x x_length)
    weights: Array2<f64>,
    /// Number of examples learned so far
    examples_seen: usize,
}

impl Lernmatrix {
    /// Create a new Lernmatrix with default learning parameters
    ///
    /// # Arguments
    /// * `x_length` - Input pattern length (matrix columns)
    /// * `y_length` - Output pattern length (matrix rows)
    ///
    /// # Errors
    /// [`Error::Configuration`] when either dimension is zero.
    pub fn new(x_length: usize, y_length: usize) -> Result<Self> {
        Self::with_config(LernmatrixConfig::new(x_length, y_length))
    }

    /// Create a new Lernmatrix from an explicit configuration
    ///
    /// # Errors
    /// [`Error::Configuration`] when the configuration is inconsistent, see
    /// [`LernmatrixConfig::validate`].
    pub fn with_config(config: LernmatrixConfig) -> Result<Self> {
        config.validate()?;
        let weights = Array2::zeros((config.y_length, config.x_length));
        Ok(Self {
            config,
            weights,
            examples_seen: 0,
        })
    }

    /// Learn a single association between an input X and a target class vector Y.
    ///
    /// Y must be strictly binary. X is classified per call: an all-{0,1}
    /// input trains under the binary correction rule (`+epsilon` where
    /// `X[c] == 1`, `-epsilon` elsewhere), anything else under the
    /// real-valued rule (`X[c]` where nonzero, `+epsilon` for zeros). Rows
    /// whose target bit is 0 are left untouched. Deltas accumulate, so the
    /// matrix is the running sum over all examples.
    ///
    /// When auto-association is enabled a second pass follows: a copy of Y
    /// with `ceil(y_length * bit_error)` random flip draws becomes the
    /// input and the clean Y stays the target, teaching the matrix to
    /// reconstruct labels from corrupted versions of themselves.
    ///
    /// Validation failures abort the call before any cell is written.
    ///
    /// # Errors
    /// [`Error::LengthMismatch`], [`Error::NonBinaryValue`] or
    /// [`Error::InvalidType`] when either sequence fails validation.
    pub fn learn(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        validate(y, self.config.y_length, true)?;
        let domain = self.classify(x)?;

        self.learn_pass(x, y, domain);
        self.examples_seen += 1;

        if self.config.autoassociate {
            let n_flips = (self.config.y_length as f64 * self.config.bit_error).ceil() as usize;
            let noisy = flip_random_bits(y, n_flips);
            log::debug!("auto-associative pass with {} flip draws", n_flips);
            self.learn_pass(&noisy, y, DomainKind::Binary);
        }

        Ok(())
    }

    /// Learn a batch of associations in order.
    ///
    /// Stops at the first failing pair; examples before it stay learned.
    ///
    /// # Errors
    /// [`Error::InvalidType`] when the slices differ in length, otherwise
    /// whatever [`Lernmatrix::learn`] reports for the offending pair.
    pub fn learn_batch(&mut self, xs: &[Vec<f64>], ys: &[Vec<f64>]) -> Result<usize> {
        if xs.len() != ys.len() {
            return Err(Error::InvalidType(format!(
                "batch size mismatch: {} inputs but {} labels",
                xs.len(),
                ys.len()
            )));
        }

        for (x, y) in xs.iter().zip(ys.iter()) {
            self.learn(x, y)?;
        }

        log::debug!("learned batch of {} examples", xs.len());
        Ok(xs.len())
    }

    /// Recall the class vector associated with an input X.
    ///
    /// The input is classified per call. Binary inputs score rows by the
    /// matrix-vector product and the maximum wins; real-valued inputs score
    /// rows by distance from the learned asymptote and the minimum wins.
    /// Every row achieving the winning score is flagged with 1, so ties
    /// produce multiple simultaneous winners.
    ///
    /// When auto-association is enabled the first-pass output is fed back
    /// once as a query and the second pass's answer is returned.
    ///
    /// # Errors
    /// [`Error::LengthMismatch`], [`Error::NonBinaryValue`] or
    /// [`Error::InvalidType`] when the input fails validation.
    pub fn recall(&self, x: &[f64]) -> Result<Vec<f64>> {
        let domain = self.classify(x)?;
        let output = self.recall_pass(x, domain);

        if self.config.autoassociate {
            // The first-pass output is a class vector, binary by
            // construction, so the cleanup pass scores under the binary rule.
            return Ok(self.recall_pass(&output, DomainKind::Binary));
        }

        Ok(output)
    }

    /// Compute the raw per-row recall scores for an input X.
    ///
    /// Single pass only; the auto-associative cleanup applies to
    /// [`Lernmatrix::recall`], not here. Binary inputs yield dot products
    /// (higher is better), real-valued inputs yield asymptote distances
    /// (lower is better). Use [`Lernmatrix::classify`] to tell which rule
    /// applied.
    ///
    /// # Errors
    /// Same validation failures as [`Lernmatrix::recall`].
    pub fn recall_scores(&self, x: &[f64]) -> Result<Vec<f64>> {
        let domain = self.classify(x)?;
        Ok(self.scores(x, domain))
    }

    /// Classify an input against this engine's length and domain constraints.
    ///
    /// # Errors
    /// [`Error::LengthMismatch`] on wrong length, [`Error::InvalidType`] on
    /// non-finite elements, [`Error::NonBinaryValue`] when the engine is
    /// locked to binary inputs and the sequence is not.
    pub fn classify(&self, x: &[f64]) -> Result<DomainKind> {
        validate(
            x,
            self.config.x_length,
            self.config.mode == InputMode::Binary,
        )
    }

    /// Single learning pass over every cell
    fn learn_pass(&mut self, x: &[f64], y: &[f64], domain: DomainKind) {
        for row in 0..self.config.y_length {
            if y[row] == 0.0 {
                continue;
            }
            for col in 0..self.config.x_length {
                let delta = match domain {
                    DomainKind::Binary => {
                        if x[col] == 1.0 {
                            self.config.epsilon
                        } else {
                            -self.config.epsilon
                        }
                    }
                    DomainKind::RealValued => {
                        if x[col] != 0.0 {
                            x[col]
                        } else {
                            self.config.epsilon
                        }
                    }
                };
                self.weights[[row, col]] += delta;
            }
        }
    }

    /// Single recall pass: score rows and flag every winner
    fn recall_pass(&self, x: &[f64], domain: DomainKind) -> Vec<f64> {
        let scores = self.scores(x, domain);
        let best = match domain {
            DomainKind::Binary => scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            DomainKind::RealValued => scores.iter().cloned().fold(f64::INFINITY, f64::min),
        };

        scores
            .iter()
            .map(|&s| if s == best { 1.0 } else { 0.0 })
            .collect()
    }

    /// Per-row scores under the given domain's rule
    fn scores(&self, x: &[f64], domain: DomainKind) -> Vec<f64> {
        match domain {
            DomainKind::Binary => (0..self.config.y_length)
                .map(|row| {
                    (0..self.config.x_length)
                        .map(|col| self.weights[[row, col]] * x[col])
                        .sum()
                })
                .collect(),
            DomainKind::RealValued => {
                // Finite substitute for zero elements, not a true inverse.
                let xinv: Vec<f64> = x
                    .iter()
                    .map(|&v| if v != 0.0 { 1.0 / v } else { 1.0 / self.config.epsilon })
                    .collect();

                (0..self.config.y_length)
                    .map(|row| {
                        (0..self.config.x_length)
                            .map(|col| (self.weights[[row, col]] * xinv[col] - 1.0).tanh().abs())
                            .sum()
                    })
                    .collect()
            }
        }
    }

    /// Input pattern length (matrix columns)
    pub fn x_length(&self) -> usize {
        self.config.x_length
    }

    /// Output pattern length (matrix rows)
    pub fn y_length(&self) -> usize {
        self.config.y_length
    }

    /// Engine configuration
    pub fn config(&self) -> &LernmatrixConfig {
        &self.config
    }

    /// Weight matrix (y_length x x_length)
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Get engine statistics
    pub fn stats(&self) -> LernmatrixStats {
        let nonzero_cells = self.weights.iter().filter(|&&w| w != 0.0).count();
        let weight_min = self.weights.iter().cloned().fold(f64::INFINITY, f64::min);
        let weight_max = self
            .weights
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);

        LernmatrixStats {
            x_length: self.config.x_length,
            y_length: self.config.y_length,
            examples_seen: self.examples_seen,
            nonzero_cells,
            weight_min,
            weight_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_engine(x_length: usize, y_length: usize) -> Lernmatrix {
        Lernmatrix::with_config(
            LernmatrixConfig::new(x_length, y_length).with_mode(InputMode::Binary),
        )
        .unwrap()
    }

    /// Engine trained on three disjoint binary classes
    fn trained_three_class() -> Lernmatrix {
        let mut lm = binary_engine(4, 3);
        lm.learn(&[1.0, 0.0, 1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();
        lm.learn(&[0.0, 1.0, 0.0, 1.0], &[0.0, 1.0, 0.0]).unwrap();
        lm.learn(&[1.0, 1.0, 0.0, 0.0], &[0.0, 0.0, 1.0]).unwrap();
        lm
    }

    #[test]
    fn test_new_defaults() {
        let lm = Lernmatrix::new(4, 3).unwrap();
        assert_eq!(lm.x_length(), 4);
        assert_eq!(lm.y_length(), 3);
        assert_eq!(lm.weights().dim(), (3, 4));
        assert_eq!(lm.config().mode, InputMode::RealValued);
        assert_eq!(lm.stats().examples_seen, 0);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        assert!(Lernmatrix::with_config(LernmatrixConfig::new(0, 3)).is_err());
        let err = Lernmatrix::with_config(LernmatrixConfig::new(5, 3).with_autoassociate(true))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_learn_accumulates_weights() {
        let mut lm = binary_engine(2, 1);
        lm.learn(&[1.0, 0.0], &[1.0]).unwrap();
        assert_eq!(lm.weights()[[0, 0]], 1.0);
        assert_eq!(lm.weights()[[0, 1]], -1.0);

        lm.learn(&[1.0, 0.0], &[1.0]).unwrap();
        assert_eq!(lm.weights()[[0, 0]], 2.0);
        assert_eq!(lm.weights()[[0, 1]], -2.0);
    }

    #[test]
    fn test_zero_label_row_untouched() {
        let mut lm = binary_engine(2, 2);
        lm.learn(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert_eq!(lm.weights()[[0, 0]], 0.0);
        assert_eq!(lm.weights()[[0, 1]], 0.0);
        assert_eq!(lm.weights()[[1, 0]], 1.0);
        assert_eq!(lm.weights()[[1, 1]], -1.0);
    }

    #[test]
    fn test_all_zero_label_changes_nothing() {
        let mut lm = binary_engine(3, 2);
        lm.learn(&[1.0, 0.0, 1.0], &[0.0, 0.0]).unwrap();
        assert!(lm.weights().iter().all(|&w| w == 0.0));
        assert_eq!(lm.stats().examples_seen, 1);
    }

    #[test]
    fn test_single_example_round_trip() {
        let mut lm = binary_engine(4, 3);
        lm.learn(&[1.0, 1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();
        assert_eq!(
            lm.recall(&[1.0, 1.0, 0.0, 0.0]).unwrap(),
            vec![1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_learn_rejects_length_mismatch() {
        let mut lm = binary_engine(4, 3);
        let err = lm
            .learn(&[1.0, 1.0, 0.0, 0.0, 1.0], &[1.0, 0.0, 0.0])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 4,
                actual: 5
            }
        ));

        let err = lm.learn(&[1.0, 1.0, 0.0, 0.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_learn_rejects_non_binary_label() {
        let mut lm = binary_engine(4, 3);
        let err = lm
            .learn(&[1.0, 1.0, 0.0, 0.0], &[1.0, 0.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, Error::NonBinaryValue { index: 2, .. }));
    }

    #[test]
    fn test_binary_mode_rejects_real_input() {
        let mut lm = binary_engine(3, 2);
        assert!(lm.learn(&[0.5, 1.0, 0.0], &[1.0, 0.0]).is_err());
        assert!(lm.recall(&[0.5, 1.0, 0.0]).is_err());
    }

    #[test]
    fn test_failed_learn_leaves_matrix_untouched() {
        let mut lm = binary_engine(4, 3);
        lm.learn(&[1.0, 0.0, 1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();
        let before = lm.weights().clone();

        assert!(lm.learn(&[1.0, 0.0, 1.0, 0.0], &[1.0, 0.0, 2.0]).is_err());
        assert_eq!(lm.weights(), &before);
        assert_eq!(lm.stats().examples_seen, 1);
    }

    #[test]
    fn test_multi_class_separation() {
        let lm = trained_three_class();
        assert_eq!(
            lm.recall(&[1.0, 0.0, 1.0, 0.0]).unwrap(),
            vec![1.0, 0.0, 0.0]
        );
        assert_eq!(
            lm.recall(&[0.0, 1.0, 0.0, 1.0]).unwrap(),
            vec![0.0, 1.0, 0.0]
        );
        assert_eq!(
            lm.recall(&[1.0, 1.0, 0.0, 0.0]).unwrap(),
            vec![0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_recall_scores_exposes_raw_scores() {
        let lm = trained_three_class();
        assert_eq!(
            lm.recall_scores(&[0.0, 1.0, 0.0, 1.0]).unwrap(),
            vec![-2.0, 2.0, 0.0]
        );
    }

    #[test]
    fn test_recall_all_ties_flagged() {
        let mut lm = binary_engine(2, 2);
        lm.learn(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
        lm.learn(&[0.0, 1.0], &[0.0, 1.0]).unwrap();

        // Both rows score 0 on the ambiguous query, so both win.
        assert_eq!(lm.recall(&[1.0, 1.0]).unwrap(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_recall_on_untrained_matrix() {
        let lm = Lernmatrix::new(3, 2).unwrap();
        assert_eq!(lm.recall(&[1.0, 0.0, 1.0]).unwrap(), vec![1.0, 1.0]);
        assert_eq!(lm.recall(&[2.5, 0.0, 1.0]).unwrap(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_real_rule_deltas() {
        let mut lm = Lernmatrix::new(3, 1).unwrap();
        lm.learn(&[2.5, 0.0, -1.0], &[1.0]).unwrap();
        assert_eq!(lm.weights()[[0, 0]], 2.5);
        assert_eq!(lm.weights()[[0, 1]], 1.0);
        assert_eq!(lm.weights()[[0, 2]], -1.0);
    }

    #[test]
    fn test_binary_input_in_real_engine_uses_binary_rule() {
        let mut lm = Lernmatrix::new(4, 1).unwrap();
        lm.learn(&[1.0, 0.0, 1.0, 0.0], &[1.0]).unwrap();
        assert_eq!(lm.weights()[[0, 0]], 1.0);
        assert_eq!(lm.weights()[[0, 1]], -1.0);
        assert_eq!(lm.weights()[[0, 2]], 1.0);
        assert_eq!(lm.weights()[[0, 3]], -1.0);
    }

    #[test]
    fn test_real_recall_minimum_wins() {
        let mut lm = Lernmatrix::new(3, 2).unwrap();
        lm.learn(&[5.0, 0.5, 2.0], &[1.0, 0.0]).unwrap();
        lm.learn(&[1.0, 1.0, 0.0], &[0.0, 1.0]).unwrap();

        // The trained row reproduces its input exactly, score 0.
        let scores = lm.recall_scores(&[5.0, 0.5, 2.0]).unwrap();
        assert!(scores[0].abs() < 1e-12);
        assert!(scores[1] > scores[0]);
        assert_eq!(lm.recall(&[5.0, 0.5, 2.0]).unwrap(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_epsilon_substitute_for_zero_elements() {
        let mut lm =
            Lernmatrix::with_config(LernmatrixConfig::new(2, 2).with_epsilon(0.5)).unwrap();
        lm.learn(&[0.0, 2.0], &[1.0, 0.0]).unwrap();
        assert_eq!(lm.weights()[[0, 0]], 0.5);
        assert_eq!(lm.weights()[[0, 1]], 2.0);

        assert_eq!(lm.recall(&[0.0, 2.0]).unwrap(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_classify_varies_per_call() {
        let lm = Lernmatrix::new(4, 2).unwrap();
        assert_eq!(
            lm.classify(&[1.0, 0.0, 1.0, 0.0]).unwrap(),
            DomainKind::Binary
        );
        assert_eq!(
            lm.classify(&[0.5, 0.0, 1.0, 1.0]).unwrap(),
            DomainKind::RealValued
        );
        assert!(lm.classify(&[1.0, 0.0]).is_err());
    }

    #[test]
    fn test_autoassociate_single_cell() {
        let config = LernmatrixConfig::new(1, 1)
            .with_mode(InputMode::Binary)
            .with_autoassociate(true)
            .with_bit_error(1.0);
        let mut lm = Lernmatrix::with_config(config).unwrap();

        // One flip on one position is deterministic: the associative pass
        // trains with [0] as input and cancels the primary increment.
        lm.learn(&[1.0], &[1.0]).unwrap();
        assert_eq!(lm.weights()[[0, 0]], 0.0);
        assert_eq!(lm.stats().examples_seen, 1);
    }

    #[test]
    fn test_autoassociate_zero_label_is_noop() {
        let config = LernmatrixConfig::new(3, 3)
            .with_mode(InputMode::Binary)
            .with_autoassociate(true)
            .with_bit_error(0.5);
        let mut lm = Lernmatrix::with_config(config).unwrap();

        lm.learn(&[1.0, 0.0, 1.0], &[0.0, 0.0, 0.0]).unwrap();
        assert!(lm.weights().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_autoassociate_recall_is_two_passes() {
        let config = LernmatrixConfig::new(3, 3)
            .with_mode(InputMode::Binary)
            .with_autoassociate(true)
            .with_bit_error(0.01);
        let mut lm = Lernmatrix::with_config(config).unwrap();
        lm.learn(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();
        lm.learn(&[0.0, 1.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
        lm.learn(&[0.0, 0.0, 1.0], &[0.0, 0.0, 1.0]).unwrap();

        let threshold = |scores: &[f64]| -> Vec<f64> {
            let best = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            scores
                .iter()
                .map(|&s| if s == best { 1.0 } else { 0.0 })
                .collect()
        };

        let query = [1.0, 1.0, 0.0];
        let first = threshold(&lm.recall_scores(&query).unwrap());
        let second = threshold(&lm.recall_scores(&first).unwrap());
        assert_eq!(lm.recall(&query).unwrap(), second);
    }

    #[test]
    fn test_autoassociate_recall_output_is_binary() {
        let config = LernmatrixConfig::new(6, 6)
            .with_mode(InputMode::Binary)
            .with_autoassociate(true)
            .with_bit_error(0.01);
        let mut lm = Lernmatrix::with_config(config).unwrap();
        lm.learn(
            &[1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        )
        .unwrap();
        lm.learn(
            &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0],
            &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        )
        .unwrap();

        let output = lm.recall(&[1.0, 0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(output.len(), 6);
        assert!(output.iter().all(|&v| v == 0.0 || v == 1.0));
        assert!(output.iter().any(|&v| v == 1.0));
    }

    #[test]
    fn test_learn_batch_matches_sequential_learning() {
        let xs = vec![
            vec![1.0, 0.0, 1.0, 0.0],
            vec![0.0, 1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0, 0.0],
        ];
        let ys = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];

        let mut batch = binary_engine(4, 3);
        assert_eq!(batch.learn_batch(&xs, &ys).unwrap(), 3);

        let sequential = trained_three_class();
        assert_eq!(batch.weights(), sequential.weights());
        assert_eq!(batch.stats().examples_seen, 3);
    }

    #[test]
    fn test_learn_batch_size_mismatch() {
        let mut lm = binary_engine(2, 1);
        let err = lm
            .learn_batch(&[vec![1.0, 0.0]], &[vec![1.0], vec![0.0]])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidType(_)));
    }

    #[test]
    fn test_learn_batch_stops_at_first_failure() {
        let mut lm = binary_engine(2, 1);
        let xs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let ys = vec![vec![1.0], vec![2.0]];

        assert!(lm.learn_batch(&xs, &ys).is_err());
        // The first pair was already applied when the second failed.
        assert_eq!(lm.weights()[[0, 0]], 1.0);
        assert_eq!(lm.weights()[[0, 1]], -1.0);
        assert_eq!(lm.stats().examples_seen, 1);
    }

    #[test]
    fn test_stats() {
        let lm = trained_three_class();
        let stats = lm.stats();
        assert_eq!(stats.x_length, 4);
        assert_eq!(stats.y_length, 3);
        assert_eq!(stats.examples_seen, 3);
        assert_eq!(stats.nonzero_cells, 12);
        assert_eq!(stats.weight_min, -1.0);
        assert_eq!(stats.weight_max, 1.0);

        let empty = Lernmatrix::new(2, 2).unwrap().stats();
        assert_eq!(empty.nonzero_cells, 0);
        assert_eq!(empty.weight_min, 0.0);
        assert_eq!(empty.weight_max, 0.0);
    }
}
