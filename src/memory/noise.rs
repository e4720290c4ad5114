//! Random bit-flip noise for binary patterns
//!
//! Used by the auto-associative training pass and by robustness probes that
//! measure recall accuracy under corrupted queries.

use rand::Rng;

/// Flip `n_flips` randomly chosen positions of a binary pattern.
///
/// Positions are drawn independently, so the same index can be picked more
/// than once and an even number of hits cancels out. The realized Hamming
/// distance is therefore at most `n_flips`. The input is left untouched.
pub fn flip_random_bits(pattern: &[f64], n_flips: usize) -> Vec<f64> {
    let mut flipped = pattern.to_vec();
    if flipped.is_empty() {
        return flipped;
    }

    let mut rng = rand::thread_rng();
    for _ in 0..n_flips {
        let idx = rng.gen_range(0..flipped.len());
        flipped[idx] = 1.0 - flipped[idx];
    }

    flipped
}
