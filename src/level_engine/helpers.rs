//! Small numeric helpers shared by the generator and the skill model.
//!
//! Both sides need the same information-theoretic attempt floor, the same
//! incremental mean and the same bounded trailing buffers. Keeping them here
//! guarantees the accuracy score and the level validator agree on what
//! "optimal" means.

/// `ceil(log2(range_size))`: guesses a binary search needs in the worst case.
///
/// Computed on integers so exact powers of two never round up by accident.
pub fn optimal_attempts(range_size: u64) -> u32 {
    if range_size <= 1 {
        0
    } else {
        u64::BITS - (range_size - 1).leading_zeros()
    }
}

/// Incremental mean after the `n`-th sample: `(old × (n − 1) + x) / n`.
pub fn running_mean(old: f64, n: u32, x: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (old * (n - 1) as f64 + x) / n as f64
}

/// Append `value`, dropping the oldest entries beyond `cap`.
pub fn push_capped<T>(buf: &mut Vec<T>, value: T, cap: usize) {
    buf.push(value);
    if buf.len() > cap {
        let excess = buf.len() - cap;
        buf.drain(..excess);
    }
}

/// Clamp to `[lo, hi]`, substituting `fallback` for NaN.
pub fn clamp_or(value: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(lo, hi)
    }
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
