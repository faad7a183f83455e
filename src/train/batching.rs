use std::ops::Range;

/// Consecutive index ranges covering `0..n` in chunks of `batch_size`.
/// The final range is shorter when `n` is not a multiple of `batch_size`.
pub fn batch_ranges(n: usize, batch_size: usize) -> impl Iterator<Item = Range<usize>> {
    assert!(batch_size > 0, "batch_size must be at least 1");
    (0..n).step_by(batch_size).map(move |start| start..(start + batch_size).min(n))
}
