//! FFT-based convolution of real signals.

use alloc::vec::Vec;

use crate::fft::{FftError, FftPlanner};
use crate::num::Float;
use crate::spectrum;

/// Circular convolution of `a` and `b` at period `length` (0 means the
/// longer input's length): both signals are truncated or zero-padded to the
/// period, transformed, multiplied pointwise and inverse-transformed.
pub fn circular_convolution<T: Float>(
    planner: &mut FftPlanner<T>,
    a: &[T],
    b: &[T],
    length: usize,
) -> Result<Vec<T>, FftError> {
    let n = if length == 0 {
        a.len().max(b.len())
    } else {
        length
    };
    if n == 0 {
        return Ok(Vec::new());
    }
    let kernel = planner.plan(n)?;
    let mut fa = spectrum::from_reals_sized(a, n);
    let mut fb = spectrum::from_reals_sized(b, n);
    kernel.fft(&mut fa)?;
    kernel.fft(&mut fb)?;
    spectrum::multiply_in_place(&mut fa, &fb)?;
    kernel.real_ifft(&mut fa)
}

/// Linear convolution: circular at period `2 * max(|a|, |b|)` (long enough
/// that nothing wraps), truncated to the `|a| + |b| - 1` meaningful samples.
pub fn linear_convolution<T: Float>(
    planner: &mut FftPlanner<T>,
    a: &[T],
    b: &[T],
) -> Result<Vec<T>, FftError> {
    if a.is_empty() || b.is_empty() {
        return Ok(Vec::new());
    }
    let period = 2 * a.len().max(b.len());
    let mut out = circular_convolution(planner, a, b, period)?;
    out.truncate(a.len() + b.len() - 1);
    Ok(out)
}
