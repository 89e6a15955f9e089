//! Window functions applied to a signal before a transform.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::FftError;
use crate::num::{Complex, Float};

fn sampled<T: Float>(len: usize, f: impl Fn(T) -> T) -> Vec<T> {
    if len < 2 {
        return vec![T::one(); len];
    }
    let denom = T::from_usize(len - 1);
    (0..len)
        .map(|i| f(T::from_usize(i) / denom))
        .collect()
}

/// Hanning window `0.5 * (1 - cos(2*pi*i/(N-1)))`.
pub fn hanning<T: Float>(len: usize) -> Vec<T> {
    let two_pi = T::from_f64(2.0) * T::pi();
    sampled(len, |x| {
        T::from_f64(0.5) * (T::one() - (two_pi * x).cos())
    })
}

/// Hamming window `0.54 - 0.46 * cos(2*pi*i/(N-1))`.
pub fn hamming<T: Float>(len: usize) -> Vec<T> {
    let two_pi = T::from_f64(2.0) * T::pi();
    sampled(len, |x| {
        T::from_f64(0.54) - T::from_f64(0.46) * (two_pi * x).cos()
    })
}

/// Bartlett (triangular) window `1 - |2*i/(N-1) - 1|`.
pub fn bartlett<T: Float>(len: usize) -> Vec<T> {
    sampled(len, |x| {
        T::one() - (T::from_f64(2.0) * x - T::one()).abs()
    })
}

/// Blackman window `0.42 - 0.5*cos(2*pi*i/(N-1)) + 0.08*cos(4*pi*i/(N-1))`.
pub fn blackman<T: Float>(len: usize) -> Vec<T> {
    let two_pi = T::from_f64(2.0) * T::pi();
    let four_pi = T::from_f64(4.0) * T::pi();
    sampled(len, |x| {
        T::from_f64(0.42) - T::from_f64(0.5) * (two_pi * x).cos()
            + T::from_f64(0.08) * (four_pi * x).cos()
    })
}

/// Scale a complex buffer elementwise by a window of the same length.
pub fn apply<T: Float>(window: &[T], buf: &mut [Complex<T>]) -> Result<(), FftError> {
    if window.len() != buf.len() {
        return Err(FftError::MismatchedLengths);
    }
    for (c, &w) in buf.iter_mut().zip(window.iter()) {
        *c = c.scale(w);
    }
    Ok(())
}

/// Scale a real buffer elementwise by a window of the same length.
pub fn apply_real<T: Float>(window: &[T], buf: &mut [T]) -> Result<(), FftError> {
    if window.len() != buf.len() {
        return Err(FftError::MismatchedLengths);
    }
    for (x, &w) in buf.iter_mut().zip(window.iter()) {
        *x = *x * w;
    }
    Ok(())
}
