//! Helpers for complex buffers and half spectra.
//!
//! Real-input transforms produce Hermitian spectra; [`discard_conjugates`]
//! keeps the non-redundant first `N/2 + 1` bins and [`create_conjugates`]
//! rebuilds the full spectrum for either output parity. The Nyquist bin
//! exists only for even lengths, which is why `create_conjugates` accepts
//! exactly the two output lengths `2L-2` and `2L-1`.

use alloc::vec::Vec;

use crate::fft::FftError;
use crate::num::{Complex, Float};

/// Widen a real signal to a complex buffer.
pub fn from_reals<T: Float>(reals: &[T]) -> Vec<Complex<T>> {
    reals
        .iter()
        .map(|&x| Complex::new(x, T::zero()))
        .collect()
}

/// Widen a real signal to a complex buffer of exactly `len` elements,
/// truncating or zero-padding as needed.
pub fn from_reals_sized<T: Float>(reals: &[T], len: usize) -> Vec<Complex<T>> {
    let mut out = Vec::with_capacity(len);
    for &x in reals.iter().take(len) {
        out.push(Complex::new(x, T::zero()));
    }
    out.resize(len, Complex::zero());
    out
}

pub fn real_parts<T: Float>(buf: &[Complex<T>]) -> Vec<T> {
    buf.iter().map(|c| c.re).collect()
}

pub fn magnitudes<T: Float>(buf: &[Complex<T>]) -> Vec<T> {
    buf.iter().map(|c| c.mag()).collect()
}

pub fn squared_magnitudes<T: Float>(buf: &[Complex<T>]) -> Vec<T> {
    buf.iter().map(|c| c.sq_mag()).collect()
}

/// Pointwise complex product `a[i] *= b[i]`.
pub fn multiply_in_place<T: Float>(
    a: &mut [Complex<T>],
    b: &[Complex<T>],
) -> Result<(), FftError> {
    if a.len() != b.len() {
        return Err(FftError::MismatchedLengths);
    }
    for (x, &y) in a.iter_mut().zip(b.iter()) {
        *x = x.mul(y);
    }
    Ok(())
}

/// The non-redundant half of a Hermitian spectrum: a view of the first
/// `N/2 + 1` bins.
pub fn discard_conjugates<T: Float>(buf: &[Complex<T>]) -> &[Complex<T>] {
    if buf.is_empty() {
        buf
    } else {
        &buf[..buf.len() / 2 + 1]
    }
}

/// Rebuild a full Hermitian spectrum of `output_len` bins from its first
/// half of length L. `output_len` must be `2L-2` (even, the last bin of
/// `half` being Nyquist) or `2L-1` (odd).
pub fn create_conjugates<T: Float>(
    half: &[Complex<T>],
    output_len: usize,
) -> Result<Vec<Complex<T>>, FftError> {
    let l = half.len();
    if l == 0 || (output_len + 2 != 2 * l && output_len + 1 != 2 * l) {
        return Err(FftError::MismatchedLengths);
    }
    let mut out = Vec::with_capacity(output_len);
    out.extend_from_slice(half);
    out.truncate(output_len);
    for k in l..output_len {
        out.push(half[output_len - k].conj());
    }
    Ok(out)
}
