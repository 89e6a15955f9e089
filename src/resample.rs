//! Frequency-domain resampling of real signals.
//!
//! Transform, truncate or zero-pad the non-redundant half of the spectrum
//! to the target length, rebuild the conjugate half, inverse-transform and
//! rescale by the length ratio. Band-limited signals survive a round trip
//! exactly; anything above the new Nyquist is simply cut.

use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use crate::fft::{FftError, FftPlanner};
use crate::num::{Complex, Float};
use crate::spectrum;

/// Resample `input` to exactly `output_len` samples.
pub fn resample<T: Float>(
    planner: &mut FftPlanner<T>,
    input: &[T],
    output_len: usize,
) -> Result<Vec<T>, FftError> {
    debug!(
        "resample: input_len={}, output_len={}",
        input.len(),
        output_len
    );
    if output_len == 0 {
        return Ok(Vec::new());
    }
    if input.is_empty() {
        return Ok(vec![T::zero(); output_len]);
    }
    if output_len == input.len() {
        return Ok(input.to_vec());
    }

    let kernel = planner.plan(input.len())?;
    let full = kernel.real_fft(input)?;
    let half = spectrum::discard_conjugates(&full);

    let half_out = output_len / 2 + 1;
    let mut kept: Vec<Complex<T>> = Vec::with_capacity(half_out);
    kept.extend_from_slice(&half[..half.len().min(half_out)]);
    kept.resize(half_out, Complex::zero());

    let mut rebuilt = spectrum::create_conjugates(&kept, output_len)?;
    let out_kernel = planner.plan(output_len)?;
    let mut out = out_kernel.real_ifft(&mut rebuilt)?;
    let ratio = T::from_usize(output_len) / T::from_usize(input.len());
    for v in out.iter_mut() {
        *v = *v * ratio;
    }
    Ok(out)
}

/// Resample from `src_rate` to `dst_rate`, deriving the output length from
/// the rate ratio. Non-positive or non-finite rates yield an empty result.
pub fn resample_rate<T: Float>(
    planner: &mut FftPlanner<T>,
    input: &[T],
    src_rate: f64,
    dst_rate: f64,
) -> Result<Vec<T>, FftError> {
    if !src_rate.is_finite() || !dst_rate.is_finite() || src_rate <= 0.0 || dst_rate <= 0.0 {
        debug!("resample_rate: degenerate rates {} -> {}", src_rate, dst_rate);
        return Ok(Vec::new());
    }
    let output_len = libm::round(input.len() as f64 * dst_rate / src_rate) as usize;
    resample(planner, input, output_len)
}
