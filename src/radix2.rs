//! Iterative in-place radix-2 Cooley-Tukey for power-of-two sizes.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::fft::{FftError, FftImpl};
use crate::num::{Complex, Float};
use crate::primes;

/// Reverse the low `bits` bits of `x` with masked shift-swaps over the
/// 1/2/4/8/16/32-bit lanes, then shift the mirrored word back down.
fn reverse_low_bits(x: usize, bits: u32) -> usize {
    let mut v = x as u64;
    v = ((v >> 1) & 0x5555_5555_5555_5555) | ((v & 0x5555_5555_5555_5555) << 1);
    v = ((v >> 2) & 0x3333_3333_3333_3333) | ((v & 0x3333_3333_3333_3333) << 2);
    v = ((v >> 4) & 0x0F0F_0F0F_0F0F_0F0F) | ((v & 0x0F0F_0F0F_0F0F_0F0F) << 4);
    v = ((v >> 8) & 0x00FF_00FF_00FF_00FF) | ((v & 0x00FF_00FF_00FF_00FF) << 8);
    v = ((v >> 16) & 0x0000_FFFF_0000_FFFF) | ((v & 0x0000_FFFF_0000_FFFF) << 16);
    v = (v >> 32) | (v << 32);
    (v >> (64 - bits)) as usize
}

/// Half table `W[k] = exp(-2*pi*i*k/n)` for `k = 0..n/2`, built from the
/// eight-fold symmetry of the unit circle: only the first eighth goes
/// through sin/cos, the rest is coordinate swaps and sign flips.
fn half_twiddles<T: Float>(n: usize) -> Vec<Complex<T>> {
    #[cfg(feature = "precomputed-twiddles")]
    {
        if let Some(raw) = crate::precomputed::lookup_half_twiddles(n) {
            return raw
                .iter()
                .map(|&(re, im)| Complex::new(T::from_f64(re), T::from_f64(im)))
                .collect();
        }
    }
    let half = n / 2;
    let quarter = half / 2;
    let eighth = quarter / 2;
    let mut w = vec![Complex::zero(); half];
    for (k, slot) in w.iter_mut().enumerate().take(eighth + 1) {
        let angle = -(T::from_f64(2.0) * T::pi() * T::from_usize(k)) / T::from_usize(n);
        *slot = Complex::expi(angle);
    }
    for k in eighth + 1..quarter + 1 {
        let src = w[quarter - k];
        w[k] = Complex::new(-src.im, -src.re);
    }
    for k in quarter + 1..half {
        let src = w[half - k];
        w[k] = Complex::new(-src.re, src.im);
    }
    w
}

/// In-place Cooley-Tukey for `n = 2^b`: bit-reversal permutation followed by
/// `b` butterfly stages over a precomputed half table.
pub struct Radix2Fft<T: Float> {
    size: usize,
    bits: u32,
    twiddles: Vec<Complex<T>>,
}

impl<T: Float> Radix2Fft<T> {
    pub fn new(size: usize) -> Result<Self, FftError> {
        if size == 0 {
            return Err(FftError::InvalidSize(size));
        }
        if !primes::is_power_of_two(size) {
            return Err(FftError::NonPowerOfTwo(size));
        }
        Ok(Self {
            size,
            bits: primes::highest_bit(size),
            twiddles: half_twiddles(size),
        })
    }
}

impl<T: Float> FftImpl<T> for Radix2Fft<T> {
    fn size(&self) -> usize {
        self.size
    }

    fn fft(&self, buf: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = self.size;
        if buf.len() != n {
            return Err(FftError::MismatchedLengths);
        }
        if n == 1 {
            return Ok(());
        }
        for i in 0..n {
            let j = reverse_low_bits(i, self.bits);
            if j > i {
                buf.swap(i, j);
            }
        }
        for s in 0..self.bits {
            let m = 1usize << s;
            let twiddle_step = (n / 2) >> s;
            let mut block = 0;
            while block < n {
                let mut t = 0;
                for j in block..block + m {
                    let u = buf[j];
                    let v = buf[j + m].mul(self.twiddles[t]);
                    buf[j] = u.add(v);
                    buf[j + m] = u.sub(v);
                    t += twiddle_step;
                }
                block += 2 * m;
            }
        }
        Ok(())
    }
}

impl<T: Float> fmt::Display for Radix2Fft<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Radix2FFT({})", self.size)
    }
}
