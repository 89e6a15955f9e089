//! Rader's algorithm: the DFT of an odd prime size N as a cyclic
//! convolution of length N-1.
//!
//! A primitive root g of N turns the nonzero input indices into the orbit
//! g^q and the nonzero output indices into g^-q, under which the DFT sum
//! becomes a convolution against the fixed sequence exp(-2*pi*i*g^-q/N).
//! That sequence is transformed once at construction; each call then costs
//! two internal FFTs, a pointwise multiply and the two permutations.
//!
//! The internal FFT size is either N-1 (when N-1 is smooth enough for the
//! mixed-radix kernels) or the next power of two at or above 2(N-1), which
//! converts the cyclic convolution into a zero-padded linear one that a
//! radix-2 kernel handles; the output step folds indices congruent mod N-1
//! to undo the padding.

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::fft::{FftError, FftImpl, FftPlanner};
use crate::fft_kernels::{OuterTwiddles, StridedFft};
use crate::num::{Complex, Float};
use crate::primes;

pub struct PrimeFft<T: Float> {
    size: usize,
    padded: bool,
    /// Internal convolution FFT size.
    pn: usize,
    /// q -> g^q mod N, the input gather order.
    perm_fwd: Vec<usize>,
    /// q -> g^-q mod N, the output scatter order.
    perm_inv: Vec<usize>,
    /// Forward FFT of the Rader kernel sequence, length `pn`.
    kernel_fft: Vec<Complex<T>>,
    inner: Rc<dyn FftImpl<T>>,
    conv: RefCell<Vec<Complex<T>>>,
    input: RefCell<Vec<Complex<T>>>,
}

impl<T: Float> PrimeFft<T> {
    /// Build with the padding mode chosen by
    /// [`primes::prime_padding_heuristic`].
    pub fn new(size: usize, planner: &mut FftPlanner<T>) -> Result<Self, FftError> {
        if size <= 2 {
            return Err(FftError::InvalidSize(size));
        }
        let padded = primes::prime_padding_heuristic(size as u64);
        Self::with_padding(size, padded, planner)
    }

    /// Build with an explicit padding mode.
    pub fn with_padding(
        size: usize,
        padded: bool,
        planner: &mut FftPlanner<T>,
    ) -> Result<Self, FftError> {
        if size <= 2 || !primes::is_prime(size as u64) {
            return Err(FftError::InvalidSize(size));
        }
        let n = size as u64;
        let len = size - 1;
        let pn = if padded {
            primes::next_power_of_two(2 * len)
        } else {
            len
        };
        let inner = planner.plan(pn)?;
        let g = primes::primitive_root_of_prime(n);

        let mut kernel_fft = vec![Complex::zero(); pn];
        let mut power = 1u64;
        for slot in kernel_fft.iter_mut().take(len) {
            let j = primes::multiplicative_inverse_of_prime(power, n);
            let angle =
                -(T::from_f64(2.0) * T::pi() * T::from_usize(j as usize)) / T::from_usize(size);
            *slot = Complex::expi(angle);
            power = power * g % n;
        }
        inner.fft(&mut kernel_fft)?;

        let mut perm_fwd = Vec::with_capacity(len);
        let mut power = 1u64;
        for _ in 0..len {
            perm_fwd.push(power as usize);
            power = power * g % n;
        }
        let g_inv = primes::multiplicative_inverse_of_prime(g, n);
        let mut perm_inv = Vec::with_capacity(len);
        let mut power = 1u64;
        for _ in 0..len {
            perm_inv.push(power as usize);
            power = power * g_inv % n;
        }

        Ok(Self {
            size,
            padded,
            pn,
            perm_fwd,
            perm_inv,
            kernel_fft,
            inner,
            conv: RefCell::new(vec![Complex::zero(); pn]),
            input: RefCell::new(vec![Complex::zero(); size]),
        })
    }

    /// Whether the internal convolution runs zero-padded at a power of two.
    pub fn padded(&self) -> bool {
        self.padded
    }
}

impl<T: Float> StridedFft<T> for PrimeFft<T> {
    fn fft_strided(
        &self,
        src: &[Complex<T>],
        dst: &mut [Complex<T>],
        base: usize,
        stride: usize,
        twiddles: Option<OuterTwiddles<'_, T>>,
    ) -> Result<(), FftError> {
        let len = self.size - 1;
        let pn = self.pn;
        let mut conv = self.conv.borrow_mut();

        // Index 0 carries outer twiddle W[0] = 1, so x0 needs no scaling.
        let x0 = src[base];
        let mut sum = Complex::zero();
        for (q, &i) in self.perm_fwd.iter().enumerate() {
            let mut x = src[base + i * stride];
            if let Some(tw) = &twiddles {
                x = x.mul(tw.table[(i * tw.stride) % tw.table.len()]);
            }
            conv[q] = x;
            sum = sum.add(x);
        }
        for slot in conv[len..].iter_mut() {
            *slot = Complex::zero();
        }

        self.inner.fft(&mut conv[..])?;
        for (c, &k) in conv.iter_mut().zip(self.kernel_fft.iter()) {
            *c = c.mul(k);
        }
        self.inner.ifft(&mut conv[..])?;

        dst[base] = x0.add(sum);
        for (q, &i) in self.perm_inv.iter().enumerate() {
            let mut acc = x0;
            let mut j = q;
            while j < pn {
                acc = acc.add(conv[j]);
                j += len;
            }
            dst[base + i * stride] = acc;
        }
        Ok(())
    }
}

impl<T: Float> FftImpl<T> for PrimeFft<T> {
    fn size(&self) -> usize {
        self.size
    }

    fn fft(&self, buf: &mut [Complex<T>]) -> Result<(), FftError> {
        if buf.len() != self.size {
            return Err(FftError::MismatchedLengths);
        }
        let mut input = self.input.borrow_mut();
        input.copy_from_slice(buf);
        self.fft_strided(&input, buf, 0, 1, None)
    }
}

impl<T: Float> fmt::Display for PrimeFft<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrimeFFT({}, {})", self.size, self.padded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft_kernels::NaiveFft;
    use crate::num::Complex64;
    use alloc::vec::Vec;

    fn wave(n: usize) -> Vec<Complex64> {
        (0..n)
            .map(|i| {
                Complex64::new(
                    Float::sin(i as f64 * 0.71) * 4.0,
                    Float::cos(i as f64 * 1.13) * 2.0,
                )
            })
            .collect()
    }

    #[test]
    fn rejects_non_primes_and_tiny_sizes() {
        let mut planner = FftPlanner::<f64>::new();
        assert!(PrimeFft::with_padding(9, false, &mut planner).is_err());
        assert!(PrimeFft::with_padding(2, false, &mut planner).is_err());
        assert!(PrimeFft::with_padding(0, true, &mut planner).is_err());
    }

    #[test]
    fn heuristic_selects_internal_size() {
        let mut planner = FftPlanner::<f64>::new();
        // 11 - 1 = 2 * 5 stays cyclic; 23 - 1 = 2 * 11 pads to 64.
        let smooth = PrimeFft::<f64>::new(11, &mut planner).unwrap();
        assert!(!smooth.padded());
        assert_eq!(smooth.pn, 10);
        let rough = PrimeFft::<f64>::new(23, &mut planner).unwrap();
        assert!(rough.padded());
        assert_eq!(rough.pn, 64);
    }

    #[test]
    fn both_modes_agree_with_naive() {
        let mut planner = FftPlanner::<f64>::new();
        for &n in &[3usize, 5, 7, 11, 13, 17, 23, 29, 31, 61, 101] {
            for &padded in &[false, true] {
                let prime = PrimeFft::with_padding(n, padded, &mut planner).unwrap();
                let naive = NaiveFft::<f64>::new(n);
                let mut a = wave(n);
                let mut b = wave(n);
                prime.fft(&mut a).unwrap();
                naive.fft(&mut b).unwrap();
                for (x, y) in a.iter().zip(b.iter()) {
                    assert!((x.re - y.re).abs() < 1e-8, "n = {} padded = {}", n, padded);
                    assert!((x.im - y.im).abs() < 1e-8, "n = {} padded = {}", n, padded);
                }
            }
        }
    }
}
