//! Kernel trait, twiddle tables and the size dispatcher.
//!
//! [`FftPlanner`] is the single entry point: given a size it picks the kernel
//! family (fixed, naive, radix-2, Rader, mixed-radix composite), constructs
//! it once and memoizes the instance, so repeated planning of the same size
//! is a map lookup. All per-transform scratch lives inside the kernels;
//! planning is the only place that allocates.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use log::debug;

use crate::composite::CompositeFft;
use crate::fft_kernels::{Fixed2Fft, Fixed3Fft, NaiveFft};
use crate::num::{Complex, Float};
use crate::primes;
use crate::primes::PrimeCache;
use crate::radix2::Radix2Fft;
use crate::rader::PrimeFft;

/// Largest constructible transform size.
pub const MAX_FFT_SIZE: u64 = 1 << 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// Size is zero or above [`MAX_FFT_SIZE`].
    InvalidSize(usize),
    /// A radix-2 kernel was requested for a non-power-of-two size.
    NonPowerOfTwo(usize),
    /// Buffer, window or spectrum length does not match what the operation
    /// requires.
    MismatchedLengths,
    /// A matrix file's declared sections do not exactly consume its bytes.
    CorruptFormat,
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::InvalidSize(n) => {
                write!(f, "transform size {} is out of range (1..={})", n, MAX_FFT_SIZE)
            }
            FftError::NonPowerOfTwo(n) => {
                write!(f, "radix-2 requires a power-of-two size, got {}", n)
            }
            FftError::MismatchedLengths => write!(f, "buffer length does not match transform"),
            FftError::CorruptFormat => write!(f, "matrix file sections do not match its length"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// The n-th roots of unity `W[k] = exp(-2*pi*i*k/n)` for `k = 0..n`.
///
/// Only the first half is computed trigonometrically; the second half is its
/// conjugate mirror. Kernels that want a half or quarter table index into
/// this one canonical shape.
pub fn twiddle_factors<T: Float>(n: usize) -> Vec<Complex<T>> {
    let mut w = vec![Complex::zero(); n];
    if n == 0 {
        return w;
    }
    for (k, slot) in w.iter_mut().enumerate().take(n / 2 + 1) {
        let angle = -(T::from_f64(2.0) * T::pi() * T::from_usize(k)) / T::from_usize(n);
        *slot = Complex::expi(angle);
    }
    for k in 1..(n + 1) / 2 {
        w[n - k] = w[k].conj();
    }
    w
}

/// Common surface of every transform kernel.
///
/// A kernel is immutable after construction and owns all tables and scratch
/// it needs, so `fft` allocates nothing. Scratch reuse also means a kernel
/// instance must not be shared across threads; the `Rc`-based planner cache
/// makes that structural.
pub trait FftImpl<T: Float>: fmt::Display {
    /// The transform size this kernel was built for.
    fn size(&self) -> usize;

    /// In-place forward DFT. `buf.len()` must equal [`FftImpl::size`].
    fn fft(&self, buf: &mut [Complex<T>]) -> Result<(), FftError>;

    /// In-place inverse DFT: forward transform, scale by 1/N, then swap
    /// elements `i` and `N-i` for `i` in `1..=N/2`.
    fn ifft(&self, buf: &mut [Complex<T>]) -> Result<(), FftError> {
        self.fft(buf)?;
        let n = self.size();
        let scale = T::one() / T::from_usize(n);
        for c in buf.iter_mut() {
            *c = c.scale(scale);
        }
        for i in 1..n / 2 + 1 {
            buf.swap(i, n - i);
        }
        Ok(())
    }

    /// Forward DFT of a real signal, returning the full length-N spectrum.
    fn real_fft(&self, input: &[T]) -> Result<Vec<Complex<T>>, FftError> {
        if input.len() != self.size() {
            return Err(FftError::MismatchedLengths);
        }
        let mut buf: Vec<Complex<T>> = input
            .iter()
            .map(|&x| Complex::new(x, T::zero()))
            .collect();
        self.fft(&mut buf)?;
        Ok(buf)
    }

    /// Inverse DFT of a spectrum whose time signal is known to be real.
    ///
    /// Runs the forward transform on `buf` (mutating it) and reads the real
    /// sequence out of the reversal symmetry; pass a copy if the spectrum is
    /// needed afterwards.
    fn real_ifft(&self, buf: &mut [Complex<T>]) -> Result<Vec<T>, FftError> {
        let n = self.size();
        if buf.len() != n {
            return Err(FftError::MismatchedLengths);
        }
        self.fft(buf)?;
        let scale = T::one() / T::from_usize(n);
        let mut out = Vec::with_capacity(n);
        out.push(buf[0].re * scale);
        for i in 1..n {
            out.push(buf[n - i].re * scale);
        }
        Ok(out)
    }

    /// Center frequency of bin `index` given the sample rate.
    fn frequency(&self, index: usize, sample_rate: T) -> T {
        T::from_usize(index) * sample_rate / T::from_usize(self.size())
    }

    /// Fractional bin index of `freq` given the sample rate.
    fn index_of_frequency(&self, freq: T, sample_rate: T) -> T {
        freq * T::from_usize(self.size()) / sample_rate
    }
}

/// Forced kernel families, the second key of the planner's memo table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum KernelChoice {
    /// Size-directed selection.
    Auto,
    /// The O(N^2) kernel regardless of size; the differential reference.
    Naive,
}

/// Kernel factory and cache.
///
/// Owns the twiddle cache, the kernel memo table and the prime list all
/// kernel constructors draw from. Everything grows monotonically and is
/// never evicted.
pub struct FftPlanner<T: Float> {
    twiddles: BTreeMap<usize, Rc<Vec<Complex<T>>>>,
    kernels: BTreeMap<(usize, KernelChoice), Rc<dyn FftImpl<T>>>,
    pub(crate) primes: PrimeCache,
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            twiddles: BTreeMap::new(),
            kernels: BTreeMap::new(),
            primes: PrimeCache::new(),
        }
    }

    /// The shared size-`n` twiddle table, built on first request.
    pub fn get_twiddles(&mut self, n: usize) -> Rc<Vec<Complex<T>>> {
        self.twiddles
            .entry(n)
            .or_insert_with(|| Rc::new(twiddle_factors(n)))
            .clone()
    }

    /// Plan a transform of size `n`, reusing a previously built kernel when
    /// one exists.
    pub fn plan(&mut self, n: usize) -> Result<Rc<dyn FftImpl<T>>, FftError> {
        self.plan_with(n, KernelChoice::Auto)
    }

    /// Plan with an explicit kernel family.
    pub fn plan_with(
        &mut self,
        n: usize,
        choice: KernelChoice,
    ) -> Result<Rc<dyn FftImpl<T>>, FftError> {
        if n == 0 || n as u64 > MAX_FFT_SIZE {
            return Err(FftError::InvalidSize(n));
        }
        if let Some(kernel) = self.kernels.get(&(n, choice)) {
            return Ok(kernel.clone());
        }
        let kernel: Rc<dyn FftImpl<T>> = match choice {
            KernelChoice::Naive => Rc::new(NaiveFft::new(n)),
            KernelChoice::Auto => self.select(n)?,
        };
        debug!("planner: size {} -> {}", n, kernel);
        self.kernels.insert((n, choice), kernel.clone());
        Ok(kernel)
    }

    fn select(&mut self, n: usize) -> Result<Rc<dyn FftImpl<T>>, FftError> {
        Ok(match n {
            2 => Rc::new(Fixed2Fft),
            3 => Rc::new(Fixed3Fft),
            _ if n < 16 => Rc::new(NaiveFft::new(n)),
            _ if primes::is_power_of_two(n) => Rc::new(Radix2Fft::new(n)?),
            _ if n < 24 => Rc::new(NaiveFft::new(n)),
            _ if primes::is_prime(n as u64) => Rc::new(PrimeFft::new(n, self)?),
            _ => Rc::new(CompositeFft::new(n, self)?),
        })
    }
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}
