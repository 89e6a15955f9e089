//! # omnifft - FFTs of any size
//!
//! A DFT library that handles **every positive transform length**, not just
//! powers of two. The planner factors a size into a composition of
//! specialized kernels and memoizes the result, so the construction cost is
//! paid once and transforms themselves never allocate.
//!
//! ## Kernels
//!
//! | Size | Kernel |
//! |------|--------|
//! | 2, 3 | hand-unrolled butterflies |
//! | small | direct O(N^2) DFT |
//! | 2^k | iterative radix-2 Cooley-Tukey |
//! | odd prime | Rader's algorithm over an internal convolution FFT |
//! | composite | mixed-radix Cooley-Tukey over ping-pong buffers |
//!
//! ## Example
//!
//! ```
//! use omnifft::{Complex64, FftPlanner};
//!
//! let mut planner = FftPlanner::<f64>::new();
//! let fft = planner.plan(6).unwrap();
//! let mut buf = vec![Complex64::new(1.0, 0.0); 6];
//! fft.fft(&mut buf).unwrap();
//! assert!((buf[0].re - 6.0).abs() < 1e-9);
//! fft.ifft(&mut buf).unwrap();
//! assert!((buf[0].re - 1.0).abs() < 1e-9);
//! ```
//!
//! Around the core sit the usual companions: real-input helpers and
//! spectrum utilities, window functions, a streaming STFT, FFT-based
//! convolution and a frequency-domain resampler.
//!
//! ## Cargo features
//!
//! - `std` (default): `std::error::Error` for [`FftError`].
//! - `precomputed-twiddles`: bake radix-2 twiddle tables for sizes up to
//!   1024 into the binary instead of computing them at plan time.
//!
//! The crate is `no_std` + `alloc` throughout; float math goes through
//! `libm`.
//!
//! ## Thread safety
//!
//! Kernels own reusable scratch buffers and are shared by `Rc` from the
//! planner cache: a planner and the kernels it hands out belong to one
//! thread. Build one planner per thread if you need parallel callers.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Transform kernel trait, twiddle tables, errors and the size dispatcher.
pub mod fft;

/// Scalar and complex number primitives.
pub mod num;

/// Primality, factorization and modular arithmetic behind kernel selection.
pub mod primes;

/// Hand-unrolled size-2/3 butterflies and the O(N^2) reference kernel.
pub mod fft_kernels;

/// Iterative radix-2 Cooley-Tukey for power-of-two sizes.
pub mod radix2;

/// Mixed-radix Cooley-Tukey for composite sizes.
pub mod composite;

/// Rader's algorithm for prime sizes.
pub mod rader;

/// Complex-buffer and half-spectrum helpers.
pub mod spectrum;

/// Window functions (Hanning, Hamming, Bartlett, Blackman).
pub mod window;

/// Streaming Short-Time Fourier Transform.
pub mod stft;

/// FFT-based circular and linear convolution.
pub mod conv;

/// Frequency-domain resampling.
pub mod resample;

/// Parser for the matrix fixture format used by the conformance tests.
pub mod matfile;

#[cfg(feature = "precomputed-twiddles")]
mod precomputed {
    include!(concat!(env!("OUT_DIR"), "/precomputed_twiddles.rs"));
}

pub use fft::{twiddle_factors, FftError, FftImpl, FftPlanner, KernelChoice, MAX_FFT_SIZE};
pub use num::{Complex, Complex32, Complex64, Float};
