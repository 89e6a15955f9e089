//! Base-case kernels: hand-unrolled size-2 and size-3 butterflies and the
//! O(N^2) direct DFT.
//!
//! Besides the public [`FftImpl`] surface these implement the crate-internal
//! strided contract the composite kernel drives: transform the `size`
//! elements found at `base + k*stride` of one buffer into the same positions
//! of another, optionally pre-multiplying input `k` by the outer twiddle
//! `W[(k*ws) mod |W|]` of a caller-supplied table.

use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::fft::{twiddle_factors, FftError, FftImpl};
use crate::num::{Complex, Float};

/// Outer twiddle vector for a strided sub-transform: input `k` is scaled by
/// `table[(k * stride) % table.len()]` before summation.
pub(crate) struct OuterTwiddles<'a, T: Float> {
    pub table: &'a [Complex<T>],
    pub stride: usize,
}

/// Strided entry point shared by the kernels a composite plan dispatches to.
/// Source and destination must be distinct buffers.
pub(crate) trait StridedFft<T: Float> {
    fn fft_strided(
        &self,
        src: &[Complex<T>],
        dst: &mut [Complex<T>],
        base: usize,
        stride: usize,
        twiddles: Option<OuterTwiddles<'_, T>>,
    ) -> Result<(), FftError>;
}

/// Unrolled 2-point DFT.
#[derive(Clone, Copy)]
pub struct Fixed2Fft;

impl<T: Float> StridedFft<T> for Fixed2Fft {
    fn fft_strided(
        &self,
        src: &[Complex<T>],
        dst: &mut [Complex<T>],
        base: usize,
        stride: usize,
        twiddles: Option<OuterTwiddles<'_, T>>,
    ) -> Result<(), FftError> {
        let x0 = src[base];
        let mut x1 = src[base + stride];
        if let Some(tw) = twiddles {
            x1 = x1.mul(tw.table[tw.stride % tw.table.len()]);
        }
        dst[base] = x0.add(x1);
        dst[base + stride] = x0.sub(x1);
        Ok(())
    }
}

impl<T: Float> FftImpl<T> for Fixed2Fft {
    fn size(&self) -> usize {
        2
    }
    fn fft(&self, buf: &mut [Complex<T>]) -> Result<(), FftError> {
        if buf.len() != 2 {
            return Err(FftError::MismatchedLengths);
        }
        let a = buf[0];
        let b = buf[1];
        buf[0] = a.add(b);
        buf[1] = a.sub(b);
        Ok(())
    }
}

impl fmt::Display for Fixed2Fft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed2FFT()")
    }
}

/// cos(2*pi/3) and sin(2*pi/3).
const COS_2PI_3: f64 = -0.5;
const SIN_2PI_3: f64 = 0.866_025_403_784_438_6;

/// Unrolled 3-point DFT.
#[derive(Clone, Copy)]
pub struct Fixed3Fft;

impl Fixed3Fft {
    fn kernel<T: Float>(x0: Complex<T>, x1: Complex<T>, x2: Complex<T>) -> [Complex<T>; 3] {
        let tx = T::from_f64(COS_2PI_3);
        let ty = T::from_f64(SIN_2PI_3);
        let x12 = x1.add(x2);
        let dz = x1.sub(x2);
        let mid = x0.add(x12.scale(tx));
        // i * ty * dz
        let v = Complex::new(-ty * dz.im, ty * dz.re);
        [x0.add(x12), mid.sub(v), mid.add(v)]
    }
}

impl<T: Float> StridedFft<T> for Fixed3Fft {
    fn fft_strided(
        &self,
        src: &[Complex<T>],
        dst: &mut [Complex<T>],
        base: usize,
        stride: usize,
        twiddles: Option<OuterTwiddles<'_, T>>,
    ) -> Result<(), FftError> {
        let x0 = src[base];
        let mut x1 = src[base + stride];
        let mut x2 = src[base + 2 * stride];
        if let Some(tw) = twiddles {
            let m = tw.table.len();
            x1 = x1.mul(tw.table[tw.stride % m]);
            x2 = x2.mul(tw.table[(2 * tw.stride) % m]);
        }
        let [y0, y1, y2] = Self::kernel(x0, x1, x2);
        dst[base] = y0;
        dst[base + stride] = y1;
        dst[base + 2 * stride] = y2;
        Ok(())
    }
}

impl<T: Float> FftImpl<T> for Fixed3Fft {
    fn size(&self) -> usize {
        3
    }
    fn fft(&self, buf: &mut [Complex<T>]) -> Result<(), FftError> {
        if buf.len() != 3 {
            return Err(FftError::MismatchedLengths);
        }
        let [y0, y1, y2] = Self::kernel(buf[0], buf[1], buf[2]);
        buf[0] = y0;
        buf[1] = y1;
        buf[2] = y2;
        Ok(())
    }
}

impl fmt::Display for Fixed3Fft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed3FFT()")
    }
}

/// Direct O(N^2) DFT over an internal size-N twiddle table.
///
/// The base case for small sizes and the reference every other kernel is
/// tested against.
pub struct NaiveFft<T: Float> {
    size: usize,
    twiddles: Vec<Complex<T>>,
    scratch: RefCell<Vec<Complex<T>>>,
}

impl<T: Float> NaiveFft<T> {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            twiddles: twiddle_factors(size),
            scratch: RefCell::new(vec![Complex::zero(); size]),
        }
    }
}

impl<T: Float> StridedFft<T> for NaiveFft<T> {
    fn fft_strided(
        &self,
        src: &[Complex<T>],
        dst: &mut [Complex<T>],
        base: usize,
        stride: usize,
        twiddles: Option<OuterTwiddles<'_, T>>,
    ) -> Result<(), FftError> {
        let n = self.size;
        let mut gathered = self.scratch.borrow_mut();
        for k in 0..n {
            let mut x = src[base + k * stride];
            if let Some(tw) = &twiddles {
                x = x.mul(tw.table[(k * tw.stride) % tw.table.len()]);
            }
            gathered[k] = x;
        }
        for j in 0..n {
            let mut acc = Complex::zero();
            for (k, &x) in gathered.iter().enumerate() {
                acc = acc.add(x.mul(self.twiddles[j * k % n]));
            }
            dst[base + j * stride] = acc;
        }
        Ok(())
    }
}

impl<T: Float> FftImpl<T> for NaiveFft<T> {
    fn size(&self) -> usize {
        self.size
    }
    fn fft(&self, buf: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = self.size;
        if buf.len() != n {
            return Err(FftError::MismatchedLengths);
        }
        let mut input = self.scratch.borrow_mut();
        input.copy_from_slice(buf);
        for (j, out) in buf.iter_mut().enumerate() {
            let mut acc = Complex::zero();
            for (k, &x) in input.iter().enumerate() {
                acc = acc.add(x.mul(self.twiddles[j * k % n]));
            }
            *out = acc;
        }
        Ok(())
    }
}

impl<T: Float> fmt::Display for NaiveFft<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NaiveFFT({})", self.size)
    }
}
