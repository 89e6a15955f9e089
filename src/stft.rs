//! Short-Time Fourier Transform driver.
//!
//! An [`Stft`] owns a kernel of fixed chunk size and walks a signal in
//! strides, reporting each transformed chunk through a callback. The
//! callback borrows the internal buffer, so callers copy what they want to
//! keep. [`Stft::stream`] retains the unconsumed tail between calls for
//! piecewise input; [`Stft::flush`] zero-pads and emits whatever remains.

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;

use log::trace;

use crate::fft::{FftError, FftImpl, FftPlanner};
use crate::num::{Complex, Float};

pub struct Stft<T: Float> {
    kernel: Rc<dyn FftImpl<T>>,
    window: Option<Vec<T>>,
    chunk: Vec<Complex<T>>,
    tail: Vec<T>,
}

impl<T: Float> Stft<T> {
    pub fn new(planner: &mut FftPlanner<T>, chunk_size: usize) -> Result<Self, FftError> {
        let kernel = planner.plan(chunk_size)?;
        Ok(Self {
            kernel,
            window: None,
            chunk: vec![Complex::zero(); chunk_size],
            tail: Vec::new(),
        })
    }

    /// Like [`Stft::new`], with a window applied to every chunk before the
    /// transform. The window length must equal the chunk size.
    pub fn windowed(
        planner: &mut FftPlanner<T>,
        chunk_size: usize,
        window: Vec<T>,
    ) -> Result<Self, FftError> {
        if window.len() != chunk_size {
            return Err(FftError::MismatchedLengths);
        }
        let mut stft = Self::new(planner, chunk_size)?;
        stft.window = Some(window);
        Ok(stft)
    }

    pub fn size(&self) -> usize {
        self.chunk.len()
    }

    /// Center frequency of bin `index` at the given sample rate.
    pub fn frequency(&self, index: usize, sample_rate: T) -> T {
        self.kernel.frequency(index, sample_rate)
    }

    /// Transform `input` chunk by chunk and report each spectrum. The final
    /// partial chunk, if any, is zero-padded; nothing is retained. A
    /// `chunk_stride` of 0 means non-overlapping chunks.
    pub fn run<F>(&mut self, input: &[T], chunk_stride: usize, mut report: F) -> Result<(), FftError>
    where
        F: FnMut(&[Complex<T>]),
    {
        self.tail.clear();
        self.stream(input, chunk_stride, &mut report)?;
        self.flush(report)
    }

    /// Transform every complete chunk of the retained tail plus `input`,
    /// keeping the remainder for the next call.
    pub fn stream<F>(
        &mut self,
        input: &[T],
        chunk_stride: usize,
        mut report: F,
    ) -> Result<(), FftError>
    where
        F: FnMut(&[Complex<T>]),
    {
        let size = self.size();
        let stride = if chunk_stride == 0 { size } else { chunk_stride };
        self.tail.extend_from_slice(input);
        let mut start = 0;
        while start + size <= self.tail.len() {
            Self::load_chunk(
                &mut self.chunk,
                self.window.as_deref(),
                &self.tail[start..start + size],
            );
            self.kernel.fft(&mut self.chunk)?;
            report(&self.chunk);
            start += stride;
        }
        trace!("stft: consumed {} samples, {} retained", start, self.tail.len().saturating_sub(start));
        let cut = start.min(self.tail.len());
        self.tail.drain(..cut);
        Ok(())
    }

    /// Zero-pad and emit the retained tail, if any.
    pub fn flush<F>(&mut self, mut report: F) -> Result<(), FftError>
    where
        F: FnMut(&[Complex<T>]),
    {
        if self.tail.is_empty() {
            return Ok(());
        }
        let size = self.size();
        let mut last = core::mem::take(&mut self.tail);
        last.resize(size, T::zero());
        Self::load_chunk(&mut self.chunk, self.window.as_deref(), &last);
        self.kernel.fft(&mut self.chunk)?;
        report(&self.chunk);
        Ok(())
    }

    fn load_chunk(chunk: &mut [Complex<T>], window: Option<&[T]>, samples: &[T]) {
        match window {
            Some(window) => {
                for ((slot, &x), &w) in chunk.iter_mut().zip(samples).zip(window) {
                    *slot = Complex::new(x * w, T::zero());
                }
            }
            None => {
                for (slot, &x) in chunk.iter_mut().zip(samples) {
                    *slot = Complex::new(x, T::zero());
                }
            }
        }
    }
}
