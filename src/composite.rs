//! Mixed-radix Cooley-Tukey for arbitrary composite sizes.
//!
//! Construction factors N into primes and flattens the recursive
//! decimation into a permutation table plus one list of strided sub-FFT
//! jobs per factor. Execution scatters the input through the permutation
//! into one of two ping-pong buffers, runs the job lists deepest factor
//! first (each stage reading the buffer the stage below wrote), and copies
//! the final buffer back out. Nothing allocates per call.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::fft::{FftError, FftImpl, FftPlanner, MAX_FFT_SIZE};
use crate::fft_kernels::{Fixed2Fft, Fixed3Fft, NaiveFft, OuterTwiddles, StridedFft};
use crate::num::{Complex, Float};
use crate::rader::PrimeFft;

/// Prime factors below this run through the naive kernel; at or above it
/// Rader's algorithm takes over.
const RADER_FROM: u64 = 11;

#[derive(Clone)]
enum SubFft<T: Float> {
    Fixed2(Fixed2Fft),
    Fixed3(Fixed3Fft),
    Naive(Rc<NaiveFft<T>>),
    Prime(Rc<PrimeFft<T>>),
}

impl<T: Float> SubFft<T> {
    fn fft_strided(
        &self,
        src: &[Complex<T>],
        dst: &mut [Complex<T>],
        base: usize,
        stride: usize,
        twiddles: Option<OuterTwiddles<'_, T>>,
    ) -> Result<(), FftError> {
        match self {
            SubFft::Fixed2(k) => k.fft_strided(src, dst, base, stride, twiddles),
            SubFft::Fixed3(k) => k.fft_strided(src, dst, base, stride, twiddles),
            SubFft::Naive(k) => k.fft_strided(src, dst, base, stride, twiddles),
            SubFft::Prime(k) => k.fft_strided(src, dst, base, stride, twiddles),
        }
    }
}

/// One strided sub-transform of a stage: the `radix` elements at
/// `base + k*stride`, with outer twiddle stride `twiddle_stride` into the
/// size-N table.
struct Job<T: Float> {
    base: usize,
    stride: usize,
    twiddle_stride: usize,
    sub: SubFft<T>,
}

pub struct CompositeFft<T: Float> {
    size: usize,
    twiddles: Rc<Vec<Complex<T>>>,
    /// Input index -> position in the scatter buffer.
    perm: Vec<usize>,
    /// Jobs grouped by factor depth; executed deepest first.
    stages: Vec<Vec<Job<T>>>,
    buf: RefCell<Vec<Complex<T>>>,
    out: RefCell<Vec<Complex<T>>>,
    /// Whether the initial scatter lands in `buf` (odd factor count) or
    /// `out` (even), so the deepest stage reads the buffer the scatter
    /// filled and the shallowest writes `out`.
    scatter_into_buf: bool,
}

impl<T: Float> CompositeFft<T> {
    pub fn new(size: usize, planner: &mut FftPlanner<T>) -> Result<Self, FftError> {
        if size == 0 || size as u64 > MAX_FFT_SIZE {
            return Err(FftError::InvalidSize(size));
        }
        let decomp = planner.primes.decomp(size as u64);
        let twiddles = planner.get_twiddles(size);
        let mut subs: BTreeMap<u64, SubFft<T>> = BTreeMap::new();
        for &p in &decomp {
            if subs.contains_key(&p) {
                continue;
            }
            let sub = match p {
                2 => SubFft::Fixed2(Fixed2Fft),
                3 => SubFft::Fixed3(Fixed3Fft),
                _ if p < RADER_FROM => SubFft::Naive(Rc::new(NaiveFft::new(p as usize))),
                _ => SubFft::Prime(Rc::new(PrimeFft::new(p as usize, planner)?)),
            };
            subs.insert(p, sub);
        }
        let mut perm = vec![0usize; size];
        let mut stages: Vec<Vec<Job<T>>> = decomp.iter().map(|_| Vec::new()).collect();
        Self::build_plan(&decomp, &subs, 0, size, 1, 0, 0, &mut perm, &mut stages);
        Ok(Self {
            size,
            twiddles,
            perm,
            stages,
            buf: RefCell::new(vec![Complex::zero(); size]),
            out: RefCell::new(vec![Complex::zero(); size]),
            scatter_into_buf: decomp.len() % 2 == 1,
        })
    }

    /// Descend through the factor list. The level at depth `depth` sees the
    /// logical sequence `off + k*stride` of length `n`; its children split
    /// that into `p` interleaved subsequences whose results land in
    /// consecutive blocks of the work buffer starting at `boff`. Leaves
    /// record where each input index ends up; on the way back out each level
    /// appends the jobs that will recombine its children's blocks.
    #[allow(clippy::too_many_arguments)]
    fn build_plan(
        decomp: &[u64],
        subs: &BTreeMap<u64, SubFft<T>>,
        depth: usize,
        n: usize,
        stride: usize,
        off: usize,
        boff: usize,
        perm: &mut [usize],
        stages: &mut [Vec<Job<T>>],
    ) {
        if depth == decomp.len() {
            perm[off] = boff;
            return;
        }
        let p = decomp[depth] as usize;
        let nn = n / p;
        for j in 0..p {
            Self::build_plan(
                decomp,
                subs,
                depth + 1,
                nn,
                stride * p,
                off + stride * j,
                boff + nn * j,
                perm,
                stages,
            );
        }
        let sub = &subs[&(p as u64)];
        for q in 0..nn {
            stages[depth].push(Job {
                base: boff + q,
                stride: nn,
                twiddle_stride: q * stride,
                sub: sub.clone(),
            });
        }
    }

    fn run_stage(
        jobs: &[Job<T>],
        src: &[Complex<T>],
        dst: &mut [Complex<T>],
        twiddles: &[Complex<T>],
    ) -> Result<(), FftError> {
        for job in jobs {
            job.sub.fft_strided(
                src,
                dst,
                job.base,
                job.stride,
                Some(OuterTwiddles {
                    table: twiddles,
                    stride: job.twiddle_stride,
                }),
            )?;
        }
        Ok(())
    }
}

impl<T: Float> FftImpl<T> for CompositeFft<T> {
    fn size(&self) -> usize {
        self.size
    }

    fn fft(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        let n = self.size;
        if data.len() != n {
            return Err(FftError::MismatchedLengths);
        }
        let mut buf = self.buf.borrow_mut();
        let mut out = self.out.borrow_mut();
        {
            let scatter = if self.scatter_into_buf {
                &mut buf
            } else {
                &mut out
            };
            for (i, &x) in data.iter().enumerate() {
                scatter[self.perm[i]] = x;
            }
        }
        // Even depths read `buf` and write `out`, odd depths the reverse.
        for depth in (0..self.stages.len()).rev() {
            if depth % 2 == 0 {
                Self::run_stage(&self.stages[depth], &buf, &mut out, &self.twiddles)?;
            } else {
                Self::run_stage(&self.stages[depth], &out, &mut buf, &self.twiddles)?;
            }
        }
        data.copy_from_slice(&out);
        Ok(())
    }
}

impl<T: Float> fmt::Display for CompositeFft<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeFFT({})", self.size)
    }
}
