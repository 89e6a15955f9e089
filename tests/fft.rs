//! End-to-end transform behavior through the planner: literal small-size
//! cases and the quantified transform properties.

use omnifft::{Complex64, FftPlanner};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOL: f64 = 1e-6;

fn random_buf(rng: &mut StdRng, n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|_| Complex64::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
        .collect()
}

fn assert_close(got: &[Complex64], want: &[Complex64], tag: &str) {
    assert_eq!(got.len(), want.len(), "{}", tag);
    for (i, (g, w)) in got.iter().zip(want.iter()).enumerate() {
        assert!(
            (g.re - w.re).abs() < TOL && (g.im - w.im).abs() < TOL,
            "{}: index {} got ({}, {}) want ({}, {})",
            tag,
            i,
            g.re,
            g.im,
            w.re,
            w.im
        );
    }
}

#[test]
fn size_1_is_identity() {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan(1).unwrap();
    let mut buf = vec![Complex64::new(5.0, -3.0)];
    fft.fft(&mut buf).unwrap();
    assert_close(&buf, &[Complex64::new(5.0, -3.0)], "forward");
    fft.ifft(&mut buf).unwrap();
    assert_close(&buf, &[Complex64::new(5.0, -3.0)], "inverse");
}

#[test]
fn size_2_literals() {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan(2).unwrap();
    let mut buf = vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)];
    fft.fft(&mut buf).unwrap();
    assert_close(
        &buf,
        &[Complex64::new(3.0, 0.0), Complex64::new(-1.0, 0.0)],
        "forward",
    );
    fft.ifft(&mut buf).unwrap();
    assert_close(
        &buf,
        &[Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)],
        "inverse",
    );
}

#[test]
fn size_3_impulse_spreads_flat() {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan(3).unwrap();
    let mut buf = vec![
        Complex64::new(1.0, 0.0),
        Complex64::zero(),
        Complex64::zero(),
    ];
    fft.fft(&mut buf).unwrap();
    assert_close(&buf, &[Complex64::new(1.0, 0.0); 3], "impulse");
}

#[test]
fn size_4_ramp() {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan(4).unwrap();
    let mut buf: Vec<Complex64> = (1..=4).map(|i| Complex64::new(i as f64, 0.0)).collect();
    fft.fft(&mut buf).unwrap();
    assert_close(
        &buf,
        &[
            Complex64::new(10.0, 0.0),
            Complex64::new(-2.0, 2.0),
            Complex64::new(-2.0, 0.0),
            Complex64::new(-2.0, -2.0),
        ],
        "ramp",
    );
}

#[test]
fn size_5_constant_and_impulse() {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan(5).unwrap();
    let mut ones = vec![Complex64::new(1.0, 0.0); 5];
    fft.fft(&mut ones).unwrap();
    let mut want = vec![Complex64::zero(); 5];
    want[0] = Complex64::new(5.0, 0.0);
    assert_close(&ones, &want, "all-ones");

    let mut impulse = vec![Complex64::zero(); 5];
    impulse[0] = Complex64::new(1.0, 0.0);
    fft.fft(&mut impulse).unwrap();
    assert_close(&impulse, &[Complex64::new(1.0, 0.0); 5], "impulse");
}

#[test]
fn size_6_composite_literals() {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan(6).unwrap();
    let mut impulse = vec![Complex64::zero(); 6];
    impulse[0] = Complex64::new(1.0, 0.0);
    fft.fft(&mut impulse).unwrap();
    assert_close(&impulse, &[Complex64::new(1.0, 0.0); 6], "impulse");

    let mut ones = vec![Complex64::new(1.0, 0.0); 6];
    fft.fft(&mut ones).unwrap();
    let mut want = vec![Complex64::zero(); 6];
    want[0] = Complex64::new(6.0, 0.0);
    assert_close(&ones, &want, "all-ones");
}

#[test]
fn round_trip_every_size_to_100() {
    let mut planner = FftPlanner::<f64>::new();
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for n in 1..=100usize {
        let fft = planner.plan(n).unwrap();
        let orig = random_buf(&mut rng, n);
        let mut buf = orig.clone();
        fft.fft(&mut buf).unwrap();
        fft.ifft(&mut buf).unwrap();
        assert_close(&buf, &orig, &format!("n = {}", n));
    }
}

#[test]
fn linearity() {
    let mut planner = FftPlanner::<f64>::new();
    let mut rng = StdRng::seed_from_u64(41);
    for &n in &[12usize, 22, 29, 64] {
        let fft = planner.plan(n).unwrap();
        let x = random_buf(&mut rng, n);
        let y = random_buf(&mut rng, n);
        let (alpha, beta) = (Complex64::new(1.7, -0.3), Complex64::new(-0.9, 2.1));

        let mut combined: Vec<Complex64> = x
            .iter()
            .zip(y.iter())
            .map(|(&a, &b)| alpha.mul(a).add(beta.mul(b)))
            .collect();
        fft.fft(&mut combined).unwrap();

        let mut fx = x.clone();
        let mut fy = y.clone();
        fft.fft(&mut fx).unwrap();
        fft.fft(&mut fy).unwrap();
        let superposed: Vec<Complex64> = fx
            .iter()
            .zip(fy.iter())
            .map(|(&a, &b)| alpha.mul(a).add(beta.mul(b)))
            .collect();
        assert_close(&combined, &superposed, &format!("n = {}", n));
    }
}

#[test]
fn real_input_spectra_are_hermitian() {
    let mut planner = FftPlanner::<f64>::new();
    let mut rng = StdRng::seed_from_u64(7);
    for &n in &[9usize, 16, 22, 23, 30] {
        let fft = planner.plan(n).unwrap();
        let reals: Vec<f64> = (0..n).map(|_| rng.gen_range(-5.0..5.0)).collect();
        let spec = fft.real_fft(&reals).unwrap();
        assert!(spec[0].im.abs() < TOL, "n = {}: DC must be real", n);
        for k in 1..n {
            let a = spec[k];
            let b = spec[n - k].conj();
            assert!(
                (a.re - b.re).abs() < TOL && (a.im - b.im).abs() < TOL,
                "n = {} k = {}",
                n,
                k
            );
        }
    }
}

#[test]
fn parseval_energy_balance() {
    let mut planner = FftPlanner::<f64>::new();
    let mut rng = StdRng::seed_from_u64(99);
    for &n in &[8usize, 21, 22, 47] {
        let fft = planner.plan(n).unwrap();
        let x = random_buf(&mut rng, n);
        let time_energy: f64 = x.iter().map(|c| c.sq_mag()).sum();
        let mut spec = x;
        fft.fft(&mut spec).unwrap();
        let freq_energy: f64 = spec.iter().map(|c| c.sq_mag()).sum::<f64>() / n as f64;
        assert!(
            (time_energy - freq_energy).abs() < TOL * n as f64,
            "n = {}: {} vs {}",
            n,
            time_energy,
            freq_energy
        );
    }
}

#[test]
fn length_mismatch_surfaces() {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan(8).unwrap();
    let mut short = vec![Complex64::zero(); 7];
    assert!(fft.fft(&mut short).is_err());
    assert!(fft.ifft(&mut short).is_err());
    assert!(fft.real_fft(&[0.0; 7]).is_err());
    assert!(fft.real_ifft(&mut short).is_err());
}

#[test]
fn non_finite_values_propagate() {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan(4).unwrap();
    let mut buf = vec![
        Complex64::new(f64::NAN, 0.0),
        Complex64::zero(),
        Complex64::zero(),
        Complex64::zero(),
    ];
    fft.fft(&mut buf).unwrap();
    assert!(buf.iter().any(|c| c.re.is_nan()));
}

#[test]
fn frequency_mapping_is_inverse_pair() {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan(256).unwrap();
    let rate = 48_000.0;
    let f = fft.frequency(32, rate);
    assert!((f - 6_000.0).abs() < 1e-9);
    assert!((fft.index_of_frequency(f, rate) - 32.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn forward_inverse_round_trip(signal in proptest::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..48)) {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan(signal.len()).unwrap();
        let orig: Vec<Complex64> = signal.iter().map(|&(re, im)| Complex64::new(re, im)).collect();
        let mut buf = orig.clone();
        fft.fft(&mut buf).unwrap();
        fft.ifft(&mut buf).unwrap();
        for (got, want) in buf.iter().zip(orig.iter()) {
            prop_assert!((got.re - want.re).abs() < 1e-6);
            prop_assert!((got.im - want.im).abs() < 1e-6);
        }
    }
}
