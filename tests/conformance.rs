//! Transform outputs checked against fixture vectors computed by an
//! independent reference implementation, shipped in the matrix file format.

use omnifft::matfile::read_matrix;
use omnifft::{Complex64, FftPlanner};

fn to_complex(row: &[f64]) -> Vec<Complex64> {
    assert_eq!(row.len() % 2, 0);
    row.chunks_exact(2)
        .map(|pair| Complex64::new(pair[0], pair[1]))
        .collect()
}

#[test]
fn complex_transforms_match_fixture_vectors() {
    let rows = read_matrix(include_bytes!("data/fft_cases.mat")).unwrap();
    assert_eq!(rows.len() % 2, 0);
    let mut planner = FftPlanner::<f64>::new();
    for case in rows.chunks_exact(2) {
        let input = to_complex(&case[0]);
        let expected = to_complex(&case[1]);
        let n = input.len();
        let fft = planner.plan(n).unwrap();

        let mut buf = input.clone();
        fft.fft(&mut buf).unwrap();
        for (i, (got, want)) in buf.iter().zip(expected.iter()).enumerate() {
            assert!(
                (got.re - want.re).abs() < 1e-6 && (got.im - want.im).abs() < 1e-6,
                "n = {} index {}",
                n,
                i
            );
        }

        fft.ifft(&mut buf).unwrap();
        for (got, want) in buf.iter().zip(input.iter()) {
            assert!((got.re - want.re).abs() < 1e-6 && (got.im - want.im).abs() < 1e-6);
        }
    }
}

#[test]
fn real_transforms_match_fixture_vectors() {
    let rows = read_matrix(include_bytes!("data/real_fft_cases.mat")).unwrap();
    assert_eq!(rows.len() % 2, 0);
    let mut planner = FftPlanner::<f64>::new();
    for case in rows.chunks_exact(2) {
        let input = &case[0];
        let expected = to_complex(&case[1]);
        let n = input.len();
        let fft = planner.plan(n).unwrap();

        let spectrum = fft.real_fft(input).unwrap();
        for (got, want) in spectrum.iter().zip(expected.iter()) {
            assert!(
                (got.re - want.re).abs() < 1e-6 && (got.im - want.im).abs() < 1e-6,
                "n = {}",
                n
            );
        }

        let mut copy = spectrum;
        let reals = fft.real_ifft(&mut copy).unwrap();
        for (got, want) in reals.iter().zip(input.iter()) {
            assert!((got - want).abs() < 1e-6, "n = {}", n);
        }
    }
}
