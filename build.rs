use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    const SIZES: &[usize] = &[2, 4, 8, 16, 32, 64, 128, 256, 512, 1024];

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = PathBuf::from(out_dir).join("precomputed_twiddles.rs");
    let mut f = File::create(&dest_path).unwrap();

    for &n in SIZES {
        let half = n / 2;
        writeln!(f, "static HALF_TWIDDLES_{n}: [(f64, f64); {half}] = [").unwrap();
        for k in 0..half {
            let angle = -2.0f64 * std::f64::consts::PI * k as f64 / n as f64;
            writeln!(f, "    ({:.17e}, {:.17e}),", angle.cos(), angle.sin()).unwrap();
        }
        writeln!(f, "];\n").unwrap();
    }

    writeln!(
        f,
        "pub(crate) fn lookup_half_twiddles(n: usize) -> Option<&'static [(f64, f64)]> {{"
    )
    .unwrap();
    writeln!(f, "    match n {{").unwrap();
    for &n in SIZES {
        writeln!(f, "        {n} => Some(&HALF_TWIDDLES_{n}),").unwrap();
    }
    writeln!(f, "        _ => None,").unwrap();
    writeln!(f, "    }}").unwrap();
    writeln!(f, "}}").unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}
