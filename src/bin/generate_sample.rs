use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pnadc_formalidade::data::layout::{EDUCATION, OCCUPATION, PNADC_LAYOUT, RACE_COLOR, SEX, WEIGHT};

/// Full quarterly records are longer than the last field we read.
const RECORD_LEN: usize = 420;

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write synthetic PNAD Contínua fixed-width records")]
struct Args {
    /// Output file.
    #[arg(default_value = "sample_pnadc.txt")]
    path: PathBuf,
    /// Number of records to write.
    #[arg(default_value_t = 1000)]
    n_records: usize,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Pick from `(value, relative weight)` pairs.
    fn pick<'a>(&mut self, choices: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for &(value, w) in choices {
            if target < w {
                return value;
            }
            target -= w;
        }
        choices.last().map(|(v, _)| *v).unwrap_or("")
    }
}

// Rough national shares, plus a few blank/invalid codes so every filter drops something.
const SEX_CODES: &[(&str, f64)] = &[("1", 0.48), ("2", 0.51), (" ", 0.01)];
const RACE_CODES: &[(&str, f64)] = &[
    ("1", 0.42),
    ("2", 0.10),
    ("3", 0.01),
    ("4", 0.45),
    ("5", 0.01),
    ("9", 0.005),
    (" ", 0.005),
];
const EDUCATION_CODES: &[(&str, f64)] = &[
    ("1", 0.08),
    ("2", 0.25),
    ("3", 0.07),
    ("4", 0.06),
    ("5", 0.30),
    ("6", 0.05),
    ("7", 0.19),
];
const OCCUPATION_CODES: &[(&str, f64)] = &[
    ("01", 0.20),
    ("02", 0.07),
    ("03", 0.01),
    ("04", 0.03),
    ("05", 0.06),
    ("06", 0.14),
    ("07", 0.02),
    ("08", 0.01),
    ("09", 0.12),
    ("10", 0.01),
    ("  ", 0.33),
];

fn main() -> Result<()> {
    env_logger::init();

    let Args { path, n_records } = Args::parse();

    let mut rng = SimpleRng::new(42);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for _ in 0..n_records {
        let weight = if rng.next_f64() < 0.005 {
            String::new()
        } else {
            format!("{:.8}", 50.0 + rng.next_f64() * 950.0)
        };
        let record = PNADC_LAYOUT.encode(
            RECORD_LEN,
            &[
                (SEX, rng.pick(SEX_CODES)),
                (RACE_COLOR, rng.pick(RACE_CODES)),
                (EDUCATION, rng.pick(EDUCATION_CODES)),
                (OCCUPATION, rng.pick(OCCUPATION_CODES)),
                (WEIGHT, weight.as_str()),
            ],
        );
        writeln!(out, "{record}").context("writing record")?;
    }
    out.flush().context("flushing output")?;

    log::info!("Wrote {n_records} records of {RECORD_LEN} bytes to {}", path.display());
    println!("Wrote {n_records} synthetic PNAD Contínua records to {}", path.display());
    Ok(())
}
