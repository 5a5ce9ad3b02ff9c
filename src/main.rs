use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pnadc_formalidade::data::layout::PNADC_LAYOUT;
use pnadc_formalidade::{pipeline, report};

const DEFAULT_INPUT: &str = "PNADC_032025.txt";

#[derive(Parser, Debug)]
#[command(name = "pnadc-formalidade", version)]
#[command(about = "Formal-employment rate by education, sex and race/color from PNAD Contínua microdata")]
struct Args {
    /// Print the table as JSON instead of a text table.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Fixed-width quarterly microdata file.
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = pipeline::run(&args.input, &PNADC_LAYOUT);
    let rendered = if args.json {
        report::render_json(&table)?
    } else {
        report::render_text(&table)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").context("writing indicator table")?;
    Ok(())
}
