//! CLI front end for the fused pipeline engine.
//!
//! Usage:
//!   fx emit a b c grep a take 1
//!   fx find . -type f -name '*.rs' grep -m 5 main
//!   fx cut -d, -f1,3 < data.csv
//!
//! The whole argument vector after the binary name is the pipeline; when
//! the first token is not a source, standard input is read line by line.
//!
//! Exit status: 0 when at least one record was emitted, 1 when the run
//! completed with no output, 2 on any error.

use std::io::{self, BufWriter, Write};
use std::process;

use clap::Parser;

use fusepipe::{Plan, run};

const OUT_BUF_BYTES: usize = 1 << 20;

#[derive(Parser)]
#[command(
    name = "fx",
    about = "Run a fused text-tool pipeline in a single process"
)]
struct Cli {
    /// Pipeline tokens: operator names and their arguments, in order.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pipeline: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let plan = match Plan::parse(&cli.pipeline) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("fx: {e}");
            process::exit(e.exit_code());
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(OUT_BUF_BYTES, stdout.lock());

    let status = match run(plan, &mut out) {
        Ok(status) => status,
        Err(e) => {
            let _ = out.flush();
            eprintln!("fx: {e}");
            process::exit(e.exit_code());
        }
    };

    if let Err(e) = out.flush() {
        eprintln!("fx: {e}");
        process::exit(2);
    }
    process::exit(status.exit_code());
}
