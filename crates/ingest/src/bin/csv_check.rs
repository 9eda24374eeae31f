use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use costwatch_core::{Bucket, aggregate};
use ingest::ingest_csv;

/// Validate a cost CSV without touching any store.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to the CSV file, or `-` for stdin
    path: PathBuf,
    /// Print every rejected row instead of the first ten
    #[arg(long)]
    all: bool,
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        return Ok(data);
    }
    fs::read(path)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let data = match read_input(&args.path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to read {}: {}", args.path.display(), err);
            return ExitCode::from(1);
        }
    };

    let outcome = match ingest_csv(&data) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    println!("rows {}", outcome.rows());
    println!("accepted {}", outcome.accepted.len());
    println!("rejected {}", outcome.rejected.len());
    let shown = if args.all { usize::MAX } else { 10 };
    for rejection in outcome.rejected.iter().take(shown) {
        println!(
            "  row {} ({}): {}",
            rejection.row,
            rejection.error.kind(),
            rejection.error
        );
    }

    let summary = aggregate(&outcome.accepted, Bucket::Exact);
    println!("total_cost {:.2}", summary.total_cost);
    for (service, total) in &summary.per_service {
        println!("  {} {:.2}", service, total);
    }
    if let Some(service) = summary.highest_service {
        println!("highest_service {}", service);
    }

    if outcome.accepted.is_empty() && !outcome.rejected.is_empty() {
        ExitCode::from(3)
    } else {
        ExitCode::SUCCESS
    }
}
