use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;
use trext_convert::{Config, print_nothing_to_convert, print_summary, trext};

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cfg = Config::parse();
    debug!("Parsed CLI arguments: {:?}", cfg);

    let start = Instant::now();

    let (root, options) = cfg.resolve()?;
    let num_threads = rayon::current_num_threads();
    info!(
        "Converting .{} files under {} (using {} threads)",
        options.from,
        root.display(),
        num_threads
    );

    let results = trext(&root, &options)?;
    debug!("Converted {} files", results.len());

    if results.is_empty() {
        print_nothing_to_convert(&mut stdout, &options.from)?;
        stdout.flush()?;
        return Ok(());
    }

    print_summary(&mut stdout, &results, start.elapsed().as_millis(), num_threads)?;
    stdout.flush()?;

    Ok(())
}
