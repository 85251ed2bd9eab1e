use colored::Colorize;
use std::io::{self, Write};

use crate::types::TrextFileResult;

/// Prints a per-file conversion listing and a closing summary line.
pub fn print_summary<W: Write>(
    out: &mut W,
    results: &[TrextFileResult],
    elapsed_ms: u128,
    num_threads: usize,
) -> io::Result<()> {
    let mut rewrites = 0;
    for result in results {
        rewrites += result.rewrites;
        writeln!(
            out,
            "  {} {} {} {}",
            "✓".green(),
            result.input.display(),
            "→".dimmed(),
            result.output.display().to_string().cyan()
        )?;
    }

    writeln!(
        out,
        "\n{} Converted {} files ({} specifiers rewritten) in {}ms (using {} threads).",
        "●".bright_blue(),
        results.len().to_string().cyan(),
        rewrites.to_string().cyan(),
        elapsed_ms.to_string().cyan(),
        num_threads.to_string().cyan()
    )?;

    Ok(())
}

/// Printed when the walk found nothing carrying the source extension.
pub fn print_nothing_to_convert<W: Write>(out: &mut W, from: &str) -> io::Result<()> {
    writeln!(out, "{} No .{} files found, nothing to convert.", "●".bright_blue(), from)
}
