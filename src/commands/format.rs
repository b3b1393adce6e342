//! Shared printing for command results

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use recap_core::error::Result;
use recap_core::notify::{Notice, NoticeLevel};
use recap_core::recap::RecapReport;

/// Print notices for people; warnings and errors go to stderr.
/// Errors are skipped unless `include_errors`, since the caller usually
/// returns the same failure and `main` prints it.
pub fn print_notices(ctx: &CommandContext, notices: &[Notice], include_errors: bool) {
    if ctx.format() != OutputFormat::Human {
        return;
    }
    for notice in notices {
        match notice.level {
            NoticeLevel::Info if !ctx.quiet() => println!("{}", notice),
            NoticeLevel::Info => {}
            NoticeLevel::Warning => eprintln!("{}", notice),
            NoticeLevel::Error if include_errors => eprintln!("{}", notice),
            NoticeLevel::Error => {}
        }
    }
}

/// Digest paths under a report's notices
pub fn print_digests(ctx: &CommandContext, report: &RecapReport) {
    if ctx.format() != OutputFormat::Human || ctx.quiet() {
        return;
    }
    for digest in &report.digests {
        println!(
            "  {} {} ({} notes)",
            digest.outcome.as_str(),
            digest.path,
            digest.notes
        );
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
