//! `recap auto`: the hourly tick

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{print_digests, print_json, print_notices};
use recap_core::error::{RecapError, Result};
use recap_core::notify::{CollectingNotifier, Notice};
use recap_core::recap::{check_auto_run, AutoRun, RecapReport, Recapper};
use recap_core::summary::UreqTransport;

#[derive(Serialize)]
struct AutoOutput {
    at: NaiveDateTime,
    due: AutoRun,
    reports: Vec<RecapReport>,
    errors: Vec<serde_json::Value>,
    notices: Vec<Notice>,
}

pub fn execute(ctx: &CommandContext, at: Option<NaiveDateTime>) -> Result<()> {
    let config = ctx.load_config()?;
    let now = at.unwrap_or_else(|| Local::now().naive_local());
    let due = check_auto_run(now, &config);

    if due.is_empty() {
        tracing::debug!(at = %now, "no recap due");
        if ctx.format() == OutputFormat::Json {
            return print_json(&AutoOutput {
                at: now,
                due,
                reports: Vec::new(),
                errors: Vec::new(),
                notices: Vec::new(),
            });
        }
        if !ctx.quiet() {
            println!("No recap due at {}", now.format("%Y-%m-%d %H:%M"));
        }
        return Ok(());
    }

    let store = ctx.open_store()?;
    let notifier = CollectingNotifier::new();
    let transport = UreqTransport::new(config.request_timeout_secs.map(Duration::from_secs));
    let recapper = Recapper::new(&store, transport, &notifier);

    let results = recapper.run_due(now, &config);
    let total = results.len();
    let mut reports = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => errors.push(e),
        }
    }
    let notices = notifier.take();

    if ctx.format() == OutputFormat::Json {
        print_json(&AutoOutput {
            at: now,
            due,
            reports,
            errors: errors.iter().map(RecapError::to_json).collect(),
            notices,
        })?;
    } else {
        print_notices(ctx, &notices, true);
        for report in &reports {
            print_digests(ctx, report);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RecapError::Other(format!(
            "{} of {} due recaps failed",
            errors.len(),
            total
        )))
    }
}
