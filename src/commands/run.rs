//! `recap run <kind>`

use std::time::Duration;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{print_digests, print_json, print_notices};
use recap_core::bail_usage;
use recap_core::error::Result;
use recap_core::notify::{CollectingNotifier, Notice};
use recap_core::recap::{RecapKind, RecapReport, Recapper};
use recap_core::summary::UreqTransport;

#[derive(Serialize)]
struct RunOutput<'a> {
    #[serde(flatten)]
    report: &'a RecapReport,
    notices: &'a [Notice],
}

pub fn execute(ctx: &CommandContext, kind: RecapKind, today: Option<NaiveDate>) -> Result<()> {
    if today.is_some() && kind != RecapKind::PreviousWeekSummary {
        bail_usage!(format!(
            "--today only applies to `recap run summary`, not `{}`",
            kind
        ));
    }

    let config = ctx.load_config()?;
    let store = ctx.open_store()?;
    let notifier = CollectingNotifier::new();
    let transport = UreqTransport::new(config.request_timeout_secs.map(Duration::from_secs));
    let recapper = Recapper::new(&store, transport, &notifier);

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let result = recapper.run(kind, &config, today);
    let notices = notifier.take();

    match result {
        Ok(report) => {
            if ctx.format() == OutputFormat::Json {
                return print_json(&RunOutput {
                    report: &report,
                    notices: &notices,
                });
            }
            print_notices(ctx, &notices, false);
            print_digests(ctx, &report);
            Ok(())
        }
        Err(e) => {
            print_notices(ctx, &notices, false);
            Err(e)
        }
    }
}
