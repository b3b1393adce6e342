//! Recap orchestration
//!
//! Wires listing, grouping, cleaning, summarizing and writing into the three
//! recap operations, and decides when the hourly tick should run them.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Instant;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::config::RecapConfig;
use crate::digest::{assemble, ContentMode, DigestWriter, NamingTemplate, WriteOutcome};
use crate::error::{RecapError, Result};
use crate::notify::{Notice, Notifier};
use crate::period::{group_by_month, group_by_week, note_date, PeriodKey, WeekKey};
use crate::store::{FileStore, NoteFile};
use crate::summary::{CompletionTransport, SummaryClient, SummaryOutcome};
use crate::trace_time;

/// The recap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecapKind {
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "weekly")]
    Weekly,
    /// Summary of the week before the current one
    #[serde(rename = "summary")]
    PreviousWeekSummary,
}

impl RecapKind {
    pub const ALL: [RecapKind; 3] = [
        RecapKind::Monthly,
        RecapKind::Weekly,
        RecapKind::PreviousWeekSummary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecapKind::Monthly => "monthly",
            RecapKind::Weekly => "weekly",
            RecapKind::PreviousWeekSummary => "summary",
        }
    }

    /// Human label used in notices
    pub fn label(&self) -> &'static str {
        match self {
            RecapKind::Monthly => "Monthly recap",
            RecapKind::Weekly => "Weekly recap",
            RecapKind::PreviousWeekSummary => "Weekly summary",
        }
    }
}

impl fmt::Display for RecapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecapKind {
    type Err = RecapError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        RecapKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| RecapError::UnknownRecapKind(s.to_string()))
    }
}

/// What happened to summarization for one digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryStatus {
    NotRequested,
    Summarized,
    FellBack { reason: String },
}

/// One digest written by an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestRecord {
    /// `2024-01`, `2024-W10`
    pub period: String,
    pub path: String,
    /// Number of source notes in the bucket
    pub notes: usize,
    pub outcome: WriteOutcome,
    pub summary: SummaryStatus,
}

/// Result of one recap operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecapReport {
    pub kind: RecapKind,
    /// Period the operation was limited to, if any (`2024-W10`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
    pub digests: Vec<DigestRecord>,
}

impl RecapReport {
    pub fn new(kind: RecapKind) -> Self {
        Self {
            kind,
            window: None,
            digests: Vec::new(),
        }
    }

    /// Report for an operation restricted to one period
    pub fn for_window(kind: RecapKind, window: impl fmt::Display) -> Self {
        Self {
            window: Some(window.to_string()),
            ..Self::new(kind)
        }
    }

    /// One-line outcome shown to the user
    pub fn summary_line(&self) -> String {
        match (self.digests.len(), &self.window) {
            (0, Some(window)) => format!(
                "{}: no notes dated in {}, nothing written",
                self.kind.label(),
                window
            ),
            (0, None) => format!("{}: no dated notes found, nothing written", self.kind.label()),
            (1, _) => format!("{}: wrote {}", self.kind.label(), self.digests[0].path),
            (n, _) => format!("{}: wrote {} digests", self.kind.label(), n),
        }
    }
}

/// Which recaps the hourly tick should run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AutoRun {
    pub monthly: bool,
    pub weekly: bool,
}

impl AutoRun {
    pub fn kinds(&self) -> Vec<RecapKind> {
        let mut kinds = Vec::new();
        if self.monthly {
            kinds.push(RecapKind::Monthly);
        }
        if self.weekly {
            kinds.push(RecapKind::Weekly);
        }
        kinds
    }

    pub fn is_empty(&self) -> bool {
        !self.monthly && !self.weekly
    }
}

/// Monthly fires during hour 0 of the 1st, weekly during hour 0 of Sundays,
/// each only when its toggle is on.
pub fn check_auto_run(now: NaiveDateTime, config: &RecapConfig) -> AutoRun {
    let first_hour = now.hour() == 0;
    AutoRun {
        monthly: config.auto_generate_monthly && first_hour && now.day() == 1,
        weekly: config.auto_generate_weekly && first_hour && now.weekday() == Weekday::Sun,
    }
}

/// One lock per recap kind; same-kind runs in a process never overlap
#[derive(Debug, Default)]
struct KindLocks {
    monthly: Mutex<()>,
    weekly: Mutex<()>,
    summary: Mutex<()>,
}

impl KindLocks {
    fn for_kind(&self, kind: RecapKind) -> &Mutex<()> {
        match kind {
            RecapKind::Monthly => &self.monthly,
            RecapKind::Weekly => &self.weekly,
            RecapKind::PreviousWeekSummary => &self.summary,
        }
    }
}

/// Runs recap operations against a store
pub struct Recapper<'a, S, T, N>
where
    S: FileStore,
    T: CompletionTransport,
    N: Notifier,
{
    store: &'a S,
    summarizer: SummaryClient<T>,
    notifier: &'a N,
    locks: KindLocks,
}

impl<'a, S, T, N> Recapper<'a, S, T, N>
where
    S: FileStore,
    T: CompletionTransport,
    N: Notifier,
{
    pub fn new(store: &'a S, transport: T, notifier: &'a N) -> Self {
        Self {
            store,
            summarizer: SummaryClient::new(transport),
            notifier,
            locks: KindLocks::default(),
        }
    }

    /// Run one operation; `today` anchors the previous-week summary
    pub fn run(&self, kind: RecapKind, config: &RecapConfig, today: NaiveDate) -> Result<RecapReport> {
        match kind {
            RecapKind::Monthly => self.generate_monthly_recap(config),
            RecapKind::Weekly => self.generate_weekly_recap(config),
            RecapKind::PreviousWeekSummary => self.generate_previous_week_summary(config, today),
        }
    }

    /// Run whatever [`check_auto_run`] selects for `now`, monthly first.
    /// A failure in one recap does not stop the other.
    pub fn run_due(&self, now: NaiveDateTime, config: &RecapConfig) -> Vec<Result<RecapReport>> {
        let due = check_auto_run(now, config);
        tracing::debug!(now = %now, monthly = due.monthly, weekly = due.weekly, "auto-run check");
        due.kinds()
            .into_iter()
            .map(|kind| self.run(kind, config, now.date()))
            .collect()
    }

    /// Digest every month found under the monthly input folder
    #[tracing::instrument(skip(self, config))]
    pub fn generate_monthly_recap(&self, config: &RecapConfig) -> Result<RecapReport> {
        self.guarded(RecapKind::Monthly, || self.build_monthly(config))
    }

    /// Digest every week found under the weekly input folder
    #[tracing::instrument(skip(self, config))]
    pub fn generate_weekly_recap(&self, config: &RecapConfig) -> Result<RecapReport> {
        self.guarded(RecapKind::Weekly, || self.build_weekly(config))
    }

    /// Summarize the raw notes of the week before the one containing `today`
    #[tracing::instrument(skip(self, config))]
    pub fn generate_previous_week_summary(
        &self,
        config: &RecapConfig,
        today: NaiveDate,
    ) -> Result<RecapReport> {
        self.guarded(RecapKind::PreviousWeekSummary, || {
            self.build_previous_week_summary(config, today)
        })
    }

    /// Hold the kind's lock while `build` runs, then emit the final notice
    fn guarded(
        &self,
        kind: RecapKind,
        build: impl FnOnce() -> Result<RecapReport>,
    ) -> Result<RecapReport> {
        let result = match self.locks.for_kind(kind).lock() {
            Ok(guard) => {
                let result = build();
                drop(guard);
                result
            }
            Err(_) => Err(RecapError::LockPoisoned {
                kind: kind.to_string(),
            }),
        };

        match &result {
            Ok(report) => self.notifier.notify(Notice::info(report.summary_line())),
            Err(e) => self
                .notifier
                .notify(Notice::error(format!("{} failed: {}", kind.label(), e))),
        }
        result
    }

    fn build_monthly(&self, config: &RecapConfig) -> Result<RecapReport> {
        config.validate()?;
        let start = Instant::now();
        let files = self
            .store
            .list_files(&config.monthly_input_folder, &config.note_extension)?;
        let buckets = group_by_month(&files);
        trace_time!(start, "group_by_month", buckets = buckets.len());

        let mut report = RecapReport::new(RecapKind::Monthly);
        for (key, notes) in &buckets {
            let content = assemble(self.store, notes, ContentMode::Cleaned)?;
            let record = self.write(
                PeriodKey::Month(*key),
                notes.len(),
                (content, SummaryStatus::NotRequested),
                &config.monthly_output_folder,
                NamingTemplate::Period,
            )?;
            report.digests.push(record);
        }
        Ok(report)
    }

    fn build_weekly(&self, config: &RecapConfig) -> Result<RecapReport> {
        config.validate()?;
        let start = Instant::now();
        let files = self
            .store
            .list_files(&config.weekly_input_folder, &config.note_extension)?;
        let buckets = group_by_week(&files);
        trace_time!(start, "group_by_week", buckets = buckets.len());

        let mut report = RecapReport::new(RecapKind::Weekly);
        for (key, notes) in &buckets {
            let key = PeriodKey::Week(*key);
            let content = assemble(self.store, notes, ContentMode::Cleaned)?;
            let body = if config.enable_summarization {
                self.summarize(&key, &content, config)
            } else {
                (content, SummaryStatus::NotRequested)
            };
            let record = self.write(
                key,
                notes.len(),
                body,
                &config.weekly_output_folder,
                NamingTemplate::Period,
            )?;
            report.digests.push(record);
        }
        Ok(report)
    }

    fn build_previous_week_summary(
        &self,
        config: &RecapConfig,
        today: NaiveDate,
    ) -> Result<RecapReport> {
        config.validate()?;
        let week = WeekKey::containing(today).previous();
        let notes: Vec<NoteFile> = self
            .store
            .list_files(&config.summary_input_folder, &config.note_extension)?
            .into_iter()
            .filter(|file| note_date(&file.name).is_some_and(|date| week.contains(date)))
            .collect();
        tracing::debug!(week = %week, notes = notes.len(), "previous week notes");

        let mut report = RecapReport::for_window(RecapKind::PreviousWeekSummary, week);
        if notes.is_empty() {
            return Ok(report);
        }

        let key = PeriodKey::Week(week);
        let content = assemble(self.store, &notes, ContentMode::Raw)?;
        let body = self.summarize(&key, &content, config);
        let record = self.write(
            key,
            notes.len(),
            body,
            &config.summary_output_folder,
            NamingTemplate::PeriodSummary,
        )?;
        report.digests.push(record);
        Ok(report)
    }

    /// Summarize a digest, warning the user when it falls back to raw text
    fn summarize(
        &self,
        key: &PeriodKey,
        content: &str,
        config: &RecapConfig,
    ) -> (String, SummaryStatus) {
        match self.summarizer.summarize(content, config) {
            SummaryOutcome::Summarized(text) => (text, SummaryStatus::Summarized),
            SummaryOutcome::FellBack { text, reason } => {
                self.notifier
                    .notify(Notice::warning(format!("{}: {}", key, reason)));
                (
                    text,
                    SummaryStatus::FellBack {
                        reason: reason.to_string(),
                    },
                )
            }
        }
    }

    fn write(
        &self,
        key: PeriodKey,
        notes: usize,
        (content, summary): (String, SummaryStatus),
        output_folder: &str,
        template: NamingTemplate,
    ) -> Result<DigestRecord> {
        let (path, outcome) =
            DigestWriter::new(self.store).write(&key, &content, output_folder, template)?;
        Ok(DigestRecord {
            period: key.to_string(),
            path,
            notes,
            outcome,
            summary,
        })
    }
}
