//! Calendar periods and the grouping of dated notes into them
//!
//! A note takes part in recaps when its file name starts with a `YYYY-MM-DD`
//! date token. Weeks run Sunday to Saturday regardless of host locale.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use serde::Serialize;

use crate::store::NoteFile;

static DATE_TOKEN: OnceLock<Regex> = OnceLock::new();

fn date_token() -> &'static Regex {
    DATE_TOKEN.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").expect("valid date token regex")
    })
}

/// Date encoded in the first ten characters of a note name
pub fn note_date(name: &str) -> Option<NaiveDate> {
    let caps = date_token().captures(name)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// A Sunday-to-Saturday week, identified by its Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WeekKey {
    start: NaiveDate,
}

impl WeekKey {
    /// The week containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let back = u64::from(date.weekday().num_days_from_sunday());
        Self {
            start: date - Days::new(back),
        }
    }

    /// Sunday opening the week
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Saturday closing the week
    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(6)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }

    /// The week immediately before this one
    pub fn previous(&self) -> Self {
        Self {
            start: self.start - Days::new(7),
        }
    }

    /// Label year: the calendar year of the opening Sunday
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Label number: which Sunday of its year opens the week (1-53).
    /// Equal to strftime `%U` evaluated on that Sunday.
    pub fn number(&self) -> u32 {
        self.start.ordinal0() / 7 + 1
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year(), self.number())
    }
}

/// Identifier of one digest bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    Month(MonthKey),
    Week(WeekKey),
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Month(key) => fmt::Display::fmt(key, f),
            PeriodKey::Week(key) => fmt::Display::fmt(key, f),
        }
    }
}

impl From<MonthKey> for PeriodKey {
    fn from(key: MonthKey) -> Self {
        PeriodKey::Month(key)
    }
}

impl From<WeekKey> for PeriodKey {
    fn from(key: WeekKey) -> Self {
        PeriodKey::Week(key)
    }
}

/// Bucket files by a key derived from their date token; files without a
/// valid token are skipped. Input order is kept within each bucket.
fn group_by<K: Ord>(files: &[NoteFile], key: impl Fn(NaiveDate) -> K) -> BTreeMap<K, Vec<NoteFile>> {
    let mut buckets: BTreeMap<K, Vec<NoteFile>> = BTreeMap::new();
    for file in files {
        match note_date(&file.name) {
            Some(date) => buckets.entry(key(date)).or_default().push(file.clone()),
            None => tracing::trace!(path = %file.path, "no date token, skipping"),
        }
    }
    buckets
}

/// Partition notes by calendar month
pub fn group_by_month(files: &[NoteFile]) -> BTreeMap<MonthKey, Vec<NoteFile>> {
    group_by(files, MonthKey::of)
}

/// Partition notes by Sunday-aligned week
pub fn group_by_week(files: &[NoteFile]) -> BTreeMap<WeekKey, Vec<NoteFile>> {
    group_by(files, WeekKey::containing)
}
