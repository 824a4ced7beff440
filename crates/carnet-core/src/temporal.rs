//! Month-based grouping and filtering for the journal's browse pages.
//!
//! The home page groups entries by the calendar month of their last update;
//! the month page filters to one month and sorts either direction. Both
//! operate on already-fetched summaries, so the logic stays pure and the
//! repositories stay simple.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::models::EntryWithCategory;

/// A calendar month key, parsed from the `YYYY-MM` route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    pub year: i32,
    /// 1-12.
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidInput(format!(
                "month out of range: {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Key for the month a timestamp falls in (UTC).
    pub fn of(ts: DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts.year() == self.year && ts.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidInput(format!("invalid month key: {s}")))?;
        let year: i32 = year
            .parse()
            .map_err(|_| Error::InvalidInput(format!("invalid month key: {s}")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| Error::InvalidInput(format!("invalid month key: {s}")))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Sort direction for month listings. Defaults to newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// One month's worth of entries, newest month first in [`group_by_month`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGroup {
    pub month: MonthKey,
    pub entries: Vec<EntryWithCategory>,
    /// Distinct category names appearing in this month, sorted.
    pub categories: Vec<String>,
}

/// Group entries by the calendar month of their last update.
///
/// Months come back newest first; entries within a month are sorted by their
/// last update, newest first, regardless of input order.
pub fn group_by_month(entries: Vec<EntryWithCategory>) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for entry in entries {
        let key = MonthKey::of(entry.updated_at_utc);
        let idx = match groups.iter().position(|g| g.month == key) {
            Some(i) => i,
            None => {
                groups.push(MonthGroup {
                    month: key,
                    entries: Vec::new(),
                    categories: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        if !group.categories.contains(&entry.category.name) {
            group.categories.push(entry.category.name.clone());
        }
        group.entries.push(entry);
    }
    groups.sort_by(|a, b| b.month.cmp(&a.month));
    for group in &mut groups {
        group.entries.sort_by(|a, b| b.updated_at_utc.cmp(&a.updated_at_utc));
        group.categories.sort();
    }
    groups
}

/// Entries whose last update falls in `month`, sorted by update time.
pub fn entries_for_month(
    entries: Vec<EntryWithCategory>,
    month: MonthKey,
    order: SortOrder,
) -> Vec<EntryWithCategory> {
    let mut filtered: Vec<EntryWithCategory> = entries
        .into_iter()
        .filter(|e| month.contains(e.updated_at_utc))
        .collect();
    filtered.sort_by(|a, b| match order {
        SortOrder::Asc => a.updated_at_utc.cmp(&b.updated_at_utc),
        SortOrder::Desc => b.updated_at_utc.cmp(&a.updated_at_utc),
    });
    filtered
}
