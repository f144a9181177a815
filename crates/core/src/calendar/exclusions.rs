//! Exclusion tracking for recurring series.
//!
//! Every occurrence start listed here is skipped during expansion, which is
//! how single occurrences are soft-deleted or replaced by overrides. The
//! persisted shape is a comma-joined list of canonical timestamps on the
//! master row; in memory the entries live in an ordered set.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::time::{format_canonical, parse_canonical};

/// Occurrence start times suppressed during expansion.
///
/// Matching happens at second precision, the resolution of the canonical
/// string form. Fragments of stored data that do not parse as canonical
/// timestamps are dropped silently, in line with the recurrence parser's
/// permissiveness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<NaiveDateTime>);

impl ExclusionSet {
    /// Creates an empty exclusion set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the persisted comma-joined form. Never fails; unparseable
    /// fragments are skipped.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(',').filter_map(parse_canonical).collect())
    }

    /// Adds an occurrence start. Returns false when it was already present.
    pub fn insert(&mut self, ts: NaiveDateTime) -> bool {
        self.0.insert(truncate(ts))
    }

    /// Whether `ts` is excluded.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.0.contains(&truncate(ts))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Excluded starts in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.0.iter().copied()
    }
}

/// Second precision, matching the canonical string form.
fn truncate(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

impl fmt::Display for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for ts in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(&format_canonical(*ts))?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ExclusionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExclusionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

impl FromIterator<NaiveDateTime> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = NaiveDateTime>>(iter: I) -> Self {
        Self(iter.into_iter().map(truncate).collect())
    }
}
