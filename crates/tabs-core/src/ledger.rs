//! Notification ledger: the PRs whose tabs were already opened.
//!
//! Persisted to `<data_dir>/notified.json` as an object keyed by PR identity
//! key (`owner/repo#number`). Each value carries the time the tab was opened
//! and the PR title at that moment:
//!
//! ```json
//! { "acme/widgets#12": { "at": "2024-06-01T09:00:00.000Z", "title": "Fix it" } }
//! ```
//!
//! Older files used `notifiedAt` for the timestamp. Both names are accepted on
//! read and folded into [`LedgerEntry::at`]; only `at` is ever written.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::write_atomically;
use crate::error::{Result, TabsError};
use crate::stats::LedgerStats;
use crate::time_utils::{days_before, format_timestamp, parse_timestamp};

// ── LedgerEntry ───────────────────────────────────────────────────────────────

/// A single surfaced PR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredEntry", into = "StoredEntry")]
pub struct LedgerEntry {
    /// When the tab was opened, or `None` if the stored value was missing or
    /// unparseable. Such entries are dropped by the next prune.
    pub at: Option<DateTime<Utc>>,
    /// PR title at the time the tab was opened.
    pub title: String,
}

/// On-disk shape of a ledger entry, including the legacy timestamp field.
#[derive(Serialize, Deserialize)]
struct StoredEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    at: Option<String>,
    #[serde(default, rename = "notifiedAt", skip_serializing)]
    notified_at: Option<String>,
    #[serde(default)]
    title: String,
}

impl From<StoredEntry> for LedgerEntry {
    fn from(stored: StoredEntry) -> Self {
        let at = stored
            .at
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| stored.notified_at.as_deref().and_then(parse_timestamp));
        Self {
            at,
            title: stored.title,
        }
    }
}

impl From<LedgerEntry> for StoredEntry {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            at: entry.at.as_ref().map(format_timestamp),
            notified_at: None,
            title: entry.title,
        }
    }
}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// Map of PR identity key → [`LedgerEntry`], kept in stored order.
///
/// Entries keep the order they were read in, and newly recorded keys go to the
/// end, so the file stays chronological and [`LedgerStats`] breaks ties by
/// first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<(String, LedgerEntry)>,
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(LedgerVisitor)
    }
}

struct LedgerVisitor;

impl<'de> Visitor<'de> for LedgerVisitor {
    type Value = Ledger;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of PR identity keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Ledger, A::Error> {
        let mut ledger = Ledger::default();
        while let Some((key, entry)) = map.next_entry::<String, LedgerEntry>()? {
            ledger.upsert(key, entry);
        }
        Ok(ledger)
    }
}

impl Ledger {
    /// Load the ledger from `path`.
    ///
    /// A missing file yields an empty ledger. An unreadable or malformed file
    /// also yields an empty ledger, after a warning.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(ledger) => ledger,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "failed to load notified ledger; starting empty"
                );
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(TabsError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the full ledger to `path`, creating the containing directory
    /// first. Prior contents are replaced.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomically(path, &json)
    }

    /// Return a copy holding only entries stamped strictly after
    /// `now - retention_days` days. Entries without a timestamp are dropped.
    /// Survivors keep their relative order.
    pub fn prune(&self, retention_days: i64, now: DateTime<Utc>) -> Self {
        let cutoff = days_before(now, retention_days);
        let entries = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.at.is_some_and(|at| at > cutoff))
            .cloned()
            .collect();
        Self { entries }
    }

    /// Remember that a tab was opened for `key` at `now`.
    ///
    /// New keys are appended; an existing key is updated where it stands.
    pub fn record(&mut self, key: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) {
        self.upsert(
            key.into(),
            LedgerEntry {
                at: Some(now),
                title: title.into(),
            },
        );
    }

    fn upsert(&mut self, key: String, entry: LedgerEntry) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&LedgerEntry> {
        self.entries
            .iter()
            .find_map(|(k, entry)| (k == key).then_some(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LedgerEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Summary statistics as of `now`.
    pub fn stats(&self, now: DateTime<Utc>) -> LedgerStats {
        LedgerStats::from_ledger(self, now)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
