//! Read-only summary of the notification ledger, shown by `review-tabs stats`.

use chrono::{DateTime, Utc};

use crate::ledger::Ledger;
use crate::time_utils::days_before;

/// Fixed look-back window for the "recent" counter, independent of the
/// configured retention.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// How many repositories the report lists.
pub const TOP_REPOSITORIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerStats {
    /// Every entry in the ledger, stamped or not.
    pub total: usize,
    /// Entries stamped strictly after `now - 7 days`.
    pub recent: usize,
    /// `(owner/repo, count)` pairs, highest count first, at most three.
    pub top_repositories: Vec<(String, usize)>,
}

impl LedgerStats {
    /// Compute statistics for `ledger` as of `now`.
    ///
    /// Repositories with equal counts keep the order in which they were first
    /// seen while walking the ledger.
    pub fn from_ledger(ledger: &Ledger, now: DateTime<Utc>) -> Self {
        let cutoff = days_before(now, RECENT_WINDOW_DAYS);

        let mut recent = 0;
        let mut counts: Vec<(String, usize)> = Vec::new();
        for (key, entry) in ledger.iter() {
            if entry.at.is_some_and(|at| at > cutoff) {
                recent += 1;
            }
            let repo = repository_of(key);
            match counts.iter_mut().find(|(name, _)| name == repo) {
                Some((_, count)) => *count += 1,
                None => counts.push((repo.to_string(), 1)),
            }
        }

        // `sort_by` is stable, so ties stay in first-seen order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(TOP_REPOSITORIES);

        Self {
            total: ledger.len(),
            recent,
            top_repositories: counts,
        }
    }

    /// Human-readable report, one line per element.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total PRs notified: {}", self.total),
            format!("Last {} days: {}", RECENT_WINDOW_DAYS, self.recent),
        ];
        if !self.top_repositories.is_empty() {
            lines.push("Top repositories:".to_string());
            for (repo, count) in &self.top_repositories {
                lines.push(format!("  {repo}: {count}"));
            }
        }
        lines
    }
}

/// Repository part of an identity key (`owner/repo#12` → `owner/repo`).
fn repository_of(key: &str) -> &str {
    key.split_once('#').map_or(key, |(repo, _)| repo)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
