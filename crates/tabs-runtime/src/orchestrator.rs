//! One review pass.
//!
//! Loads the configuration, stops early when paused, prunes the ledger,
//! fetches review requests, opens tabs for the ones not yet surfaced, sends a
//! single summary notification and persists the ledger. Each step runs once;
//! recurrence is left to whatever invokes the binary.

use chrono::{DateTime, Utc};
use tabs_core::config::Configuration;
use tabs_core::ledger::Ledger;
use tabs_core::paths::AppPaths;
use tabs_core::pull_request::PullRequest;

use crate::notifier::DesktopNotifier;
use crate::pr_source::PullRequestSource;
use crate::tab_launcher::TabLauncher;

/// Title of the summary notification.
pub const NOTIFICATION_TITLE: &str = "PR Review";

// ── Public types ──────────────────────────────────────────────────────────────

/// How a pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// `paused` was set; nothing was read or written besides the config.
    Paused,
    /// The source returned no PRs (or failed); the pruned ledger was saved.
    NoPullRequests { pruned: usize },
    /// Tabs were attempted for `new` PRs, capped by `maxTabsToOpen`.
    Completed {
        fetched: usize,
        new: usize,
        opened: usize,
        failed: usize,
    },
}

// ── RunOrchestrator ───────────────────────────────────────────────────────────

/// Drives a single pass over injected collaborators.
pub struct RunOrchestrator<S, L, N> {
    paths: AppPaths,
    source: S,
    launcher: L,
    notifier: N,
}

impl<S, L, N> RunOrchestrator<S, L, N>
where
    S: PullRequestSource,
    L: TabLauncher,
    N: DesktopNotifier,
{
    pub fn new(paths: AppPaths, source: S, launcher: L, notifier: N) -> Self {
        Self {
            paths,
            source,
            launcher,
            notifier,
        }
    }

    /// Run one pass stamped with the current time.
    pub async fn run(&self) -> tabs_core::Result<RunOutcome> {
        self.run_at(Utc::now()).await
    }

    /// Run one pass, using `now` for pruning and for new ledger entries.
    ///
    /// Collaborator failures are logged and absorbed. Only a failure to write
    /// the ledger is returned as an error.
    pub async fn run_at(&self, now: DateTime<Utc>) -> tabs_core::Result<RunOutcome> {
        let config = Configuration::load_from(&self.paths.config_file);
        if config.paused {
            tracing::info!("Paused");
            return Ok(RunOutcome::Paused);
        }

        let loaded = Ledger::load_from(&self.paths.ledger_file);
        let mut ledger = loaded.prune(config.notified_retention_days, now);
        let pruned = loaded.len() - ledger.len();
        if pruned > 0 {
            tracing::debug!(
                pruned,
                retention_days = config.notified_retention_days,
                "pruned expired ledger entries"
            );
        }

        let prs = match self.source.fetch(config.exclude_draft).await {
            Ok(prs) => prs,
            Err(e) => {
                tracing::error!("Failed to fetch PRs: {}", e);
                Vec::new()
            }
        };

        if prs.is_empty() {
            tracing::info!("No PRs awaiting review");
            ledger.save_to(&self.paths.ledger_file)?;
            return Ok(RunOutcome::NoPullRequests { pruned });
        }

        if config.tab_budget() == 0 {
            tracing::warn!(
                max_tabs_to_open = config.max_tabs_to_open,
                "maxTabsToOpen is not positive; no tabs will be opened"
            );
        }
        let selected = select_new(&prs, &ledger, config.tab_budget());
        tracing::info!("Found {} PRs, {} new", prs.len(), selected.len());

        let mut opened = 0;
        let mut failed = 0;
        for pr in &selected {
            let key = pr.identity_key();
            match self.launcher.open(&pr.url).await {
                Ok(()) => {
                    tracing::info!("Opened: {} {}", key, pr.title);
                    ledger.record(key, pr.title.clone(), now);
                    opened += 1;
                }
                Err(e) => {
                    tracing::error!("Failed to open {}: {}", key, e);
                    failed += 1;
                }
            }
        }

        if opened > 0 && config.enable_notification {
            let message = notification_message(opened);
            if let Err(e) = self.notifier.notify(NOTIFICATION_TITLE, &message).await {
                tracing::debug!(error = %e, "desktop notification failed");
            }
        }

        ledger.save_to(&self.paths.ledger_file)?;
        tracing::info!("Done");

        Ok(RunOutcome::Completed {
            fetched: prs.len(),
            new: selected.len(),
            opened,
            failed,
        })
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// PRs absent from `ledger`, in fetch order, at most `limit` of them.
fn select_new<'a>(prs: &'a [PullRequest], ledger: &Ledger, limit: usize) -> Vec<&'a PullRequest> {
    prs.iter()
        .filter(|pr| !ledger.contains(&pr.identity_key()))
        .take(limit)
        .collect()
}

fn notification_message(opened: usize) -> String {
    if opened == 1 {
        "1 new PR to review".to_string()
    } else {
        format!("{opened} new PRs to review")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
