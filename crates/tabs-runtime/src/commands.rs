//! Out-of-band subcommands that act on stored state without running a pass.

use chrono::{DateTime, Utc};
use tabs_core::config::Configuration;
use tabs_core::ledger::Ledger;
use tabs_core::paths::AppPaths;
use tabs_core::settings::Command;

/// Execute `command` against the files in `paths` and return the lines to
/// show the user. `pause` and `resume` persist the configuration immediately.
pub fn execute(command: Command, paths: &AppPaths) -> tabs_core::Result<Vec<String>> {
    execute_at(command, paths, Utc::now())
}

/// [`execute`] with an explicit clock for the statistics window.
pub fn execute_at(
    command: Command,
    paths: &AppPaths,
    now: DateTime<Utc>,
) -> tabs_core::Result<Vec<String>> {
    match command {
        Command::Pause => set_paused(paths, true),
        Command::Resume => set_paused(paths, false),
        Command::Status => Ok(status_lines(&Configuration::load_from(&paths.config_file))),
        Command::Stats => Ok(Ledger::load_from(&paths.ledger_file)
            .stats(now)
            .report_lines()),
    }
}

fn set_paused(paths: &AppPaths, paused: bool) -> tabs_core::Result<Vec<String>> {
    let mut config = Configuration::load_from(&paths.config_file);
    config.paused = paused;
    config.save_to(&paths.config_file)?;
    tracing::debug!(paused, path = %paths.config_file.display(), "configuration saved");

    Ok(vec![if paused {
        "Paused. Run `review-tabs resume` to start opening tabs again.".to_string()
    } else {
        "Resumed.".to_string()
    }])
}

fn status_lines(config: &Configuration) -> Vec<String> {
    vec![
        format!(
            "Status: {}",
            if config.paused { "paused" } else { "active" }
        ),
        format!("Max tabs per run: {}", config.max_tabs_to_open),
        format!("Exclude drafts: {}", config.exclude_draft),
        format!("Retention: {} days", config.notified_retention_days),
        format!("Notifications: {}", config.enable_notification),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> AppPaths {
        AppPaths::in_dir(dir.path())
    }

    // ── pause / resume ────────────────────────────────────────────────────

    #[test]
    fn test_pause_persists_flag() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);

        let lines = execute(Command::Pause, &paths).unwrap();
        assert!(lines[0].starts_with("Paused"));
        assert!(Configuration::load_from(&paths.config_file).paused);
    }

    #[test]
    fn test_resume_clears_flag_and_keeps_other_fields() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        Configuration {
            paused: true,
            max_tabs_to_open: 2,
            ..Default::default()
        }
        .save_to(&paths.config_file)
        .unwrap();

        let lines = execute(Command::Resume, &paths).unwrap();
        assert_eq!(lines, vec!["Resumed.".to_string()]);

        let config = Configuration::load_from(&paths.config_file);
        assert!(!config.paused);
        assert_eq!(config.max_tabs_to_open, 2);
    }

    #[test]
    fn test_pause_does_not_touch_ledger() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        execute(Command::Pause, &paths).unwrap();
        assert!(!paths.ledger_file.exists());
    }

    // ── status ────────────────────────────────────────────────────────────

    #[test]
    fn test_status_reports_without_writing() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);

        let lines = execute(Command::Status, &paths).unwrap();
        assert_eq!(lines[0], "Status: active");
        assert!(!paths.config_file.exists());

        execute(Command::Pause, &paths).unwrap();
        let lines = execute(Command::Status, &paths).unwrap();
        assert_eq!(lines[0], "Status: paused");
    }

    #[test]
    fn test_status_lists_settings() {
        let lines = status_lines(&Configuration::default());
        assert!(lines.contains(&"Max tabs per run: 5".to_string()));
        assert!(lines.contains(&"Retention: 7 days".to_string()));
    }

    // ── stats ─────────────────────────────────────────────────────────────

    #[test]
    fn test_stats_on_missing_ledger() {
        let dir = TempDir::new().unwrap();
        let lines = execute(Command::Stats, &paths(&dir)).unwrap();
        assert_eq!(lines[0], "Total PRs notified: 0");
        assert!(!lines.iter().any(|l| l == "Top repositories:"));
    }

    #[test]
    fn test_stats_reads_ledger_without_pruning() {
        let dir = TempDir::new().unwrap();
        let paths = paths(&dir);
        let now = Utc::now();
        let mut ledger = Ledger::default();
        ledger.record("A#1", "t", now);
        ledger.record("A#2", "t", now);
        ledger.record("B#3", "t", now - Duration::days(60));
        ledger.save_to(&paths.ledger_file).unwrap();
        let before = std::fs::read_to_string(&paths.ledger_file).unwrap();

        let lines = execute_at(Command::Stats, &paths, now).unwrap();
        assert_eq!(
            lines,
            vec![
                "Total PRs notified: 3".to_string(),
                "Last 7 days: 2".to_string(),
                "Top repositories:".to_string(),
                "  A: 2".to_string(),
                "  B: 1".to_string(),
            ]
        );
        assert_eq!(std::fs::read_to_string(&paths.ledger_file).unwrap(), before);
    }
}
