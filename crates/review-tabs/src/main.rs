mod bootstrap;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tabs_core::settings::Settings;
use tabs_runtime::commands;
use tabs_runtime::notifier::OsascriptNotifier;
use tabs_runtime::orchestrator::RunOrchestrator;
use tabs_runtime::pr_source::GhCliSource;
use tabs_runtime::tab_launcher::BrowserLauncher;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::parse();
    let started_at = Utc::now();

    let paths = bootstrap::resolve_paths(&settings);
    bootstrap::ensure_directories(&paths)?;
    bootstrap::setup_logging(settings.effective_log_level(), &paths.log_file, started_at)?;

    tracing::debug!(
        "review-tabs v{} starting, data dir {}",
        env!("CARGO_PKG_VERSION"),
        paths.data_dir.display()
    );

    // Subcommands act on stored state and never start a review pass.
    if let Some(command) = settings.command {
        bootstrap::emit_report(&commands::execute(command, &paths)?);
        return Ok(());
    }

    if settings.dry_run {
        tracing::info!("Checking for PRs awaiting review (dry run)...");
    } else {
        tracing::info!("Checking for PRs awaiting review...");
    }

    let orchestrator = RunOrchestrator::new(
        paths,
        GhCliSource::default(),
        BrowserLauncher::new(settings.browser.clone(), settings.dry_run),
        OsascriptNotifier::default(),
    );
    let outcome = orchestrator.run().await?;
    tracing::debug!(?outcome, "run finished");

    Ok(())
}
