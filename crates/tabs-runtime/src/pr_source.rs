//! PR source backed by the GitHub CLI.
//!
//! Runs `gh search prs` for open pull requests where the signed-in user is a
//! requested reviewer and parses its JSON output. Authentication is entirely
//! `gh`'s business.

use std::time::Duration;

use tabs_core::pull_request::PullRequest;

use crate::error::CommandError;
use crate::process;

/// Hard cap on how many PRs a single fetch asks for.
pub const FETCH_LIMIT: u32 = 50;

/// How long `gh` may take before the fetch is abandoned.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON fields requested from `gh`.
const FIELDS: &str = "number,url,repository,title,updatedAt,isDraft";

/// Something that can list pull requests awaiting review, in a meaningful
/// order.
#[allow(async_fn_in_trait)]
pub trait PullRequestSource {
    async fn fetch(&self, exclude_draft: bool) -> Result<Vec<PullRequest>, CommandError>;
}

// ── GhCliSource ───────────────────────────────────────────────────────────────

/// [`PullRequestSource`] that shells out to `gh`.
#[derive(Debug, Clone)]
pub struct GhCliSource {
    program: String,
    timeout: Duration,
}

impl Default for GhCliSource {
    fn default() -> Self {
        Self::new("gh", FETCH_TIMEOUT)
    }
}

impl GhCliSource {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Arguments passed to `gh` for one fetch.
    pub fn search_args(exclude_draft: bool) -> Vec<String> {
        let mut args = vec![
            "search".to_string(),
            "prs".to_string(),
            "--review-requested=@me".to_string(),
            "--state=open".to_string(),
            "--limit".to_string(),
            FETCH_LIMIT.to_string(),
            "--json".to_string(),
            FIELDS.to_string(),
        ];
        if exclude_draft {
            args.push("--draft=false".to_string());
        }
        args
    }
}

impl PullRequestSource for GhCliSource {
    async fn fetch(&self, exclude_draft: bool) -> Result<Vec<PullRequest>, CommandError> {
        let args = Self::search_args(exclude_draft);
        tracing::debug!(program = %self.program, ?args, "fetching review requests");

        let output = process::run(&self.program, &args, Some(self.timeout)).await?;
        let prs = parse_pull_requests(&self.program, &output.stdout)?;

        Ok(if exclude_draft {
            prs.into_iter().filter(|pr| !pr.is_draft).collect()
        } else {
            prs
        })
    }
}

/// Decode the JSON array printed by `gh search prs --json …`.
///
/// Empty output is treated as an empty list.
pub fn parse_pull_requests(program: &str, stdout: &[u8]) -> Result<Vec<PullRequest>, CommandError> {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|source| CommandError::MalformedOutput {
        program: program.to_string(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"number": 3, "url": "https://github.com/acme/api/pull/3",
         "repository": {"name": "api", "nameWithOwner": "acme/api"},
         "title": "Ready one", "updatedAt": "2024-06-01T10:00:00Z", "isDraft": false},
        {"number": 9, "url": "https://github.com/acme/web/pull/9",
         "repository": {"name": "web", "nameWithOwner": "acme/web"},
         "title": "Draft one", "updatedAt": "2024-06-01T11:00:00Z", "isDraft": true}
    ]"#;

    // ── search_args ───────────────────────────────────────────────────────────

    #[test]
    fn test_search_args_include_filters_and_limit() {
        let args = GhCliSource::search_args(false);
        assert_eq!(&args[..2], ["search", "prs"]);
        assert!(args.contains(&"--review-requested=@me".to_string()));
        assert!(args.contains(&"--state=open".to_string()));
        let limit_at = args.iter().position(|a| a == "--limit").unwrap();
        assert_eq!(args[limit_at + 1], "50");
        let json_at = args.iter().position(|a| a == "--json").unwrap();
        assert_eq!(args[json_at + 1], "number,url,repository,title,updatedAt,isDraft");
        assert!(!args.contains(&"--draft=false".to_string()));
    }

    #[test]
    fn test_search_args_exclude_draft() {
        let args = GhCliSource::search_args(true);
        assert_eq!(args.last().map(String::as_str), Some("--draft=false"));
    }

    // ── parse_pull_requests ───────────────────────────────────────────────────

    #[test]
    fn test_parse_keeps_order() {
        let prs = parse_pull_requests("gh", SAMPLE.as_bytes()).unwrap();
        let keys: Vec<String> = prs.iter().map(PullRequest::identity_key).collect();
        assert_eq!(keys, vec!["acme/api#3", "acme/web#9"]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_pull_requests("gh", b"").unwrap().is_empty());
        assert!(parse_pull_requests("gh", b"  \n").unwrap().is_empty());
        assert!(parse_pull_requests("gh", b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_output() {
        let err = parse_pull_requests("gh", b"<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, CommandError::MalformedOutput { .. }));
    }

    // ── GhCliSource::fetch against a stand-in script ─────────────────────────

    #[cfg(unix)]
    fn fake_gh(dir: &tempfile::TempDir, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("gh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_parses_script_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let program = fake_gh(&dir, &format!("cat <<'JSON'\n{SAMPLE}\nJSON"));
        let source = GhCliSource::new(program, FETCH_TIMEOUT);

        let prs = source.fetch(false).await.unwrap();
        assert_eq!(prs.len(), 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_exclude_draft_filters_client_side() {
        let dir = tempfile::TempDir::new().unwrap();
        let program = fake_gh(&dir, &format!("cat <<'JSON'\n{SAMPLE}\nJSON"));
        let source = GhCliSource::new(program, FETCH_TIMEOUT);

        let prs = source.fetch(true).await.unwrap();
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].identity_key(), "acme/api#3");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_passes_arguments() {
        let dir = tempfile::TempDir::new().unwrap();
        let args_file = dir.path().join("args.txt");
        let program = fake_gh(
            &dir,
            &format!("echo \"$@\" > '{}'\necho '[]'", args_file.display()),
        );
        let source = GhCliSource::new(program, FETCH_TIMEOUT);

        source.fetch(true).await.unwrap();
        let recorded = std::fs::read_to_string(&args_file).unwrap();
        assert!(recorded.contains("search prs --review-requested=@me"));
        assert!(recorded.trim_end().ends_with("--draft=false"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_nonzero_exit_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let program = fake_gh(&dir, "echo 'gh: not logged in' >&2\nexit 4");
        let source = GhCliSource::new(program, FETCH_TIMEOUT);

        let err = source.fetch(false).await.unwrap_err();
        assert!(matches!(err, CommandError::ExitStatus { .. }));
        assert!(err.to_string().contains("not logged in"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_times_out() {
        let dir = tempfile::TempDir::new().unwrap();
        let program = fake_gh(&dir, "sleep 5\necho '[]'");
        let source = GhCliSource::new(program, Duration::from_millis(100));

        let err = source.fetch(false).await.unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
    }
}
