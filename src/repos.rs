//! Repository sync: clone or update the repositories named in a plain-text
//! list file using the `git` command line.
//!
//! A failure on one repository never aborts the batch. Each entry produces
//! an explicit [`SyncOutcome`] so callers can inspect results instead of
//! relying on log output.
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// One line of the repository list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    pub url: String,
    pub branch: String,
    pub name: String,
}

/// Result of syncing a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Cloned,
    Updated,
    Failed { stage: String, reason: String },
}

/// Aggregated results for a whole sync run, in repo-list order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub results: Vec<(RepoEntry, SyncOutcome)>,
}

impl SyncReport {
    #[must_use]
    pub fn cloned(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Cloned))
    }

    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Updated))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, SyncOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.results.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Parse the repository list format: one `<git-url> [branch]` per line,
/// whitespace-separated. Blank lines are skipped; branch defaults to `main`.
pub fn parse_repo_list(content: &str) -> Vec<RepoEntry> {
    let mut entries = Vec::new();
    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let Some(url) = parts.next() else {
            continue;
        };
        let branch = parts.next().unwrap_or("main").to_string();
        entries.push(RepoEntry {
            name: repo_name_from_url(url),
            url: url.to_string(),
            branch,
        });
    }
    entries
}

/// Derive the local directory name from a git URL: last path segment,
/// with trailing slashes and a `.git` suffix stripped.
pub fn repo_name_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    last.trim_end_matches(".git").to_string()
}

/// Clone or update every repository in `repo_file` into `clone_dir`.
///
/// Already-cloned repositories are updated via fetch/checkout/pull rather
/// than re-cloned. Failures are recorded per repository and logged.
pub fn sync_repos(repo_file: &str, clone_dir: &str) -> Result<SyncReport> {
    let content = std::fs::read_to_string(repo_file)
        .with_context(|| format!("failed to read repo list: {repo_file}"))?;

    std::fs::create_dir_all(clone_dir)
        .with_context(|| format!("failed to create clone dir: {clone_dir}"))?;

    let mut report = SyncReport::default();

    for entry in parse_repo_list(&content) {
        let dest = Path::new(clone_dir).join(&entry.name);
        let outcome = if dest.exists() {
            info!("Updating {} (branch: {})", entry.name, entry.branch);
            update_repo(&dest, &entry.branch)
        } else {
            info!("Cloning {} (branch: {}) into {}", entry.url, entry.branch, dest.display());
            clone_repo(&entry.url, &entry.branch, &dest)
        };

        if let SyncOutcome::Failed { stage, reason } = &outcome {
            warn!("Failed to sync {} during {stage}: {reason}", entry.name);
        }

        report.results.push((entry, outcome));
    }

    Ok(report)
}

fn clone_repo(url: &str, branch: &str, dest: &Path) -> SyncOutcome {
    let dest_str = dest.to_string_lossy();
    match run_git(None, &["clone", "--branch", branch, url, dest_str.as_ref()]) {
        Ok(()) => SyncOutcome::Cloned,
        Err(reason) => SyncOutcome::Failed {
            stage: "clone".to_string(),
            reason,
        },
    }
}

fn update_repo(dest: &Path, branch: &str) -> SyncOutcome {
    for (stage, args) in [
        ("fetch", vec!["fetch"]),
        ("checkout", vec!["checkout", branch]),
        ("pull", vec!["pull", "origin", branch]),
    ] {
        if let Err(reason) = run_git(Some(dest), &args) {
            return SyncOutcome::Failed {
                stage: stage.to_string(),
                reason,
            };
        }
    }
    SyncOutcome::Updated
}

/// Run a git subcommand, treating a non-zero exit status as a failure.
fn run_git(cwd: Option<&Path>, args: &[&str]) -> std::result::Result<(), String> {
    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    match cmd.status() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(format!("git {} exited with {status}", args.join(" "))),
        Err(e) => Err(format!("failed to spawn git: {e}")),
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_name_from_url() {
        assert_eq!(repo_name_from_url("https://github.com/acme/widgets.git"), "widgets");
        assert_eq!(repo_name_from_url("https://github.com/acme/widgets"), "widgets");
        assert_eq!(repo_name_from_url("https://github.com/acme/widgets/"), "widgets");
    }

    #[test]
    fn test_parse_repo_list_defaults_branch() {
        let entries = parse_repo_list("https://github.com/acme/widgets.git\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].branch, "main");
        assert_eq!(entries[0].name, "widgets");
    }

    #[test]
    fn test_parse_repo_list_explicit_branch() {
        let entries = parse_repo_list("https://github.com/acme/widgets.git develop");
        assert_eq!(entries[0].branch, "develop");
    }

    #[test]
    fn test_parse_repo_list_skips_blank_lines() {
        let content = "\nhttps://a.example/x.git\n\n   \nhttps://a.example/y.git stable\n";
        let entries = parse_repo_list(content);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "x");
        assert_eq!(entries[1].branch, "stable");
    }

    #[test]
    fn test_sync_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let repo_file = dir.path().join("repos.txt");
        std::fs::write(&repo_file, "").unwrap();
        let clone_dir = dir.path().join("repos");

        let report = sync_repos(
            repo_file.to_str().unwrap(),
            clone_dir.to_str().unwrap(),
        )
        .unwrap();
        assert!(report.results.is_empty());
        assert!(clone_dir.exists());
    }

    #[test]
    fn test_sync_missing_repo_file() {
        assert!(sync_repos("/definitely/missing/repos.txt", "/tmp/unused").is_err());
    }

    #[test]
    fn test_report_counters() {
        let entry = RepoEntry {
            url: "u".into(),
            branch: "main".into(),
            name: "n".into(),
        };
        let mut report = SyncReport::default();
        report.results.push((entry.clone(), SyncOutcome::Cloned));
        report.results.push((entry.clone(), SyncOutcome::Updated));
        report.results.push((
            entry,
            SyncOutcome::Failed {
                stage: "clone".into(),
                reason: "boom".into(),
            },
        ));
        assert_eq!(report.cloned(), 1);
        assert_eq!(report.updated(), 1);
        assert_eq!(report.failed(), 1);
    }
}
