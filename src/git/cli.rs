//! Git subprocess client.
//!
//! Arguments are passed straight to `git` without a shell, so author names and
//! file paths never need quoting.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::NaiveDate;
use tracing::debug;

use super::VcsClient;
use crate::types::{CommitRecord, Result, YearError};

/// Field separator for `git log --format` (ASCII unit separator)
const FIELD_SEP: char = '\u{1f}';
const LOG_FORMAT: &str = "--format=%H%x1f%ad%x1f%an%x1f%s";

/// Runs git commands inside one repository
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    pub fn new(repo_path: impl AsRef<Path>) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Name configured as `user.name` for this repository, if any
    pub fn configured_author(&self) -> Option<String> {
        self.run(&["config", "user.name"])
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Run a git command and return its stdout
    fn run(&self, args: &[&str]) -> Result<String> {
        let subcommand = args.first().copied().unwrap_or_default();
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| YearError::git(subcommand, format!("failed to spawn git: {}", e)))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(YearError::git(
                subcommand,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

impl VcsClient for GitCli {
    fn tracked_files(&self) -> Result<Vec<String>> {
        // NUL-separated output keeps non-ASCII paths unquoted
        let output = self.run(&["ls-files", "-z"])?;
        Ok(output
            .split('\0')
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    fn log_commits(
        &self,
        path: &str,
        author: &str,
        since: NaiveDate,
    ) -> Result<Vec<CommitRecord>> {
        // A bare date means that day at the current clock time to git
        let since = format!("--since={}", since.format("%Y-%m-%d 00:00:00"));
        let author = format!("--author={}", author);
        let output = self.run(&[
            "log",
            &since,
            &author,
            LOG_FORMAT,
            "--date=short",
            "--",
            path,
        ])?;
        parse_log_output(&output)
    }

    fn show_diff(&self, hash: &str, path: &str) -> Result<String> {
        self.run(&["show", "--format=", hash, "--", path])
    }
}

/// Parse `git log` output produced with the unit-separated hash/date/author/subject format
pub fn parse_log_output(output: &str) -> Result<Vec<CommitRecord>> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let mut fields = line.splitn(4, FIELD_SEP);
            match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(hash), Some(date), Some(author), message) => Ok(CommitRecord {
                    hash: hash.to_string(),
                    date: date.to_string(),
                    author: author.to_string(),
                    message: message.unwrap_or_default().to_string(),
                }),
                _ => Err(YearError::git(
                    "log",
                    format!("unexpected log line: {:?}", line),
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_log_output() {
        let output = "abc123\u{1f}2026-05-01\u{1f}Ada Lovelace\u{1f}fix: handle a|b pipes\n\
                      def456\u{1f}2026-01-15\u{1f}Ada Lovelace\u{1f}init\n";
        let commits = parse_log_output(output).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].hash, "abc123");
        assert_eq!(commits[0].date, "2026-05-01");
        assert_eq!(commits[0].author, "Ada Lovelace");
        assert_eq!(commits[0].message, "fix: handle a|b pipes");
        assert_eq!(commits[1].message, "init");
    }

    #[test]
    fn test_parse_log_output_empty() {
        assert!(parse_log_output("").unwrap().is_empty());
        assert!(parse_log_output("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_log_output_malformed() {
        let err = parse_log_output("just-a-hash").unwrap_err();
        assert!(matches!(err, YearError::Git { .. }));
    }

    #[test]
    fn test_not_a_repository() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::new(temp.path());
        // Either git is missing or the directory is not a repository; both are errors
        assert!(git.tracked_files().is_err() || git_unavailable());
    }

    fn git_unavailable() -> bool {
        Command::new("git").arg("--version").output().is_err()
    }

    fn git(dir: &Path, args: &[&str]) {
        git_at(dir, None, args);
    }

    fn git_at(dir: &Path, date: Option<&str>, args: &[&str]) {
        let mut command = Command::new("git");
        if let Some(date) = date {
            command
                .env("GIT_AUTHOR_DATE", date)
                .env("GIT_COMMITTER_DATE", date);
        }
        let status = command
            .args([
                "-c",
                "user.name=Ada",
                "-c",
                "user.email=ada@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(status.status.success(), "git {:?} failed", args);
    }

    #[test]
    fn test_real_repository_history() {
        if git_unavailable() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        git(dir, &["init", "-q"]);
        fs::write(dir.join("notes.txt"), "one\ntwo\n").unwrap();
        git(dir, &["add", "notes.txt"]);
        git(dir, &["commit", "-q", "-m", "add notes"]);
        fs::write(dir.join("notes.txt"), "one\nthree\nfour\n").unwrap();
        git(dir, &["commit", "-q", "-am", "rewrite notes"]);

        let client = GitCli::new(dir);
        assert_eq!(client.tracked_files().unwrap(), vec!["notes.txt".to_string()]);

        let since = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let commits = client.log_commits("notes.txt", "Ada", since).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "rewrite notes");
        assert_eq!(commits[1].message, "add notes");

        let nobody = client.log_commits("notes.txt", "Nobody Else", since).unwrap();
        assert!(nobody.is_empty());

        let diff = client.show_diff(&commits[0].hash, "notes.txt").unwrap();
        assert!(diff.contains("-two"));
        assert!(diff.contains("+three"));
    }

    #[test]
    fn test_since_includes_start_of_day() {
        if git_unavailable() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        git(dir, &["init", "-q"]);
        fs::write(dir.join("plan.md"), "old\n").unwrap();
        git(dir, &["add", "plan.md"]);
        git_at(dir, Some("2025-12-31T23:59:50"), &["commit", "-q", "-m", "last year"]);
        fs::write(dir.join("plan.md"), "new\n").unwrap();
        git_at(dir, Some("2026-01-01T00:00:05"), &["commit", "-q", "-am", "first thing"]);

        let since = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let commits = GitCli::new(dir).log_commits("plan.md", "Ada", since).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "first thing");
        assert_eq!(commits[0].date, "2026-01-01");
    }
}
