//! History resolver: every query shells out to the `git` executable with
//! explicit `-C <path>` working-directory scoping. No partial results: any
//! invocation failure aborts the whole operation.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::models::Commit;

const LOG_FORMAT: &str = "%H|%an|%ae|%ad|%s";

/// Candidate parent-branch names, probed in this order.
const DEFAULT_BRANCH_CANDIDATES: [&str; 5] = ["main", "master", "trunk", "development", "dev"];

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("{} is not a Git repository", .0.display())]
    NotARepository(PathBuf),

    #[error("git {action} failed: {detail}")]
    Invocation { action: String, detail: String },
}

fn run_output(repo: &Path, args: &[&str]) -> Result<String, GitError> {
    let action = args.first().copied().unwrap_or_default().to_string();
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .map_err(|e| GitError::Invocation {
            action: action.clone(),
            detail: e.to_string(),
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(GitError::Invocation {
            action,
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// True iff git reports the path is inside a working tree. Invocation
/// failures count as "not a repository", not as errors.
pub fn is_repository(path: &Path) -> bool {
    run_output(path, &["rev-parse", "--is-inside-work-tree"])
        .map(|out| out.trim() == "true")
        .unwrap_or(false)
}

pub fn current_branch(path: &Path) -> Result<String, GitError> {
    let out = run_output(path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(out.trim().to_string())
}

fn ref_exists(path: &Path, refname: &str) -> bool {
    Command::new("git")
        .arg("-C")
        .arg(path)
        .args(["rev-parse", "--verify", "--quiet", refname])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Best-effort guess of the repository's default branch. Probes the
/// well-known candidate names locally and as `origin/` remote-tracking refs,
/// then the remote's advertised HEAD, then the first listed local branch.
/// Never fails; the last resort is the literal `"main"`.
pub fn detect_default_branch(path: &Path) -> String {
    for candidate in DEFAULT_BRANCH_CANDIDATES {
        if ref_exists(path, &format!("refs/heads/{candidate}"))
            || ref_exists(path, &format!("refs/remotes/origin/{candidate}"))
        {
            return candidate.to_string();
        }
    }

    if let Ok(out) = run_output(path, &["remote", "show", "origin"]) {
        for line in out.lines() {
            if let Some(rest) = line.trim().strip_prefix("HEAD branch:") {
                let name = rest.trim();
                if !name.is_empty() && name != "(unknown)" {
                    return name.to_string();
                }
            }
        }
    }

    if let Ok(out) = run_output(path, &["branch", "--format=%(refname:short)"]) {
        if let Some(first) = out.lines().map(str::trim).find(|l| !l.is_empty()) {
            return first.to_string();
        }
    }

    "main".to_string()
}

pub fn merge_base(path: &Path, a: &str, b: &str) -> Result<String, GitError> {
    let out = run_output(path, &["merge-base", a, b])?;
    Ok(out.trim().to_string())
}

/// Last component of the canonicalized repository path, for export file
/// naming and the workbook summary.
pub fn repository_name(path: &Path) -> String {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    canonical
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "repository".to_string())
}

/// Collect all commits matching the author filter within the requested
/// branch scope, newest first, each with its changed-file list.
///
/// With `current_branch_only` the scope is the range `<merge-base>..<head>`
/// against the parent branch, resolved locally first, then as
/// `origin/<parent>`; when the parent cannot be resolved (or the merge-base
/// computation fails) the range degenerates to everything reachable from the
/// current branch. Without it the scope is `--all`.
pub fn gather_commits(
    path: &Path,
    author: &str,
    parent_branch: &str,
    current_branch_only: bool,
) -> Result<(Vec<Commit>, String), GitError> {
    let current = current_branch(path)?;

    let scope = if current_branch_only {
        commit_scope(path, &current, parent_branch)
    } else {
        "--all".to_string()
    };

    let pretty = format!("--pretty=format:{LOG_FORMAT}");
    let author_filter = format!("--author={author}");
    let out = run_output(path, &["log", &pretty, &author_filter, &scope])?;

    let mut commits = Vec::new();
    for line in out.lines() {
        let Some(mut commit) = parse_log_line(line) else {
            continue;
        };
        commit.files = changed_files(path, &commit.hash)?;
        commits.push(commit);
    }

    Ok((commits, current))
}

fn commit_scope(path: &Path, current: &str, parent_branch: &str) -> String {
    let resolved_parent = if ref_exists(path, &format!("refs/heads/{parent_branch}")) {
        Some(parent_branch.to_string())
    } else if ref_exists(path, &format!("refs/remotes/origin/{parent_branch}")) {
        Some(format!("origin/{parent_branch}"))
    } else {
        None
    };

    match resolved_parent {
        Some(parent) => match merge_base(path, current, &parent) {
            Ok(base) => format!("{base}..{current}"),
            Err(_) => current.to_string(),
        },
        None => current.to_string(),
    }
}

/// Parse one `%H|%an|%ae|%ad|%s` log line. Lines with fewer than five
/// fields are skipped by the caller.
fn parse_log_line(line: &str) -> Option<Commit> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let fields: Vec<&str> = line.splitn(5, '|').collect();
    if fields.len() < 5 {
        return None;
    }
    Some(Commit {
        hash: fields[0].to_string(),
        author: fields[1].to_string(),
        email: fields[2].to_string(),
        date: fields[3].to_string(),
        subject: fields[4].to_string(),
        files: Vec::new(),
    })
}

fn changed_files(path: &Path, hash: &str) -> Result<Vec<String>, GitError> {
    let out = run_output(path, &["show", "--name-only", "--pretty=", hash])?;
    let trimmed = out.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    Ok(trimmed.lines().map(|l| l.to_string()).collect())
}
