#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

pub const AUTHOR: &str = "Ada Lovelace";
pub const AUTHOR_EMAIL: &str = "ada@example.com";

/// Integration tests drive a real `git` binary; environments without one
/// skip the repository-backed scenarios instead of failing.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

pub fn git_as(repo: &Path, author: &str, email: &str, args: &[&str]) {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .env("GIT_AUTHOR_NAME", author)
        .env("GIT_AUTHOR_EMAIL", email)
        .env("GIT_COMMITTER_NAME", author)
        .env("GIT_COMMITTER_EMAIL", email)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_SYSTEM", "/dev/null")
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

pub fn git(repo: &Path, args: &[&str]) {
    git_as(repo, AUTHOR, AUTHOR_EMAIL, args);
}

pub fn init_repo(repo: &Path) {
    git(repo, &["init", "--quiet"]);
}

/// Write (or overwrite) a file and commit it.
pub fn commit_file(repo: &Path, file: &str, content: &str, subject: &str) {
    commit_file_as(repo, AUTHOR, AUTHOR_EMAIL, file, content, subject);
}

pub fn commit_file_as(
    repo: &Path,
    author: &str,
    email: &str,
    file: &str,
    content: &str,
    subject: &str,
) {
    std::fs::write(repo.join(file), content).expect("failed to write file");
    git_as(repo, author, email, &["add", "."]);
    git_as(repo, author, email, &["commit", "--quiet", "-m", subject]);
}

pub fn commit_empty(repo: &Path, subject: &str) {
    git(repo, &["commit", "--quiet", "--allow-empty", "-m", subject]);
}
