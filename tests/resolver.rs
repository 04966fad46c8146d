//! History-resolver scenarios against real temporary repositories.

mod common;

use std::path::Path;
use std::time::Duration;

use gitscribe::commands;
use gitscribe::git::{
    current_branch, detect_default_branch, gather_commits, is_repository,
};
use gitscribe::models::{Command, Msg};

use common::{AUTHOR, commit_file, commit_file_as, git, init_repo};

fn subjects(commits: &[gitscribe::models::Commit]) -> Vec<&str> {
    commits.iter().map(|c| c.subject.as_str()).collect()
}

#[test]
fn plain_directories_are_not_repositories() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();

    assert!(!is_repository(dir.path()));

    init_repo(dir.path());
    assert!(is_repository(dir.path()));
}

#[test]
fn default_branch_is_main_when_nothing_else_exists() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    // Freshly initialized repository: no commits, no branches, no remote.
    let dir = assert_fs::TempDir::new().unwrap();
    init_repo(dir.path());

    assert_eq!(detect_default_branch(dir.path()), "main");
}

#[test]
fn default_branch_prefers_candidate_names_in_order() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "a.txt", "a", "base");
    git(dir.path(), &["branch", "-M", "master"]);
    git(dir.path(), &["branch", "dev"]);

    // Both "master" and "dev" exist; "master" comes first in the probe order.
    assert_eq!(detect_default_branch(dir.path()), "master");
}

#[test]
fn default_branch_falls_back_to_the_branch_listing() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "a.txt", "a", "base");
    git(dir.path(), &["branch", "-M", "release-2024"]);

    assert_eq!(detect_default_branch(dir.path()), "release-2024");
}

#[test]
fn default_branch_honors_the_remote_advertised_head() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let upstream = assert_fs::TempDir::new().unwrap();
    init_repo(upstream.path());
    commit_file(upstream.path(), "a.txt", "a", "base");
    git(upstream.path(), &["branch", "-M", "release-2024"]);

    let clones = assert_fs::TempDir::new().unwrap();
    let clone_path = clones.path().join("clone");
    git(
        clones.path(),
        &[
            "clone",
            "--quiet",
            upstream.path().to_str().unwrap(),
            clone_path.to_str().unwrap(),
        ],
    );
    // Rename the local branch so only the remote still advertises the name.
    git(&clone_path, &["branch", "-M", "scratch"]);

    assert_eq!(detect_default_branch(&clone_path), "release-2024");
}

/// Build a repository with a base commit, a simulated remote-tracking
/// `origin/dev` at the base, and a `feature` branch with two commits on top.
fn feature_repo(dir: &Path) {
    init_repo(dir);
    commit_file(dir, "base.txt", "base", "base work");
    git(dir, &["update-ref", "refs/remotes/origin/dev", "HEAD"]);
    git(dir, &["checkout", "--quiet", "-b", "feature"]);
    commit_file(dir, "one.txt", "one", "feature one");
    commit_file(dir, "two.txt", "two", "feature two");
}

#[test]
fn parent_existing_only_on_the_remote_scopes_the_range() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();
    feature_repo(dir.path());

    // "dev" has no local ref; the resolver must fall back to origin/dev and
    // exclude everything reachable from the merge base.
    let (commits, branch) = gather_commits(dir.path(), AUTHOR, "dev", true).unwrap();

    assert_eq!(branch, "feature");
    assert_eq!(subjects(&commits), vec!["feature two", "feature one"]);
    assert_eq!(commits[0].files, vec!["two.txt".to_string()]);
    assert_eq!(commits[1].files, vec!["one.txt".to_string()]);
}

#[test]
fn missing_parent_degenerates_to_the_whole_branch() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();
    feature_repo(dir.path());

    let (commits, _) = gather_commits(dir.path(), AUTHOR, "no-such-branch", true).unwrap();

    // No merge base is involved: the base commit is included.
    assert_eq!(
        subjects(&commits),
        vec!["feature two", "feature one", "base work"]
    );
}

#[test]
fn all_refs_scope_reaches_other_branches() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();
    feature_repo(dir.path());
    git(dir.path(), &["checkout", "--quiet", "-b", "side", "refs/remotes/origin/dev"]);
    commit_file(dir.path(), "side.txt", "side", "side work");
    git(dir.path(), &["checkout", "--quiet", "feature"]);

    let (scoped, _) = gather_commits(dir.path(), AUTHOR, "dev", true).unwrap();
    assert!(!subjects(&scoped).contains(&"side work"));

    let (all, branch) = gather_commits(dir.path(), AUTHOR, "dev", false).unwrap();
    assert_eq!(branch, "feature");
    assert!(subjects(&all).contains(&"side work"));
}

#[test]
fn author_filter_matches_name_or_email_substring() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();
    init_repo(dir.path());
    commit_file(dir.path(), "a.txt", "a", "by ada");
    commit_file_as(
        dir.path(),
        "Bob Dobbs",
        "bob@example.com",
        "b.txt",
        "b",
        "by bob",
    );

    let (by_name, _) = gather_commits(dir.path(), "Ada", "main", false).unwrap();
    assert_eq!(subjects(&by_name), vec!["by ada"]);

    let (by_email, _) = gather_commits(dir.path(), "bob@example.com", "main", false).unwrap();
    assert_eq!(subjects(&by_email), vec!["by bob"]);
}

#[test]
fn current_branch_reports_the_checked_out_branch() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();
    feature_repo(dir.path());

    assert_eq!(current_branch(dir.path()).unwrap(), "feature");
}

#[tokio::test]
async fn fetch_command_caps_to_the_newest_commits() {
    if !common::git_available() {
        eprintln!("skipping: git not available");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();
    init_repo(dir.path());
    for i in 1..=5 {
        commit_file(
            dir.path(),
            &format!("f{i}.txt"),
            "x",
            &format!("commit {i}"),
        );
    }

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    commands::dispatch(
        &tokio::runtime::Handle::current(),
        &tx,
        Command::FetchHistory {
            repo: dir.path().to_path_buf(),
            author: AUTHOR.to_string(),
            parent_branch: "no-such-branch".to_string(),
            current_branch_only: true,
            max_commits: 2,
        },
    );

    let msg = tokio::time::timeout(Duration::from_secs(30), rx.recv())
        .await
        .expect("fetch timed out")
        .expect("channel closed");
    match msg {
        Msg::FetchDone(Ok((commits, _))) => {
            // Newest first, truncated, never re-sorted.
            assert_eq!(subjects(&commits), vec!["commit 5", "commit 4"]);
        }
        other => panic!("unexpected message: {other:?}"),
    }
    assert!(rx.try_recv().is_err());
}
