//! Command orchestrator: turns [`Command`] descriptions into tokio tasks.
//! Dispatch never blocks the event loop; every task delivers exactly one
//! [`Msg`] back over the channel and ends. Completion order across commands
//! is unspecified, and there is no cancellation: a command issued on a
//! screen the user has since left still completes and still reports.

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep;

use crate::export;
use crate::git;
use crate::models::{Command, Msg};

pub fn dispatch(handle: &Handle, tx: &UnboundedSender<Msg>, command: Command) {
    match command {
        Command::FetchHistory {
            repo,
            author,
            parent_branch,
            current_branch_only,
            max_commits,
        } => {
            let tx = tx.clone();
            handle.spawn_blocking(move || {
                tracing::info!(
                    repo = %repo.display(),
                    author = %author,
                    current_branch_only,
                    "fetching commit history"
                );
                let result =
                    git::gather_commits(&repo, &author, &parent_branch, current_branch_only).map(
                        |(mut commits, branch)| {
                            if max_commits > 0 && commits.len() > max_commits {
                                commits.truncate(max_commits);
                            }
                            (commits, branch)
                        },
                    );
                match &result {
                    Ok((commits, branch)) => {
                        tracing::info!(count = commits.len(), branch = %branch, "history fetch finished");
                    }
                    Err(e) => tracing::warn!(error = %e, "history fetch failed"),
                }
                let _ = tx.send(Msg::FetchDone(result));
            });
        }

        Command::Export {
            commits,
            repo,
            format,
        } => {
            let tx = tx.clone();
            handle.spawn_blocking(move || {
                let result = export::export(&commits, &repo, format);
                match &result {
                    Ok(outcome) => {
                        tracing::info!(path = %outcome.path.display(), count = outcome.count, "export finished");
                    }
                    Err(e) => tracing::warn!(error = %e, "export failed"),
                }
                let _ = tx.send(Msg::ExportDone(result));
            });
        }

        Command::ResetToHomeAfter(delay) => {
            let tx = tx.clone();
            handle.spawn(async move {
                sleep(delay).await;
                let _ = tx.send(Msg::ResetToHome);
            });
        }

        Command::ShowToast {
            message,
            severity,
            duration,
        } => {
            // Delivered through the channel so the toast starts on a later
            // loop iteration, like every other completion.
            let tx = tx.clone();
            handle.spawn(async move {
                let _ = tx.send(Msg::ShowToast {
                    message,
                    severity,
                    duration,
                });
            });
        }

        Command::HideToastAfter(delay) => {
            let tx = tx.clone();
            handle.spawn(async move {
                sleep(delay).await;
                let _ = tx.send(Msg::HideToast);
            });
        }

        Command::Tick(delay) => {
            let tx = tx.clone();
            handle.spawn(async move {
                sleep(delay).await;
                let _ = tx.send(Msg::Tick);
            });
        }
    }
}
