use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use crate::export::{ExportError, ExportFormat, ExportOutcome};
use crate::git::GitError;

/// How often the toast animation is re-evaluated while visible.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

const SLIDE_IN: Duration = Duration::from_millis(300);
const FADE_IN: Duration = Duration::from_millis(200);
const FADE_OUT: Duration = Duration::from_millis(500);

/// A single commit as reported by the history resolver. Never mutated after
/// parsing; `date` keeps git's native `%ad` text untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub email: String,
    pub date: String,
    pub subject: String,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Directory,
    Author,
    Options,
    Results,
}

/// Sub-mode of the Options screen. Tracked explicitly rather than inferred
/// from the displayed prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsMode {
    Normal,
    ParentBranch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Transient notification overlay. `opacity` and `position` are always
/// recomputed from `now - start_time`, never incremented between ticks, so
/// late or reordered ticks cannot drift the animation.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub visible: bool,
    pub opacity: f64,
    pub position: f64,
    pub start_time: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn idle(duration: Duration) -> Self {
        Self {
            message: String::new(),
            severity: Severity::Success,
            visible: false,
            opacity: 0.0,
            position: 0.0,
            start_time: Instant::now(),
            duration,
        }
    }

    pub fn show(&mut self, message: String, severity: Severity, duration: Duration, now: Instant) {
        self.message = message;
        self.severity = severity;
        self.visible = true;
        self.opacity = 0.0;
        self.position = 0.0;
        self.start_time = now;
        self.duration = duration;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.opacity = 0.0;
        self.position = 0.0;
    }

    /// Recompute the animation for the given instant. Returns whether the
    /// toast is still visible and wants another tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.visible {
            return false;
        }
        let elapsed = now.duration_since(self.start_time);
        if elapsed >= self.duration {
            self.hide();
            return false;
        }
        self.position = slide_position(elapsed);
        self.opacity = fade_opacity(elapsed, self.duration);
        true
    }
}

/// Cubic ease-out slide over the first 300 ms, then pinned at 1.0.
pub fn slide_position(elapsed: Duration) -> f64 {
    if elapsed >= SLIDE_IN {
        return 1.0;
    }
    let t = elapsed.as_secs_f64() / SLIDE_IN.as_secs_f64();
    1.0 - (1.0 - t).powi(3)
}

/// Linear fade-in over the first 200 ms, full opacity through the middle,
/// linear fade-out over the final 500 ms before `duration`.
pub fn fade_opacity(elapsed: Duration, duration: Duration) -> f64 {
    if elapsed < FADE_IN {
        return elapsed.as_secs_f64() / FADE_IN.as_secs_f64();
    }
    let fade_out_start = duration.saturating_sub(FADE_OUT);
    if elapsed >= fade_out_start {
        let progress =
            elapsed.saturating_sub(fade_out_start).as_secs_f64() / FADE_OUT.as_secs_f64();
        return (1.0 - progress).max(0.0);
    }
    1.0
}

/// Everything the session controller reacts to: a key press or the
/// completion message of a previously issued command.
pub enum Event {
    Key(KeyEvent),
    Msg(Msg),
}

/// Completion messages delivered back into the event loop. Every executed
/// command produces exactly one of these.
#[derive(Debug)]
pub enum Msg {
    FetchDone(Result<(Vec<Commit>, String), GitError>),
    ExportDone(Result<ExportOutcome, ExportError>),
    ResetToHome,
    ShowToast {
        message: String,
        severity: Severity,
        duration: Duration,
    },
    HideToast,
    Tick,
}

/// A description of non-instantaneous work. Issuing a command never blocks
/// the dispatch step; the orchestrator executes it off the loop thread.
#[derive(Debug)]
pub enum Command {
    FetchHistory {
        repo: PathBuf,
        author: String,
        parent_branch: String,
        current_branch_only: bool,
        max_commits: usize,
    },
    Export {
        commits: Vec<Commit>,
        repo: PathBuf,
        format: ExportFormat,
    },
    ResetToHomeAfter(Duration),
    ShowToast {
        message: String,
        severity: Severity,
        duration: Duration,
    },
    HideToastAfter(Duration),
    Tick(Duration),
}
