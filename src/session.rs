//! Session controller: a single-threaded state machine over [`Screen`].
//! All `SessionState` mutation happens inside [`SessionState::update`],
//! invoked once per delivered event from the main loop; background work only
//! ever reports back through [`Msg`] values.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Settings;
use crate::export::ExportFormat;
use crate::git;
use crate::models::{
    Command, Commit, Event, Msg, OptionsMode, Screen, Severity, TICK_INTERVAL, Toast,
};

pub const WELCOME: &str = "Welcome to Gitscribe!";
pub const PLACEHOLDER_DIRECTORY: &str = "Enter path to Git repository";
pub const PLACEHOLDER_AUTHOR: &str = "Enter author name or email";
pub const PLACEHOLDER_MAX_COMMITS: &str = "Enter maximum number of commits (0 for no limit)";
pub const PLACEHOLDER_PARENT_BRANCH: &str = "Enter parent branch name for comparison";

const MSG_DIRECTORY: &str = "Please enter the path to a Git repository";
const MSG_AUTHOR: &str = "Please enter the author name or email to filter commits";
const MSG_OPTIONS: &str = "Configure additional options";
const MSG_PARENT_BRANCH: &str = "Enter parent branch name for comparison";

pub struct SessionState {
    pub screen: Screen,
    pub options_mode: OptionsMode,
    pub input: String,
    pub placeholder: &'static str,

    pub directory: PathBuf,
    pub author: String,
    pub branch: String,
    pub parent_branch: String,
    pub current_branch_only: bool,
    pub show_files: bool,
    pub max_commits: usize,
    pub commits: Vec<Commit>,

    pub message: String,
    pub severity: Severity,
    pub toast: Toast,

    pub export_format: ExportFormat,
    pub toast_duration: Duration,
    pub quitting: bool,
}

impl SessionState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            screen: Screen::Home,
            options_mode: OptionsMode::Normal,
            input: String::new(),
            placeholder: PLACEHOLDER_DIRECTORY,
            directory: PathBuf::new(),
            author: String::new(),
            branch: String::new(),
            parent_branch: "main".to_string(),
            current_branch_only: true,
            show_files: true,
            max_commits: 0,
            commits: Vec::new(),
            message: WELCOME.to_string(),
            severity: Severity::Info,
            toast: Toast::idle(settings.toast_duration()),
            export_format: settings.export_format(),
            toast_duration: settings.toast_duration(),
            quitting: false,
        }
    }

    pub fn update(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Msg(msg) => self.handle_msg(msg),
        }
    }

    fn status(&mut self, message: impl Into<String>, severity: Severity) {
        self.message = message.into();
        self.severity = severity;
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Esc => {
                self.quitting = true;
                Vec::new()
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quitting = true;
                Vec::new()
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Tab => {
                if self.screen == Screen::Directory {
                    // Autocomplete to the current directory.
                    self.input = ".".to_string();
                } else if self.screen == Screen::Options {
                    if key.modifiers.contains(KeyModifiers::ALT) {
                        self.show_files = !self.show_files;
                    } else {
                        self.current_branch_only = !self.current_branch_only;
                    }
                }
                Vec::new()
            }
            KeyCode::Backspace => {
                self.input.pop();
                Vec::new()
            }
            KeyCode::Char('p')
                if self.screen == Screen::Options && self.options_mode == OptionsMode::Normal =>
            {
                self.options_mode = OptionsMode::ParentBranch;
                self.placeholder = PLACEHOLDER_PARENT_BRANCH;
                self.input = self.parent_branch.clone();
                self.status(MSG_PARENT_BRANCH, Severity::Info);
                Vec::new()
            }
            KeyCode::Char('b') if self.screen != Screen::Home => {
                self.back();
                Vec::new()
            }
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.input.push(c);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn confirm(&mut self) -> Vec<Command> {
        match self.screen {
            Screen::Home => {
                self.screen = Screen::Directory;
                self.placeholder = PLACEHOLDER_DIRECTORY;
                self.input.clear();
                self.status(MSG_DIRECTORY, Severity::Info);
                Vec::new()
            }

            Screen::Directory => {
                let raw = if self.input.is_empty() {
                    ".".to_string()
                } else {
                    self.input.clone()
                };
                let directory = match std::fs::canonicalize(&raw) {
                    Ok(path) => path,
                    Err(e) => {
                        self.status(format!("Error: cannot resolve '{raw}': {e}"), Severity::Error);
                        return Vec::new();
                    }
                };

                if !git::is_repository(&directory) {
                    self.status(
                        format!("Error: {} is not a Git repository", directory.display()),
                        Severity::Error,
                    );
                    return Vec::new();
                }

                let branch = match git::current_branch(&directory) {
                    Ok(branch) => branch,
                    Err(e) => {
                        self.status(format!("Error getting branch name: {e}"), Severity::Error);
                        return Vec::new();
                    }
                };

                self.branch = branch;
                self.parent_branch = git::detect_default_branch(&directory);
                self.directory = directory;

                self.screen = Screen::Author;
                self.placeholder = PLACEHOLDER_AUTHOR;
                self.input.clear();
                self.status(MSG_AUTHOR, Severity::Info);
                Vec::new()
            }

            Screen::Author => {
                if self.input.is_empty() {
                    self.status("Error: Author name cannot be empty", Severity::Error);
                    return Vec::new();
                }
                self.author = self.input.clone();
                self.screen = Screen::Options;
                self.options_mode = OptionsMode::Normal;
                self.placeholder = PLACEHOLDER_MAX_COMMITS;
                self.input = "0".to_string();
                self.current_branch_only = true;
                self.status(MSG_OPTIONS, Severity::Info);
                Vec::new()
            }

            Screen::Options => match self.options_mode {
                OptionsMode::ParentBranch => {
                    if !self.input.is_empty() {
                        self.parent_branch = self.input.clone();
                    }
                    self.options_mode = OptionsMode::Normal;
                    self.placeholder = PLACEHOLDER_MAX_COMMITS;
                    self.input = "0".to_string();
                    self.status(MSG_OPTIONS, Severity::Info);
                    Vec::new()
                }
                OptionsMode::Normal => {
                    self.max_commits = self
                        .input
                        .trim()
                        .parse::<i64>()
                        .map(|n| n.max(0) as usize)
                        .unwrap_or(0);
                    self.status(
                        format!(
                            "Fetching commits for author '{}' in {}...",
                            self.author,
                            self.directory.display()
                        ),
                        Severity::Info,
                    );
                    vec![Command::FetchHistory {
                        repo: self.directory.clone(),
                        author: self.author.clone(),
                        parent_branch: self.parent_branch.clone(),
                        current_branch_only: self.current_branch_only,
                        max_commits: self.max_commits,
                    }]
                }
            },

            Screen::Results => {
                self.status("Exporting commits...", Severity::Info);
                vec![Command::Export {
                    commits: self.commits.clone(),
                    repo: self.directory.clone(),
                    format: self.export_format,
                }]
            }
        }
    }

    fn back(&mut self) {
        match self.screen {
            Screen::Home => {}
            Screen::Directory => {
                self.screen = Screen::Home;
                self.status(WELCOME, Severity::Info);
            }
            Screen::Author => {
                self.screen = Screen::Directory;
                self.placeholder = PLACEHOLDER_DIRECTORY;
                self.input = self.directory.display().to_string();
                self.status(MSG_DIRECTORY, Severity::Info);
            }
            Screen::Options => {
                self.screen = Screen::Author;
                self.options_mode = OptionsMode::Normal;
                self.placeholder = PLACEHOLDER_AUTHOR;
                self.input = self.author.clone();
                self.status(MSG_AUTHOR, Severity::Info);
            }
            Screen::Results => {
                self.screen = Screen::Options;
                self.options_mode = OptionsMode::Normal;
                self.placeholder = PLACEHOLDER_MAX_COMMITS;
                self.input = self.max_commits.to_string();
                self.status(MSG_OPTIONS, Severity::Info);
            }
        }
    }

    fn handle_msg(&mut self, msg: Msg) -> Vec<Command> {
        match msg {
            Msg::FetchDone(result) => {
                // A completion that arrives after the user left the Options
                // screen is stale and is discarded.
                if self.screen != Screen::Options {
                    return Vec::new();
                }
                match result {
                    Err(e) => {
                        self.status(format!("Error: {e}"), Severity::Error);
                        Vec::new()
                    }
                    Ok((commits, branch)) => {
                        self.commits = commits;
                        self.branch = branch;
                        self.screen = Screen::Results;
                        self.status(
                            format!(
                                "Found {} commits in branch '{}'",
                                self.commits.len(),
                                self.branch
                            ),
                            Severity::Success,
                        );
                        Vec::new()
                    }
                }
            }

            Msg::ExportDone(result) => {
                if self.screen != Screen::Results {
                    return Vec::new();
                }
                match result {
                    Err(e) => {
                        vec![Command::ShowToast {
                            message: format!("✗ Export failed: {e}"),
                            severity: Severity::Error,
                            duration: self.toast_duration,
                        }]
                    }
                    Ok(outcome) => {
                        vec![Command::ShowToast {
                            message: format!(
                                "✓ Exported {} commits to {}",
                                outcome.count,
                                outcome.path.display()
                            ),
                            severity: Severity::Success,
                            duration: self.toast_duration,
                        }]
                    }
                }
            }

            Msg::ShowToast {
                message,
                severity,
                duration,
            } => {
                self.toast.show(message, severity, duration, Instant::now());
                vec![
                    Command::HideToastAfter(duration),
                    Command::Tick(TICK_INTERVAL),
                ]
            }

            Msg::HideToast => {
                self.toast.hide();
                Vec::new()
            }

            Msg::Tick => {
                if self.toast.tick(Instant::now()) {
                    vec![Command::Tick(TICK_INTERVAL)]
                } else {
                    Vec::new()
                }
            }

            Msg::ResetToHome => {
                self.screen = Screen::Home;
                self.options_mode = OptionsMode::Normal;
                self.placeholder = PLACEHOLDER_DIRECTORY;
                self.input.clear();
                self.status(WELCOME, Severity::Info);
                Vec::new()
            }
        }
    }
}
