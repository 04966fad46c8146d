use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use gitscribe::commands;
use gitscribe::config::Settings;
use gitscribe::models::{Event, Msg};
use gitscribe::session::SessionState;
use gitscribe::theme::Theme;
use gitscribe::ui;

#[derive(Parser)]
#[command(
    name = "gitscribe",
    version,
    about = "Filter Git commit history by author and export it to CSV or Excel"
)]
struct Cli {
    /// Append diagnostic logs to this file (the alternate screen hides stderr)
    #[arg(long)]
    log_file: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load settings, using defaults");
        Settings::default()
    });

    // The UI loop owns the main thread; the runtime only executes commands.
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Msg>();
    let mut state = SessionState::new(&settings);

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let res = run_loop(&mut terminal, &mut state, runtime.handle(), tx, rx);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut SessionState,
    handle: &Handle,
    tx: UnboundedSender<Msg>,
    mut rx: UnboundedReceiver<Msg>,
) -> Result<()> {
    let theme = Theme::default();

    loop {
        // Apply completed work before drawing; try_recv keeps the loop
        // non-blocking, and events are processed strictly in delivery order.
        while let Ok(msg) = rx.try_recv() {
            for command in state.update(Event::Msg(msg)) {
                commands::dispatch(handle, &tx, command);
            }
        }

        terminal.draw(|f| ui::render(f, state, &theme))?;

        if event::poll(Duration::from_millis(50))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    for command in state.update(Event::Key(key)) {
                        commands::dispatch(handle, &tx, command);
                    }
                }
            }
        }

        if state.quitting {
            return Ok(());
        }
    }
}
