//! todos - todo list TUI built on todo-dispatch
//!
//! 1. Event (keyboard) -> TodoApp routes it to the focused view
//! 2. Views dispatch actions to the store (directly or through Connect)
//! 3. Reducers compute the next AppState
//! 4. The store notifies its listener, which marks the screen dirty
//! 5. The loop redraws when dirty
//!
//! # Usage
//!
//! ```sh
//! # Interactive UI, logging to a file
//! cargo run -p todos -- --log-file todos.log
//!
//! # Replay recorded actions and print the final state
//! cargo run -p todos -- replay actions.jsonl
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use todo_dispatch::debug::ActionLoggerConfig;
use todo_dispatch::{process_raw_event, spawn_event_poller, PollerConfig, RawEvent};
use todos::components::TodoApp;
use todos::{encode_state, new_store, replay_actions, AppState, ReplayError, VisibilityFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Todo list TUI demonstrating todo-dispatch patterns
#[derive(Parser, Debug)]
#[command(name = "todos", version)]
#[command(about = "A todo list TUI built on a reducer-driven store")]
struct Args {
    /// Write logs to this file (RUST_LOG controls the level, default info)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Only log actions matching these comma-separated patterns (e.g. "*Todo")
    #[arg(long, global = true)]
    log_actions: Option<String>,

    /// Never log actions matching these comma-separated patterns
    #[arg(long, global = true)]
    skip_actions: Option<String>,

    /// Initial visibility filter
    #[arg(long, value_enum, default_value_t = FilterArg::All, global = true)]
    filter: FilterArg,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive UI (default)
    Tui,
    /// Dispatch JSON-lines actions from FILE ("-" for stdin) and print the final state
    Replay {
        file: PathBuf,
        /// Print the state on a single line
        #[arg(long)]
        compact: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for VisibilityFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::All => VisibilityFilter::ShowAll,
            FilterArg::Active => VisibilityFilter::ShowActive,
            FilterArg::Completed => VisibilityFilter::ShowCompleted,
        }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let replaying = matches!(args.command, Some(Command::Replay { .. }));
    init_tracing(args.log_file.as_deref(), replaying)?;

    let initial = AppState::with_filter(args.filter.into());
    let config = ActionLoggerConfig::new(args.log_actions.as_deref(), args.skip_actions.as_deref());

    match args.command {
        Some(Command::Replay { file, compact }) => {
            if let Err(e) = run_replay(&file, compact, initial, config) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::Tui) | None => run_tui(initial, config).await,
    }
}

/// The terminal owns stdout, so the UI only logs when given a file.
/// Replays log to stderr otherwise.
fn init_tracing(log_file: Option<&Path>, replaying: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None if replaying => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }
        None => {}
    }
    Ok(())
}

fn run_replay(
    file: &Path,
    compact: bool,
    initial: AppState,
    config: ActionLoggerConfig,
) -> Result<(), ReplayError> {
    let store = new_store(initial, config);

    if file == Path::new("-") {
        replay_actions(io::stdin().lock(), &store)?;
    } else {
        replay_actions(BufReader::new(File::open(file)?), &store)?;
    }

    println!("{}", store.with_state(|state| encode_state(state, compact))?);
    Ok(())
}

async fn run_tui(initial: AppState, config: ActionLoggerConfig) -> io::Result<()> {
    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, initial, config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    initial: AppState,
    config: ActionLoggerConfig,
) -> io::Result<()> {
    let store = new_store(initial, config);
    let mut app = TodoApp::new(store);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

    tracing::info!("todos started");

    loop {
        if app.take_dirty() {
            terminal.draw(|frame| app.render(frame))?;
        }

        let Some(raw_event) = event_rx.recv().await else {
            break;
        };
        let event = process_raw_event(raw_event);
        match app.handle_event(&event) {
            Ok(()) => {}
            Err(e) if e.is_reentrant() => tracing::warn!(error = %e, "dispatch rejected"),
            Err(e) => tracing::error!(error = %e, "dispatch failed"),
        }
        if app.should_quit() {
            break;
        }
    }

    cancel_token.cancel();
    tracing::info!(
        todos = app.store().with_state(|state| state.todos.len()),
        "todos exiting"
    );
    Ok(())
}
