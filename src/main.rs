//! favorite-feeds — a small list of tagged feed bookmarks for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  Action   ┌───────────┐  Command  ┌────────────┐   ┌──────────┐
//! │ input.rs │ ────────► │  main.rs  │ ────────► │ worker.rs  │──►│ store/   │
//! └──────────┘           │ (loop)    │ ◄──────── │ (tokio)    │   │ (JSON)   │
//!      ▲                 └───────────┘ WorkerMsg └────────────┘   └──────────┘
//!      │ key events           │ draw()
//!      │                 ┌──────────┐
//!      └──────────────── │  app.rs  │ ──► ui.rs
//!                        └──────────┘
//! ```
//!
//! * **`feed`** — the `FeedRecord` (tag, path) type.
//! * **`store/`** — the `KeyValueStore` trait plus memory and file stores.
//! * **`repository`** — feed operations on top of a store.
//! * **`worker`** — runs each persistence command as a background task.
//! * **`app`** — the in-memory feed list, inputs and dialogs.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`launch`** — builds feed URLs and opens them in the browser.
//! * **`config`** — command-line options.
//! * **`main`** — wires everything together: parse args, load feeds, set up
//!   the terminal, and run the event loop.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use favorite_feeds::app::App;
use favorite_feeds::config::Config;
use favorite_feeds::input::{self, Action};
use favorite_feeds::repository::FeedRepository;
use favorite_feeds::store::{FileStore, KeyValueStore, MemoryStore};
use favorite_feeds::{launch, ui, worker};

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send tracing output to `path`.  The terminal belongs to the TUI, so if the
/// file cannot be created the app runs without logs.
fn init_logging(path: &Path) {
    let file = path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
        });

    let Ok(file) = file else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_path());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    // -- open the store and load feeds ----------------------------------------
    let store: Arc<dyn KeyValueStore> = if config.ephemeral {
        info!("using in-memory feed store");
        Arc::new(MemoryStore::new())
    } else {
        let path = config.store_path();
        let store = runtime
            .block_on(FileStore::open(&path))
            .with_context(|| format!("failed to open feed store {}", path.display()))?;
        Arc::new(store)
    };
    let repo = FeedRepository::new(store);
    let feeds = runtime
        .block_on(repo.list_all_feeds())
        .context("failed to load feeds")?;

    let (worker, rx) = worker::spawn(runtime.handle().clone(), repo);
    let mut pending: Vec<JoinHandle<()>> = Vec::new();

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    install_panic_hook();
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(config.base_url, feeds);

    // -- main event loop -----------------------------------------------------
    // Each iteration:
    //   1. Drain results from finished commands.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Process worker messages
        while let Ok(msg) = rx.try_recv() {
            app.apply(&msg);
        }
        pending.retain(|task| !task.is_finished());

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                match input::handle_key_event(&mut app, key) {
                    Some(Action::Dispatch(command)) => pending.push(worker.dispatch(command)),
                    Some(Action::Open(url)) => {
                        if let Err(e) = launch::open_url(runtime.handle(), &url) {
                            error!(error = %e, "could not open feed");
                            app.status = format!("Error: {e}");
                        }
                    }
                    None => {}
                }
            }
        }

        if app.quit {
            break;
        }
    }

    drop(guard);

    // Let writes already in flight reach the store before the runtime goes.
    runtime.block_on(async {
        for task in pending {
            let _ = task.await;
        }
    });
    info!("shut down");

    Ok(())
}
