//! Terminal host for taskdeck.
//!
//! Owns the terminal and the API worker and turns everything that happens
//! into library [`Event`]s:
//!
//! ```text
//! ┌───────────── UI thread ──────────────┐      ┌──── worker thread ────┐
//! │ crossterm keys ─┐                    │      │                       │
//! │ worker drain ───┼→ Event → handle_event ──→ │ WorkerMessage → HTTP  │
//! │ tick ───────────┘       │            │      │                       │
//! │                    ratatui draw      │ ←─── │ WorkerResponse        │
//! └──────────────────────────────────────┘      └───────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Normal mode:
//! - `1`/`2`/`3`, `Tab`/`Shift+Tab`: switch view
//! - `j`/`k`, arrows: move selection
//! - `space`/`t`: toggle task status
//! - `e`/`Enter`: edit task, `d`: delete task
//! - `n`: new task, `u`: new user
//! - `f`/`p`: cycle status/priority filter, `x`: clear filters
//! - `r`: refresh, `/`: search, `q`: quit
//!
//! Search mode: type to filter, `Down`/`Tab` to the results, `Enter` opens a
//! task result, `/` back to the query, `Esc` leaves.
//!
//! Forms: `Tab`/`Shift+Tab` between fields, `Left`/`Right` on choices,
//! `Enter` submits, `Esc` closes.
//!
//! `Ctrl+C` quits from anywhere.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use crossterm::event::{
    self as term, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use taskdeck::api::ApiClient;
use taskdeck::cli::Cli;
use taskdeck::worker::{WorkerHandle, WorkerMessage};
use taskdeck::{
    handle_event, initialize, observability, Action, AppState, Config, Event, InputMode,
    SearchFocus, View,
};

/// How long to wait for a key before checking the worker again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("taskdeck: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> taskdeck::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    config.apply_cli(&cli);

    observability::init_tracing(&config);
    tracing::debug!(api_url = %config.api_url, "starting taskdeck");

    let client = ApiClient::new(&config.api_url, &config.api_key, config.request_timeout())?;
    let worker = WorkerHandle::spawn(Arc::new(client))?;
    let mut dashboard = Dashboard {
        app: initialize(&config),
        worker,
        should_quit: false,
    };

    let mut terminal = TerminalGuard::enter()?;
    let result = dashboard.run(&mut terminal.terminal);
    drop(terminal);
    dashboard.worker.shutdown();

    tracing::debug!(ok = result.is_ok(), "taskdeck exiting");
    result
}

/// Raw mode plus alternate screen, undone on drop so every exit path
/// (including `?` and panics that unwind) leaves a usable terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
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

struct Dashboard {
    app: AppState,
    worker: WorkerHandle,
    should_quit: bool,
}

impl Dashboard {
    fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> taskdeck::Result<()> {
        self.update(&Event::Init);
        let mut dirty = true;

        while !self.should_quit {
            if dirty {
                terminal.draw(|frame| taskdeck::ui::render(frame, &self.app))?;
                dirty = false;
            }

            if term::poll(POLL_INTERVAL)? {
                match term::read()? {
                    TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(event) = self.map_key_event(key) {
                            dirty |= self.update(&event);
                        }
                    }
                    TermEvent::Resize(..) => dirty = true,
                    _ => {}
                }
            }

            for response in self.worker.drain() {
                tracing::trace!(request_id = response.request_id(), "worker response received");
                dirty |= self.update(&Event::WorkerResponse(response));
            }
            dirty |= self.update(&Event::Tick(Instant::now()));
        }

        Ok(())
    }

    /// Feeds one event to the library and executes the resulting actions.
    /// Returns whether a redraw is needed.
    fn update(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                if !actions.is_empty() {
                    tracing::debug!(action_count = actions.len(), "event produced actions");
                }
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                tracing::debug!("quit requested");
                self.should_quit = true;
            }
            Action::PostToWorker(message) => self.post(message),
        }
    }

    fn post(&self, message: WorkerMessage) {
        let kind = message.kind();
        if let Err(e) = self.worker.post(message) {
            tracing::warn!(error = %e, kind, "failed to post message to worker");
        }
    }

    fn map_key_event(&self, key: KeyEvent) -> Option<Event> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(Event::Quit);
        }

        match self.app.input_mode {
            InputMode::ConfirmDelete { .. } => match key.code {
                KeyCode::Char('y' | 'Y') => Some(Event::ConfirmDelete),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Event::CancelDelete),
                _ => None,
            },
            InputMode::Form => Some(match key.code {
                KeyCode::Esc => Event::CloseModal,
                KeyCode::Enter => Event::SubmitForm,
                KeyCode::Tab | KeyCode::Down => Event::NextField,
                KeyCode::BackTab | KeyCode::Up => Event::PrevField,
                KeyCode::Left => Event::CycleChoice { forward: false },
                KeyCode::Right => Event::CycleChoice { forward: true },
                KeyCode::Backspace => Event::Backspace,
                KeyCode::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Typing) => Some(match key.code {
                KeyCode::Esc => Event::ExitSearch,
                KeyCode::Down | KeyCode::Tab => Event::FocusResults,
                KeyCode::Enter => Event::OpenSearchResult,
                KeyCode::Backspace => Event::Backspace,
                KeyCode::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.code {
                KeyCode::Esc => Event::ExitSearch,
                KeyCode::Down | KeyCode::Char('j') => Event::SelectNext,
                KeyCode::Up | KeyCode::Char('k') => Event::SelectPrev,
                KeyCode::Enter => Event::OpenSearchResult,
                KeyCode::Char('/') | KeyCode::BackTab => Event::FocusSearchBar,
                _ => return None,
            }),
            InputMode::Normal => Some(match key.code {
                KeyCode::Char('q') => Event::Quit,
                KeyCode::Char('1') => Event::SwitchView(View::Dashboard),
                KeyCode::Char('2') => Event::SwitchView(View::Tasks),
                KeyCode::Char('3') => Event::SwitchView(View::Users),
                KeyCode::Tab => Event::NextView,
                KeyCode::BackTab => Event::PrevView,
                KeyCode::Down | KeyCode::Char('j') => Event::SelectNext,
                KeyCode::Up | KeyCode::Char('k') => Event::SelectPrev,
                KeyCode::Char(' ' | 't') => Event::ToggleStatus,
                KeyCode::Enter | KeyCode::Char('e') => Event::EditSelected,
                KeyCode::Char('d') => Event::RequestDelete,
                KeyCode::Char('n') => Event::NewTask,
                KeyCode::Char('u') => Event::NewUser,
                KeyCode::Char('f') => Event::CycleStatusFilter,
                KeyCode::Char('p') => Event::CyclePriorityFilter,
                KeyCode::Char('x') => Event::ClearFilters,
                KeyCode::Char('r') => Event::Refresh,
                KeyCode::Char('/') => Event::SearchMode,
                _ => return None,
            }),
        }
    }
}
