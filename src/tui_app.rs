use crate::api_client::{DirectoryClient, LogoClient};
use crate::autocomplete::{AutocompleteState, LogoDisplay, LogoRequest, SearchRequest};
use crate::config::Config;
use crate::institution::Institution;
use crate::logging::LogRingBuffer;
use crate::widgets::college_autocomplete::{CollegeAutocomplete, Spinner};
use crate::widgets::search_input::{SearchInput, SearchInputAction};
use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Completed network work posted back to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    SearchFinished {
        seq: u64,
        outcome: Result<Vec<Institution>>,
    },
    LogoFinished {
        probe: u64,
        outcome: Result<()>,
    },
}

pub struct CollegePickerApp {
    state: AutocompleteState,
    input: SearchInput,
    spinner: Spinner,
    show_logs: bool,
    tick: Duration,
    should_quit: bool,

    directory: DirectoryClient,
    logos: LogoClient,
    runtime: Handle,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    log_buffer: Option<LogRingBuffer>,
}

impl CollegePickerApp {
    /// Network calls are spawned on `runtime`; all state changes stay on
    /// the thread driving the app.
    pub fn new(config: &Config, runtime: Handle) -> Self {
        let (events_tx, events_rx) = unbounded_channel();

        Self {
            state: AutocompleteState::new(config.behavior.debounce_ms, &config.endpoints.logo_url),
            input: SearchInput::default(),
            spinner: Spinner::new(config.display.use_glyphs),
            show_logs: config.display.show_logs,
            tick: Duration::from_millis(config.behavior.tick_ms.max(1)),
            should_quit: false,
            directory: DirectoryClient::new(&config.endpoints.search_url),
            logos: LogoClient::new(&config.endpoints.logo_url),
            runtime,
            events_tx,
            events_rx,
            log_buffer: None,
        }
    }

    pub fn with_log_buffer(mut self, buffer: LogRingBuffer) -> Self {
        self.log_buffer = Some(buffer);
        self
    }

    pub fn state(&self) -> &AutocompleteState {
        &self.state
    }

    pub fn input(&self) -> &SearchInput {
        &self.input
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            let now = Instant::now();
            self.tick_at(now);

            // Wake up in time for a pending search even if no key arrives
            let wait = self
                .state
                .time_until_search(now)
                .map_or(self.tick, |remaining| remaining.min(self.tick));

            if event::poll(wait)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_at(key, Instant::now());
                    }
                }
            }
        }
        Ok(())
    }

    /// One turn of background bookkeeping: apply finished requests, fire
    /// the debounced search if due, advance the spinner.
    pub fn tick_at(&mut self, now: Instant) {
        self.drain_events();

        if let Some(request) = self.state.poll_debounce(now) {
            self.dispatch_search(request);
        }

        if self.state.is_loading() || self.state.logo_display() == LogoDisplay::Checking {
            self.spinner.tick();
        }
    }

    /// Apply every finished request that is waiting. Returns how many.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchFinished { seq, outcome } => {
                self.state.on_search_finished(seq, outcome);
            }
            AppEvent::LogoFinished { probe, outcome } => {
                self.state.on_logo_finished(probe, outcome);
            }
        }
    }

    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) {
        crate::trace_key!(key);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('x') if ctrl => self.state.clear_selection(),
            KeyCode::F(12) => self.show_logs = !self.show_logs,
            KeyCode::Up => self.state.highlight_previous(),
            KeyCode::Down => self.state.highlight_next(),
            KeyCode::Enter => {
                let Some(name) = self.state.highlighted().map(|i| i.name.clone()) else {
                    return;
                };
                if let Some(request) = self.state.select_highlighted() {
                    self.dispatch_logo(request);
                }
                // The chosen label replaces the typed text, like any other edit
                self.input.set_value(name.clone());
                self.state.on_input_changed(&name, now);
            }
            _ => match self.input.handle_key(key) {
                SearchInputAction::Changed(value) => self.state.on_input_changed(&value, now),
                SearchInputAction::Unchanged | SearchInputAction::PassThrough => {}
            },
        }
    }

    fn dispatch_search(&self, request: SearchRequest) {
        let client = self.directory.clone();
        let tx = self.events_tx.clone();

        self.runtime.spawn(async move {
            let outcome = client.search(&request.term).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(AppEvent::SearchFinished {
                seq: request.seq,
                outcome,
            });
        });
    }

    fn dispatch_logo(&self, request: LogoRequest) {
        debug!(target: "logo", "Probing {} for {}", request.url, request.domain);
        let client = self.logos.clone();
        let tx = self.events_tx.clone();

        self.runtime.spawn(async move {
            let outcome = client.probe_url(&request.url).await;
            let _ = tx.send(AppEvent::LogoFinished {
                probe: request.probe,
                outcome,
            });
        });
    }

    pub fn render(&self, f: &mut Frame) {
        let logs = if self.show_logs {
            Some(
                self.log_buffer
                    .as_ref()
                    .map(|buffer| buffer.get_recent(50))
                    .unwrap_or_default(),
            )
        } else {
            None
        };

        let widget = CollegeAutocomplete {
            state: &self.state,
            input: &self.input,
            spinner: &self.spinner,
            logs,
        };
        widget.render(f, f.area());
    }
}

/// Raw mode plus alternate screen, undone on drop. Dropping also happens
/// while unwinding, so a panic in the event loop still restores the shell.
pub struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
}

impl TerminalGuard<io::Stdout> {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self {
            out: io::stdout(),
            raw_mode: true,
        };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> TerminalGuard<W> {
    /// Guard that only writes the restore sequence to `out`
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            raw_mode: false,
        }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = disable_raw_mode();
        }
        let _ = execute!(self.out, LeaveAlternateScreen, Show);
    }
}

/// Set up the terminal, run the picker until the user quits, restore the
/// terminal.
pub fn run_tui(config: &Config, log_buffer: LogRingBuffer) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = CollegePickerApp::new(config, runtime.handle().clone()).with_log_buffer(log_buffer);

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    info!(target: "system", "Searching {}", config.endpoints.search_url);
    let res = app.run(&mut terminal);
    drop(guard);

    // In-flight requests are not waited for
    runtime.shutdown_background();
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn test_guard_restores_screen_when_unwinding() {
        let mut out: Vec<u8> = Vec::new();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = TerminalGuard::with_writer(&mut out);
            panic!("event loop blew up");
        }));

        assert!(result.is_err());
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }
}
