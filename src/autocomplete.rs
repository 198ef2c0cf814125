//! State behind the college search dropdown
//!
//! Holds the typed text, the debounce timer, the current option list and
//! the selection with its logo status. Nothing here touches the network:
//! operations return request descriptions and the event loop reports the
//! outcome back through `on_search_finished` / `on_logo_finished`.

use crate::api_client::logo_url;
use crate::debouncer::Debouncer;
use crate::institution::Institution;
use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// A search the event loop should send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub term: String,
}

/// A logo probe the event loop should send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoRequest {
    /// Generation of this probe; only the newest one may settle the logo
    pub probe: u64,
    pub domain: String,
    pub url: String,
}

/// Logo status for the current selection. A single enum keeps the URL and
/// the error flag from ever being set together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogoState {
    #[default]
    None,
    Pending { probe: u64, url: String },
    Available(String),
    Unavailable,
}

/// What the result panel shows under the institution name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoDisplay<'a> {
    Nothing,
    Checking,
    Image(&'a str),
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct AutocompleteState {
    input: String,
    debouncer: Debouncer,
    logo_base: String,

    options: Vec<Institution>,
    highlighted: Option<usize>,

    /// Sequence number of the most recently issued search
    latest_issued: u64,
    /// Newest sequence number whose outcome is reflected in `options`
    latest_applied: u64,
    loading: bool,

    selected: Option<Institution>,
    logo: LogoState,
    /// Generation of the most recently issued logo probe
    latest_probe: u64,
}

impl AutocompleteState {
    pub fn new(debounce_ms: u64, logo_base: &str) -> Self {
        Self {
            input: String::new(),
            debouncer: Debouncer::new(debounce_ms),
            logo_base: logo_base.trim_end_matches('/').to_string(),
            options: Vec::new(),
            highlighted: None,
            latest_issued: 0,
            latest_applied: 0,
            loading: false,
            selected: None,
            logo: LogoState::None,
            latest_probe: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn options(&self) -> &[Institution] {
        &self.options
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while a keystroke burst is waiting out the debounce window
    pub fn is_typing(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn selected(&self) -> Option<&Institution> {
        self.selected.as_ref()
    }

    pub fn logo(&self) -> &LogoState {
        &self.logo
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted(&self) -> Option<&Institution> {
        self.highlighted.and_then(|i| self.options.get(i))
    }

    /// Record new input text.
    ///
    /// Empty text clears the options and the selection right away and
    /// cancels any pending search; anything else (re)arms the debounce timer.
    pub fn on_input_changed(&mut self, value: &str, now: Instant) {
        self.input = value.to_string();

        if self.input.is_empty() {
            self.debouncer.reset();
            self.options.clear();
            self.highlighted = None;
            // Anything still in flight belongs to text that no longer exists
            self.latest_applied = self.latest_issued;
            self.loading = false;
            self.select(None);
            debug!(target: "search", "Input cleared, options emptied");
        } else {
            self.debouncer.trigger_at(now);
        }
    }

    /// Time left before the pending search goes out, if one is pending
    pub fn time_until_search(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_remaining_at(now)
    }

    /// Issue the debounced search once the quiet period has elapsed.
    /// Marks the state as loading before handing the request out.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<SearchRequest> {
        if !self.debouncer.should_execute_at(now) || self.input.is_empty() {
            return None;
        }

        self.latest_issued += 1;
        self.loading = true;
        let request = SearchRequest {
            seq: self.latest_issued,
            term: self.input.clone(),
        };
        crate::trace_search!(request.seq, request.term);
        Some(request)
    }

    /// Apply the outcome of a search. Returns true if the option list was
    /// replaced.
    pub fn on_search_finished(&mut self, seq: u64, outcome: Result<Vec<Institution>>) -> bool {
        if seq == self.latest_issued {
            self.loading = false;
        }

        if seq <= self.latest_applied {
            debug!(
                target: "search",
                "Dropping stale response #{} (already showing #{})", seq, self.latest_applied
            );
            return false;
        }

        match outcome {
            Ok(institutions) => {
                info!(target: "search", "Search #{} returned {} institutions", seq, institutions.len());
                self.latest_applied = seq;
                self.highlighted = if institutions.is_empty() { None } else { Some(0) };
                self.options = institutions;
                true
            }
            Err(e) => {
                // Still newer than what is shown, so older responses must not
                // replace the list either
                self.latest_applied = seq;
                error!(target: "search", "Error fetching the college names: {:#}", e);
                false
            }
        }
    }

    pub fn highlight_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.options.len() => i + 1,
            _ => 0,
        });
    }

    pub fn highlight_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() - 1;
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    /// Change the selection. `None` clears it.
    ///
    /// Any previous logo status is dropped. Returns the logo probe to send
    /// when the new selection has a domain to look up.
    pub fn select(&mut self, index: Option<usize>) -> Option<LogoRequest> {
        self.logo = LogoState::None;

        let Some(institution) = index.and_then(|i| self.options.get(i)).cloned() else {
            if self.selected.take().is_some() {
                debug!(target: "selection", "Selection cleared");
            }
            return None;
        };

        info!(target: "selection", "Selected {}", institution.name);
        let request = match institution.primary_domain() {
            Some(domain) => {
                let url = logo_url(&self.logo_base, domain);
                self.latest_probe += 1;
                self.logo = LogoState::Pending {
                    probe: self.latest_probe,
                    url: url.clone(),
                };
                Some(LogoRequest {
                    probe: self.latest_probe,
                    domain: domain.to_string(),
                    url,
                })
            }
            None => {
                debug!(target: "logo", "{} has no domains, nothing to probe", institution.name);
                self.logo = LogoState::Unavailable;
                None
            }
        };

        self.selected = Some(institution);
        request
    }

    pub fn select_highlighted(&mut self) -> Option<LogoRequest> {
        let index = self.highlighted.filter(|i| *i < self.options.len())?;
        self.select(Some(index))
    }

    pub fn clear_selection(&mut self) {
        self.select(None);
    }

    /// Apply the outcome of a logo probe. Results for a probe that is no
    /// longer current are ignored; returns whether it was applied.
    pub fn on_logo_finished(&mut self, probe: u64, outcome: Result<()>) -> bool {
        let url = match &self.logo {
            LogoState::Pending { probe: pending, url } if *pending == probe => url.clone(),
            _ => {
                debug!(target: "logo", "Ignoring outdated logo probe #{}", probe);
                return false;
            }
        };

        self.logo = match outcome {
            Ok(()) => {
                crate::trace_logo!(url, "available");
                LogoState::Available(url)
            }
            Err(e) => {
                error!(target: "logo", "Error fetching the logo: {:#}", e);
                LogoState::Unavailable
            }
        };
        true
    }

    pub fn logo_display(&self) -> LogoDisplay<'_> {
        match &self.logo {
            LogoState::None => LogoDisplay::Nothing,
            LogoState::Pending { .. } => LogoDisplay::Checking,
            LogoState::Available(url) => LogoDisplay::Image(url),
            LogoState::Unavailable => LogoDisplay::Unavailable,
        }
    }
}

impl Default for AutocompleteState {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS, crate::api_client::DEFAULT_LOGO_URL)
    }
}
