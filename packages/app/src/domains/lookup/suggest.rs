use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domains::lookup::client::CityLookupClient;
use crate::domains::lookup::debounce::Debouncer;
use crate::domains::lookup::errors::LookupError;

/// Quiescence interval of the search screen's city input.
pub const SUGGEST_DEBOUNCE: Duration = Duration::from_millis(300);
/// Minimum trimmed length before the search screen asks for predictions.
pub const SUGGEST_MIN_CHARS: usize = 2;

/// Suggestion-dropdown state on the search screen. Labels only; the
/// candidate triple is not needed here because search joins on the
/// canonical token derived from the label.
#[derive(Debug, Clone, Default)]
pub struct SuggestState {
    pub raw_text: String,
    pub loading: bool,
    pub suggestions: Vec<String>,
    pub error: Option<LookupError>,
}

/// One city-input session on the search screen: autocomplete predictions
/// behind the same debounce/generation discipline as the publish lookup.
pub struct CitySuggestSession {
    client: CityLookupClient,
    debouncer: Debouncer,
    active: bool,
    generation: Arc<AtomicU64>,
    state: Arc<Mutex<SuggestState>>,
}

impl CitySuggestSession {
    pub fn new(client: CityLookupClient) -> Self {
        Self::with_timing(client, SUGGEST_DEBOUNCE, SUGGEST_MIN_CHARS)
    }

    pub fn with_timing(client: CityLookupClient, delay: Duration, min_chars: usize) -> Self {
        Self {
            client,
            debouncer: Debouncer::new(delay, min_chars),
            active: false,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(SuggestState::default())),
        }
    }

    /// Handle a keystroke. Typing reopens the dropdown.
    pub fn set_text(&mut self, text: &str) {
        self.active = true;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.lock().unwrap();
            state.raw_text = text.to_string();
            state.loading = false;
            state.error = None;
            state.suggestions.clear();
        }

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let counter = Arc::clone(&self.generation);
        self.debouncer.schedule(text, self.active, move |input| async move {
            {
                let mut state = state.lock().unwrap();
                if counter.load(Ordering::SeqCst) != generation {
                    return;
                }
                state.loading = true;
            }

            let result = client.suggest(&input).await;

            let mut state = state.lock().unwrap();
            if counter.load(Ordering::SeqCst) != generation {
                return;
            }
            state.loading = false;
            match result {
                Ok(suggestions) => state.suggestions = suggestions,
                Err(error) => state.error = Some(error),
            }
        });
    }

    /// Commit a suggestion label: closes the dropdown and fixes the text.
    /// The caller hands the label to the post fetcher.
    pub fn select(&mut self, label: &str) {
        self.debouncer.cancel();
        self.active = false;
        self.generation.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock().unwrap();
        state.raw_text = label.to_string();
        state.suggestions.clear();
        state.loading = false;
        state.error = None;
    }

    /// Focus/blur. Clearing the flag cancels the pending timer outright.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.debouncer.cancel();
        }
    }

    /// Snapshot of the dropdown state.
    pub fn state(&self) -> SuggestState {
        self.state.lock().unwrap().clone()
    }
}
