use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domains::lookup::client::CityLookupClient;
use crate::domains::lookup::debounce::Debouncer;
use crate::domains::lookup::models::{CityCandidate, CityQueryState};

/// Quiescence interval of the publish screen's city input.
pub const PUBLISH_DEBOUNCE: Duration = Duration::from_millis(350);
/// Minimum trimmed length before the publish screen looks anything up.
pub const PUBLISH_MIN_CHARS: usize = 3;

/// One city-input session on the publish screen.
///
/// Owns the [`CityQueryState`], the debounce timer, and the generation
/// counter that discards stale lookup responses: a completion is applied
/// only when its generation still matches the latest input.
pub struct CityLookupSession {
    client: CityLookupClient,
    debouncer: Debouncer,
    active: bool,
    generation: Arc<AtomicU64>,
    state: Arc<Mutex<CityQueryState>>,
}

impl CityLookupSession {
    pub fn new(client: CityLookupClient) -> Self {
        Self::with_timing(client, PUBLISH_DEBOUNCE, PUBLISH_MIN_CHARS)
    }

    pub fn with_timing(client: CityLookupClient, delay: Duration, min_chars: usize) -> Self {
        Self {
            client,
            debouncer: Debouncer::new(delay, min_chars),
            active: true,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(CityQueryState::default())),
        }
    }

    /// Handle a keystroke. Clears the previous attempt's candidates and
    /// error, drops the selection unless the text still equals its label,
    /// and re-arms the debounce timer. Typing reopens the suggestion list
    /// after a blur or selection closed it.
    pub fn set_text(&mut self, text: &str) {
        self.active = true;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.lock().unwrap();
            state.raw_text = text.to_string();
            state.loading = false;
            state.error = None;
            state.candidates.clear();
            if state
                .selected
                .as_ref()
                .is_some_and(|candidate| candidate.formatted != text)
            {
                state.selected = None;
            }
        }

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let counter = Arc::clone(&self.generation);
        self.debouncer.schedule(text, self.active, move |query| async move {
            {
                let mut state = state.lock().unwrap();
                if counter.load(Ordering::SeqCst) != generation {
                    return;
                }
                state.loading = true;
            }

            let result = client.lookup(&query).await;

            let mut state = state.lock().unwrap();
            if counter.load(Ordering::SeqCst) != generation {
                // Superseded while in flight; a newer attempt owns the state.
                return;
            }
            state.loading = false;
            match result {
                Ok(candidates) => state.candidates = candidates,
                Err(error) => state.error = Some(error),
            }
        });
    }

    /// Commit the candidate at `index`. Fixes the input text to the label,
    /// closes the suggestion list, and stops pending/in-flight lookups from
    /// reopening it.
    pub fn select(&mut self, index: usize) -> Option<CityCandidate> {
        self.debouncer.cancel();
        self.active = false;
        self.generation.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock().unwrap();
        let candidate = state.candidates.get(index)?.clone();
        state.selected = Some(candidate.clone());
        state.raw_text = candidate.formatted.clone();
        state.candidates.clear();
        state.loading = false;
        state.error = None;
        Some(candidate)
    }

    /// Focus/blur. Clearing the flag cancels the pending timer outright.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.debouncer.cancel();
        }
    }

    /// Snapshot of the current query state.
    pub fn state(&self) -> CityQueryState {
        self.state.lock().unwrap().clone()
    }

    /// The committed candidate, if the input still matches one.
    pub fn selected(&self) -> Option<CityCandidate> {
        self.state.lock().unwrap().selected.clone()
    }
}
