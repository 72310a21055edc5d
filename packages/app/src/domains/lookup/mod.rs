//! City lookup: free text in, committed city candidates out.
//!
//! The pipeline is debounce → provider call → candidate extraction, with a
//! per-session generation counter so responses that lost the race are
//! dropped instead of overwriting newer state.

pub mod client;
pub mod debounce;
pub mod errors;
pub mod models;
pub mod session;
pub mod suggest;

pub use client::CityLookupClient;
pub use debounce::Debouncer;
pub use errors::LookupError;
pub use models::{extract_candidates, CityCandidate, CityQueryState, MAX_CANDIDATES};
pub use session::{CityLookupSession, PUBLISH_DEBOUNCE, PUBLISH_MIN_CHARS};
pub use suggest::{CitySuggestSession, SuggestState, SUGGEST_DEBOUNCE, SUGGEST_MIN_CHARS};
