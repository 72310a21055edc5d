use std::sync::Arc;
use tracing::warn;

use crate::domains::lookup::errors::LookupError;
use crate::domains::lookup::models::{extract_candidates, CityCandidate};
use crate::kernel::BaseGeocodeService;

/// Turns free text into ranked, deduplicated city candidates.
///
/// Wraps the geocoding provider with the candidate policy: component
/// extraction, the country requirement, label dedup, and the size cap. The
/// provider itself is optional — a deployment without an API key gets
/// [`LookupError::MissingApiKey`] before any network traffic.
#[derive(Clone)]
pub struct CityLookupClient {
    geocode: Option<Arc<dyn BaseGeocodeService>>,
}

impl CityLookupClient {
    pub fn new(geocode: Option<Arc<dyn BaseGeocodeService>>) -> Self {
        Self { geocode }
    }

    /// Full geocoding lookup (publish screen): candidates with the
    /// city/state/country triple attached.
    pub async fn lookup(&self, query: &str) -> Result<Vec<CityCandidate>, LookupError> {
        let geocode = self.provider()?;

        let response = geocode.geocode(query).await.map_err(|e| {
            warn!(query = %query, error = %e, "city lookup failed");
            LookupError::Failed
        })?;

        if !response.is_ok() {
            return Err(LookupError::NotFound);
        }

        let candidates = extract_candidates(&response.results);
        if candidates.is_empty() {
            // Every result was country-less; nothing the user can select.
            return Err(LookupError::NotFound);
        }
        Ok(candidates)
    }

    /// Autocomplete lookup (search screen): prediction labels only.
    pub async fn suggest(&self, input: &str) -> Result<Vec<String>, LookupError> {
        let geocode = self.provider()?;

        geocode.autocomplete_cities(input).await.map_err(|e| {
            warn!(input = %input, error = %e, "city autocomplete failed");
            LookupError::Failed
        })
    }

    fn provider(&self) -> Result<&Arc<dyn BaseGeocodeService>, LookupError> {
        self.geocode.as_ref().ok_or(LookupError::MissingApiKey)
    }
}
