//! Thin client for the Google Maps geocoding and place-autocomplete APIs.
//!
//! This crate speaks the provider's wire format and nothing else: callers
//! receive the parsed payloads (including the provider's semantic `status`)
//! and decide what a usable city suggestion looks like.

pub mod models;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument};

pub use crate::models::{
    AddressComponent, AutocompleteResponse, GeocodeResponse, GeocodeResult, Prediction,
};

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const AUTOCOMPLETE_URL: &str = "https://maps.googleapis.com/maps/api/place/autocomplete/json";

/// Errors surfaced by the client. Only transport and decoding problems live
/// here; provider-level statuses ("ZERO_RESULTS", ...) are data, not errors.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("geocoding API returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse geocoding response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct GeocodeOptions {
    pub api_key: String,
    /// Language the provider biases results and labels toward.
    pub language: String,
}

/// HTTP client for the geocoding/places provider.
#[derive(Debug, Clone)]
pub struct GeocodeService {
    options: GeocodeOptions,
    client: Client,
}

impl GeocodeService {
    pub fn new(options: GeocodeOptions) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(GeocodeError::Request)?;

        Ok(Self { options, client })
    }

    /// Geocode a free-text address query.
    #[instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> Result<GeocodeResponse, GeocodeError> {
        let url = format!(
            "{}?address={}&language={}&key={}",
            GEOCODE_URL,
            urlencoding::encode(address),
            self.options.language,
            self.options.api_key
        );

        debug!(query = %address, "issuing geocode request");
        self.get_json(&url).await
    }

    /// City-biased autocomplete for a partial input.
    #[instrument(skip(self))]
    pub async fn autocomplete_cities(
        &self,
        input: &str,
    ) -> Result<AutocompleteResponse, GeocodeError> {
        let url = format!(
            "{}?input={}&types=(cities)&language={}&key={}",
            AUTOCOMPLETE_URL,
            urlencoding::encode(input),
            self.options.language,
            self.options.api_key
        );

        debug!(input = %input, "issuing autocomplete request");
        self.get_json(&url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, GeocodeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(GeocodeError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Status { status, body });
        }

        response.json::<T>().await.map_err(GeocodeError::Decode)
    }
}
