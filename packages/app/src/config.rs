use dotenvy::dotenv;
use std::env;

/// Default language the geocoding provider biases results toward.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Geocoding/places API key. Missing is not fatal at load time; the
    /// lookup pipeline reports it as a configuration error on first use.
    pub google_maps_api_key: Option<String>,
    pub language: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        // Load .env file if present (development)
        let _ = dotenv();

        Self {
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY").ok(),
            language: env::var("GEOCODING_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
        }
    }
}
