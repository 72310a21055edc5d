//! Application dependencies for domain functions (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! domain function. All external collaborators sit behind trait abstractions
//! so tests can inject the mocks from `test_dependencies`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use geocode::{GeocodeOptions, GeocodeResponse, GeocodeService};

use crate::config::Config;
use crate::kernel::{
    BaseBlobStore, BaseGeocodeService, BaseIdentityService, BasePostStore, BaseUserStore,
};

// =============================================================================
// GeocodeService Adapter (implements BaseGeocodeService trait)
// =============================================================================

/// Wrapper around the `geocode` crate client that implements the
/// BaseGeocodeService trait.
pub struct GoogleGeocodeAdapter(pub Arc<GeocodeService>);

impl GoogleGeocodeAdapter {
    pub fn new(service: Arc<GeocodeService>) -> Self {
        Self(service)
    }

    /// Build the adapter from configuration. `Ok(None)` when no API key is
    /// configured; the lookup pipeline reports that as a configuration error
    /// at the call site instead of failing startup.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        let Some(api_key) = config.google_maps_api_key.clone() else {
            return Ok(None);
        };
        let service = GeocodeService::new(GeocodeOptions {
            api_key,
            language: config.language.clone(),
        })
        .context("Failed to create geocoding HTTP client")?;
        Ok(Some(Self::new(Arc::new(service))))
    }
}

#[async_trait]
impl BaseGeocodeService for GoogleGeocodeAdapter {
    async fn geocode(&self, query: &str) -> Result<GeocodeResponse> {
        self.0
            .geocode(query)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn autocomplete_cities(&self, input: &str) -> Result<Vec<String>> {
        let response = self
            .0
            .autocomplete_cities(input)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(response
            .predictions
            .into_iter()
            .map(|p| p.description)
            .collect())
    }
}

// =============================================================================
// AppDeps
// =============================================================================

/// Application dependencies accessible to domain functions.
#[derive(Clone)]
pub struct AppDeps {
    pub identity: Arc<dyn BaseIdentityService>,
    pub users: Arc<dyn BaseUserStore>,
    pub posts: Arc<dyn BasePostStore>,
    pub blobs: Arc<dyn BaseBlobStore>,
    /// Geocoding provider (optional — absent when no API key is configured).
    pub geocode: Option<Arc<dyn BaseGeocodeService>>,
}

impl AppDeps {
    pub fn new(
        identity: Arc<dyn BaseIdentityService>,
        users: Arc<dyn BaseUserStore>,
        posts: Arc<dyn BasePostStore>,
        blobs: Arc<dyn BaseBlobStore>,
        geocode: Option<Arc<dyn BaseGeocodeService>>,
    ) -> Self {
        Self {
            identity,
            users,
            posts,
            blobs,
            geocode,
        }
    }
}
