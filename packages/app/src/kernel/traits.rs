// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Domain functions
// (publish a post, save a profile, look up a city) live in domains/* and use
// these traits, so every external collaborator can be swapped for a mock.
//
// Naming convention: Base* for trait names (e.g., BaseIdentityService)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::common::{PostId, UserId};
use crate::domains::posts::models::{NewPost, Post};
use crate::domains::profile::models::{ProfileUpdate, UserProfile};
use crate::kernel::subscription::Subscription;

// =============================================================================
// Identity Provider (Infrastructure - managed auth)
// =============================================================================

/// The identity provider's view of a signed-in account.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub uid: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Provider error codes the UI knows how to explain. Anything else lands in
/// `Other` and gets the generic message.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("email already in use")]
    EmailAlreadyInUse,

    #[error("invalid email")]
    InvalidEmail,

    #[error("weak password")]
    WeakPassword,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("network request failed")]
    Network,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait BaseIdentityService: Send + Sync {
    /// Email/password sign-in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, IdentityError>;

    /// Create a new email/password account and sign it in.
    async fn create_user(&self, email: &str, password: &str) -> Result<AuthUser, IdentityError>;

    /// Update the provider-side display profile (name + photo URL).
    async fn update_display_profile(
        &self,
        uid: &UserId,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<()>;

    /// Currently signed-in user, if any.
    fn current_user(&self) -> Option<AuthUser>;

    /// Session-change notifications. One channel per provider; consumers
    /// subscribe through `SessionContext`, never here directly.
    fn watch_session(&self) -> watch::Receiver<Option<AuthUser>>;
}

// =============================================================================
// Document Store (Infrastructure - managed database)
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    /// Fetch `users/{uid}`. `Ok(None)` when the document does not exist.
    async fn get_user(&self, uid: &UserId) -> Result<Option<UserProfile>>;

    /// Create or replace `users/{uid}`. The store assigns `created_at`.
    async fn set_user(&self, uid: &UserId, profile: UserProfile) -> Result<()>;

    /// Update the editable fields of `users/{uid}`.
    async fn update_user(&self, uid: &UserId, update: ProfileUpdate) -> Result<()>;

    /// Live view of `users/{uid}` with explicit teardown.
    async fn subscribe_user(&self, uid: &UserId) -> Result<Subscription<Option<UserProfile>>>;
}

#[async_trait]
pub trait BasePostStore: Send + Sync {
    /// Persist a new post. The store assigns the id and `created_at`.
    async fn add_post(&self, post: NewPost) -> Result<PostId>;

    /// All posts whose `city` field equals `city` exactly (byte equality).
    /// Order is unspecified; callers sort.
    async fn posts_by_city(&self, city: &str) -> Result<Vec<Post>>;

    /// All posts by one author, newest first (store-side ordering).
    async fn posts_by_author(&self, uid: &UserId) -> Result<Vec<Post>>;
}

// =============================================================================
// Object Storage (Infrastructure - managed blob store)
// =============================================================================

#[async_trait]
pub trait BaseBlobStore: Send + Sync {
    /// Upload a blob to `path` with the given content type.
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Public download URL for a previously uploaded blob.
    async fn download_url(&self, path: &str) -> Result<String>;

    /// Delete the blob at `path`.
    async fn delete(&self, path: &str) -> Result<()>;
}

// =============================================================================
// Geocoding/Places Provider (Infrastructure - city lookup upstream)
// =============================================================================

#[async_trait]
pub trait BaseGeocodeService: Send + Sync {
    /// Geocode a free-text city query. Returns the provider payload with its
    /// semantic status intact; candidate policy lives in the lookup domain.
    async fn geocode(&self, query: &str) -> Result<geocode::GeocodeResponse>;

    /// City-biased autocomplete; returns prediction labels.
    async fn autocomplete_cities(&self, input: &str) -> Result<Vec<String>>;
}
