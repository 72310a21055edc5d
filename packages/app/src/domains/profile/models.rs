use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::PhotoAttachment;

/// The `users/{uid}` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// Digits only, max 11.
    pub phone: String,
    pub bio: String,
    /// Public download URL of the avatar, if any.
    pub photo_url: Option<String>,
    /// Object-storage path of the avatar blob (`avatars/{uid}.{ext}`).
    /// Kept so a replaced or removed avatar can be deleted.
    pub storage_path: Option<String>,
    /// Server-assigned at document creation.
    pub created_at: Option<DateTime<Utc>>,
}

/// Editable fields written back by the profile screen. Every field is
/// written on save; `None` clears the stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: String,
    pub bio: String,
    pub photo_url: Option<String>,
    pub storage_path: Option<String>,
}

/// What the edit-profile form submits.
#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub name: String,
    pub phone: String,
    pub bio: String,
    pub avatar: AvatarChange,
}

/// Avatar intent carried by the form.
#[derive(Debug, Clone, Default)]
pub enum AvatarChange {
    /// Leave the current photo as is.
    #[default]
    Keep,
    /// Delete the current photo.
    Remove,
    /// Upload a replacement.
    Replace(PhotoAttachment),
}
