//! Profile: the `users/{uid}` document and the edit-profile flow.

pub mod commands;
pub mod models;

pub use commands::{own_posts, save_profile, subscribe_profile, ProfileError};
pub use models::{AvatarChange, ProfileForm, ProfileUpdate, UserProfile};
