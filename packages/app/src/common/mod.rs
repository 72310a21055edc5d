// Common types and utilities shared across the application

pub mod ids;
pub mod types;
pub mod utils;

pub use ids::{PostId, UserId};
pub use types::PhotoAttachment;
