//! Posts: publishing city-tagged experiences and searching them by city.

pub mod author_cache;
pub mod models;
pub mod publish;
pub mod search;

pub use author_cache::{AuthorCache, AuthorProfile, PLACEHOLDER_AUTHOR};
pub use models::{sort_newest_first, NewPost, Post, PostDraft};
pub use publish::{publish_post, PublishError};
pub use search::{first_token, CityScopedPostFetcher, SearchState};
