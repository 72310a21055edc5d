use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{PhotoAttachment, PostId, UserId};
use crate::domains::lookup::models::CityCandidate;

/// A published post as stored in the `posts` collection.
///
/// `city` is the exact-match join key for city search: it must byte-match
/// the canonical token derived from a candidate label, or the post never
/// surfaces in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub description: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub photo_url: Option<String>,
    /// Server-assigned. Posts written before the field existed have none and
    /// sort after every timestamped post.
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields the client controls when creating a post. Id and `created_at` are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: UserId,
    pub description: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub photo_url: Option<String>,
}

/// What the publish screen has gathered before submission.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub description: String,
    /// The committed city candidate. Free text in the city input is never
    /// enough; publishing without a selection is rejected locally.
    pub location: Option<CityCandidate>,
    pub photo: Option<PhotoAttachment>,
}

/// Order posts newest first. Posts without a timestamp sort last.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
