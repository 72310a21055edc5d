use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;

use crate::common::UserId;
use crate::domains::posts::author_cache::{AuthorCache, AuthorProfile, PLACEHOLDER_AUTHOR};
use crate::domains::posts::models::{sort_newest_first, Post};
use crate::kernel::{BasePostStore, BaseUserStore};

/// Message shown when loading a city's posts fails.
const SEARCH_FAILED: &str = "Não foi possível carregar as publicações desta cidade.";

/// Take the canonical city token from a candidate label:
/// `"Toronto, ON, Canadá"` → `"Toronto"`.
///
/// This must reproduce exactly the `city` value publish stored — the join
/// is byte-exact and case-sensitive, with no normalization on either side.
pub fn first_token(label: &str) -> String {
    label.split(',').next().unwrap_or("").trim().to_string()
}

/// Search lifecycle. `Empty` is an explicit terminal state: "we looked and
/// found nothing", distinct from the `Idle` "nothing searched yet".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Results(Vec<Post>),
    Empty,
    Error(String),
}

/// Resolves a selected city label to the posts published under it, plus
/// author display data.
///
/// Re-enters `Searching` on every selection. A generation counter guards the
/// terminal transition: when two searches overlap, only the latest one's
/// completion is applied.
pub struct CityScopedPostFetcher {
    posts: Arc<dyn BasePostStore>,
    users: Arc<dyn BaseUserStore>,
    authors: AuthorCache,
    generation: Arc<AtomicU64>,
    state: Arc<Mutex<SearchState>>,
}

impl CityScopedPostFetcher {
    pub fn new(posts: Arc<dyn BasePostStore>, users: Arc<dyn BaseUserStore>) -> Self {
        Self {
            posts,
            users,
            authors: AuthorCache::new(),
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(SearchState::Idle)),
        }
    }

    /// Run a search for the city named by `label`.
    pub async fn search(&self, label: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.lock().unwrap() = SearchState::Searching;

        let city = first_token(label);

        let mut posts = match self.posts.posts_by_city(&city).await {
            Ok(posts) => posts,
            Err(error) => {
                warn!(city = %city, error = %error, "city search failed");
                self.apply(generation, SearchState::Error(SEARCH_FAILED.to_string()));
                return;
            }
        };

        sort_newest_first(&mut posts);
        self.resolve_authors(&posts).await;

        let state = if posts.is_empty() {
            SearchState::Empty
        } else {
            SearchState::Results(posts)
        };
        self.apply(generation, state);
    }

    /// Fetch display records for authors the cache has not seen. Per-author
    /// failures degrade to a placeholder; they never fail the search.
    async fn resolve_authors(&self, posts: &[Post]) {
        let mut missing: Vec<UserId> = Vec::new();
        let mut seen: HashSet<&UserId> = HashSet::new();
        for post in posts {
            if seen.insert(&post.user_id) && !self.authors.contains(&post.user_id) {
                missing.push(post.user_id.clone());
            }
        }

        let mut fetched: Vec<(UserId, AuthorProfile)> = Vec::new();
        for uid in missing {
            let profile = match self.users.get_user(&uid).await {
                Ok(Some(user)) => AuthorProfile {
                    name: if user.name.is_empty() {
                        PLACEHOLDER_AUTHOR.to_string()
                    } else {
                        user.name
                    },
                    photo_url: user.photo_url,
                },
                Ok(None) => AuthorProfile::placeholder(),
                Err(error) => {
                    warn!(uid = %uid, error = %error, "author fetch failed");
                    AuthorProfile::placeholder()
                }
            };
            fetched.push((uid, profile));
        }

        self.authors.merge(fetched);
    }

    fn apply(&self, generation: u64, state: SearchState) {
        if self.generation.load(Ordering::SeqCst) != generation {
            // A newer search owns the state; drop this completion.
            return;
        }
        *self.state.lock().unwrap() = state;
    }

    /// Snapshot of the search lifecycle state.
    pub fn state(&self) -> SearchState {
        self.state.lock().unwrap().clone()
    }

    /// Handle to the author display cache (shared, never evicted).
    pub fn authors(&self) -> AuthorCache {
        self.authors.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_token_takes_text_before_first_comma() {
        assert_eq!(first_token("Toronto, ON, Canadá"), "Toronto");
        assert_eq!(first_token("  São Paulo , SP, Brasil"), "São Paulo");
    }

    #[test]
    fn test_first_token_without_comma_is_whole_label() {
        assert_eq!(first_token("Monaco"), "Monaco");
        assert_eq!(first_token(""), "");
    }

    #[test]
    fn test_first_token_preserves_case() {
        // The join is case-sensitive; the token must not be folded.
        assert_eq!(first_token("toronto, on, canadá"), "toronto");
    }
}
