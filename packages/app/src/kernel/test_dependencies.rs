// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into AppDeps for tests.
// Every mock records its calls so tests can assert on traffic (e.g. "no
// lookup was issued", "no store write happened").

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use geocode::{AddressComponent, GeocodeResponse, GeocodeResult};

use crate::common::{PostId, UserId};
use crate::domains::posts::models::{NewPost, Post};
use crate::domains::profile::models::{ProfileUpdate, UserProfile};
use crate::kernel::{
    AppDeps, AuthUser, BaseBlobStore, BaseGeocodeService, BaseIdentityService, BasePostStore,
    BaseUserStore, IdentityError, Subscription,
};

// =============================================================================
// Mock Identity Service
// =============================================================================

pub struct MockIdentityService {
    accounts: Mutex<HashMap<String, (String, AuthUser)>>,
    session: watch::Sender<Option<AuthUser>>,
    next_uid: AtomicU64,
    profile_updates: Mutex<Vec<(UserId, String, Option<String>)>>,
}

impl MockIdentityService {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            session,
            next_uid: AtomicU64::new(1),
            profile_updates: Mutex::new(Vec::new()),
        }
    }

    /// Pre-register an account without signing it in.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        let uid = self.mint_uid();
        let user = AuthUser {
            uid,
            email: email.to_string(),
            display_name: None,
            photo_url: None,
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), user));
        self
    }

    /// Display-profile updates received, in order.
    pub fn profile_updates(&self) -> Vec<(UserId, String, Option<String>)> {
        self.profile_updates.lock().unwrap().clone()
    }

    fn mint_uid(&self) -> UserId {
        let n = self.next_uid.fetch_add(1, Ordering::SeqCst);
        UserId::new(format!("user-{n}"))
    }
}

impl Default for MockIdentityService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseIdentityService for MockIdentityService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        let Some((stored_password, user)) = accounts.get(email) else {
            return Err(IdentityError::InvalidCredentials);
        };
        if stored_password != password {
            return Err(IdentityError::InvalidCredentials);
        }
        let user = user.clone();
        drop(accounts);
        self.session.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<AuthUser, IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(IdentityError::EmailAlreadyInUse);
        }
        let user = AuthUser {
            uid: self.mint_uid(),
            email: email.to_string(),
            display_name: None,
            photo_url: None,
        };
        accounts.insert(email.to_string(), (password.to_string(), user.clone()));
        drop(accounts);
        self.session.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn update_display_profile(
        &self,
        uid: &UserId,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<()> {
        self.profile_updates.lock().unwrap().push((
            uid.clone(),
            display_name.to_string(),
            photo_url.map(str::to_string),
        ));

        let mut accounts = self.accounts.lock().unwrap();
        for (_, user) in accounts.values_mut() {
            if &user.uid == uid {
                user.display_name = Some(display_name.to_string());
                user.photo_url = photo_url.map(str::to_string);
            }
        }
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.session.borrow().clone()
    }

    fn watch_session(&self) -> watch::Receiver<Option<AuthUser>> {
        self.session.subscribe()
    }
}

// =============================================================================
// Mock User Store
// =============================================================================

pub struct MockUserStore {
    docs: Mutex<HashMap<UserId, UserProfile>>,
    watchers: Mutex<HashMap<UserId, watch::Sender<Option<UserProfile>>>>,
    failing_gets: Mutex<Vec<UserId>>,
    get_calls: Mutex<Vec<UserId>>,
    set_calls: Mutex<Vec<(UserId, UserProfile)>>,
    update_calls: Mutex<Vec<(UserId, ProfileUpdate)>>,
    unsubscribes: Arc<AtomicUsize>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self {
            docs: Mutex::new(HashMap::new()),
            watchers: Mutex::new(HashMap::new()),
            failing_gets: Mutex::new(Vec::new()),
            get_calls: Mutex::new(Vec::new()),
            set_calls: Mutex::new(Vec::new()),
            update_calls: Mutex::new(Vec::new()),
            unsubscribes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Seed a `users/{uid}` document.
    pub fn with_user(self, uid: &UserId, profile: UserProfile) -> Self {
        self.docs.lock().unwrap().insert(uid.clone(), profile);
        self
    }

    /// Make `get_user` fail for one uid (per-author failure scenarios).
    pub fn with_failing_get(self, uid: &UserId) -> Self {
        self.failing_gets.lock().unwrap().push(uid.clone());
        self
    }

    pub fn get_calls(&self) -> Vec<UserId> {
        self.get_calls.lock().unwrap().clone()
    }

    pub fn set_calls(&self) -> Vec<(UserId, UserProfile)> {
        self.set_calls.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> Vec<(UserId, ProfileUpdate)> {
        self.update_calls.lock().unwrap().clone()
    }

    /// How many subscriptions have been torn down.
    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }

    fn notify(&self, uid: &UserId) {
        let docs = self.docs.lock().unwrap();
        if let Some(sender) = self.watchers.lock().unwrap().get(uid) {
            sender.send_replace(docs.get(uid).cloned());
        }
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseUserStore for MockUserStore {
    async fn get_user(&self, uid: &UserId) -> Result<Option<UserProfile>> {
        self.get_calls.lock().unwrap().push(uid.clone());
        if self.failing_gets.lock().unwrap().contains(uid) {
            return Err(anyhow!("simulated user read failure"));
        }
        Ok(self.docs.lock().unwrap().get(uid).cloned())
    }

    async fn set_user(&self, uid: &UserId, mut profile: UserProfile) -> Result<()> {
        profile.created_at = Some(Utc::now());
        self.set_calls
            .lock()
            .unwrap()
            .push((uid.clone(), profile.clone()));
        self.docs.lock().unwrap().insert(uid.clone(), profile);
        self.notify(uid);
        Ok(())
    }

    async fn update_user(&self, uid: &UserId, update: ProfileUpdate) -> Result<()> {
        self.update_calls
            .lock()
            .unwrap()
            .push((uid.clone(), update.clone()));

        let mut docs = self.docs.lock().unwrap();
        let doc = docs.entry(uid.clone()).or_default();
        doc.name = update.name;
        doc.phone = update.phone;
        doc.bio = update.bio;
        doc.photo_url = update.photo_url;
        doc.storage_path = update.storage_path;
        drop(docs);
        self.notify(uid);
        Ok(())
    }

    async fn subscribe_user(&self, uid: &UserId) -> Result<Subscription<Option<UserProfile>>> {
        let current = self.docs.lock().unwrap().get(uid).cloned();
        let mut watchers = self.watchers.lock().unwrap();
        let sender = watchers
            .entry(uid.clone())
            .or_insert_with(|| watch::channel(None).0);
        sender.send_replace(current);

        let counter = Arc::clone(&self.unsubscribes);
        Ok(Subscription::new(sender.subscribe(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
    }
}

// =============================================================================
// Mock Post Store
// =============================================================================

pub struct MockPostStore {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicU64,
    /// Sequence feeding deterministic, strictly increasing timestamps.
    next_seq: AtomicU64,
    add_calls: Mutex<Vec<NewPost>>,
    fail_queries: AtomicBool,
}

impl MockPostStore {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            next_seq: AtomicU64::new(1),
            add_calls: Mutex::new(Vec::new()),
            fail_queries: AtomicBool::new(false),
        }
    }

    /// Seed a post verbatim (explicit id and timestamp).
    pub fn with_post(self, post: Post) -> Self {
        self.posts.lock().unwrap().push(post);
        self
    }

    /// Make the query methods fail.
    pub fn fail_queries(&self) {
        self.fail_queries.store(true, Ordering::SeqCst);
    }

    pub fn add_calls(&self) -> Vec<NewPost> {
        self.add_calls.lock().unwrap().clone()
    }

    pub fn stored_posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    fn server_timestamp(&self) -> DateTime<Utc> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) as i64;
        Utc.timestamp_opt(1_700_000_000 + seq, 0).unwrap()
    }
}

impl Default for MockPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePostStore for MockPostStore {
    async fn add_post(&self, post: NewPost) -> Result<PostId> {
        self.add_calls.lock().unwrap().push(post.clone());

        let id = PostId::new(format!(
            "post-{}",
            self.next_id.fetch_add(1, Ordering::SeqCst)
        ));
        let stored = Post {
            id: id.clone(),
            user_id: post.user_id,
            description: post.description,
            city: post.city,
            state: post.state,
            country: post.country,
            photo_url: post.photo_url,
            created_at: Some(self.server_timestamp()),
        };
        self.posts.lock().unwrap().push(stored);
        Ok(id)
    }

    async fn posts_by_city(&self, city: &str) -> Result<Vec<Post>> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated query failure"));
        }
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.city == city)
            .cloned()
            .collect())
    }

    async fn posts_by_author(&self, uid: &UserId) -> Result<Vec<Post>> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated query failure"));
        }
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.user_id == uid)
            .cloned()
            .collect();
        crate::domains::posts::models::sort_newest_first(&mut posts);
        Ok(posts)
    }
}

// =============================================================================
// Mock Blob Store
// =============================================================================

pub struct MockBlobStore {
    blobs: Mutex<HashMap<String, (Vec<u8>, String)>>,
    deletes: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            deletes: Mutex::new(Vec::new()),
            fail_uploads: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
        }
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    /// Paths uploaded so far.
    pub fn uploaded_paths(&self) -> Vec<String> {
        self.blobs.lock().unwrap().keys().cloned().collect()
    }

    pub fn deleted_paths(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn blob(&self, path: &str) -> Option<(Vec<u8>, String)> {
        self.blobs.lock().unwrap().get(path).cloned()
    }
}

impl Default for MockBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseBlobStore for MockBlobStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated upload failure"));
        }
        self.blobs
            .lock()
            .unwrap()
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    async fn download_url(&self, path: &str) -> Result<String> {
        if !self.blobs.lock().unwrap().contains_key(path) {
            return Err(anyhow!("no blob at {path}"));
        }
        Ok(format!("https://storage.example.com/{path}"))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated delete failure"));
        }
        self.deletes.lock().unwrap().push(path.to_string());
        self.blobs.lock().unwrap().remove(path);
        Ok(())
    }
}

// =============================================================================
// Mock Geocode Service
// =============================================================================

pub struct MockGeocodeService {
    geocode_responses: Mutex<VecDeque<GeocodeResponse>>,
    autocomplete_responses: Mutex<VecDeque<Vec<String>>>,
    geocode_calls: Mutex<Vec<String>>,
    autocomplete_calls: Mutex<Vec<String>>,
    fail_requests: AtomicBool,
    latency: Mutex<Option<std::time::Duration>>,
}

impl MockGeocodeService {
    pub fn new() -> Self {
        Self {
            geocode_responses: Mutex::new(VecDeque::new()),
            autocomplete_responses: Mutex::new(VecDeque::new()),
            geocode_calls: Mutex::new(Vec::new()),
            autocomplete_calls: Mutex::new(Vec::new()),
            fail_requests: AtomicBool::new(false),
            latency: Mutex::new(None),
        }
    }

    /// Simulate upstream latency (paused-clock tests use this to overlap an
    /// in-flight response with newer input).
    pub fn with_latency(self, latency: std::time::Duration) -> Self {
        *self.latency.lock().unwrap() = Some(latency);
        self
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Queue a geocoding response.
    pub fn with_geocode_response(self, response: GeocodeResponse) -> Self {
        self.geocode_responses.lock().unwrap().push_back(response);
        self
    }

    /// Queue an "OK" geocoding response with the given city results.
    pub fn with_cities(self, cities: &[(&str, &str, &str)]) -> Self {
        let results = cities
            .iter()
            .map(|(city, state, country)| city_result(city, state, country))
            .collect();
        self.with_geocode_response(ok_response(results))
    }

    /// Queue an autocomplete response.
    pub fn with_predictions(self, labels: &[&str]) -> Self {
        self.autocomplete_responses
            .lock()
            .unwrap()
            .push_back(labels.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Make both endpoints fail at the transport level.
    pub fn fail_requests(&self) {
        self.fail_requests.store(true, Ordering::SeqCst);
    }

    /// Queries issued against the geocoding endpoint.
    pub fn geocode_calls(&self) -> Vec<String> {
        self.geocode_calls.lock().unwrap().clone()
    }

    /// Inputs issued against the autocomplete endpoint.
    pub fn autocomplete_calls(&self) -> Vec<String> {
        self.autocomplete_calls.lock().unwrap().clone()
    }

    /// Total upstream traffic from this session.
    pub fn call_count(&self) -> usize {
        self.geocode_calls.lock().unwrap().len() + self.autocomplete_calls.lock().unwrap().len()
    }
}

impl Default for MockGeocodeService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseGeocodeService for MockGeocodeService {
    async fn geocode(&self, query: &str) -> Result<GeocodeResponse> {
        self.geocode_calls.lock().unwrap().push(query.to_string());
        self.simulate_latency().await;
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated geocoding failure"));
        }
        Ok(self
            .geocode_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| GeocodeResponse {
                status: "ZERO_RESULTS".to_string(),
                results: vec![],
            }))
    }

    async fn autocomplete_cities(&self, input: &str) -> Result<Vec<String>> {
        self.autocomplete_calls
            .lock()
            .unwrap()
            .push(input.to_string());
        self.simulate_latency().await;
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated autocomplete failure"));
        }
        Ok(self
            .autocomplete_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// Build an "OK" geocoding response from raw results.
pub fn ok_response(results: Vec<GeocodeResult>) -> GeocodeResponse {
    GeocodeResponse {
        status: "OK".to_string(),
        results,
    }
}

/// Build a raw city-level geocoding result. The formatted address is the
/// usual `"city, state, country"` label.
pub fn city_result(city: &str, state: &str, country: &str) -> GeocodeResult {
    let mut address_components = Vec::new();
    if !city.is_empty() {
        address_components.push(AddressComponent {
            long_name: city.to_string(),
            types: vec!["locality".to_string()],
        });
    }
    if !state.is_empty() {
        address_components.push(AddressComponent {
            long_name: state.to_string(),
            types: vec!["administrative_area_level_1".to_string()],
        });
    }
    if !country.is_empty() {
        address_components.push(AddressComponent {
            long_name: country.to_string(),
            types: vec!["country".to_string()],
        });
    }
    let formatted: Vec<&str> = [city, state, country]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    GeocodeResult {
        address_components,
        formatted_address: Some(formatted.join(", ")),
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Aggregate of all mocks plus the `AppDeps` view domain functions take.
/// Tests keep the concrete handles to seed data and assert on calls.
pub struct TestDependencies {
    pub identity: Arc<MockIdentityService>,
    pub users: Arc<MockUserStore>,
    pub posts: Arc<MockPostStore>,
    pub blobs: Arc<MockBlobStore>,
    pub geocode: Arc<MockGeocodeService>,
    /// When false, `deps()` omits the geocoding provider (no API key).
    geocode_configured: bool,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            identity: Arc::new(MockIdentityService::new()),
            users: Arc::new(MockUserStore::new()),
            posts: Arc::new(MockPostStore::new()),
            blobs: Arc::new(MockBlobStore::new()),
            geocode: Arc::new(MockGeocodeService::new()),
            geocode_configured: true,
        }
    }

    pub fn with_identity(mut self, identity: MockIdentityService) -> Self {
        self.identity = Arc::new(identity);
        self
    }

    pub fn with_users(mut self, users: MockUserStore) -> Self {
        self.users = Arc::new(users);
        self
    }

    pub fn with_posts(mut self, posts: MockPostStore) -> Self {
        self.posts = Arc::new(posts);
        self
    }

    pub fn with_geocode(mut self, geocode: MockGeocodeService) -> Self {
        self.geocode = Arc::new(geocode);
        self
    }

    /// Simulate a deployment without a geocoding API key.
    pub fn without_geocode_key(mut self) -> Self {
        self.geocode_configured = false;
        self
    }

    pub fn deps(&self) -> AppDeps {
        AppDeps::new(
            self.identity.clone(),
            self.users.clone(),
            self.posts.clone(),
            self.blobs.clone(),
            if self.geocode_configured {
                Some(self.geocode.clone() as Arc<dyn BaseGeocodeService>)
            } else {
                None
            },
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
