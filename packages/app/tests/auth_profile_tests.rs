//! Integration tests for registration, sign-in, session observation, and
//! the profile save flow.

use app_core::common::{PhotoAttachment, UserId};
use app_core::domains::auth::{
    sign_in, sign_up, RegistrationError, RegistrationForm, SessionContext, SignUpError,
};
use app_core::domains::profile::{
    own_posts, save_profile, subscribe_profile, AvatarChange, ProfileError, ProfileForm,
    UserProfile,
};
use app_core::kernel::test_dependencies::{MockIdentityService, MockUserStore};
use app_core::kernel::{IdentityError, TestDependencies};

fn registration() -> RegistrationForm {
    RegistrationForm {
        name: "Ana Souza".to_string(),
        email: "ana@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        phone: "(11) 91234-5678".to_string(),
        bio: "Viajante".to_string(),
        avatar: None,
    }
}

fn avatar() -> PhotoAttachment {
    PhotoAttachment {
        bytes: vec![9, 9, 9],
        file_name: Some("avatar.jpg".to_string()),
        mime_type: Some("image/png".to_string()),
    }
}

// ----------------------------------------------------------------------------
// Sign-up
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_sign_up_creates_account_profile_and_document() {
    let test_deps = TestDependencies::new();

    let user = sign_up(&test_deps.deps(), registration()).await.unwrap();

    assert_eq!(user.display_name.as_deref(), Some("Ana Souza"));

    let updates = test_deps.identity.profile_updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].1, "Ana Souza");

    let writes = test_deps.users.set_calls();
    assert_eq!(writes.len(), 1);
    let (uid, doc) = &writes[0];
    assert_eq!(uid, &user.uid);
    assert_eq!(doc.name, "Ana Souza");
    assert_eq!(doc.phone, "11912345678");
    assert_eq!(doc.bio, "Viajante");
    assert!(doc.photo_url.is_none());
}

#[tokio::test]
async fn test_sign_up_with_avatar_uploads_and_links_it() {
    let test_deps = TestDependencies::new();
    let mut form = registration();
    form.avatar = Some(avatar());

    let user = sign_up(&test_deps.deps(), form).await.unwrap();

    // Extension comes from the MIME subtype, not the file name.
    let path = format!("avatars/{}.png", user.uid);
    assert!(test_deps.blobs.blob(&path).is_some());

    let (_, doc) = &test_deps.users.set_calls()[0];
    assert_eq!(
        doc.photo_url.as_deref(),
        Some(format!("https://storage.example.com/{path}").as_str())
    );
    assert_eq!(doc.storage_path.as_deref(), Some(path.as_str()));
}

#[tokio::test]
async fn test_sign_up_avatar_upload_failure_degrades_to_no_photo() {
    let test_deps = TestDependencies::new();
    test_deps.blobs.fail_uploads();
    let mut form = registration();
    form.avatar = Some(avatar());

    let user = sign_up(&test_deps.deps(), form).await.unwrap();

    assert!(user.photo_url.is_none());
    let (_, doc) = &test_deps.users.set_calls()[0];
    assert!(doc.photo_url.is_none());
    assert!(doc.storage_path.is_none());
}

#[tokio::test]
async fn test_sign_up_invalid_form_touches_nothing() {
    let test_deps = TestDependencies::new();
    let mut form = registration();
    form.confirm_password = "different".to_string();

    let result = sign_up(&test_deps.deps(), form).await;

    assert!(matches!(
        result,
        Err(SignUpError::Validation(RegistrationError::PasswordMismatch))
    ));
    assert!(test_deps.users.set_calls().is_empty());
    assert!(test_deps.identity.profile_updates().is_empty());
}

#[tokio::test]
async fn test_sign_up_duplicate_email_maps_to_friendly_message() {
    let identity = MockIdentityService::new().with_account("ana@example.com", "other");
    let test_deps = TestDependencies::new().with_identity(identity);

    let result = sign_up(&test_deps.deps(), registration()).await;

    match result {
        Err(error @ SignUpError::Identity(IdentityError::EmailAlreadyInUse)) => {
            assert_eq!(error.to_string(), "Este e-mail já está cadastrado.");
        }
        other => panic!("expected duplicate-email error, got {other:?}"),
    }
    assert!(test_deps.users.set_calls().is_empty());
}

// ----------------------------------------------------------------------------
// Sign-in and session
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_sign_in_rejects_wrong_password() {
    let identity = MockIdentityService::new().with_account("ana@example.com", "secret1");
    let test_deps = TestDependencies::new().with_identity(identity);

    let result = sign_in(&test_deps.deps(), "ana@example.com", "wrong").await;
    assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
}

#[tokio::test]
async fn test_session_context_observes_sign_in() {
    let identity = MockIdentityService::new().with_account("ana@example.com", "secret1");
    let test_deps = TestDependencies::new().with_identity(identity);
    let deps = test_deps.deps();

    let session = SessionContext::new(deps.identity.clone());
    assert!(session.current_user().is_none());
    let mut subscription = session.subscribe();

    let user = sign_in(&deps, " ana@example.com ", "secret1").await.unwrap();

    let observed = subscription.changed().await.flatten().unwrap();
    assert_eq!(observed.uid, user.uid);
    assert_eq!(session.current_user().unwrap().uid, user.uid);
}

// ----------------------------------------------------------------------------
// Profile
// ----------------------------------------------------------------------------

fn existing_profile() -> UserProfile {
    UserProfile {
        name: "Ana Souza".to_string(),
        email: "ana@example.com".to_string(),
        phone: "11912345678".to_string(),
        bio: "Viajante".to_string(),
        photo_url: Some("https://storage.example.com/avatars/u1.jpg".to_string()),
        storage_path: Some("avatars/u1.jpg".to_string()),
        created_at: None,
    }
}

fn profile_form(avatar: AvatarChange) -> ProfileForm {
    ProfileForm {
        name: "Ana S.".to_string(),
        phone: "(11) 91234-5678".to_string(),
        bio: "Nova bio".to_string(),
        avatar,
    }
}

#[tokio::test]
async fn test_save_profile_requires_a_name() {
    let test_deps = TestDependencies::new();
    let uid = UserId::new("u1");
    let mut form = profile_form(AvatarChange::Keep);
    form.name = "   ".to_string();

    let result = save_profile(&test_deps.deps(), &uid, &existing_profile(), form).await;

    assert!(matches!(result, Err(ProfileError::MissingName)));
    assert!(test_deps.users.update_calls().is_empty());
    assert!(test_deps.identity.profile_updates().is_empty());
}

#[tokio::test]
async fn test_save_profile_updates_identity_and_document() {
    let test_deps = TestDependencies::new();
    let uid = UserId::new("u1");

    let saved = save_profile(
        &test_deps.deps(),
        &uid,
        &existing_profile(),
        profile_form(AvatarChange::Keep),
    )
    .await
    .unwrap();

    assert_eq!(saved.name, "Ana S.");
    assert_eq!(saved.phone, "11912345678");
    // Keeping the avatar keeps the stored references.
    assert_eq!(saved.storage_path.as_deref(), Some("avatars/u1.jpg"));

    let updates = test_deps.users.update_calls();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].1.name, "Ana S.");
    assert_eq!(updates[0].1.bio, "Nova bio");
}

#[tokio::test]
async fn test_save_profile_remove_deletes_blob_and_clears_links() {
    let test_deps = TestDependencies::new();
    let uid = UserId::new("u1");

    let saved = save_profile(
        &test_deps.deps(),
        &uid,
        &existing_profile(),
        profile_form(AvatarChange::Remove),
    )
    .await
    .unwrap();

    assert!(saved.photo_url.is_none());
    assert!(saved.storage_path.is_none());
    assert_eq!(test_deps.blobs.deleted_paths(), ["avatars/u1.jpg"]);
}

#[tokio::test]
async fn test_save_profile_remove_survives_delete_failure() {
    let test_deps = TestDependencies::new();
    test_deps.blobs.fail_deletes();
    let uid = UserId::new("u1");

    let saved = save_profile(
        &test_deps.deps(),
        &uid,
        &existing_profile(),
        profile_form(AvatarChange::Remove),
    )
    .await
    .unwrap();

    // The blob may be orphaned, but the document no longer references it.
    assert!(saved.photo_url.is_none());
    assert_eq!(test_deps.users.update_calls()[0].1.photo_url, None);
}

#[tokio::test]
async fn test_save_profile_replace_uploads_new_avatar() {
    let test_deps = TestDependencies::new();
    let uid = UserId::new("u1");

    let saved = save_profile(
        &test_deps.deps(),
        &uid,
        &existing_profile(),
        profile_form(AvatarChange::Replace(avatar())),
    )
    .await
    .unwrap();

    assert_eq!(saved.storage_path.as_deref(), Some("avatars/u1.png"));
    assert_eq!(
        saved.photo_url.as_deref(),
        Some("https://storage.example.com/avatars/u1.png")
    );
    assert!(test_deps.blobs.blob("avatars/u1.png").is_some());
}

#[tokio::test]
async fn test_subscribe_profile_sees_saves_and_tears_down_once() {
    let uid = UserId::new("u1");
    let users = MockUserStore::new().with_user(&uid, existing_profile());
    let test_deps = TestDependencies::new().with_users(users);
    let deps = test_deps.deps();

    let mut subscription = subscribe_profile(&deps, &uid).await.unwrap();
    assert_eq!(subscription.current().unwrap().name, "Ana Souza");

    save_profile(&deps, &uid, &existing_profile(), profile_form(AvatarChange::Keep))
        .await
        .unwrap();

    let updated = subscription.changed().await.flatten().unwrap();
    assert_eq!(updated.name, "Ana S.");

    subscription.unsubscribe();
    assert_eq!(test_deps.users.unsubscribe_count(), 1);
}

#[tokio::test]
async fn test_own_posts_come_back_newest_first() {
    use app_core::domains::posts::{publish_post, PostDraft};
    use app_core::domains::lookup::CityCandidate;

    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let uid = UserId::new("u1");
    let candidate = CityCandidate {
        city: "Lisboa".to_string(),
        state: "Lisboa".to_string(),
        country: "Portugal".to_string(),
        formatted: "Lisboa, Portugal".to_string(),
    };

    for description in ["primeiro", "segundo"] {
        publish_post(
            &deps,
            &uid,
            PostDraft {
                description: description.to_string(),
                location: Some(candidate.clone()),
                photo: None,
            },
        )
        .await
        .unwrap();
    }

    let posts = own_posts(&deps, &uid).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].description, "segundo");
    assert_eq!(posts[1].description, "primeiro");
}
