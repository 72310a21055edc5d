use thiserror::Error;
use tracing::{info, warn};

use crate::common::utils::image_extension;
use crate::common::UserId;
use crate::domains::posts::models::Post;
use crate::domains::profile::models::{AvatarChange, ProfileForm, ProfileUpdate, UserProfile};
use crate::kernel::{AppDeps, Subscription};

#[derive(Debug, Error)]
pub enum ProfileError {
    /// Local precondition: the name is required.
    #[error("Preencha o nome.")]
    MissingName,

    #[error("Não foi possível salvar as alterações.")]
    Failed(#[source] anyhow::Error),
}

/// Live view of `users/{uid}`.
pub async fn subscribe_profile(
    deps: &AppDeps,
    uid: &UserId,
) -> anyhow::Result<Subscription<Option<UserProfile>>> {
    deps.users.subscribe_user(uid).await
}

/// The user's own posts, newest first (store-side ordering).
pub async fn own_posts(deps: &AppDeps, uid: &UserId) -> anyhow::Result<Vec<Post>> {
    deps.posts.posts_by_author(uid).await
}

/// Persist the edit-profile form: avatar change, identity display profile,
/// and the `users/{uid}` document, in that order.
///
/// Deleting a replaced or removed avatar blob is best-effort — a failed
/// delete is logged and the save continues; the document stops referencing
/// the blob either way.
pub async fn save_profile(
    deps: &AppDeps,
    uid: &UserId,
    current: &UserProfile,
    form: ProfileForm,
) -> Result<UserProfile, ProfileError> {
    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(ProfileError::MissingName);
    }
    let phone = crate::common::utils::unmask_digits(&form.phone);
    let bio = form.bio.trim().to_string();

    let mut photo_url = current.photo_url.clone();
    let mut storage_path = current.storage_path.clone();

    match form.avatar {
        AvatarChange::Keep => {}
        AvatarChange::Remove => {
            if let Some(path) = &storage_path {
                if let Err(error) = deps.blobs.delete(path).await {
                    warn!(path = %path, error = %error, "avatar delete failed");
                }
            }
            photo_url = None;
            storage_path = None;
        }
        AvatarChange::Replace(photo) => {
            let extension =
                image_extension(photo.mime_type.as_deref(), photo.file_name.as_deref());
            let path = format!("avatars/{}.{}", uid, extension);
            let content_type = photo.content_type().to_string();
            deps.blobs
                .upload(&path, photo.bytes, &content_type)
                .await
                .map_err(ProfileError::Failed)?;
            photo_url = Some(
                deps.blobs
                    .download_url(&path)
                    .await
                    .map_err(ProfileError::Failed)?,
            );
            storage_path = Some(path);
        }
    }

    deps.identity
        .update_display_profile(uid, &name, photo_url.as_deref())
        .await
        .map_err(ProfileError::Failed)?;

    let update = ProfileUpdate {
        name: name.clone(),
        phone: phone.clone(),
        bio: bio.clone(),
        photo_url: photo_url.clone(),
        storage_path: storage_path.clone(),
    };
    deps.users
        .update_user(uid, update)
        .await
        .map_err(ProfileError::Failed)?;

    info!(uid = %uid, "profile saved");
    Ok(UserProfile {
        name,
        email: current.email.clone(),
        phone,
        bio,
        photo_url,
        storage_path,
        created_at: current.created_at,
    })
}
