use thiserror::Error;
use tracing::info;

use crate::common::{PostId, UserId};
use crate::domains::posts::models::{NewPost, PostDraft};
use crate::kernel::AppDeps;

/// Reasons a publish attempt is refused or fails.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Local precondition: the description is required.
    #[error("Conte um pouco da sua experiência.")]
    MissingDescription,

    /// Local precondition: a candidate must have been committed. Free text
    /// in the city input is never accepted — every stored `city` value must
    /// come out of the lookup pipeline's vocabulary.
    #[error("Escolha uma cidade nas sugestões.")]
    MissingCity,

    /// Upload or store write failed after validation passed.
    #[error("Não foi possível publicar o post.")]
    Failed(#[source] anyhow::Error),
}

/// Publish a post, freezing the selected candidate's (city, state, country)
/// triple onto the record verbatim.
///
/// Validation happens before any network call: a draft without a committed
/// candidate or with a blank description never reaches the store. The photo,
/// when present, is uploaded to `posts/{uid}/{timestamp}.{ext}` and its
/// public URL stored on the post. `created_at` is assigned by the store.
pub async fn publish_post(
    deps: &AppDeps,
    author: &UserId,
    draft: PostDraft,
) -> Result<PostId, PublishError> {
    let description = draft.description.trim().to_string();
    if description.is_empty() {
        return Err(PublishError::MissingDescription);
    }
    let location = draft.location.ok_or(PublishError::MissingCity)?;

    let photo_url = match draft.photo {
        Some(photo) => {
            let extension = crate::common::utils::image_extension(
                photo.mime_type.as_deref(),
                photo.file_name.as_deref(),
            );
            let path = format!(
                "posts/{}/{}.{}",
                author,
                chrono::Utc::now().timestamp_millis(),
                extension
            );
            let content_type = photo.content_type().to_string();
            deps.blobs
                .upload(&path, photo.bytes, &content_type)
                .await
                .map_err(PublishError::Failed)?;
            let url = deps
                .blobs
                .download_url(&path)
                .await
                .map_err(PublishError::Failed)?;
            Some(url)
        }
        None => None,
    };

    let post = NewPost {
        user_id: author.clone(),
        description,
        // Copied verbatim; search joins on this exact byte sequence.
        city: location.city,
        state: location.state,
        country: location.country,
        photo_url,
    };

    let id = deps.posts.add_post(post).await.map_err(PublishError::Failed)?;
    info!(post_id = %id, author = %author, "post published");
    Ok(id)
}
