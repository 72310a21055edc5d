use tracing::{info, warn};

use crate::common::utils::image_extension;
use crate::domains::auth::errors::{RecoveryError, SignUpError};
use crate::domains::auth::models::RegistrationForm;
use crate::domains::profile::models::UserProfile;
use crate::kernel::{AppDeps, AuthUser, IdentityError};

/// Acknowledgment for a recovery request. Deliberately does not disclose
/// whether the account exists.
pub const RECOVERY_ACK: &str = "Se existir uma conta, enviaremos instruções para este e-mail.";

/// Email/password sign-in.
pub async fn sign_in(
    deps: &AppDeps,
    email: &str,
    password: &str,
) -> Result<AuthUser, IdentityError> {
    deps.identity.sign_in(email.trim(), password).await
}

/// Register a new account: identity account, optional avatar, display
/// profile, and the `users/{uid}` document.
///
/// The avatar upload is best-effort — a storage failure logs a warning and
/// the account proceeds without a photo. Everything after account creation
/// that fails hard leaves the account usable but incomplete, mirroring the
/// provider-first write order.
pub async fn sign_up(deps: &AppDeps, form: RegistrationForm) -> Result<AuthUser, SignUpError> {
    form.validate()?;

    let user = deps
        .identity
        .create_user(form.email.trim(), &form.password)
        .await?;

    let mut photo_url: Option<String> = None;
    let mut storage_path: Option<String> = None;
    if let Some(avatar) = &form.avatar {
        let extension = image_extension(avatar.mime_type.as_deref(), avatar.file_name.as_deref());
        let path = format!("avatars/{}.{}", user.uid, extension);
        let uploaded = deps
            .blobs
            .upload(&path, avatar.bytes.clone(), avatar.content_type())
            .await;
        match uploaded {
            Ok(()) => match deps.blobs.download_url(&path).await {
                Ok(url) => {
                    photo_url = Some(url);
                    storage_path = Some(path);
                }
                Err(error) => {
                    warn!(error = %error, "avatar URL resolution failed, continuing without photo");
                }
            },
            Err(error) => {
                warn!(error = %error, "avatar upload failed, continuing without photo");
            }
        }
    }

    let name = form.name.trim().to_string();
    deps.identity
        .update_display_profile(&user.uid, &name, photo_url.as_deref())
        .await
        .map_err(SignUpError::Failed)?;

    let profile = UserProfile {
        name: name.clone(),
        email: user.email.clone(),
        phone: form.phone_digits(),
        bio: form.bio.trim().to_string(),
        photo_url: photo_url.clone(),
        storage_path,
        created_at: None, // store-assigned
    };
    deps.users
        .set_user(&user.uid, profile)
        .await
        .map_err(SignUpError::Failed)?;

    info!(uid = %user.uid, "account created");
    Ok(AuthUser {
        display_name: Some(name),
        photo_url,
        ..user
    })
}

/// Validate a password-recovery request and produce the acknowledgment.
/// No provider call is made.
pub fn request_password_reset(email: &str) -> Result<&'static str, RecoveryError> {
    if !crate::common::utils::is_valid_email(email.trim()) {
        return Err(RecoveryError::InvalidEmail);
    }
    Ok(RECOVERY_ACK)
}
