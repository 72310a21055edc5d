use crate::common::utils::{is_valid_email, unmask_digits};
use crate::common::PhotoAttachment;
use crate::domains::auth::errors::RegistrationError;

/// Everything the registration screen submits.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub bio: String,
    pub avatar: Option<PhotoAttachment>,
}

impl RegistrationForm {
    /// Local validation, run before any provider call.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.name.trim().chars().count() < 3 {
            return Err(RegistrationError::NameTooShort);
        }
        if !is_valid_email(&self.email) {
            return Err(RegistrationError::InvalidEmail);
        }
        if self.password.chars().count() < 6 {
            return Err(RegistrationError::WeakPassword);
        }
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        Ok(())
    }

    /// Phone normalized to digits (what gets stored).
    pub fn phone_digits(&self) -> String {
        unmask_digits(&self.phone)
    }
}
