//! Authentication: sign-in, registration, and the explicit session context.

pub mod commands;
pub mod errors;
pub mod models;
pub mod session;

pub use commands::{request_password_reset, sign_in, sign_up, RECOVERY_ACK};
pub use errors::{friendly_auth_message, RecoveryError, RegistrationError, SignUpError};
pub use models::RegistrationForm;
pub use session::SessionContext;
