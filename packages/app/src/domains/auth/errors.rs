use thiserror::Error;

use crate::kernel::IdentityError;

/// Local registration-form failures, detected before any provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Digite seu nome completo (mínimo 3 letras).")]
    NameTooShort,

    #[error("E-mail inválido.")]
    InvalidEmail,

    #[error("A senha é muito fraca (mínimo 6).")]
    WeakPassword,

    #[error("As senhas não conferem.")]
    PasswordMismatch,
}

/// Everything that can go wrong during sign-up.
#[derive(Debug, Error)]
pub enum SignUpError {
    #[error("{0}")]
    Validation(#[from] RegistrationError),

    #[error("{}", friendly_auth_message(.0))]
    Identity(#[from] IdentityError),

    #[error("Ocorreu um erro inesperado.")]
    Failed(#[source] anyhow::Error),
}

/// Password-recovery request failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    #[error("Digite um e-mail válido para continuar.")]
    InvalidEmail,
}

/// Map a provider error to the message the screens show.
pub fn friendly_auth_message(error: &IdentityError) -> &'static str {
    match error {
        IdentityError::EmailAlreadyInUse => "Este e-mail já está cadastrado.",
        IdentityError::InvalidEmail => "E-mail inválido.",
        IdentityError::WeakPassword => "A senha é muito fraca (mínimo 6).",
        IdentityError::InvalidCredentials => "E-mail ou senha incorretos.",
        IdentityError::Network => "Sem conexão. Verifique sua internet.",
        IdentityError::Other(_) => "Ocorreu um erro inesperado.",
    }
}
