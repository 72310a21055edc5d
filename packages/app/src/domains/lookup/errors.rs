use thiserror::Error;

/// Terminal states of one lookup attempt. Display strings are what the
/// screens show; they only clear on the next keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Deployment configuration is missing the provider credential.
    /// Detected before any network call; not retryable at runtime.
    #[error("Chave do Google não configurada.")]
    MissingApiKey,

    /// The provider answered, but with no usable city for this query.
    #[error("Cidade não encontrada.")]
    NotFound,

    /// Network failure or a malformed payload. No automatic retry.
    #[error("Erro ao procurar a cidade.")]
    Failed,
}
