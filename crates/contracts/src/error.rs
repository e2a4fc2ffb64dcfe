//! Error taxonomy of the API client. Messages are user-facing and in
//! the language of the rest of the UI.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Rejected before any network call, e.g. a file with the wrong
    /// extension.
    #[error("{0}")]
    Validation(String),

    #[error("Erro de rede: {0}")]
    Network(String),

    /// 401 from the server or a missing session token.
    #[error("Sessão expirada. Faça login novamente.")]
    Unauthorized,

    /// Any other non-2xx; `message` comes from the server's `detail` or
    /// `message` field when present.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ApiError::Api {
            status: 422,
            message: "Planilha sem cabeçalho".into(),
        };
        assert_eq!(err.to_string(), "Planilha sem cabeçalho");
        assert!(ApiError::Unauthorized.to_string().contains("Sessão expirada"));
        assert!(ApiError::Unauthorized.is_unauthorized());
    }
}
