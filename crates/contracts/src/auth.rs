//! Auth endpoint payloads.

use serde::{Deserialize, Serialize};

use crate::config::UserConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub nome: String,
    pub senha: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// `GET /api/auth/me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Me {
    pub nome: String,
    pub foto: Option<String>,
    pub config: UserConfig,
}

/// `PATCH /api/auth/config` body; the full bag is sent back after a
/// read-modify-write, last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigUpdateRequest {
    pub config: UserConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdateResponse {
    pub config: UserConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_me_tolerates_missing_config() {
        let me: Me = serde_json::from_str(r#"{"nome": "ana"}"#).unwrap();
        assert_eq!(me.nome, "ana");
        assert_eq!(me.config.rows_per_page(), 25);
        assert!(me.foto.is_none());
    }
}
