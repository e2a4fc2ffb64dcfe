//! Session state and auth endpoints.

use leptos::prelude::*;

use contracts::auth::{ConfigUpdateRequest, ConfigUpdateResponse, LoginRequest, Me, TokenResponse};
use contracts::config::UserConfig;
use contracts::error::ApiError;

use super::{api, storage};

const TOKEN_STORAGE_KEY: &str = "auth_token";

/// App-wide session context. `Copy` so closures capture it freely.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub token: RwSignal<Option<String>>,
    pub user: RwSignal<Option<Me>>,
}

impl AppContext {
    /// Restores a previously stored token; the profile is refetched on
    /// startup.
    pub fn new() -> Self {
        Self {
            token: RwSignal::new(storage::get_string(TOKEN_STORAGE_KEY)),
            user: RwSignal::new(None),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.with(|t| t.is_some())
    }

    pub fn config(&self) -> UserConfig {
        self.user
            .with(|u| u.as_ref().map(|me| me.config.clone()))
            .unwrap_or_default()
    }

    pub fn require_token(&self) -> Result<String, ApiError> {
        self.token.get_untracked().ok_or(ApiError::Unauthorized)
    }

    pub fn set_session(&self, token: String, me: Me) {
        storage::set_string(TOKEN_STORAGE_KEY, &token);
        self.token.set(Some(token));
        self.user.set(Some(me));
    }

    pub fn set_config(&self, config: UserConfig) {
        self.user.update(|u| {
            if let Some(me) = u {
                me.config = config;
            }
        });
    }

    pub fn logout(&self) {
        storage::remove(TOKEN_STORAGE_KEY);
        self.token.set(None);
        self.user.set(None);
    }

    /// Expired sessions end here from every call site.
    pub fn handle_api_error(&self, err: &ApiError) {
        if err.is_unauthorized() {
            self.logout();
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn login(nome: &str, senha: &str) -> Result<(String, Me), ApiError> {
    let request = LoginRequest {
        nome: nome.trim().to_string(),
        senha: senha.to_string(),
    };
    let token: TokenResponse = api::post_json("/api/auth/login", "", None, &request).await?;
    let me = fetch_me(&token.access_token).await?;
    Ok((token.access_token, me))
}

pub async fn fetch_me(token: &str) -> Result<Me, ApiError> {
    api::get_json("/api/auth/me", token, None).await
}

/// Read-modify-write of the whole config bag; the server echoes the
/// stored result back.
pub async fn update_config(token: &str, config: UserConfig) -> Result<UserConfig, ApiError> {
    let response: ConfigUpdateResponse =
        api::patch_json("/api/auth/config", token, None, &ConfigUpdateRequest { config }).await?;
    Ok(response.config)
}
