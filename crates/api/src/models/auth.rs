use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Opaque credential handed out by the identity client.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    /// Unix seconds, when the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<u64>,
}

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            expires_at: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_expiry(mut self, expires_at: u64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.token.as_deref().is_none_or(str::is_empty)
    }

    pub fn secret(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }
}

/// What the identity provider does on `init`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OnLoad {
    CheckSso,
    LoginRequired,
}

/// Options passed to `IdentityClient::init`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    pub on_load: OnLoad,
    pub silent_check_sso_redirect_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOutcome {
    pub authenticated: bool,
}

/// Out-of-band outcomes reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    AuthSuccess,
    AuthError(String),
    RefreshSuccess,
    RefreshError(String),
}

/// Lifecycle phase of the auth coordinator
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthPhase {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}
