use crate::error::ApiResult;
use crate::models::{AuthToken, InitOptions, InitOutcome};
use async_trait::async_trait;

/// Black-box identity provider client.
///
/// Out-of-band outcomes (refreshes, late logins) are reported to the auth
/// coordinator as `IdentityEvent`s by whoever owns the client.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Establish the session (login or silent SSO check).
    async fn init(&self, options: &InitOptions) -> ApiResult<InitOutcome>;

    /// Start an interactive login.
    async fn login(&self) -> ApiResult<()>;

    /// End the session.
    async fn logout(&self) -> ApiResult<()>;

    /// Current credential; empty when there is no session.
    fn token(&self) -> AuthToken;
}
