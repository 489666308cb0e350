//! Auth coordinator
//!
//! Wraps the identity client in an explicit lifecycle:
//!
//! ```text
//! Uninitialized ──init()──▶ Initializing ──auth success──▶ Ready
//!                                │
//!                                └── init error / auth error ──▶ Failed
//! ```
//!
//! Silent refreshes happen any number of times while `Ready`; each outcome
//! arrives as an `IdentityEvent`.

use crate::config::AuthConfig;
use crate::error::{Result, ShellError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use waypost_api::{
    AppStateChannel, AuthPhase, AuthToken, HostWindow, IdentityClient, IdentityEvent,
    InitOptions, OnLoad, ShellEvent,
};

pub struct AuthCoordinator {
    client: Arc<dyn IdentityClient>,
    channel: Arc<dyn AppStateChannel>,
    host: Arc<dyn HostWindow>,
    config: AuthConfig,
    phase: watch::Sender<AuthPhase>,
    token: Mutex<AuthToken>,
    /// Set once the first auth success has been processed
    initialized: AtomicBool,
}

impl AuthCoordinator {
    pub fn new(
        client: Arc<dyn IdentityClient>,
        channel: Arc<dyn AppStateChannel>,
        host: Arc<dyn HostWindow>,
        config: AuthConfig,
    ) -> Self {
        let (phase, _rx) = watch::channel(AuthPhase::Uninitialized);
        Self {
            client,
            channel,
            host,
            config,
            phase,
            token: Mutex::new(AuthToken::empty()),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn phase(&self) -> AuthPhase {
        *self.phase.borrow()
    }

    /// Whether the session has been established at least once.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn cached_token(&self) -> AuthToken {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Options handed to the identity client.
    pub fn init_options(&self) -> Result<InitOptions> {
        let origin = url::Url::parse(&self.host.origin())?;
        let redirect = origin.join(&self.config.silent_check_sso_path)?;
        Ok(InitOptions {
            on_load: OnLoad::CheckSso,
            silent_check_sso_redirect_uri: redirect.to_string(),
            scope: self.config.oidc_scope.clone(),
        })
    }

    /// Establish the identity session.
    ///
    /// An already authenticated session completes the auth-success flow
    /// before this returns; otherwise an interactive login is started and
    /// the success arrives later through `handle`. Failure redirects away
    /// from protected content and is not retried.
    pub async fn init(&self) -> Result<AuthPhase> {
        let started = self.phase.send_if_modified(|phase| {
            if *phase == AuthPhase::Uninitialized {
                *phase = AuthPhase::Initializing;
                true
            } else {
                false
            }
        });
        if !started {
            return Err(ShellError::Auth(format!(
                "identity client already initialized (phase {:?})",
                self.phase()
            )));
        }

        let options = match self.init_options() {
            Ok(options) => options,
            Err(err) => {
                self.on_unauthorized(&err.to_string());
                return Err(err);
            }
        };

        match self.client.init(&options).await {
            Ok(outcome) if outcome.authenticated => {
                self.on_auth_success();
            }
            Ok(_) => {
                tracing::info!("No identity session, starting login");
                if let Err(err) = self.client.login().await {
                    self.on_unauthorized(&err.to_string());
                    return Err(err.into());
                }
            }
            Err(err) => {
                self.on_unauthorized(&err.to_string());
                return Err(err.into());
            }
        }

        Ok(self.phase())
    }

    /// Route an out-of-band identity provider outcome.
    pub async fn handle(&self, event: IdentityEvent) {
        match event {
            IdentityEvent::AuthSuccess => self.on_auth_success(),
            IdentityEvent::AuthError(reason) => self.on_unauthorized(&reason),
            IdentityEvent::RefreshSuccess => self.on_auth_refresh_success(),
            IdentityEvent::RefreshError(reason) => self.on_auth_refresh_error(&reason).await,
        }
    }

    /// First successful authentication.
    ///
    /// Caches the token, releases whoever waits in `wait_ready` (the app
    /// shell mount), then runs the refresh-success hook so dependent state
    /// sees the valid session.
    pub fn on_auth_success(&self) {
        self.store_token(self.client.token());
        self.initialized.store(true, Ordering::Release);
        self.phase.send_replace(AuthPhase::Ready);
        tracing::info!("Identity session established");
        self.on_auth_refresh_success();
    }

    /// Publish the current token to the channel.
    pub fn on_auth_refresh_success(&self) {
        let token = self.client.token();
        self.store_token(token.clone());
        self.channel.emit(ShellEvent::TokenRefreshed(token));
    }

    /// A silent refresh failed: the session is over.
    pub async fn on_auth_refresh_error(&self, reason: &str) {
        tracing::warn!("Token refresh failed, logging out: {}", reason);
        if let Err(err) = self.client.logout().await {
            tracing::error!("Logout after refresh failure did not complete: {}", err);
        }
        self.store_token(AuthToken::empty());
        self.channel.emit(ShellEvent::TokenRefreshed(AuthToken::empty()));
    }

    pub fn on_unauthorized(&self, reason: &str) {
        tracing::error!("Authentication failed: {}", reason);
        self.phase.send_replace(AuthPhase::Failed);
        self.host.redirect(&self.config.unauthorized_path);
    }

    /// Wait until the coordinator is `Ready`; errors if it fails instead.
    pub async fn wait_ready(&self) -> Result<()> {
        let mut rx = self.phase.subscribe();
        let phase = *rx
            .wait_for(|phase| matches!(phase, AuthPhase::Ready | AuthPhase::Failed))
            .await
            .map_err(|_| ShellError::ChannelClosed)?;
        match phase {
            AuthPhase::Ready => Ok(()),
            other => Err(ShellError::Auth(format!("authentication ended in {other:?}"))),
        }
    }

    fn store_token(&self, token: AuthToken) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }
}
