#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Semaphore, broadcast};
use waypost_api::{
    ApiError, ApiResult, AuthToken, BundleId, BundleLoader, HostWindow, IdentityClient,
    InitOptions, InitOutcome, ShellEvent,
};
use waypost_core::config::BundleSpec;
use waypost_core::{AppShell, ShellConfig, ShellContext};

pub const ORIGIN: &str = "https://app.test";

#[derive(Default)]
pub struct RecordingHost {
    pub scrolls: AtomicUsize,
    pub redirects: Mutex<Vec<String>>,
}

impl HostWindow for RecordingHost {
    fn origin(&self) -> String {
        ORIGIN.to_string()
    }

    fn scroll_to_origin(&self) {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }

    fn redirect(&self, location: &str) {
        self.redirects.lock().unwrap().push(location.to_string());
    }
}

/// Loader that blocks until the test releases it.
pub struct GatedLoader {
    calls: AtomicUsize,
    gate: Semaphore,
    fail: bool,
}

impl GatedLoader {
    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            fail: false,
        })
    }

    pub fn open() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
            fail: true,
        })
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BundleLoader for GatedLoader {
    async fn load(&self, bundle: &BundleId) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate
            .acquire()
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .forget();
        if self.fail {
            return Err(ApiError::BundleLoad {
                bundle: bundle.to_string(),
                reason: "chunk request failed".to_string(),
            });
        }
        Ok(())
    }
}

pub struct FakeIdentity {
    authenticated: bool,
    fail_init: bool,
    token: Mutex<AuthToken>,
    pub init_options: Mutex<Option<InitOptions>>,
    pub logins: AtomicUsize,
    pub logouts: AtomicUsize,
}

impl FakeIdentity {
    fn build(authenticated: bool, fail_init: bool, token: AuthToken) -> Arc<Self> {
        Arc::new(Self {
            authenticated,
            fail_init,
            token: Mutex::new(token),
            init_options: Mutex::new(None),
            logins: AtomicUsize::new(0),
            logouts: AtomicUsize::new(0),
        })
    }

    pub fn authenticated(token: &str) -> Arc<Self> {
        Self::build(true, false, AuthToken::new(token))
    }

    pub fn anonymous() -> Arc<Self> {
        Self::build(false, false, AuthToken::empty())
    }

    pub fn unreachable() -> Arc<Self> {
        Self::build(false, true, AuthToken::empty())
    }

    pub fn set_token(&self, token: AuthToken) {
        *self.token.lock().unwrap() = token;
    }
}

#[async_trait]
impl IdentityClient for FakeIdentity {
    async fn init(&self, options: &InitOptions) -> ApiResult<InitOutcome> {
        *self.init_options.lock().unwrap() = Some(options.clone());
        if self.fail_init {
            return Err(ApiError::Identity("provider unreachable".to_string()));
        }
        Ok(InitOutcome {
            authenticated: self.authenticated,
        })
    }

    async fn login(&self) -> ApiResult<()> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn logout(&self) -> ApiResult<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        self.set_token(AuthToken::empty());
        Ok(())
    }

    fn token(&self) -> AuthToken {
        self.token.lock().unwrap().clone()
    }
}

/// `all` holds search/item, `admin` holds reports/users, `legacy` has no loader.
pub fn config() -> ShellConfig {
    ShellConfig {
        title: "Library Portal".to_string(),
        bundles: vec![
            BundleSpec {
                name: "all".to_string(),
                pages: vec!["search".to_string(), "item".to_string()],
            },
            BundleSpec {
                name: "admin".to_string(),
                pages: vec!["reports".to_string(), "users".to_string()],
            },
            BundleSpec {
                name: "legacy".to_string(),
                pages: vec!["archive".to_string()],
            },
        ],
        ..ShellConfig::default()
    }
}

pub struct Harness {
    pub ctx: Arc<ShellContext>,
    pub shell: Arc<AppShell>,
    pub host: Arc<RecordingHost>,
    pub all: Arc<GatedLoader>,
    pub admin: Arc<GatedLoader>,
}

pub fn harness(config: ShellConfig, all: Arc<GatedLoader>, admin: Arc<GatedLoader>) -> Harness {
    harness_with_identity(config, all, admin, None)
}

pub fn harness_with_identity(
    config: ShellConfig,
    all: Arc<GatedLoader>,
    admin: Arc<GatedLoader>,
    identity: Option<Arc<FakeIdentity>>,
) -> Harness {
    let host = Arc::new(RecordingHost::default());
    let mut builder = ShellContext::builder(config)
        .with_host(host.clone())
        .with_loader(BundleId::ALL, all.clone())
        .with_loader(BundleId::ADMIN, admin.clone());
    if let Some(identity) = identity {
        builder = builder.with_identity_client(identity);
    }
    let ctx = builder.build().expect("valid shell context");
    let shell = Arc::new(AppShell::new(ctx.clone()));
    Harness {
        ctx,
        shell,
        host,
        all,
        admin,
    }
}

/// Yield until `done` holds, giving spawned tasks a chance to run.
pub async fn settle(mut done: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

/// Drain everything currently buffered on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<ShellEvent>) -> Vec<ShellEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn app_state_updates(events: &[ShellEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, ShellEvent::AppStateUpdate(_)))
        .count()
}
