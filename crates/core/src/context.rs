//! Process-scoped shell context
//!
//! Everything that would otherwise be a global singleton (the bundle cache,
//! the identity client, the app state model) lives here and is handed to
//! constructors, so tests can build as many independent shells as they like.

use crate::auth::AuthCoordinator;
use crate::bundle::{BundleRegistry, ModuleRegistry};
use crate::channel::AppStateModel;
use crate::config::ShellConfig;
use crate::error::{Result, ShellError};
use std::sync::Arc;
use waypost_api::{AppStateChannel, BundleId, BundleLoader, HostWindow, IdentityClient};

pub struct ShellContext {
    pub config: ShellConfig,
    pub bundles: BundleRegistry,
    pub modules: Arc<ModuleRegistry>,
    pub app_state: Arc<AppStateModel>,
    pub host: Arc<dyn HostWindow>,
    /// Present only when the configuration requires authentication
    pub auth: Option<Arc<AuthCoordinator>>,
}

impl ShellContext {
    pub fn builder(config: ShellConfig) -> ShellContextBuilder {
        ShellContextBuilder::new(config)
    }

    pub fn channel(&self) -> Arc<dyn AppStateChannel> {
        self.app_state.clone()
    }
}

pub struct ShellContextBuilder {
    config: ShellConfig,
    host: Option<Arc<dyn HostWindow>>,
    identity: Option<Arc<dyn IdentityClient>>,
    loaders: Vec<(BundleId, Arc<dyn BundleLoader>)>,
}

impl ShellContextBuilder {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            host: None,
            identity: None,
            loaders: Vec::new(),
        }
    }

    pub fn with_host(mut self, host: Arc<dyn HostWindow>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_identity_client(mut self, client: Arc<dyn IdentityClient>) -> Self {
        self.identity = Some(client);
        self
    }

    pub fn with_loader(mut self, bundle: BundleId, loader: Arc<dyn BundleLoader>) -> Self {
        self.loaders.push((bundle, loader));
        self
    }

    pub fn build(self) -> Result<Arc<ShellContext>> {
        self.config.validate()?;
        let host = self
            .host
            .ok_or_else(|| ShellError::Config("a host window is required".to_string()))?;

        let bundles = self.config.bundle_registry();
        let modules = Arc::new(ModuleRegistry::new());
        for (bundle, loader) in self.loaders {
            if bundles.pages_of(&bundle).is_none() {
                tracing::warn!("Loader registered for unconfigured bundle '{}'", bundle);
            }
            modules.register_loader(bundle, loader);
        }
        for bundle in bundles.bundle_ids() {
            if !modules.is_known(bundle) {
                tracing::warn!("Configured bundle '{}' has no loader", bundle);
            }
        }

        let app_state = Arc::new(AppStateModel::new(self.config.navigation.event_capacity));

        let auth = if self.config.auth.require_auth {
            let client = self.identity.ok_or_else(|| {
                ShellError::Config(
                    "auth.require_auth is set but no identity client was given".to_string(),
                )
            })?;
            Some(Arc::new(AuthCoordinator::new(
                client,
                app_state.clone(),
                Arc::clone(&host),
                self.config.auth.clone(),
            )))
        } else {
            None
        };

        Ok(Arc::new(ShellContext {
            config: self.config,
            bundles,
            modules,
            app_state,
            host,
            auth,
        }))
    }
}
