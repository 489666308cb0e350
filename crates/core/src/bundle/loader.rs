use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::future::Future;
use std::sync::Arc;
use waypost_api::{ApiResult, BundleId, BundleLoader};

/// Settled result of a bundle load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

impl LoadOutcome {
    pub fn is_loaded(self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

/// Whether a call to `ensure_loaded` recorded the load or found it recorded.
///
/// Only the caller holding `Started` is allowed to run the post-load
/// reconciliation, which bounds re-entrant navigation to one extra pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Started,
    Cached,
}

pub type LoadFuture = Shared<BoxFuture<'static, LoadOutcome>>;

/// Handle on a (possibly shared) in-flight or settled load.
#[derive(Clone)]
pub struct LoadTicket {
    bundle: BundleId,
    origin: LoadOrigin,
    future: LoadFuture,
}

impl LoadTicket {
    pub fn bundle(&self) -> &BundleId {
        &self.bundle
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    /// Outcome of the load if it has already settled.
    pub fn peek(&self) -> Option<LoadOutcome> {
        self.future.peek().copied()
    }

    pub async fn wait(self) -> LoadOutcome {
        self.future.await
    }
}

impl std::fmt::Debug for LoadTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadTicket")
            .field("bundle", &self.bundle)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Adapts an async closure into a `BundleLoader`.
pub struct FnLoader<F>(pub F);

#[async_trait]
impl<F, Fut> BundleLoader for FnLoader<F>
where
    F: Fn(BundleId) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<()>> + Send + 'static,
{
    async fn load(&self, bundle: &BundleId) -> ApiResult<()> {
        (self.0)(bundle.clone()).await
    }
}

/// Loaders by bundle, plus the memoized load of every bundle ever requested.
///
/// The load map only grows. A recorded load is never retried, whether it
/// settled as loaded or failed.
#[derive(Default)]
pub struct ModuleRegistry {
    loaders: DashMap<BundleId, Arc<dyn BundleLoader>>,
    loaded: DashMap<BundleId, LoadFuture>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_loader(&self, bundle: BundleId, loader: Arc<dyn BundleLoader>) {
        self.loaders.insert(bundle, loader);
    }

    pub fn register_fn<F, Fut>(&self, bundle: BundleId, f: F)
    where
        F: Fn(BundleId) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<()>> + Send + 'static,
    {
        self.register_loader(bundle, Arc::new(FnLoader(f)));
    }

    pub fn is_known(&self, bundle: &BundleId) -> bool {
        self.loaders.contains_key(bundle)
    }

    /// Whether a load was ever recorded for `bundle`.
    pub fn is_recorded(&self, bundle: &BundleId) -> bool {
        self.loaded.contains_key(bundle)
    }

    pub fn recorded_bundles(&self) -> Vec<BundleId> {
        let mut ids: Vec<_> = self.loaded.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    /// Record the load of `bundle` unless it is already recorded.
    ///
    /// The shared future is stored before this returns, so every caller
    /// racing on the same bundle ends up awaiting the same load. Unknown
    /// bundles record nothing and return `None`.
    pub fn ensure_loaded(&self, bundle: &BundleId) -> Option<LoadTicket> {
        let Some(loader) = self.loaders.get(bundle).map(|l| Arc::clone(l.value())) else {
            tracing::warn!(
                "Bundle '{}' has no registered loader; check the bundle configuration",
                bundle
            );
            return None;
        };

        let (origin, future) = match self.loaded.entry(bundle.clone()) {
            Entry::Occupied(entry) => {
                tracing::debug!("Bundle '{}' already recorded", bundle);
                (LoadOrigin::Cached, entry.get().clone())
            }
            Entry::Vacant(entry) => {
                let future = Self::load_future(bundle.clone(), loader);
                entry.insert(future.clone());
                (LoadOrigin::Started, future)
            }
        };

        Some(LoadTicket {
            bundle: bundle.clone(),
            origin,
            future,
        })
    }

    /// Load `bundle` and wait for it; unknown bundles report `Failed`.
    pub async fn load(&self, bundle: &BundleId) -> LoadOutcome {
        match self.ensure_loaded(bundle) {
            Some(ticket) => ticket.wait().await,
            None => LoadOutcome::Failed,
        }
    }

    fn load_future(bundle: BundleId, loader: Arc<dyn BundleLoader>) -> LoadFuture {
        async move {
            tracing::info!("Loading bundle '{}'", bundle);
            match loader.load(&bundle).await {
                Ok(()) => {
                    tracing::info!("Bundle '{}' loaded", bundle);
                    LoadOutcome::Loaded
                }
                Err(err) => {
                    tracing::warn!("Bundle '{}' failed to load: {}", bundle, err);
                    LoadOutcome::Failed
                }
            }
        }
        .boxed()
        .shared()
    }
}
