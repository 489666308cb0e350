use crate::error::ApiResult;
use crate::models::BundleId;
use async_trait::async_trait;

/// Fetches and executes the code of one bundle.
///
/// Called at most once per bundle by the module registry.
#[async_trait]
pub trait BundleLoader: Send + Sync {
    async fn load(&self, bundle: &BundleId) -> ApiResult<()>;
}
