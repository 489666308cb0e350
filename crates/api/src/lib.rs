pub mod bundle;
pub mod channel;
pub mod error;
pub mod host;
pub mod identity;
pub mod models;

// Re-export commonly used types
pub use bundle::BundleLoader;
pub use channel::AppStateChannel;
pub use error::{ApiError, ApiResult};
pub use host::HostWindow;
pub use identity::IdentityClient;
pub use models::*;
