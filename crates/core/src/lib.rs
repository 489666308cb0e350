pub mod auth;
pub mod bundle;
pub mod channel;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod shell;

pub use auth::AuthCoordinator;
pub use bundle::{BundleRegistry, LoadOrigin, LoadOutcome, ModuleRegistry};
pub use channel::AppStateModel;
pub use config::ShellConfig;
pub use context::{ShellContext, ShellContextBuilder};
pub use error::{Result, ShellError};
pub use shell::AppShell;
