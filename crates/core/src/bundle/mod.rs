//! Lazily loaded page bundles
//!
//! - `BundleRegistry`: static page → bundle mapping
//! - `ModuleRegistry`: per-bundle loaders plus the memoized load futures

mod loader;
mod registry;

pub use loader::{FnLoader, LoadFuture, LoadOrigin, LoadOutcome, LoadTicket, ModuleRegistry};
pub use registry::BundleRegistry;
