pub mod auth;
pub mod event;
pub mod ids;
pub mod navigation;
pub mod view;

pub use auth::*;
pub use event::*;
pub use ids::*;
pub use navigation::*;
pub use view::*;
