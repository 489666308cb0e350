use crate::models::{NavigationState, PageId, ShellEvent};

/// The application state channel the router listens to.
///
/// Emission is synchronous: an implementation hands the event to its
/// subscribers and returns. Subscribers that react to an emission (including
/// one triggered by `refresh`) run on their own schedule, which is what lets
/// the router re-enter its navigation handler after a bundle first loads.
pub trait AppStateChannel: Send + Sync {
    /// Re-emit the current navigation state, if any.
    fn refresh(&self);

    /// Announce that `page` is loading.
    fn show_loading(&self, page: &PageId);

    /// Publish an arbitrary event to all subscribers.
    fn emit(&self, event: ShellEvent);

    /// Latest navigation state (last write wins).
    fn current(&self) -> Option<NavigationState>;
}
