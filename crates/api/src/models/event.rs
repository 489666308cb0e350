use super::auth::AuthToken;
use super::navigation::{BreadcrumbTrail, NavigationState, PageStateUpdate, PageTitle};
use serde::{Deserialize, Serialize};

/// Events carried by the application state channel.
///
/// Wire form is `{"event": "<name>", "payload": {...}}` with the event names
/// used by the page components.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum ShellEvent {
    AppStateUpdate(NavigationState),
    PageStateUpdate(PageStateUpdate),
    PageTitleUpdate(PageTitle),
    BreadcrumbUpdate(BreadcrumbTrail),
    TokenRefreshed(AuthToken),
}

impl ShellEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ShellEvent::AppStateUpdate(_) => "app-state-update",
            ShellEvent::PageStateUpdate(_) => "page-state-update",
            ShellEvent::PageTitleUpdate(_) => "page-title-update",
            ShellEvent::BreadcrumbUpdate(_) => "breadcrumb-update",
            ShellEvent::TokenRefreshed(_) => "token-refreshed",
        }
    }
}
