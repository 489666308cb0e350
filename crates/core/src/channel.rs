//! In-process application state channel.
//!
//! Holds the latest navigation state and fans every event out over a tokio
//! broadcast channel. Subscribers that fall behind lose the oldest events,
//! which matches the last-write-wins contract of navigation state.

use std::sync::{Mutex, PoisonError};
use tokio::sync::broadcast;
use waypost_api::{
    AppStateChannel, BreadcrumbTrail, NavigationState, PageId, PageLoadState, PageStateUpdate,
    PageTitle, ShellEvent,
};

pub struct AppStateModel {
    current: Mutex<Option<NavigationState>>,
    tx: broadcast::Sender<ShellEvent>,
}

impl AppStateModel {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self {
            current: Mutex::new(None),
            tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.tx.subscribe()
    }

    /// Replace the navigation state and announce it.
    ///
    /// Title and breadcrumb metadata carried by the state are announced as
    /// their own events right after the state itself.
    pub fn set_state(&self, state: NavigationState) {
        let title = state.title.clone();
        let breadcrumbs = state.breadcrumbs.clone();
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());

        self.emit(ShellEvent::AppStateUpdate(state));
        if let Some(title) = title {
            self.emit(ShellEvent::PageTitleUpdate(title));
        }
        if let Some(breadcrumbs) = breadcrumbs {
            self.emit(ShellEvent::BreadcrumbUpdate(breadcrumbs));
        }
    }

    pub fn set_title(&self, title: PageTitle) {
        self.emit(ShellEvent::PageTitleUpdate(title));
    }

    pub fn set_breadcrumbs(&self, breadcrumbs: BreadcrumbTrail) {
        self.emit(ShellEvent::BreadcrumbUpdate(breadcrumbs));
    }

    /// Used by pages to report whether they managed to initialize.
    pub fn report_page_state(&self, state: PageLoadState, page: PageId) {
        self.emit(ShellEvent::PageStateUpdate(PageStateUpdate { state, page }));
    }
}

impl AppStateChannel for AppStateModel {
    fn refresh(&self) {
        let current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match current {
            Some(state) => self.emit(ShellEvent::AppStateUpdate(state)),
            None => tracing::debug!("refresh requested before any navigation state was set"),
        }
    }

    fn show_loading(&self, page: &PageId) {
        self.report_page_state(PageLoadState::Loading, page.clone());
    }

    fn emit(&self, event: ShellEvent) {
        let name = event.name();
        if self.tx.send(event).is_err() {
            tracing::debug!("No subscribers for {}", name);
        }
    }

    fn current(&self) -> Option<NavigationState> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_re_emits_latest_state() {
        let model = AppStateModel::new(8);
        let mut rx = model.subscribe();

        model.set_state(NavigationState::new("search"));
        model.set_state(NavigationState::new("item"));
        model.refresh();

        let mut pages = Vec::new();
        while let Ok(ShellEvent::AppStateUpdate(state)) = rx.try_recv() {
            pages.push(state.page.to_string());
        }
        assert_eq!(pages, ["search", "item", "item"]);
        assert_eq!(model.current().unwrap().page, PageId::from("item"));
    }

    #[tokio::test]
    async fn test_refresh_without_state_is_silent() {
        let model = AppStateModel::new(8);
        let mut rx = model.subscribe();
        model.refresh();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_state_metadata_is_announced() {
        let model = AppStateModel::new(8);
        let mut rx = model.subscribe();
        model.set_state(NavigationState::new("reports").with_title(PageTitle {
            show: true,
            text: "Reports".to_string(),
        }));

        assert_eq!(rx.try_recv().unwrap().name(), "app-state-update");
        let ShellEvent::PageTitleUpdate(title) = rx.try_recv().unwrap() else {
            panic!("expected page-title-update");
        };
        assert_eq!(title.text, "Reports");
    }

    #[tokio::test]
    async fn test_show_loading_reports_loading_state() {
        let model = AppStateModel::new(8);
        let mut rx = model.subscribe();
        model.show_loading(&PageId::from("users"));
        assert_eq!(
            rx.try_recv().unwrap(),
            ShellEvent::PageStateUpdate(PageStateUpdate {
                state: PageLoadState::Loading,
                page: PageId::from("users"),
            })
        );
    }
}
