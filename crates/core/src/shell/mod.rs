//! App shell: the page-state machine
//!
//! Maps navigation state to a loaded bundle and a visible page. The visible
//! page is a single overwritten slot (a `watch` channel); concurrent
//! navigations are not queued, so whichever finishes last is shown.

use crate::bundle::{LoadOrigin, LoadTicket};
use crate::context::ShellContext;
use crate::error::{Result, ShellError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, watch};
use waypost_api::{
    AppStateChannel, AuthToken, BreadcrumbTrail, NavigationState, PageId, PageLoadState,
    PageStateUpdate, PageTitle, ShellEvent, ShellView,
};

mod dispatch;

/// A navigation waiting on a bundle load that has not settled yet
struct PendingNavigation {
    page: PageId,
    seq: u64,
    ticket: LoadTicket,
}

pub struct AppShell {
    ctx: Arc<ShellContext>,
    channel: Arc<dyn AppStateChannel>,
    view: watch::Sender<ShellView>,
    /// Sequence number of the most recently requested navigation
    nav_seq: AtomicU64,
    /// Subscription taken at construction so nothing emitted before the
    /// dispatch loop starts is missed
    events: Mutex<Option<broadcast::Receiver<ShellEvent>>>,
}

impl AppShell {
    pub fn new(ctx: Arc<ShellContext>) -> Self {
        let events = ctx.app_state.subscribe();
        let (view, _rx) = watch::channel(ShellView::new(ctx.config.title.clone()));
        Self {
            channel: ctx.channel(),
            ctx,
            view,
            nav_seq: AtomicU64::new(0),
            events: Mutex::new(Some(events)),
        }
    }

    pub fn context(&self) -> &Arc<ShellContext> {
        &self.ctx
    }

    /// Observe the view; every change is published here.
    pub fn subscribe(&self) -> watch::Receiver<ShellView> {
        self.view.subscribe()
    }

    pub fn view(&self) -> ShellView {
        self.view.borrow().clone()
    }

    pub fn current_page(&self) -> PageId {
        self.view.borrow().page.clone()
    }

    /// Pages rendered without loading any bundle.
    pub fn is_bundle_free(page: &PageId) -> bool {
        *page == PageId::HOME || *page == PageId::NOT_LOADED
    }

    /// Start on the placeholder and ask for the current navigation state.
    pub fn mount(&self) {
        self.view.send_modify(|view| view.set_page(PageId::NOT_LOADED));
        self.channel.refresh();
        tracing::info!("App shell mounted");
    }

    /// Handle `app-state-update`.
    ///
    /// Suspends while the page's bundle loads. A failed or unknown bundle is
    /// only logged: the page is still selected and renders blank.
    pub async fn on_app_state_update(&self, state: NavigationState) {
        if let Some(pending) = self.begin_navigation(state) {
            self.complete_navigation(pending).await;
        }
    }

    /// Synchronous half of a navigation.
    ///
    /// Bundle-free pages, unknown bundles and bundles whose load already
    /// settled are shown right here. Only a load still in flight comes back
    /// as a `PendingNavigation`.
    fn begin_navigation(&self, state: NavigationState) -> Option<PendingNavigation> {
        let page = state.page;
        let seq = self.nav_seq.fetch_add(1, Ordering::SeqCst) + 1;

        if Self::is_bundle_free(&page) {
            self.show_page(page);
            return None;
        }

        let ticket = match self.ctx.bundles.resolve_bundle(&page) {
            Some(bundle) => self.ctx.modules.ensure_loaded(bundle),
            None => {
                tracing::warn!("Bundle not found for page '{}'", page);
                None
            }
        };
        let Some(ticket) = ticket else {
            self.finish_navigation(page, seq, None);
            return None;
        };

        match ticket.peek() {
            Some(outcome) => {
                if !outcome.is_loaded() {
                    tracing::warn!("Showing page '{}' without its code", page);
                }
                self.finish_navigation(page, seq, Some(ticket.origin()));
                None
            }
            None => Some(PendingNavigation { page, seq, ticket }),
        }
    }

    async fn complete_navigation(&self, pending: PendingNavigation) {
        let PendingNavigation { page, seq, ticket } = pending;
        let origin = ticket.origin();
        if !ticket.wait().await.is_loaded() {
            tracing::warn!("Showing page '{}' without its code", page);
        }
        self.finish_navigation(page, seq, Some(origin));
    }

    /// Second half of a navigation, after its bundle settled.
    ///
    /// `origin` is `Some(Started)` only for the call that recorded the load;
    /// that call alone re-fires the channel and the auth refresh hook, so a
    /// re-emitted state comes back as a cache hit and stops there.
    fn finish_navigation(&self, page: PageId, seq: u64, origin: Option<LoadOrigin>) {
        if origin == Some(LoadOrigin::Started) {
            // the freshly loaded page may be listening for app state too
            self.channel.refresh();
            if let Some(auth) = self.ctx.auth.as_ref().filter(|auth| auth.is_initialized()) {
                auth.on_auth_refresh_success();
            }
        }

        if self.ctx.config.navigation.discard_stale {
            let latest = self.nav_seq.load(Ordering::SeqCst);
            if seq != latest {
                tracing::debug!(
                    "Dropping stale navigation to '{}' ({} < {})",
                    page,
                    seq,
                    latest
                );
                return;
            }
        }

        self.show_page(page);
    }

    /// Handle `page-state-update`: anything but `loaded` shows the placeholder.
    pub fn on_page_state_update(&self, update: PageStateUpdate) {
        let page = match update.state {
            PageLoadState::Loaded => update.page,
            PageLoadState::Loading | PageLoadState::Error => PageId::NOT_LOADED,
        };
        self.view.send_modify(|view| view.set_page(page));
    }

    pub fn on_page_title_update(&self, title: PageTitle) {
        self.view.send_modify(|view| {
            view.page_title = title.text;
            view.show_page_title = title.show;
        });
    }

    pub fn on_breadcrumb_update(&self, trail: BreadcrumbTrail) {
        self.view.send_modify(|view| {
            view.breadcrumbs = trail.breadcrumbs;
            view.show_breadcrumbs = trail.show;
        });
    }

    pub fn on_token_refreshed(&self, token: &AuthToken) {
        let authenticated = !token.is_empty();
        self.view.send_if_modified(|view| {
            let changed = view.user_is_authenticated != authenticated;
            view.user_is_authenticated = authenticated;
            changed
        });
    }

    fn show_page(&self, page: PageId) {
        self.view.send_modify(|view| view.set_page(page));
        self.ctx.host.scroll_to_origin();
    }

    fn take_events(&self) -> Result<broadcast::Receiver<ShellEvent>> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| ShellError::Internal("app shell already started".to_string()))
    }
}
