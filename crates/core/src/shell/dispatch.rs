use super::*;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

impl AppShell {
    /// Route one channel event to its handler.
    ///
    /// Events are applied in arrival order. Only the wait on a bundle load
    /// still in flight moves to its own task, so a slow load never holds up
    /// the events behind it.
    pub fn dispatch(self: &Arc<Self>, event: ShellEvent) {
        match event {
            ShellEvent::AppStateUpdate(state) => {
                if let Some(pending) = self.begin_navigation(state) {
                    let shell = Arc::clone(self);
                    tokio::spawn(async move {
                        shell.complete_navigation(pending).await;
                    });
                }
            }
            ShellEvent::PageStateUpdate(update) => self.on_page_state_update(update),
            ShellEvent::PageTitleUpdate(title) => self.on_page_title_update(title),
            ShellEvent::BreadcrumbUpdate(trail) => self.on_breadcrumb_update(trail),
            ShellEvent::TokenRefreshed(token) => self.on_token_refreshed(&token),
        }
    }

    /// Consume the channel subscription until `cancel_token` fires.
    pub async fn run(self: Arc<Self>, cancel_token: CancellationToken) -> Result<()> {
        let mut events = self.take_events()?;
        tracing::info!("App shell dispatch loop started");

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    break;
                }
                event = events.recv() => {
                    match event {
                        Ok(event) => self.dispatch(event),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!("App shell fell behind, skipped {} events", skipped);
                        }
                        Err(RecvError::Closed) => return Err(ShellError::ChannelClosed),
                    }
                }
            }
        }

        tracing::info!("App shell dispatch loop ended");
        Ok(())
    }

    /// Mount the shell and spawn its dispatch loop.
    pub fn start(self: &Arc<Self>, cancel_token: CancellationToken) -> JoinHandle<Result<()>> {
        self.mount();
        tokio::spawn(Arc::clone(self).run(cancel_token))
    }
}
