use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use waypost_core::config::LoggingConfig;
use waypost_core::logging::WorkerGuard;
use waypost_core::{AppShell, Result, ShellConfig, ShellContext, ShellError};

/// Component name of the shell's log files
pub const LOG_COMPONENT: &str = "shell";

/// A mounted app shell and its dispatch loop.
pub struct ShellHandle {
    pub shell: Arc<AppShell>,
    task: JoinHandle<Result<()>>,
    cancel: CancellationToken,
    /// Flushes the log file when the handle goes away
    _log_guard: Option<WorkerGuard>,
}

impl ShellHandle {
    /// Stop the dispatch loop and wait for it to exit.
    pub async fn shutdown(self) -> Result<()> {
        self.cancel.cancel();
        self.task
            .await
            .map_err(|e| ShellError::Internal(format!("dispatch loop panicked: {e}")))?
    }
}

/// Bootstraps the app shell for an assembled context.
///
/// Logging is installed first when `logging.enabled` is set. With
/// authentication required, the identity session is established first
/// and the shell is mounted only once it is ready. A pending interactive login
/// keeps this waiting until the identity provider reports back through
/// `AuthCoordinator::handle`; a failed one never mounts the shell.
pub async fn launch(ctx: Arc<ShellContext>, cancel: CancellationToken) -> Result<ShellHandle> {
    let log_guard = if ctx.config.logging.enabled {
        init_logging(&ctx.config.logging)
    } else {
        None
    };
    let shell = Arc::new(AppShell::new(Arc::clone(&ctx)));

    if let Some(auth) = &ctx.auth {
        auth.init().await?;
        auth.wait_ready().await?;
    }

    let task = shell.start(cancel.clone());
    tracing::info!("Shell '{}' launched", ctx.config.title);
    Ok(ShellHandle {
        shell,
        task,
        cancel,
        _log_guard: log_guard,
    })
}

/// Loads the shell configuration, falling back to defaults when the file is absent.
pub fn load_config(path: &Path) -> Result<ShellConfig> {
    if path.exists() {
        ShellConfig::load(path)
    } else {
        tracing::warn!("No shell config at {}, using defaults", path.display());
        Ok(ShellConfig::default())
    }
}

/// Install shell logging; a failure is reported and the shell runs without it.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    match waypost_core::logging::init_logging(LOG_COMPONENT, config) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("waypost: logging disabled: {err}");
            None
        }
    }
}
