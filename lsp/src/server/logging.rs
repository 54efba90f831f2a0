use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

pub(crate) const DEFAULT_FILTER: &str = "mel_lsp=warn,mel_core=warn";
pub(crate) const VERBOSE_FILTER: &str = "mel_lsp=debug,mel_core=debug";

/// Handle for switching the log filter when the client toggles verbose logging.
#[derive(Clone)]
pub(crate) struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    // RUST_LOG always wins over the client setting.
    pinned_by_env: bool,
}

impl std::fmt::Debug for LogControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogControl")
            .field("pinned_by_env", &self.pinned_by_env)
            .finish_non_exhaustive()
    }
}

impl LogControl {
    pub(crate) fn set_verbose(&self, verbose: bool) {
        if self.pinned_by_env {
            return;
        }
        let directives = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
        if let Err(err) = self.handle.reload(EnvFilter::new(directives)) {
            tracing::warn!("failed to switch log filter: {}", err);
        }
    }
}

/// Install the stderr subscriber. stdout is reserved for JSON-RPC.
///
/// Returns `None` when a global subscriber is already installed.
pub(crate) fn init() -> Option<LogControl> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let pinned_by_env = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let (filter_layer, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .try_init()
        .ok()?;

    Some(LogControl { handle, pinned_by_env })
}
