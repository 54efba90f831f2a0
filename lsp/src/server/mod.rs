mod analysis;
mod config;
mod entry;
mod handlers;
mod logging;
mod state;
mod text;

pub use entry::run;
pub use state::MelLanguageServer;

/// Client configuration section read through `workspace/configuration`.
pub(crate) const CONFIG_SECTION: &str = "mel";
