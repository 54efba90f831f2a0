use std::path::{Path, PathBuf};
use std::sync::Arc;

use mel_core::{CommandReference, DEFAULT_HELP_URL_BASE};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tower_lsp::lsp_types::ConfigurationItem;
use tracing::{debug, error, info, warn};

use super::CONFIG_SECTION;
use super::state::MelLanguageServer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServerConfig {
    pub(crate) verbose_logging: bool,
    pub(crate) help_url_base: String,
    /// Command table replacing the bundled one for sessions opened afterwards.
    pub(crate) reference_path: Option<PathBuf>,
    pub(crate) max_concurrent: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            verbose_logging: false,
            help_url_base: DEFAULT_HELP_URL_BASE.to_string(),
            reference_path: None,
            max_concurrent: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MelConfigSection {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    help: HelpConfig,
    #[serde(default)]
    reference: ReferenceConfig,
    #[serde(default)]
    performance: PerformanceConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LoggingConfig {
    #[serde(default)]
    verbose: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct HelpConfig {
    #[serde(default)]
    url_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ReferenceConfig {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PerformanceConfig {
    #[serde(default)]
    max_concurrent: Option<usize>,
}

impl ServerConfig {
    /// Configuration obtained by applying the client's `mel` section.
    ///
    /// Unset keys fall back to defaults, except `maxConcurrent` which keeps
    /// the current value. A `null` section means "nothing configured".
    pub(crate) fn updated_from(&self, value: serde_json::Value) -> anyhow::Result<ServerConfig> {
        let section = if value.is_null() {
            MelConfigSection::default()
        } else {
            serde_json::from_value::<MelConfigSection>(value)?
        };

        let mut next = ServerConfig {
            verbose_logging: section.logging.verbose.unwrap_or(false),
            help_url_base: section
                .help
                .url_base
                .filter(|base| !base.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HELP_URL_BASE.to_string()),
            reference_path: section.reference.path.filter(|p| !p.as_os_str().is_empty()),
            max_concurrent: self.max_concurrent,
        };
        if let Some(v) = section.performance.max_concurrent.filter(|v| *v > 0) {
            next.max_concurrent = v;
        }
        Ok(next)
    }
}

impl MelLanguageServer {
    pub(crate) async fn load_config(&self) {
        let items = vec![ConfigurationItem {
            scope_uri: None,
            section: Some(CONFIG_SECTION.to_string()),
        }];

        let values = match self.client.configuration(items).await {
            Ok(values) => values,
            Err(err) => {
                debug!("client returned no configuration: {}", err);
                return;
            }
        };
        if let Some(value) = values.into_iter().next() {
            self.apply_config_value(value);
        }
    }

    /// Parse and apply a `mel` settings object. Invalid settings are logged and ignored.
    pub(crate) fn apply_config_value(&self, value: serde_json::Value) {
        let previous = self.current_config();
        match previous.updated_from(value) {
            Ok(next) => self.apply_config(&previous, next),
            Err(err) => warn!("ignoring invalid {} configuration: {}", CONFIG_SECTION, err),
        }
    }

    fn apply_config(&self, previous: &ServerConfig, next: ServerConfig) {
        if let Some(control) = &self.log_control {
            control.set_verbose(next.verbose_logging);
        }
        if next.reference_path != previous.reference_path {
            self.reload_reference(next.reference_path.as_deref());
        }
        if next.max_concurrent != previous.max_concurrent {
            if let Ok(mut sem_arc) = self.compute_limiter.lock() {
                *sem_arc = Arc::new(Semaphore::new(next.max_concurrent.max(1)));
            }
        }
        debug!(?next, "configuration applied");
        if let Ok(mut guard) = self.config.lock() {
            *guard = next;
        }
    }

    /// Swap the shared command table. Open sessions keep the table they were created with.
    fn reload_reference(&self, path: Option<&Path>) {
        let reference = match path {
            Some(path) => match CommandReference::from_path(path) {
                Ok(table) => {
                    info!(commands = table.len(), "loaded command table from {}", path.display());
                    Arc::new(table)
                }
                Err(err) => {
                    error!("{:#}; falling back to the bundled command table", err);
                    CommandReference::builtin()
                }
            },
            None => CommandReference::builtin(),
        };
        if let Ok(mut guard) = self.reference.write() {
            *guard = reference;
        }
    }
}
