use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, RwLock};

use dashmap::DashMap;
use mel_core::{CommandReference, CompletionSession, Symbol};
use ropey::Rope;
use tokio::sync::Semaphore;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;
use twox_hash::XxHash64;

use super::config::ServerConfig;
use super::logging::LogControl;

/// Open MEL document, its cached outline and its completion session.
#[derive(Debug)]
pub(crate) struct Document {
    pub(crate) content: Rope,
    pub(crate) version: i32,
    /// Bumped on every edit; outline results computed for an older revision are discarded.
    pub(crate) revision: u64,
    pub(crate) cached_outline: Option<Arc<Vec<Symbol>>>,
    pub(crate) session: CompletionSession,
    pub(crate) indexed_hash: Option<u64>,
}

impl Document {
    pub(crate) fn new(text: &str, version: i32, reference: Arc<CommandReference>) -> Self {
        Self {
            content: Rope::from_str(text),
            version,
            revision: 0,
            cached_outline: None,
            session: CompletionSession::new(reference),
            indexed_hash: None,
        }
    }

    /// Merge the current text into the session index.
    ///
    /// Returns `false` without scanning when the text hashes the same as the last indexed text.
    pub(crate) fn refresh_index(&mut self) -> bool {
        let text = self.content.to_string();
        let hash = compute_content_hash(&text);
        if self.indexed_hash == Some(hash) {
            return false;
        }
        self.session.refresh(&text);
        self.indexed_hash = Some(hash);
        true
    }
}

pub(crate) fn compute_content_hash(content: &str) -> u64 {
    let mut hasher = XxHash64::default();
    content.hash(&mut hasher);
    hasher.finish()
}

/// MEL language server state shared across handlers.
pub struct MelLanguageServer {
    pub(crate) client: Client,
    pub(crate) documents: Arc<DashMap<Url, Document>>,
    pub(crate) reference: RwLock<Arc<CommandReference>>,
    pub(crate) config: Mutex<ServerConfig>,
    pub(crate) compute_limiter: Mutex<Arc<Semaphore>>,
    pub(crate) log_control: Option<LogControl>,
}

impl MelLanguageServer {
    pub fn new(client: Client) -> Self {
        Self::with_log_control(client, None)
    }

    pub(crate) fn with_log_control(client: Client, log_control: Option<LogControl>) -> Self {
        let config = ServerConfig::default();
        let permits = config.max_concurrent.max(1);
        Self {
            client,
            documents: Arc::new(DashMap::new()),
            reference: RwLock::new(CommandReference::builtin()),
            config: Mutex::new(config),
            compute_limiter: Mutex::new(Arc::new(Semaphore::new(permits))),
            log_control,
        }
    }

    /// Command table handed to newly opened documents.
    pub(crate) fn reference(&self) -> Arc<CommandReference> {
        match self.reference.read() {
            Ok(guard) => guard.clone(),
            Err(_) => CommandReference::builtin(),
        }
    }

    pub(crate) fn current_config(&self) -> ServerConfig {
        self.config.lock().map(|cfg| cfg.clone()).unwrap_or_default()
    }
}
