use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mel_core::{CompletionEntry, Symbol, extract_cancellable, hover};
use tokio::task;
use tower_lsp::lsp_types::{Hover, Position, Url};
use tracing::debug;

use super::state::MelLanguageServer;
use super::text::{line_text, typing_variable};
use crate::convert::to_hover;

/// Raises its flag when dropped, so a cancelled request stops the blocking scan.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl MelLanguageServer {
    pub(crate) async fn get_or_compute_outline(&self, uri: &Url) -> Option<Arc<Vec<Symbol>>> {
        let (content_snapshot, version_snapshot, revision_snapshot) = {
            let doc = self.documents.get(uri)?;
            if let Some(cached) = doc.cached_outline.clone() {
                return Some(cached);
            }
            (doc.content.clone(), doc.version, doc.revision)
        };

        let sem = match self.compute_limiter.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return None,
        };
        let _permit = sem.acquire_owned().await.ok();

        let cancelled = Arc::new(AtomicBool::new(false));
        let _cancel_guard = CancelOnDrop(cancelled.clone());
        let computed = task::spawn_blocking(move || {
            let text = content_snapshot.to_string();
            extract_cancellable(text.split('\n'), &cancelled)
        })
        .await
        .ok()??;
        let computed = Arc::new(computed);

        if let Some(mut doc) = self.documents.get_mut(uri) {
            if doc.version == version_snapshot && doc.revision == revision_snapshot {
                doc.cached_outline = Some(computed.clone());
            } else {
                debug!(%uri, "document changed during outline scan; result not cached");
            }
        }
        Some(computed)
    }

    pub(crate) fn get_hover_info(&self, uri: &Url, position: Position) -> Option<Hover> {
        let line = {
            let doc = self.documents.get(uri)?;
            line_text(&doc.content, position.line)?
        };
        let reference = self.reference();
        let base = self.current_config().help_url_base;
        let info = hover(&reference, position.line, &line, position.character, &base)?;
        Some(to_hover(&info))
    }

    /// Completion list for `position`: variables after a `$`, otherwise words then commands.
    pub(crate) fn collect_completions(
        &self,
        uri: &Url,
        position: Position,
        trigger: Option<&str>,
    ) -> Option<Vec<CompletionEntry>> {
        let mut doc = self.documents.get_mut(uri)?;
        let variables_only = trigger == Some("$") || typing_variable(&doc.content, position);
        if doc.refresh_index() {
            debug!(%uri, entries = doc.session.index().len(), "completion index refreshed");
        }
        Some(if variables_only {
            doc.session.variable_items()
        } else {
            doc.session.general_items()
        })
    }
}
