use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use super::CONFIG_SECTION;
use super::state::{Document, MelLanguageServer};
use super::text::apply_incremental_change_rope;
use crate::convert::{to_completion_item, to_document_symbol};

pub(crate) const LANGUAGE_ID: &str = "mel";

#[tower_lsp::async_trait]
impl LanguageServer for MelLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("MEL Language Server initializing with root {:?}", params.root_uri);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::INCREMENTAL)),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec!["$".to_string()]),
                    work_done_progress_options: Default::default(),
                    all_commit_characters: None,
                    completion_item: None,
                }),
                document_symbol_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "MEL Language Server".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("MEL Language Server initialized");
        self.client
            .log_message(MessageType::INFO, "MEL Language Server started")
            .await;
        self.load_config().await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("MEL Language Server shutting down");
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        // Push-style clients send the settings inline; everyone else gets pulled.
        match params.settings.get(CONFIG_SECTION) {
            Some(section) => self.apply_config_value(section.clone()),
            None => self.load_config().await,
        }
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let item = params.text_document;
        if item.language_id != LANGUAGE_ID {
            debug!(uri = %item.uri, language = %item.language_id, "opened document with unexpected language id");
        }
        let document = Document::new(&item.text, item.version, self.reference());
        self.documents.insert(item.uri, document);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let mut entry = self
            .documents
            .entry(uri)
            .or_insert_with(|| Document::new("", version, self.reference()));
        entry.version = version;
        for change in &params.content_changes {
            apply_incremental_change_rope(&mut entry.content, change);
        }
        entry.cached_outline = None;
        entry.revision = entry.revision.wrapping_add(1);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if self.documents.remove(&uri).is_some() {
            debug!(%uri, "document closed; completion session dropped");
        }
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        Ok(self.get_hover_info(uri, position))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let trigger = params.context.as_ref().and_then(|ctx| ctx.trigger_character.as_deref());

        let Some(entries) = self.collect_completions(uri, position, trigger) else {
            return Ok(None);
        };
        let items = entries
            .iter()
            .filter(|entry| !entry.label().is_empty())
            .map(to_completion_item)
            .collect();
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn document_symbol(&self, params: DocumentSymbolParams) -> Result<Option<DocumentSymbolResponse>> {
        let uri = &params.text_document.uri;
        let Some(outline) = self.get_or_compute_outline(uri).await else {
            return Ok(None);
        };
        let symbols = outline.iter().map(to_document_symbol).collect();
        Ok(Some(DocumentSymbolResponse::Nested(symbols)))
    }
}
