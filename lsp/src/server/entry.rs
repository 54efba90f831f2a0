use tower_lsp::{LspService, Server};

use super::{logging, state::MelLanguageServer};

pub async fn run() {
    let log_control = logging::init();
    tracing::info!("starting MEL language server {}", env!("CARGO_PKG_VERSION"));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(move |client| MelLanguageServer::with_log_control(client, log_control));
    Server::new(stdin, stdout, socket).serve(service).await;
}
