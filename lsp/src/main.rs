#[tokio::main]
async fn main() {
    mel_lsp::run().await;
}
