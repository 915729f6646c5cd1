#[tokio::main]
async fn main() -> anyhow::Result<()> {
    legalrag_server::start().await
}
