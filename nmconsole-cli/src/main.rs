#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nmconsole_cli::run().await
}
