#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wp_boards::run_server().await
}
