#[tokio::main]
async fn main() -> eyre::Result<()> {
    user_api::run().await
}
