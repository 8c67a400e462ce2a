//! Binary entry point for the NATS-based email worker.

#[tokio::main]
async fn main() {
    if let Err(e) = email_worker::run().await {
        eprintln!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
