#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = sigra_api::run().await {
        eprintln!("sigra-api fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
