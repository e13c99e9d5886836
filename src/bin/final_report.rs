#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = sigra_api::run_report_client().await {
        eprintln!("final-report: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
