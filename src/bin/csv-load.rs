use anyhow::Result;
use csv_row_loader::cli::run;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    run().await
}
