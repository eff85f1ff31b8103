use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    autosage::run().await
}
