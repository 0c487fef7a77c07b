//! Veterinary clinic API entry point.

use vetclinic_api::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
