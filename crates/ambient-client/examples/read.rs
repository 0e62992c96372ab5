//! Read the latest records and the metadata of an Ambient channel.
//!
//! Usage:
//!   AMBIENT_CHANNEL_ID=1234 cargo run --example read
//!   AMBIENT_CHANNEL_ID=1234 AMBIENT_READ_KEY=xxxx cargo run --example read

use ambient_client::{AmbientClient, ReadQuery};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ambient_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let channel_id: u64 = std::env::var("AMBIENT_CHANNEL_ID")?.parse()?;
    let write_key = std::env::var("AMBIENT_WRITE_KEY").unwrap_or_default();

    // Private channels need their read key; public ones work without it
    let mut builder = AmbientClient::builder(channel_id, write_key);
    if let Ok(read_key) = std::env::var("AMBIENT_READ_KEY") {
        builder = builder.read_key(read_key);
    }
    let client = builder.build();

    let properties = client.get_properties().await?;
    println!("channel: {}", serde_json::to_string_pretty(&properties)?);

    let records = client.read_with(&ReadQuery::new().count(10)).await?;
    for record in &records {
        println!("{}", serde_json::to_string(record)?);
    }
    println!("{} records, oldest first", records.len());

    Ok(())
}
