//! Send one data point to an Ambient channel.
//!
//! Usage:
//!   AMBIENT_CHANNEL_ID=1234 AMBIENT_WRITE_KEY=xxxx cargo run --example write

use ambient_client::{AmbientClient, DataPoint};
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
    let write_key = std::env::var("AMBIENT_WRITE_KEY")?;

    let client = AmbientClient::new(channel_id, write_key);

    let point = DataPoint::new().field("d1", 1.23);
    client.send(&[point]).await?;

    println!("sent 1 data point to channel {}", client.channel_id());
    Ok(())
}
