//! Ambient Client Library
//!
//! Provides a typed HTTP client for the Ambient data-logging service
//! (<https://ambidata.io>). A client is bound to one numbered channel and
//! its access keys; it can push timestamped data points to the channel and
//! read stored records or channel metadata back.
//!
//! # Example
//!
//! ```rust,no_run
//! use ambient_client::{AmbientClient, DataPoint};
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AmbientClient::new(100, "your-write-key");
//!
//!     // Push one measurement, stamped with the current time
//!     let point = DataPoint::created_at(Utc::now())
//!         .field("d1", 23.5)
//!         .field("d2", 1013.0);
//!     client.send(&[point]).await?;
//!
//!     // Read the stored records back, oldest first
//!     let records = client.read().await?;
//!     for record in records {
//!         println!("{:?}", record);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Private Channels
//!
//! Reading a private channel needs its read key; pass it through the
//! builder:
//!
//! ```rust,no_run
//! use ambient_client::{AmbientClient, ReadQuery};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let client = AmbientClient::builder(100, "your-write-key")
//!     .read_key("your-read-key")
//!     .build();
//!
//! let latest = client.read_with(&ReadQuery::new().count(10)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides utilities for integration testing:
//!
//! ```rust,ignore
//! use ambient_client::testing::TestServer;
//!
//! let server = TestServer::start(router).await?;
//! let client = server.client(100, "writekey");
//! client.send(&[DataPoint::new().field("d1", 1)]).await?;
//! ```

mod client;
mod error;
pub mod testing;
mod types;

pub use client::{AmbientClient, AmbientClientBuilder};
pub use error::{AmbientError, Result};
pub use types::{DataPoint, ReadQuery, Record};
