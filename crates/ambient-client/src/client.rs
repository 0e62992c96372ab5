//! Ambient channel client implementation

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::error::{AmbientError, Result};
use crate::types::{DataPoint, ReadQuery, Record, SendBody};

/// Production host of the Ambient service
const DEFAULT_HOST: &str = "https://ambidata.io";

/// Client bound to a single Ambient channel
///
/// Holds the channel number and its access keys, and talks to the
/// channel's REST endpoint. Construction never touches the network;
/// every operation is one HTTP round trip.
#[derive(Debug, Clone)]
pub struct AmbientClient {
    channel_id: u64,
    write_key: String,
    user_key: Option<String>,
    read_key: Option<String>,
    endpoint: String,
    client: Client,
}

impl AmbientClient {
    /// Create a client for a channel with its write key
    ///
    /// # Arguments
    /// * `channel_id` - Channel number as shown in the Ambient console
    /// * `write_key` - Write key of that channel
    pub fn new(channel_id: u64, write_key: impl Into<String>) -> Self {
        Self::builder(channel_id, write_key).build()
    }

    /// Start building a client with optional keys
    pub fn builder(channel_id: u64, write_key: impl Into<String>) -> AmbientClientBuilder {
        AmbientClientBuilder::new(channel_id, write_key)
    }

    /// Channel number this client is bound to
    pub fn channel_id(&self) -> u64 {
        self.channel_id
    }

    /// Write key sent with every upload
    pub fn write_key(&self) -> &str {
        &self.write_key
    }

    /// Account-level user key, if one was provided
    pub fn user_key(&self) -> Option<&str> {
        self.user_key.as_deref()
    }

    /// Read key for private channels, if one was provided
    pub fn read_key(&self) -> Option<&str> {
        self.read_key.as_deref()
    }

    /// Derived REST endpoint for this channel
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Send data points to the channel in one request.
    ///
    /// The whole batch is accepted or rejected as a unit; there are no
    /// partial writes. An empty batch is still sent.
    #[instrument(skip(self))]
    pub async fn send(&self, points: &[DataPoint]) -> Result<()> {
        let url = format!("{}/dataarray", self.endpoint);
        debug!("Sending {} data points to channel {}", points.len(), self.channel_id);

        let body = SendBody {
            write_key: &self.write_key,
            data: points,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        self.check_status(response.status())
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Read stored records with the service's default window.
    ///
    /// Records come back oldest first.
    pub async fn read(&self) -> Result<Vec<Record>> {
        self.read_with(&ReadQuery::new()).await
    }

    /// Read stored records selected by `query`, oldest first.
    #[instrument(skip(self))]
    pub async fn read_with(&self, query: &ReadQuery) -> Result<Vec<Record>> {
        let url = format!("{}/data", self.endpoint);

        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(read_key) = self.read_key.as_deref().filter(|k| !k.is_empty()) {
            pairs.push(("readKey", read_key));
        }
        for (name, value) in query.params() {
            pairs.push((*name, value.as_str()));
        }

        let mut request = self.client.get(&url);
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }

        let response = request.send().await?;
        let mut records: Vec<Record> = self.handle_response(response).await?;

        // The service returns newest first; flip to natural time order.
        records.reverse();

        debug!("Read {} records from channel {}", records.len(), self.channel_id);
        Ok(records)
    }

    /// Fetch the channel's metadata record.
    #[instrument(skip(self))]
    pub async fn get_properties(&self) -> Result<Record> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(read_key) = self.read_key.as_deref().filter(|k| !k.is_empty()) {
            request = request.query(&[("readKey", read_key)]);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Any status other than 200 OK is a remote error, other 2xx included
    fn check_status(&self, status: StatusCode) -> Result<()> {
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(AmbientError::Remote { status })
        }
    }

    /// Check the status, then decode the body as JSON
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        self.check_status(response.status())?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Builder for [`AmbientClient`]
///
/// Collects the optional keys and builds the client without performing
/// any I/O. Building cannot fail.
#[derive(Debug, Clone)]
pub struct AmbientClientBuilder {
    channel_id: u64,
    write_key: String,
    user_key: Option<String>,
    read_key: Option<String>,
    host: String,
}

impl AmbientClientBuilder {
    /// Create a builder for a channel with its write key
    pub fn new(channel_id: u64, write_key: impl Into<String>) -> Self {
        Self {
            channel_id,
            write_key: write_key.into(),
            user_key: None,
            read_key: None,
            host: DEFAULT_HOST.to_string(),
        }
    }

    /// Set the account-level user key.
    ///
    /// Stored on the client for callers that need it; no operation
    /// currently sends it.
    pub fn user_key(mut self, key: impl Into<String>) -> Self {
        self.user_key = Some(key.into());
        self
    }

    /// Set the read key required by private channels.
    ///
    /// An empty key behaves as if none was set.
    pub fn read_key(mut self, key: impl Into<String>) -> Self {
        self.read_key = Some(key.into());
        self
    }

    /// Override the service host (scheme and authority, no trailing slash).
    ///
    /// The channel endpoint is derived from this value. Mainly useful for
    /// pointing a client at a local test server, see [`crate::testing`].
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Build the client
    pub fn build(self) -> AmbientClient {
        let endpoint = format!("{}/api/v2/channels/{}", self.host, self.channel_id);
        AmbientClient {
            channel_id: self.channel_id,
            write_key: self.write_key,
            user_key: self.user_key,
            read_key: self.read_key,
            endpoint,
            client: Client::new(),
        }
    }
}
