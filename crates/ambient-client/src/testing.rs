//! Test utilities for ambient-client
//!
//! Provides helpers for running integration tests against a local mock
//! of the Ambient service.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::{AmbientClient, AmbientClientBuilder};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Create a new test server from an axum Router
    ///
    /// # Example
    ///
    /// ```ignore
    /// use ambient_client::testing::TestServer;
    ///
    /// let server = TestServer::start(router).await?;
    /// let client = server.client(100, "writekey");
    /// client.send(&[point]).await?;
    /// ```
    pub async fn start<S>(router: axum::Router<S>) -> std::io::Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let router: axum::Router = router.into();

        // Spawn the server
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the host URL of the test server
    pub fn host(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Build a client whose channel endpoint targets this server
    pub fn client(&self, channel_id: u64, write_key: impl Into<String>) -> AmbientClient {
        self.builder(channel_id, write_key).build()
    }

    /// Start a client builder pointed at this server, for setting keys
    pub fn builder(&self, channel_id: u64, write_key: impl Into<String>) -> AmbientClientBuilder {
        AmbientClient::builder(channel_id, write_key).host(self.host())
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_url_format() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let url = format!("http://{}", addr);
        assert_eq!(url, "http://127.0.0.1:8080");
    }
}
