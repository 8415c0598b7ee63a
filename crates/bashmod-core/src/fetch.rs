//! The fetch capability: the only way the core reads registries and scripts.
//!
//! Aggregation and installation take an `Arc<dyn Fetcher>` so tests and
//! alternative transports can stand in for the network.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::source::{RegistrySource, SourceKind};

/// Per-request timeout for every remote fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Retrieves text from URLs and local paths.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET a URL and return the body. Non-2xx responses are errors.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;

    /// Read a local file as UTF-8 text.
    async fn read_local(&self, path: &Path) -> Result<String, FetchError>;

    /// Fetch whatever a registry source points at.
    async fn fetch_source(&self, source: &RegistrySource) -> Result<String, FetchError> {
        match &source.kind {
            SourceKind::Remote(url) => self.get_text(url).await,
            SourceKind::Local(path) => self.read_local(path).await,
        }
    }

    /// Fetch module content: URLs go over the network, anything else is a path.
    async fn fetch_content(&self, location: &str) -> Result<String, FetchError> {
        if crate::source::is_http(location) {
            self.get_text(location).await
        } else {
            self.read_local(&crate::paths::expand_home(location)).await
        }
    }
}

/// [`Fetcher`] backed by `reqwest` and `tokio::fs`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the fixed 10 second timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "GET");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }

    async fn read_local(&self, path: &Path) -> Result<String, FetchError> {
        tracing::debug!(path = %path.display(), "read");
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_get_text_success() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/mods/git.sh")
            .with_status(200)
            .with_body("alias gs='git status'\n")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher
            .get_text(&format!("{}/mods/git.sh", server.url()))
            .await
            .unwrap();
        assert_eq!(body, "alias gs='git status'\n");
    }

    #[tokio::test]
    async fn test_non_2xx_is_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/missing.sh")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher
            .get_text(&format!("{}/missing.sh", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_read_local_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher
            .read_local(&dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[tokio::test]
    async fn test_fetch_content_reads_local_path() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("local.sh");
        std::fs::write(&script, "export A=1\n").unwrap();

        let fetcher = HttpFetcher::new().unwrap();
        let body = fetcher
            .fetch_content(script.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(body, "export A=1\n");
    }
}
