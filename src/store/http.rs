//! HTTP-backed library store
//!
//! Talks to a remote endpoint that serves the current document (`GET`/`PUT`)
//! and, optionally, a seed document (`GET`). A 404 reads as "absent".

use crate::config::HttpStoreConfig;
use crate::error::StoreError;
use crate::store::LibraryStore;
use crate::types::RepoLibrary;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

pub struct HttpLibraryStore {
    client: Client,
    current_url: String,
    seed_url: Option<String>,
}

impl HttpLibraryStore {
    pub fn new(current_url: impl Into<String>, seed_url: Option<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            current_url: current_url.into(),
            seed_url,
        })
    }

    pub fn from_config(config: &HttpStoreConfig) -> Result<Self, StoreError> {
        Self::new(
            config.current_url.clone(),
            config.seed_url.clone(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    async fn fetch(&self, url: &str) -> Result<Option<RepoLibrary>, StoreError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(url, "Remote document absent");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        Ok(Some(RepoLibrary::from_json(&body)?))
    }
}

#[async_trait]
impl LibraryStore for HttpLibraryStore {
    async fn load_current(&self) -> Result<Option<RepoLibrary>, StoreError> {
        self.fetch(&self.current_url).await
    }

    async fn load_seed(&self) -> Result<Option<RepoLibrary>, StoreError> {
        match &self.seed_url {
            Some(url) => self.fetch(url).await,
            None => {
                warn!("No seed URL configured for the http store");
                Ok(None)
            }
        }
    }

    async fn save_current(&self, library: &RepoLibrary) -> Result<(), StoreError> {
        let response = self
            .client
            .put(&self.current_url)
            .json(library)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.current_url.clone(),
            });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("http:{}", self.current_url)
    }
}
