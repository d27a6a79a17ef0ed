use crate::core::Storage;
use crate::utils::error::{ReconError, Result};
use crate::utils::validation::is_remote_source;
use reqwest::Client;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        tracing::debug!("Reading workbook from {}", full_path.display());
        Ok(tokio::fs::read(full_path).await?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpStorage {
    client: Client,
}

impl HttpStorage {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Storage for HttpStorage {
    async fn read_file(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Downloading workbook from {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReconError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Picks local or HTTP storage from the shape of the workbook source.
#[derive(Debug, Clone)]
pub enum WorkbookStorage {
    Local(LocalStorage),
    Http(HttpStorage),
}

impl WorkbookStorage {
    pub fn for_source(source: &str) -> Self {
        if is_remote_source(source) {
            Self::Http(HttpStorage::default())
        } else {
            Self::Local(LocalStorage::default())
        }
    }
}

impl Storage for WorkbookStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        match self {
            Self::Local(storage) => storage.read_file(path).await,
            Self::Http(storage) => storage.read_file(path).await,
        }
    }
}
