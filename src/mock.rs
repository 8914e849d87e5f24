use crate::http::ImageDownloader;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory [`ImageDownloader`] that records requested URLs.
pub struct MockDownloader {
    bytes: Vec<u8>,
    requested: Arc<Mutex<Vec<String>>>,
    should_fail: bool,
}

impl MockDownloader {
    pub fn new() -> Self {
        Self {
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
            requested: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    pub fn with_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.bytes = bytes;
        self
    }

    pub fn with_failure(mut self, should_fail: bool) -> Self {
        self.should_fail = should_fail;
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn get_download_count(&self) -> usize {
        self.requested.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for MockDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageDownloader for MockDownloader {
    async fn download_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.requested.lock().unwrap_or_else(PoisonError::into_inner).push(url.to_string());

        if self.should_fail {
            return Err(Error::Remote {
                status: 404,
                body: "Mock failure".to_string(),
            });
        }

        Ok(self.bytes.clone())
    }
}
