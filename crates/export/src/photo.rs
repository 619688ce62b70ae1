//! Remote photo retrieval for PDF exports.
//!
//! Every failure path logs a warning and yields `None`; the caller renders
//! without the image.

use std::time::Duration;

use printpdf::image_crate::{self, DynamicImage};

/// HTTP client for character photos, bounded by a timeout and a size cap.
#[derive(Debug, Clone)]
pub struct PhotoFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl PhotoFetcher {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, max_bytes })
    }

    /// Download the raw bytes at `url`.
    pub async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Photo fetch failed");
                return None;
            }
        };

        let mut response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Photo fetch returned an error status");
                return None;
            }
        };

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            tracing::warn!(%url, max_bytes = self.max_bytes, "Photo exceeds size cap");
            return None;
        }

        let mut body = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if body.len() + chunk.len() > self.max_bytes {
                        tracing::warn!(%url, max_bytes = self.max_bytes, "Photo exceeds size cap");
                        return None;
                    }
                    body.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(%url, error = %e, "Photo download interrupted");
                    return None;
                }
            }
        }

        Some(body)
    }

    /// Download and decode the image at `url`.
    pub async fn fetch_image(&self, url: &str) -> Option<DynamicImage> {
        let bytes = self.fetch(url).await?;
        decode(url, &bytes)
    }
}

/// Decode image bytes in any format the PDF encoder can embed.
pub fn decode(url: &str, bytes: &[u8]) -> Option<DynamicImage> {
    match image_crate::load_from_memory(bytes) {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!(%url, error = %e, "Photo is not a decodable image");
            None
        }
    }
}
