//! Streaming image download for `FeedClient`.

use std::path::Path;

use reqwest::StatusCode;
use tokio::io::AsyncWriteExt;

use crate::error::FeedError;

use super::{redact_url, status_error, FeedClient};

impl FeedClient {
    /// Streams the body of `url` into a file at `path` and returns the number
    /// of bytes written.
    ///
    /// The file is only created once a 200 response has arrived. If anything
    /// fails after that, the partial file is removed before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Timeout`] / [`FeedError::Network`]: request or body failure.
    /// - [`FeedError::HttpStatus`]: any status other than 200.
    /// - [`FeedError::Io`]: the file could not be created or written.
    pub async fn download_to_file(&self, url: &str, path: &Path) -> Result<u64, FeedError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "image/*,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        if response.status() != StatusCode::OK {
            return Err(status_error(response.status(), url));
        }

        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| FeedError::io(path, e))?;

        match self.stream_into(url, response, &mut file, path).await {
            Ok(written) => Ok(written),
            Err(err) => {
                drop(file);
                if let Err(e) = tokio::fs::remove_file(path).await {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "could not remove partial download"
                    );
                }
                Err(err)
            }
        }
    }

    async fn stream_into(
        &self,
        url: &str,
        mut response: reqwest::Response,
        file: &mut tokio::fs::File,
        path: &Path,
    ) -> Result<u64, FeedError> {
        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.request_error(url, e))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| FeedError::io(path, e))?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(|e| FeedError::io(path, e))?;

        tracing::debug!(
            url = %redact_url(url),
            path = %path.display(),
            bytes = written,
            "image downloaded"
        );
        Ok(written)
    }
}
