use reqwest::Method;

use crate::client::Backend;
use crate::error::{BackendError, Result};

/// Blob store: object upload and public URLs
pub struct StorageClient<'a> {
    backend: &'a Backend,
    token: Option<&'a str>,
}

impl<'a> StorageClient<'a> {
    pub(crate) fn new(backend: &'a Backend, token: Option<&'a str>) -> Self {
        Self { backend, token }
    }

    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let size = bytes.len();
        let response = self
            .backend
            .request(
                Method::POST,
                &format!("storage/v1/object/{bucket}/{path}"),
                self.token,
            )
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::from_response("upload", response).await);
        }

        log::info!("Uploaded {} bytes to {}/{}", size, bucket, path);
        Ok(())
    }

    /// Public URL of an object; no request is made.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.backend
            .config()
            .endpoint(&format!("storage/v1/object/public/{bucket}/{path}"))
    }
}
