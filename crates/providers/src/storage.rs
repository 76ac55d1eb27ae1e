//! GcsStorage - snapshot uploads to a Google Cloud Storage bucket
//!
//! Uses the simple media upload endpoint with `predefinedAcl=publicRead`, so
//! the returned reference is immediately fetchable without signing.

use contracts::{CaptureArtifact, MonitorError, PublicReference, StorageConfig, StorageProvider};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

const GCS_ENDPOINT: &str = "https://storage.googleapis.com";

/// Storage provider for a GCS bucket.
pub struct GcsStorage {
    client: reqwest::Client,
    bucket: String,
    base_url: String,
    token: Option<String>,
    endpoint: String,
}

impl GcsStorage {
    /// Build the provider; the access token is read from the environment
    /// variable named in the config.
    pub fn new(config: &StorageConfig) -> Self {
        let token = std::env::var(&config.token_env).ok();
        if token.is_none() {
            warn!(
                env = %config.token_env,
                "storage access token not set; uploads will be unauthenticated"
            );
        }

        Self {
            client: reqwest::Client::new(),
            bucket: config.bucket.clone(),
            base_url: config.base_url.clone(),
            token,
            endpoint: GCS_ENDPOINT.to_string(),
        }
    }

    /// Override the API endpoint (test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn upload_url(&self, name: &str) -> String {
        format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}&predefinedAcl=publicRead",
            self.endpoint, self.bucket, name
        )
    }

    fn public_reference(&self, name: &str) -> PublicReference {
        PublicReference::new(format!("{}/{}", self.base_url.trim_end_matches('/'), name))
    }
}

impl StorageProvider for GcsStorage {
    async fn upload(&self, artifact: &CaptureArtifact) -> Result<PublicReference, MonitorError> {
        let name = artifact
            .file_name()
            .ok_or_else(|| MonitorError::upload("artifact path has no file name"))?;

        let bytes = tokio::fs::read(artifact.path()).await.map_err(|e| {
            MonitorError::upload(format!("cannot read {}: {e}", artifact.path().display()))
        })?;
        debug!(name, size = bytes.len(), "uploading snapshot");

        let mut request = self
            .client
            .post(self.upload_url(name))
            .header(CONTENT_TYPE, "image/jpeg")
            .body(bytes);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MonitorError::upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let err_text = response.text().await.unwrap_or_default();
            return Err(MonitorError::upload(format!(
                "upload of {name} failed with {status}: {err_text}"
            )));
        }

        Ok(self.public_reference(name))
    }
}
