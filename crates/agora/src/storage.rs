use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Boundary to the object-storage service that holds uploaded assets.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `blob` under `path` and return its public URL.
    async fn upload(&self, blob: &[u8], path: &str, overwrite: bool) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub host: String,
    pub api_key: String,
    pub bucket: String,
}

/// Object store speaking the bucket HTTP API: objects are written with a
/// bearer-authenticated POST and served from a public, unauthenticated
/// path on the same host.
pub struct HttpObjectStore {
    client: Client,
    config: StorageConfig,
}

impl HttpObjectStore {
    pub fn new(config: StorageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self { client, config })
    }

    // Object paths embed original file names, so every segment is encoded.
    fn encoded_path(path: &str) -> String {
        path.split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.host.trim_end_matches('/'),
            self.config.bucket,
            Self::encoded_path(path)
        )
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.host.trim_end_matches('/'),
            self.config.bucket,
            Self::encoded_path(path)
        )
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(&self, blob: &[u8], path: &str, overwrite: bool) -> Result<String> {
        let mut request = self
            .client
            .post(self.object_url(path))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/octet-stream")
            .body(blob.to_vec());

        if overwrite {
            request = request.header("x-upsert", "true");
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(self.public_url(path)),
            status => Err(anyhow!("upload of {} failed: {}", path, status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(host: String) -> StorageConfig {
        StorageConfig {
            host,
            api_key: "test_api_key".to_string(),
            bucket: "uploads".to_string(),
        }
    }

    #[tokio::test]
    async fn upload_returns_public_url() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/uploads/agent-uploads/42-resume.png"))
            .and(header("x-upsert", "true"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let store = HttpObjectStore::new(config(mock_server.uri()))?;
        let url = store
            .upload(b"png bytes", "agent-uploads/42-resume.png", true)
            .await?;

        assert_eq!(
            url,
            format!(
                "{}/storage/v1/object/public/uploads/agent-uploads/42-resume.png",
                mock_server.uri()
            )
        );
        Ok(())
    }

    #[tokio::test]
    async fn upload_rejected_by_service_is_an_error() -> Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let store = HttpObjectStore::new(config(mock_server.uri()))?;
        let result = store.upload(b"bytes", "agent-uploads/42-x.png", true).await;

        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn path_segments_are_encoded() {
        assert_eq!(
            HttpObjectStore::encoded_path("chat-uploads/17-my resume.png"),
            "chat-uploads/17-my%20resume.png"
        );
    }
}
