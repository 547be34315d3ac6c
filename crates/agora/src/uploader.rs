use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::notify::Notifier;
use crate::storage::ObjectStore;

/// A locally selected file awaiting upload. Never mutated once created;
/// attachment lists replace entries wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalAsset {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl LocalAsset {
    pub fn new<S: Into<String>>(name: S, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A local asset after it has been durably stored under a public URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteAsset {
    pub url: String,
}

/// Pushes locally selected assets to the object store one by one.
pub struct AssetUploader {
    store: Arc<dyn ObjectStore>,
    notifier: Arc<dyn Notifier>,
}

impl AssetUploader {
    pub fn new(store: Arc<dyn ObjectStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Upload each asset under `prefix`, returning the public URLs of the
    /// successes in input order. A failed upload is reported and skipped;
    /// the batch never aborts, so the result may be shorter than the
    /// input.
    ///
    /// The object path is `{prefix}/{unix-millis}-{original name}`: the
    /// stamp keeps concurrent uploads from colliding, the name keeps the
    /// stored object traceable to its source file.
    pub async fn upload_all(&self, assets: &[LocalAsset], prefix: &str) -> Vec<RemoteAsset> {
        if assets.is_empty() {
            return Vec::new();
        }

        self.notifier.info("Uploading images...");

        let mut uploaded = Vec::new();
        for asset in assets {
            let path = format!(
                "{}/{}-{}",
                prefix,
                Utc::now().timestamp_millis(),
                asset.name
            );
            match self.store.upload(&asset.bytes, &path, true).await {
                Ok(url) => uploaded.push(RemoteAsset { url }),
                Err(err) => {
                    tracing::error!("failed to upload {}: {err:#}", asset.name);
                    self.notifier
                        .error(&format!("Failed to upload {}", asset.name));
                }
            }
        }
        uploaded
    }
}
