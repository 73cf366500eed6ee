use bytes::Bytes;
use common::config::StorageConfig;
use common::error::diagnostics::DiagnosticMessage;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("blob store configuration error: {context}")]
    Config {
        context: DiagnosticMessage,
        #[source]
        source: Option<object_store::Error>,
    },
    #[error("blob store operation failed: {context}")]
    Operation {
        context: DiagnosticMessage,
        #[source]
        source: object_store::Error,
    },
}

impl BlobStoreError {
    #[track_caller]
    fn operation(key: &str, source: object_store::Error) -> Self {
        Self::Operation {
            context: DiagnosticMessage::new(format!("key '{key}': {source}")),
            source,
        }
    }
}

/// Thin wrapper around an [`ObjectStore`]: put an object, list/fetch by
/// key prefix. The warehouse's COPY reads the same bucket directly; this
/// client only feeds the staging side.
#[derive(Clone)]
pub struct BlobStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl BlobStore {
    pub fn amazon(config: &StorageConfig) -> Result<Self, BlobStoreError> {
        let store = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .build()
            .map_err(|e| BlobStoreError::Config {
                context: DiagnosticMessage::new(e.to_string()),
                source: Some(e),
            })?;
        Ok(Self {
            store: Arc::new(store),
            bucket: config.bucket.clone(),
        })
    }

    /// In-process store for tests.
    pub fn in_memory(bucket: &str) -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            bucket: bucket.to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub async fn put(&self, key: &str, body: Bytes) -> Result<(), BlobStoreError> {
        self.store
            .put(&Path::from(key), PutPayload::from(body))
            .await
            .map_err(|e| BlobStoreError::operation(key, e))?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Bytes, BlobStoreError> {
        let result = self
            .store
            .get(&Path::from(key))
            .await
            .map_err(|e| BlobStoreError::operation(key, e))?;
        result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::operation(key, e))
    }

    pub async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, BlobStoreError> {
        let prefix_path = Path::from(prefix);
        let objects: Vec<_> = self
            .store
            .list(Some(&prefix_path))
            .try_collect()
            .await
            .map_err(|e| BlobStoreError::operation(prefix, e))?;
        let mut keys: Vec<String> = objects.into_iter().map(|m| m.location.to_string()).collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_and_list_by_prefix() {
        let store = BlobStore::in_memory("trip-staging");

        store
            .put("raw/weather/New_York/w/day_1.csv", Bytes::from_static(b"a,b\n1,2\n"))
            .await
            .unwrap();
        store
            .put("raw/weather/New_York/w/day_2.csv", Bytes::from_static(b"a,b\n3,4\n"))
            .await
            .unwrap();
        store
            .put("raw/taxi/New_York/taxi_zone_lookup.csv", Bytes::from_static(b"id\n1\n"))
            .await
            .unwrap();

        let keys = store.list_keys("raw/weather/New_York").await.unwrap();
        assert_eq!(
            keys,
            vec![
                "raw/weather/New_York/w/day_1.csv",
                "raw/weather/New_York/w/day_2.csv"
            ]
        );

        let body = store.get("raw/weather/New_York/w/day_1.csv").await.unwrap();
        assert_eq!(&body[..], b"a,b\n1,2\n");
    }

    #[tokio::test]
    async fn overwriting_a_key_is_idempotent() {
        let store = BlobStore::in_memory("trip-staging");
        let key = "raw/taxi/New_York/trips/yellow_tripdata_2021-01.csv";

        store.put(key, Bytes::from_static(b"old")).await.unwrap();
        store.put(key, Bytes::from_static(b"new")).await.unwrap();

        assert_eq!(&store.get(key).await.unwrap()[..], b"new");
        assert_eq!(store.list_keys("raw/taxi").await.unwrap().len(), 1);
    }
}
