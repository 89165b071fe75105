use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Storage slot the admin token lives under, matching the key the browser
/// clients used in local storage.
const TOKEN_KEY: &str = "admin_token";

/// Client-side persistence for the session token: one string value, set on
/// login, read at startup, erased on logout.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, ServiceError>;
    async fn save(&self, token: &str) -> Result<(), ServiceError>;
    async fn clear(&self) -> Result<(), ServiceError>;
}

/// JSON file-backed token store.
///
/// Persists a small string map to a JSON file. A missing or corrupt file
/// reads as empty; startup must succeed either way.
pub struct JsonTokenStore {
    inner: RwLock<HashMap<String, String>>,
    file_path: PathBuf,
}

impl JsonTokenStore {
    /// Open the store at a path, creating parent directories as needed.
    /// The file itself is only written on the first `save`/`clear`.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<String, String> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => HashMap::new(),
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        let map = self.inner.read().await;
        let data = serde_json::to_vec(&*map).map_err(|e| ServiceError::Storage(e.to_string()))?;
        drop(map);
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for JsonTokenStore {
    async fn load(&self) -> Result<Option<String>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(TOKEN_KEY).cloned())
    }

    async fn save(&self, token: &str) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(TOKEN_KEY.to_string(), token.to_string());
        drop(map);
        self.persist().await
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.remove(TOKEN_KEY);
        drop(map);
        self.persist().await
    }
}

/// In-memory store for tests and doc examples
pub mod mock {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::TokenStore;
    use crate::errors::ServiceError;

    #[derive(Default)]
    pub struct MemoryTokenStore {
        token: Mutex<Option<String>>,
    }

    impl MemoryTokenStore {
        pub fn with_token(token: impl Into<String>) -> Self {
            Self { token: Mutex::new(Some(token.into())) }
        }
    }

    #[async_trait]
    impl TokenStore for MemoryTokenStore {
        async fn load(&self) -> Result<Option<String>, ServiceError> {
            Ok(self.token.lock().unwrap().clone())
        }

        async fn save(&self, token: &str) -> Result<(), ServiceError> {
            *self.token.lock().unwrap() = Some(token.to_string());
            Ok(())
        }

        async fn clear(&self) -> Result<(), ServiceError> {
            *self.token.lock().unwrap() = None;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_round_trips_across_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("token_store_{}.json", uuid::Uuid::new_v4()));
        let store = JsonTokenStore::new(&tmp).await?;

        assert_eq!(store.load().await?, None);

        store.save("tok-123").await?;
        assert_eq!(store.load().await?.as_deref(), Some("tok-123"));

        // a fresh handle sees the persisted value
        let reopened = JsonTokenStore::new(&tmp).await?;
        assert_eq!(reopened.load().await?.as_deref(), Some("tok-123"));

        reopened.clear().await?;
        assert_eq!(reopened.load().await?, None);
        let after_clear = JsonTokenStore::new(&tmp).await?;
        assert_eq!(after_clear.load().await?, None);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("token_store_{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, b"{ not json").await?;

        let store = JsonTokenStore::new(&tmp).await?;
        assert_eq!(store.load().await?, None);

        // saving repairs the file
        store.save("tok-1").await?;
        let reopened = JsonTokenStore::new(&tmp).await?;
        assert_eq!(reopened.load().await?.as_deref(), Some("tok-1"));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
