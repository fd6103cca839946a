use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CredentialError, CredentialProvider, CredentialStore, Credentials};

/// In-memory credential store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a login.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl CredentialProvider for MemoryCredentialStore {
    async fn credentials(&self) -> Result<Option<Credentials>, CredentialError> {
        Ok(self.inner.read().await.clone())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn save(&self, credentials: &Credentials) -> Result<(), CredentialError> {
        *self.inner.write().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        *self.inner.write().await = None;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Fixed credentials that never change.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credentials(&self) -> Result<Option<Credentials>, CredentialError> {
        Ok(Some(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        assert!(store.credentials().await.unwrap().is_none());

        store.save(&Credentials::new("u", "p")).await.unwrap();
        assert_eq!(
            store.credentials().await.unwrap(),
            Some(Credentials::new("u", "p"))
        );

        store.clear().await.unwrap();
        assert!(store.credentials().await.unwrap().is_none());
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials(Credentials::new("fixed", "pw"));
        let creds = tokio_test::block_on(provider.credentials()).unwrap().unwrap();
        assert_eq!(creds.username, "fixed");
    }
}
