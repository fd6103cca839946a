use async_trait::async_trait;
use thiserror::Error;

use super::types::Credentials;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to access credential storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored credentials are unreadable: {0}")]
    Corrupt(String),
}

/// Read access to the stored credential pair.
///
/// Read on every request; implementations must not cache.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credentials(&self) -> Result<Option<Credentials>, CredentialError>;
}

/// Persistent credential storage written by the sign-in screen.
#[async_trait]
pub trait CredentialStore: CredentialProvider {
    async fn save(&self, credentials: &Credentials) -> Result<(), CredentialError>;

    async fn clear(&self) -> Result<(), CredentialError>;

    /// Name of this storage backend
    fn backend_name(&self) -> &'static str;
}
