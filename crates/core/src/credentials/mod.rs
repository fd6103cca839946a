//! Client-side credential storage and the sign-in gate.
//!
//! The search client reads the stored pair on every request through
//! [`CredentialProvider`]; the sign-in screen writes it through
//! [`CredentialStore`].

mod file_store;
mod memory;
mod traits;
mod types;

pub use file_store::FileCredentialStore;
pub use memory::{MemoryCredentialStore, StaticCredentials};
pub use traits::*;
pub use types::*;

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SignInError {
    #[error("Both username and password are required")]
    MissingField,

    #[error(transparent)]
    Storage(#[from] CredentialError),
}

/// Persist a login. Nothing is stored unless both values are present.
pub async fn sign_in(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
) -> Result<(), SignInError> {
    let credentials = Credentials::new(username, password);
    if !credentials.is_complete() {
        return Err(SignInError::MissingField);
    }

    store.save(&credentials).await?;
    info!(username, backend = store.backend_name(), "Signed in");
    Ok(())
}

/// Forget the stored login.
pub async fn sign_out(store: &dyn CredentialStore) -> Result<(), CredentialError> {
    store.clear().await?;
    info!(backend = store.backend_name(), "Signed out");
    Ok(())
}

/// Decide which screen to show.
///
/// Unreadable storage is treated the same as never having signed in.
pub async fn current_screen(provider: &dyn CredentialProvider) -> Screen {
    match provider.credentials().await {
        Ok(Some(credentials)) if credentials.is_complete() => Screen::Search,
        Ok(_) => Screen::SignIn,
        Err(e) => {
            warn!("Could not read stored credentials: {}", e);
            Screen::SignIn
        }
    }
}
