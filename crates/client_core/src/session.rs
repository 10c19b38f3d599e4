use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use storage::{KeyValueStore, ACCESS_TOKEN_KEY};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("session storage failed: {0}")]
    Storage(String),
}

/// The single account the gate accepts. A stand-in for a real credential
/// check, kept injectable so deployments and tests can swap it.
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub password: String,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            email: "test@mail.com".into(),
            password: "changeme".into(),
        }
    }
}

/// Admits or refuses navigation based on the presence of a session marker in
/// persistent storage. The marker's value is the login timestamp; only its
/// presence is ever checked.
pub struct SessionGate {
    store: Arc<dyn KeyValueStore>,
    account: Account,
}

impl SessionGate {
    pub fn new(store: Arc<dyn KeyValueStore>, account: Account) -> Self {
        Self { store, account }
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.store.get(ACCESS_TOKEN_KEY).await?.is_some())
    }

    /// Writes a fresh marker on a credential match; writes nothing otherwise.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        if email != self.account.email || password != self.account.password {
            return Err(AuthError::InvalidCredentials);
        }

        let marker = Utc::now().timestamp_millis().to_string();
        self.store
            .set(ACCESS_TOKEN_KEY, &marker)
            .await
            .map_err(|err| AuthError::Storage(err.to_string()))?;
        info!("session: marker written");
        Ok(())
    }

    /// Erases the marker whether or not one was present.
    pub async fn logout(&self) -> Result<()> {
        self.store.remove(ACCESS_TOKEN_KEY).await?;
        info!("session: marker erased");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MemoryStore;

    fn gate() -> SessionGate {
        SessionGate::new(Arc::new(MemoryStore::new()), Account::default())
    }

    #[tokio::test]
    async fn login_with_the_configured_account_writes_a_timestamp_marker() {
        let store = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(store.clone(), Account::default());

        gate.login("test@mail.com", "changeme").await.expect("login");
        assert!(gate.is_authenticated().await.expect("check"));

        let marker = store
            .get(ACCESS_TOKEN_KEY)
            .await
            .expect("get")
            .expect("marker present");
        marker.parse::<i64>().expect("millisecond timestamp");
    }

    #[tokio::test]
    async fn login_with_wrong_credentials_writes_nothing() {
        let gate = gate();
        let err = gate
            .login("test@mail.com", "wrong-password")
            .await
            .expect_err("must refuse");
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!gate.is_authenticated().await.expect("check"));
    }

    #[tokio::test]
    async fn logout_erases_the_marker() {
        let gate = gate();
        gate.login("test@mail.com", "changeme").await.expect("login");
        gate.logout().await.expect("logout");
        assert!(!gate.is_authenticated().await.expect("check"));
    }

    #[tokio::test]
    async fn logout_without_a_session_is_harmless() {
        let gate = gate();
        gate.logout().await.expect("logout");
        assert!(!gate.is_authenticated().await.expect("check"));
    }
}
