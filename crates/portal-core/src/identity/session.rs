use super::provider::{AccessToken, Account, IdentityProvider, InteractionStatus};
use crate::config::PortalConfig;
use crate::error::PortalError;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The persisted identity session, written by the sign-in flow and
/// consumed silently afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub account: Account,
    pub access_token: String,
}

impl StoredSession {
    pub fn path() -> PathBuf {
        PortalConfig::resolve_path("session.json")
    }

    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&Self::path())
    }

    pub(crate) fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path)?;
        let session: StoredSession = serde_json::from_str(&data)?;
        Ok(Some(session))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub(crate) fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

/// Identity provider backed by the stored session. Silent acquisition
/// hands out the cached token; interactive sign-in happens out-of-band
/// (the setup flow writes the session file this reads).
pub struct SessionIdentity {
    session: Mutex<Option<StoredSession>>,
    status: Mutex<InteractionStatus>,
    path: PathBuf,
}

impl SessionIdentity {
    pub fn new(session: StoredSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            status: Mutex::new(InteractionStatus::None),
            path: StoredSession::path(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_path(session: StoredSession, path: PathBuf) -> Self {
        Self {
            session: Mutex::new(Some(session)),
            status: Mutex::new(InteractionStatus::None),
            path,
        }
    }

    fn set_status(&self, status: InteractionStatus) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentity {
    fn accounts(&self) -> Vec<Account> {
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|s| vec![s.account.clone()])
            .unwrap_or_default()
    }

    fn status(&self) -> InteractionStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn acquire_token_silent(
        &self,
        scopes: &[String],
        account: &Account,
    ) -> Result<AccessToken, PortalError> {
        tracing::debug!(?scopes, account = %account.username, "acquiring token silently");
        let session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        let session = session
            .as_ref()
            .ok_or_else(|| PortalError::Token("no active session".to_string()))?;
        if session.account.account_id != account.account_id {
            return Err(PortalError::Token(format!(
                "no cached token for account {}",
                account.username
            )));
        }
        if session.access_token.is_empty() {
            return Err(PortalError::Token(
                "cached token is empty — sign in again".to_string(),
            ));
        }
        Ok(AccessToken {
            secret: session.access_token.clone(),
        })
    }

    async fn logout(&self) -> Result<(), PortalError> {
        self.set_status(InteractionStatus::Logout);
        self.session.lock().unwrap_or_else(|e| e.into_inner()).take();
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                self.set_status(InteractionStatus::None);
                return Err(PortalError::Token(format!("failed to clear session: {e}")));
            }
        }
        tracing::info!("session cleared");
        self.set_status(InteractionStatus::None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> StoredSession {
        StoredSession {
            account: Account {
                username: "pat@example.org".to_string(),
                account_id: "pat".to_string(),
            },
            access_token: "tok-123".to_string(),
        }
    }

    #[test]
    fn stored_session_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        session().save_to(&path).unwrap();

        let loaded = StoredSession::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.account.username, "pat@example.org");
        assert_eq!(loaded.access_token, "tok-123");
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = StoredSession::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn silent_acquisition_returns_cached_token() {
        let identity = SessionIdentity::new(session());
        let account = identity.accounts().remove(0);
        let token = identity
            .acquire_token_silent(&["api://x/access_as_user".to_string()], &account)
            .await
            .unwrap();
        assert_eq!(token.secret, "tok-123");
    }

    #[tokio::test]
    async fn unknown_account_is_refused() {
        let identity = SessionIdentity::new(session());
        let other = Account {
            username: "sam@example.org".to_string(),
            account_id: "sam".to_string(),
        };
        let err = identity.acquire_token_silent(&[], &other).await.unwrap_err();
        assert!(matches!(err, PortalError::Token(_)));
    }

    #[tokio::test]
    async fn logout_clears_session_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        session().save_to(&path).unwrap();

        let identity = SessionIdentity::with_path(session(), path.clone());
        identity.logout().await.unwrap();

        assert!(identity.accounts().is_empty());
        assert!(!path.exists());
        assert_eq!(identity.status(), InteractionStatus::None);
    }
}
