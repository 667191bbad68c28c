//! Scriptable identity provider for tests.

use super::provider::{AccessToken, Account, IdentityProvider, InteractionStatus};
use crate::error::PortalError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) struct FakeIdentity {
    accounts: Vec<Account>,
    status: InteractionStatus,
    token: Option<String>,
    pub(crate) token_requests: AtomicUsize,
}

impl FakeIdentity {
    pub(crate) fn signed_in(username: &str) -> Self {
        Self {
            accounts: vec![Account {
                username: username.to_string(),
                account_id: username.to_string(),
            }],
            status: InteractionStatus::None,
            token: Some("fake-token".to_string()),
            token_requests: AtomicUsize::new(0),
        }
    }

    pub(crate) fn busy(status: InteractionStatus) -> Self {
        Self {
            status,
            ..Self::signed_in("busy@example.org")
        }
    }

    pub(crate) fn no_accounts() -> Self {
        Self {
            accounts: Vec::new(),
            ..Self::signed_in("nobody@example.org")
        }
    }

    pub(crate) fn failing_token() -> Self {
        Self {
            token: None,
            ..Self::signed_in("pat@example.org")
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn accounts(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    fn status(&self) -> InteractionStatus {
        self.status
    }

    async fn acquire_token_silent(
        &self,
        _scopes: &[String],
        _account: &Account,
    ) -> Result<AccessToken, PortalError> {
        self.token_requests.fetch_add(1, Ordering::SeqCst);
        match &self.token {
            Some(secret) => Ok(AccessToken {
                secret: secret.clone(),
            }),
            None => Err(PortalError::Token("interaction required".to_string())),
        }
    }

    async fn logout(&self) -> Result<(), PortalError> {
        Ok(())
    }
}
