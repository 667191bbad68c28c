use crate::error::PortalError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A signed-in account exposed by the identity provider. The first entry
/// of [`IdentityProvider::accounts`] is the one the portal uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub account_id: String,
}

/// What the identity provider is currently doing. Dependent API calls may
/// only be issued while this reads `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionStatus {
    None,
    Login,
    Logout,
}

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub secret: String,
}

/// The identity collaborator, injected rather than reached for as ambient
/// global state. Token caching and refresh are its responsibility; callers
/// request a token anew for every API call.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn accounts(&self) -> Vec<Account>;

    fn status(&self) -> InteractionStatus;

    async fn acquire_token_silent(
        &self,
        scopes: &[String],
        account: &Account,
    ) -> Result<AccessToken, PortalError>;

    async fn logout(&self) -> Result<(), PortalError>;
}
