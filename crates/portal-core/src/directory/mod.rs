//! Tool directory view: auth-gated fetch and link classification.

use crate::api::client::PortalApi;
use crate::api::types::Tool;
use crate::error::PortalError;
use crate::identity::provider::{IdentityProvider, InteractionStatus};
use reqwest::Url;

/// Display state of the directory. Starts loading; every fetch attempt
/// terminates it in `Ready` or `Error`, except a busy identity provider,
/// which keeps it loading until the provider settles.
#[derive(Debug, Clone)]
pub enum DirectoryState {
    Loading,
    Ready(Vec<Tool>),
    Error(String),
}

impl DirectoryState {
    pub fn apply(&mut self, result: Result<Vec<Tool>, PortalError>) {
        *self = match result {
            Ok(tools) => DirectoryState::Ready(tools),
            Err(PortalError::IdentityBusy) => DirectoryState::Loading,
            Err(e) => DirectoryState::Error(e.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DirectoryState::Loading)
    }
}

/// One fetch attempt: gate on the identity provider, take the first
/// account, acquire a token, list tools. Every failure is terminal for
/// the attempt; retry is a fresh user action.
pub async fn fetch_tools(
    identity: &dyn IdentityProvider,
    api: &PortalApi,
    scopes: &[String],
) -> Result<Vec<Tool>, PortalError> {
    if identity.status() != InteractionStatus::None {
        return Err(PortalError::IdentityBusy);
    }
    let account = identity
        .accounts()
        .into_iter()
        .next()
        .ok_or(PortalError::NoAccount)?;
    let token = identity.acquire_token_silent(scopes, &account).await?;
    api.list_tools(&token).await
}

/// Where a tool's `target_path` leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute http(s) URL, opened in a new browsing context.
    External(String),
    /// Site-relative path, resolved against the portal origin.
    Internal(String),
    /// Neither: displayed but never handed to a browser.
    Untrusted,
}

/// Strict classification of `target_path`. An entry is only navigable as
/// an absolute web URL or a site-relative path; everything else (other
/// schemes, bare words, malformed absolutes) is untrusted.
pub fn classify_link(target_path: &str) -> LinkTarget {
    if let Ok(url) = Url::parse(target_path) {
        return match url.scheme() {
            "http" | "https" => LinkTarget::External(url.to_string()),
            _ => LinkTarget::Untrusted,
        };
    }
    if target_path.starts_with('/') {
        return LinkTarget::Internal(target_path.to_string());
    }
    LinkTarget::Untrusted
}

/// Absolute URL for an internal path, against the portal origin.
pub fn resolve_internal(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
