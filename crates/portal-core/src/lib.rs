pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod form;
pub mod identity;
pub mod probe;

#[cfg(test)]
pub(crate) mod testsupport;

pub use api::client::PortalApi;
pub use api::types::{NewTool, Tool};
pub use config::config::PortalConfig;
pub use directory::{classify_link, fetch_tools, resolve_internal, DirectoryState, LinkTarget};
pub use error::PortalError;
pub use form::{submit_tool, ToolForm, UrlValidation};
pub use identity::provider::{AccessToken, Account, IdentityProvider, InteractionStatus};
pub use identity::session::{SessionIdentity, StoredSession};
pub use probe::liveness::{ProbeOutcome, UrlProbe, PROBE_USER_AGENT};
