mod setup;
mod tui;

use anyhow::Result;
use portal_core::{IdentityProvider, PortalConfig, SessionIdentity, StoredSession};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = PortalConfig::load().unwrap_or_default();

    let session = match StoredSession::load()? {
        Some(s) => s,
        None => setup::run_setup(&config)?,
    };

    let identity: Arc<dyn IdentityProvider> = Arc::new(SessionIdentity::new(session));
    tui::run(config, identity).await
}
