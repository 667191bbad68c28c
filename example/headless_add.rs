//! Headless walkthrough of the add-tool workflow, without the TUI.
//!
//! Sketch of driving portal-core directly:
//!   probe a URL, gate the form on the outcome, then submit.
//!
//! Requires a session at ~/.portal/session.json (run the portal binary
//! once to create it) and PORTAL_API_URL pointing at the backend.

use portal_core::{
    submit_tool, PortalApi, PortalConfig, SessionIdentity, StoredSession, ToolForm, UrlProbe,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PortalConfig::load().unwrap_or_default();
    let session = StoredSession::load()?.expect("no session — run `portal` first");
    let identity = SessionIdentity::new(session);
    let api = PortalApi::new(config.api_base_url.clone());
    let scopes = config.api_scopes();

    let mut form = ToolForm::new();
    form.set_name("Internal Wiki");
    form.set_description("Team documentation");
    form.set_target_path("https://wiki.internal.example.org");

    form.begin_check();
    let outcome = UrlProbe::new().check(form.target_path()).await;
    println!("probe: {}", outcome.message);
    form.finish_check(outcome);

    if !form.can_submit() {
        println!("not submittable — fix the URL and try again");
        return Ok(());
    }

    form.begin_submit();
    let result = submit_tool(&identity, &api, &scopes, &form.payload()).await;
    form.finish_submit();

    match result {
        Ok(()) => println!("tool added — refresh the directory to see it"),
        Err(e) => println!("create failed: {e}"),
    }
    Ok(())
}
