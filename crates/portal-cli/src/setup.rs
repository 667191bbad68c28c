use anyhow::Result;
use portal_core::{Account, PortalConfig, StoredSession};
use std::io::{self, BufRead, Write};

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// First-run sign-in. The identity provider's interactive flow happens
/// out-of-band; this records the resulting account and token so the
/// portal can acquire it silently afterwards.
pub fn run_setup(config: &PortalConfig) -> Result<StoredSession> {
    println!("\nWelcome to the Tool Portal");
    println!("No session found. Let's sign you in.\n");
    println!("Portal API:  {}  (set PORTAL_API_URL to change)", config.api_base_url);
    println!("Token scope: {}\n", config.api_scopes().join(" "));

    let username = loop {
        let name = read_line("Account (you@example.org): ")?;
        if !name.is_empty() {
            break name;
        }
    };

    print!("Paste an access token for the scope above: ");
    io::stdout().flush()?;
    let access_token = rpassword::read_password()?.trim().to_string();

    let account_id = if config.tenant_id.is_empty() {
        username.clone()
    } else {
        format!("{}.{}", username, config.tenant_id)
    };

    let session = StoredSession {
        account: Account {
            username,
            account_id,
        },
        access_token,
    };
    session.save()?;
    println!("Saved to ~/.portal/session.json\n");

    Ok(session)
}
