//! Best-effort URL reachability check.
//!
//! A HEAD probe can under-report: live endpoints that refuse HEAD or sit
//! behind an origin policy the client cannot satisfy come back as
//! inaccessible. That is accepted; the probe gates tool creation on the
//! happy path and never claims to be an oracle.

use crate::error::describe_status;
use reqwest::{Client, Url};
use std::time::Duration;

/// Fixed desktop-browser User-Agent sent with every probe, so targets that
/// filter unknown agents answer the way they would a real visitor.
pub const PROBE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub is_valid: bool,
    pub message: String,
}

impl ProbeOutcome {
    fn valid(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

pub struct UrlProbe {
    client: Client,
    timeout: Duration,
}

impl UrlProbe {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(PROBE_USER_AGENT)
                .build()
                .expect("failed to build reqwest client"),
            timeout,
        }
    }

    /// Check that `raw` names a live URL. Blank and unparseable input
    /// resolve without touching the network; everything else is a HEAD
    /// request cancelled outright when the budget elapses.
    pub async fn check(&self, raw: &str) -> ProbeOutcome {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ProbeOutcome::invalid("Please enter a URL");
        }

        let url = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(_) => return ProbeOutcome::invalid("Invalid URL format"),
        };

        tracing::debug!(%url, "probing URL");
        let request = self.client.head(url).send();
        match tokio::time::timeout(self.timeout, request).await {
            Err(_elapsed) => ProbeOutcome::invalid(format!(
                "URL validation timed out ({} seconds)",
                self.timeout.as_secs()
            )),
            Ok(Ok(resp)) => {
                let status = resp.status();
                if status.is_success() {
                    ProbeOutcome::valid(format!(
                        "URL is live and accessible (Status: {})",
                        status.as_u16()
                    ))
                } else {
                    ProbeOutcome::invalid(format!(
                        "URL returned error status: {}",
                        describe_status(status)
                    ))
                }
            }
            Ok(Err(e)) if e.is_connect() || e.is_request() => {
                ProbeOutcome::invalid("URL is not accessible - network error")
            }
            Ok(Err(e)) => ProbeOutcome::invalid(format!("URL validation failed: {e}")),
        }
    }
}

impl Default for UrlProbe {
    fn default() -> Self {
        Self::new()
    }
}
