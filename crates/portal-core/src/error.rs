use thiserror::Error;

/// Failures surfaced by the portal workflows. Display strings are the
/// user-facing messages rendered next to the triggering control.
#[derive(Debug, Error)]
pub enum PortalError {
    /// The identity provider is mid-operation; dependent calls must wait.
    #[error("identity provider is busy")]
    IdentityBusy,

    /// Signed in, but the provider exposes no account.
    #[error("You are logged in, but no account was found.")]
    NoAccount,

    /// Silent token acquisition failed.
    #[error("token acquisition failed: {0}")]
    Token(String),

    /// Non-success HTTP status from the portal API.
    #[error("API Error: {0}")]
    Api(String),

    /// The API rejected a create with an explicit detail message.
    #[error("{0}")]
    Rejected(String),

    /// Transport-level failure reaching the portal API.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not decode as expected.
    #[error("malformed API response: {0}")]
    Malformed(String),
}

/// "403 Forbidden", or just "403" when the status has no reason phrase.
pub(crate) fn describe_status(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_includes_status_and_reason() {
        let err = PortalError::Api("403 Forbidden".to_string());
        assert_eq!(err.to_string(), "API Error: 403 Forbidden");
    }

    #[test]
    fn rejected_displays_detail_verbatim() {
        let err = PortalError::Rejected("name already exists".to_string());
        assert_eq!(err.to_string(), "name already exists");
    }

    #[test]
    fn no_account_uses_fixed_message() {
        assert_eq!(
            PortalError::NoAccount.to_string(),
            "You are logged in, but no account was found."
        );
    }

    #[test]
    fn describe_status_with_and_without_reason() {
        assert_eq!(
            describe_status(reqwest::StatusCode::NOT_FOUND),
            "404 Not Found"
        );
        let unusual = reqwest::StatusCode::from_u16(599).unwrap();
        assert_eq!(describe_status(unusual), "599");
    }
}
