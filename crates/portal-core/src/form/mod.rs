//! Tool creation form: field state, URL validation lifecycle, submit gating.

use crate::api::client::PortalApi;
use crate::api::types::NewTool;
use crate::error::PortalError;
use crate::identity::provider::IdentityProvider;
use crate::probe::liveness::ProbeOutcome;

/// Outcome of the last URL check. Reset to unchecked the moment the URL
/// text changes, even by one character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlValidation {
    pub checked: bool,
    pub is_valid: bool,
    pub checking: bool,
    pub message: String,
}

/// The creation form. The `checking` and `submitting` flags are the whole
/// concurrency discipline: the UI disables the triggering controls while
/// either is set, so at most one operation is ever in flight.
#[derive(Debug, Default)]
pub struct ToolForm {
    name: String,
    description: String,
    target_path: String,
    validation: UrlValidation,
    submitting: bool,
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl ToolForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    pub fn validation(&self) -> &UrlValidation {
        &self.validation
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_target_path(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value != self.target_path {
            self.validation = UrlValidation::default();
        }
        self.target_path = value;
    }

    /// Start a URL check. Refused while a check or submission is already
    /// in flight (the triggering control is disabled then).
    pub fn begin_check(&mut self) -> bool {
        if self.validation.checking || self.submitting {
            return false;
        }
        self.validation.checking = true;
        true
    }

    pub fn finish_check(&mut self, outcome: ProbeOutcome) {
        self.validation = UrlValidation {
            checked: true,
            is_valid: outcome.is_valid,
            checking: false,
            message: outcome.message,
        };
    }

    /// All required fields non-blank (whitespace-only counts as blank).
    pub fn is_complete(&self) -> bool {
        !is_blank(&self.name) && !is_blank(&self.description) && !is_blank(&self.target_path)
    }

    /// Submit is allowed only for a complete form whose URL has been
    /// validated against its current value, with nothing in flight.
    pub fn can_submit(&self) -> bool {
        self.is_complete()
            && self.validation.checked
            && self.validation.is_valid
            && !self.validation.checking
            && !self.submitting
    }

    pub fn begin_submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Clears the submitting flag; runs on every completion, success or
    /// failure.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn payload(&self) -> NewTool {
        NewTool {
            name: self.name.clone(),
            description: self.description.clone(),
            target_path: self.target_path.clone(),
        }
    }
}

/// Acquire a token for the first account and POST the new tool.
pub async fn submit_tool(
    identity: &dyn IdentityProvider,
    api: &PortalApi,
    scopes: &[String],
    tool: &NewTool,
) -> Result<(), PortalError> {
    let account = identity
        .accounts()
        .into_iter()
        .next()
        .ok_or(PortalError::NoAccount)?;
    let token = identity.acquire_token_silent(scopes, &account).await?;
    api.create_tool(&token, tool).await
}
