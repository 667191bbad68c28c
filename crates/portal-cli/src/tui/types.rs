use portal_core::{PortalError, ProbeOutcome, Tool};

// ── events from background tasks ─────────────────────────────────────────────

pub(super) enum DisplayEvent {
    ToolsFetched(Result<Vec<Tool>, PortalError>),
    /// Probe finished for `url`; dropped as stale if the field has since
    /// been edited to a different value.
    ProbeDone {
        url: String,
        outcome: ProbeOutcome,
    },
    SubmitDone(Result<(), PortalError>),
}

pub(super) struct InfoBar {
    pub(super) api: String,
    pub(super) account: String,
}
