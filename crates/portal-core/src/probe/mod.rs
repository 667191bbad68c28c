pub mod liveness;

pub use liveness::{ProbeOutcome, UrlProbe, PROBE_USER_AGENT};
