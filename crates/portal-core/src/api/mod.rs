pub mod client;
pub mod types;

pub use client::PortalApi;
pub use types::{NewTool, Tool};
