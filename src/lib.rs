//! srs-mgmt - Configuration persistence for the SRS Stack management service
//!
//! The management service keeps its durable settings in a dotenv-style file
//! and answers requests with small JSON envelopes.
//!
//! # Modules
//!
//! - [`config`] - Dotenv-backed configuration store and tool settings
//! - [`response`] - Success and error envelopes
//! - [`footer`] - Wire shapes consumed by the web UI footer
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod footer;
pub mod response;

pub use config::{ConfigMap, ConfigStore, MGMT_PASSWORD, MgmtConfig, Settings};
pub use error::{Error, Result};
pub use response::{Envelope, ErrorEnvelope, Reply, as_error, as_response};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
