//! Configuration and persistence module
//!
//! Handles:
//! - The managed dotenv file (`.env`, `KEY=VALUE` per line)
//! - The management configuration object built on top of it
//! - Settings of the tool itself (`settings.toml`)

mod mgmt;
mod settings;
mod storage;

pub use mgmt::*;
pub use settings::*;
pub use storage::*;
