//! Configuration module for overhead-cli
//!
//! - Path resolution for config, data and the audit log
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::OverheadPaths;
pub use settings::Settings;
