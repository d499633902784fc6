//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod allocation;
pub mod cost;
pub mod export;
pub mod hpp;
pub mod watch;

pub use allocation::{handle_allocation_command, AllocationCommands};
pub use cost::{handle_cost_command, CostCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use hpp::{handle_hpp_command, HppArgs};
pub use watch::{handle_watch_command, WatchArgs};
