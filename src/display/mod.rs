//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; the CLI decides where it goes.

pub mod cost;
pub mod report;

pub use cost::{format_cost_details, format_cost_list, format_summary, format_template};
pub use report::{
    format_audit_entries, format_classification, format_dual_mode, format_hpp, format_material,
    format_overhead, format_recompute,
};
