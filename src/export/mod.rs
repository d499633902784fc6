//! Data export
//!
//! - CSV: cost records or group totals, for spreadsheets
//! - JSON: full machine-readable export
//! - YAML: full human-readable export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_costs_csv, export_summary_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
