//! Service layer for overhead-cli
//!
//! Business logic on top of the storage layer: validation, duplicate
//! checks, audit logging and calls into the calculation engine.

pub mod allocation;
pub mod classification;
pub mod cost;
pub mod templates;

pub use allocation::{AllocationService, OverheadSource};
pub use classification::{classify, Classification, Confidence};
pub use cost::{BulkCostUpdate, CostFilter, CostService, CostUpdate, NewCost};
pub use templates::{apply_template, BusinessType, CostTemplate, TemplateOutcome};
