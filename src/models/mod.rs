//! Core data models for overhead-cli
//!
//! This module contains the data structures of the costing domain: cost
//! records, allocation settings, pricing rules and recipe ingredients.

pub mod allocation;
pub mod cost;
pub mod ids;
pub mod ingredient;
pub mod money;
pub mod pricing;

pub use allocation::{AllocationConfig, AllocationMethod, OverheadSnapshot};
pub use cost::{CostGroup, CostKind, CostRecord, CostStatus};
pub use ids::CostId;
pub use ingredient::IngredientLine;
pub use money::{Money, RoundingRule};
pub use pricing::{PricingMode, PricingRule};
