//! Calculation engine
//!
//! Pure functions over in-memory values: cost aggregation, overhead
//! allocation, HPP composition and material costing. Nothing here touches
//! storage.

pub mod aggregate;
pub mod allocation;
pub mod hpp;
pub mod material;
pub mod recompute;

pub use aggregate::{aggregate, CostSummary};
pub use allocation::{
    allocate_configured, allocate_dual_mode, allocate_overhead, DualModeResult, OverheadResult,
};
pub use hpp::{compose_hpp, selling_price, HppResult, RoundedHpp};
pub use material::{effective_unit_price, material_per_unit, MaterialCost, PriceSource};
pub use recompute::{recompute, Debouncer, HppInputs, RecomputeInputs, RecomputeOutcome};
