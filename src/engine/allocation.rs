//! Overhead allocation
//!
//! Turns a monthly cost pool into a per-unit overhead figure. Results keep
//! full precision; rounding happens once, through [`OverheadResult::rounded`].

use serde::{Deserialize, Serialize};

use super::aggregate::CostSummary;
use crate::error::{CostError, CostResult};
use crate::models::{AllocationConfig, AllocationMethod, CostGroup, Money};

/// Overhead attributed to one unit of output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverheadResult {
    /// The cost pool that was allocated
    pub total_cost: Money,

    /// Method and basis used
    pub config: AllocationConfig,

    /// Material cost the percentage was applied to (PercentOfMaterial only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_cost_per_unit: Option<f64>,

    /// Unrounded overhead per unit
    pub overhead_per_unit: f64,
}

impl OverheadResult {
    /// Overhead per unit rounded to a whole currency unit
    pub fn rounded(&self) -> Money {
        Money::round_from(self.overhead_per_unit)
    }
}

/// Allocate a cost pool per unit of output
///
/// PerUnit divides `total_cost` by the basis and fails when the basis is not
/// positive. PercentOfMaterial charges `basis`% of `material_cost_per_unit`;
/// a missing or zero material cost yields zero overhead, which is a valid
/// result rather than an error.
pub fn allocate_overhead(
    total_cost: Money,
    config: &AllocationConfig,
    material_cost_per_unit: Option<f64>,
) -> CostResult<OverheadResult> {
    let basis = config.basis_value;
    if !basis.is_finite() || basis <= 0.0 {
        return Err(CostError::Validation(format!(
            "Allocation basis must be greater than zero (got {})",
            basis
        )));
    }

    let overhead_per_unit = match config.method {
        AllocationMethod::PerUnit => total_cost.as_f64() / basis,
        AllocationMethod::PercentOfMaterial => {
            let material = material_cost_per_unit.unwrap_or(0.0);
            if !material.is_finite() || material < 0.0 {
                return Err(CostError::Validation(format!(
                    "Material cost per unit cannot be negative (got {})",
                    material
                )));
            }
            material * basis / 100.0
        }
    };

    Ok(OverheadResult {
        total_cost,
        config: *config,
        material_cost_per_unit: match config.method {
            AllocationMethod::PerUnit => None,
            AllocationMethod::PercentOfMaterial => Some(material_cost_per_unit.unwrap_or(0.0)),
        },
        overhead_per_unit,
    })
}

/// Allocate using settings that may not exist yet
///
/// Returns [`CostError::ConfigurationMissing`] instead of guessing a default
/// when no allocation settings are stored.
pub fn allocate_configured(
    total_cost: Money,
    config: Option<&AllocationConfig>,
    material_cost_per_unit: Option<f64>,
) -> CostResult<OverheadResult> {
    let config = config.ok_or(CostError::ConfigurationMissing)?;
    allocate_overhead(total_cost, config, material_cost_per_unit)
}

/// Per-unit figures for both cost groups over the same monthly output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualModeResult {
    pub target_output: f64,
    pub cost_of_goods: OverheadResult,
    pub operational: OverheadResult,
}

impl DualModeResult {
    /// Result for one group
    pub fn for_group(&self, group: CostGroup) -> &OverheadResult {
        match group {
            CostGroup::CostOfGoods => &self.cost_of_goods,
            CostGroup::Operational => &self.operational,
        }
    }

    /// Unrounded overhead per unit with both groups combined
    pub fn combined_per_unit(&self) -> f64 {
        self.cost_of_goods.overhead_per_unit + self.operational.overhead_per_unit
    }

    /// Each group rounded, then added
    pub fn combined_rounded(&self) -> Money {
        self.cost_of_goods.rounded() + self.operational.rounded()
    }
}

/// Divide each group's pool by the same monthly output target
pub fn allocate_dual_mode(summary: &CostSummary, target_output: f64) -> CostResult<DualModeResult> {
    let config = AllocationConfig::per_unit(target_output);
    Ok(DualModeResult {
        target_output,
        cost_of_goods: allocate_overhead(summary.total_cost_of_goods, &config, None)?,
        operational: allocate_overhead(summary.total_operational, &config, None)?,
    })
}
