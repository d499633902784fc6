//! Overhead allocation settings
//!
//! The allocation config says how a monthly cost pool is spread across units
//! of output. The snapshot keeps the last saved per-unit figures so recipes
//! can pick them up without recomputing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Upper bound for an estimated monthly unit count
pub const MAX_TARGET_OUTPUT: f64 = 1_000_000.0;
/// Upper bound for a percentage-of-material basis
pub const MAX_PERCENTAGE: f64 = 1000.0;

const RECOMMENDED_MIN_TARGET: f64 = 100.0;
const RECOMMENDED_MAX_TARGET: f64 = 50_000.0;
const RECOMMENDED_MAX_PERCENTAGE: f64 = 100.0;

/// Rule used to spread a cost pool across output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    /// Divide the pool by an estimated monthly unit count
    PerUnit,
    /// Charge a percentage of the material cost of each unit
    PercentOfMaterial,
}

impl fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerUnit => write!(f, "Per unit"),
            Self::PercentOfMaterial => write!(f, "Percent of material"),
        }
    }
}

/// Allocation method plus its basis value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    pub method: AllocationMethod,

    /// Monthly unit count (PerUnit) or percentage (PercentOfMaterial)
    pub basis_value: f64,
}

impl AllocationConfig {
    /// Allocate per unit of estimated monthly output
    pub fn per_unit(units: f64) -> Self {
        Self {
            method: AllocationMethod::PerUnit,
            basis_value: units,
        }
    }

    /// Allocate as a percentage of material cost
    pub fn percent_of_material(percentage: f64) -> Self {
        Self {
            method: AllocationMethod::PercentOfMaterial,
            basis_value: percentage,
        }
    }

    /// Validate the basis against the settings form rules
    pub fn validate(&self) -> Result<(), AllocationValidationError> {
        if !self.basis_value.is_finite() || self.basis_value <= 0.0 {
            return Err(AllocationValidationError::NonPositiveBasis(self.basis_value));
        }

        match self.method {
            AllocationMethod::PerUnit if self.basis_value > MAX_TARGET_OUTPUT => Err(
                AllocationValidationError::TargetTooHigh(self.basis_value),
            ),
            AllocationMethod::PercentOfMaterial if self.basis_value > MAX_PERCENTAGE => Err(
                AllocationValidationError::PercentageTooHigh(self.basis_value),
            ),
            _ => Ok(()),
        }
    }

    /// Non-blocking hints about unusual basis values
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        match self.method {
            AllocationMethod::PerUnit => {
                if self.basis_value < RECOMMENDED_MIN_TARGET {
                    warnings.push(format!(
                        "A target of {} units per month is low; check it matches your capacity",
                        self.basis_value
                    ));
                } else if self.basis_value > RECOMMENDED_MAX_TARGET {
                    warnings.push(format!(
                        "A target of {} units per month is very high; make sure it is correct",
                        self.basis_value
                    ));
                }
            }
            AllocationMethod::PercentOfMaterial => {
                if self.basis_value > RECOMMENDED_MAX_PERCENTAGE {
                    warnings.push(format!(
                        "An overhead of {}% of material cost is high; make sure it fits your business",
                        self.basis_value
                    ));
                }
            }
        }
        warnings
    }
}

impl fmt::Display for AllocationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method {
            AllocationMethod::PerUnit => {
                write!(f, "{} ({} units/month)", self.method, self.basis_value)
            }
            AllocationMethod::PercentOfMaterial => {
                write!(f, "{} ({}%)", self.method, self.basis_value)
            }
        }
    }
}

/// Last saved per-unit figures from a dual-mode calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadSnapshot {
    /// Monthly output the pools were divided by
    pub target_output: f64,

    /// Production overhead per unit
    pub cost_of_goods_per_unit: Money,

    /// Operational cost per unit
    pub operational_per_unit: Money,

    /// When the figures were saved
    pub calculated_at: DateTime<Utc>,
}

impl OverheadSnapshot {
    /// Overhead charged to each unit's HPP: both pools combined
    pub fn combined_per_unit(&self) -> Money {
        self.cost_of_goods_per_unit + self.operational_per_unit
    }
}

/// Validation errors for allocation settings
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationValidationError {
    NonPositiveBasis(f64),
    TargetTooHigh(f64),
    PercentageTooHigh(f64),
}

impl fmt::Display for AllocationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveBasis(v) => {
                write!(f, "Allocation basis must be greater than zero (got {})", v)
            }
            Self::TargetTooHigh(v) => write!(
                f,
                "Target output {} exceeds the maximum of {} units",
                v, MAX_TARGET_OUTPUT
            ),
            Self::PercentageTooHigh(v) => write!(
                f,
                "Percentage {} exceeds the maximum of {}%",
                v, MAX_PERCENTAGE
            ),
        }
    }
}

impl std::error::Error for AllocationValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_basis() {
        assert!(AllocationConfig::per_unit(1000.0).validate().is_ok());
        assert!(AllocationConfig::percent_of_material(25.0).validate().is_ok());

        assert!(matches!(
            AllocationConfig::per_unit(0.0).validate(),
            Err(AllocationValidationError::NonPositiveBasis(_))
        ));
        assert!(matches!(
            AllocationConfig::per_unit(-5.0).validate(),
            Err(AllocationValidationError::NonPositiveBasis(_))
        ));
        assert!(matches!(
            AllocationConfig::per_unit(f64::NAN).validate(),
            Err(AllocationValidationError::NonPositiveBasis(_))
        ));
        assert!(matches!(
            AllocationConfig::per_unit(2_000_000.0).validate(),
            Err(AllocationValidationError::TargetTooHigh(_))
        ));
        assert!(matches!(
            AllocationConfig::percent_of_material(1500.0).validate(),
            Err(AllocationValidationError::PercentageTooHigh(_))
        ));
    }

    #[test]
    fn test_warnings() {
        assert!(AllocationConfig::per_unit(3000.0).warnings().is_empty());
        assert_eq!(AllocationConfig::per_unit(50.0).warnings().len(), 1);
        assert_eq!(AllocationConfig::per_unit(80_000.0).warnings().len(), 1);
        assert_eq!(
            AllocationConfig::percent_of_material(150.0).warnings().len(),
            1
        );
    }

    #[test]
    fn test_snapshot_combined() {
        let snapshot = OverheadSnapshot {
            target_output: 3000.0,
            cost_of_goods_per_unit: Money::from_units(730),
            operational_per_unit: Money::from_units(1333),
            calculated_at: Utc::now(),
        };
        assert_eq!(snapshot.combined_per_unit().units(), 2063);
    }

    #[test]
    fn test_serialization() {
        let config = AllocationConfig::percent_of_material(12.5);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("percent_of_material"));
        let back: AllocationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
