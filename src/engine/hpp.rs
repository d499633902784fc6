//! Cost-of-goods (HPP) composition and selling price
//!
//! HPP per unit is material + labor + overhead. The selling price follows a
//! markup or margin rule. All figures stay unrounded until
//! [`HppResult::rounded`] so chained calculations round exactly once.

use serde::{Deserialize, Serialize};

use crate::error::{CostError, CostResult};
use crate::models::{Money, PricingMode, PricingRule, RoundingRule};

/// Full per-unit cost and price breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HppResult {
    pub material_per_unit: f64,
    pub labor_per_unit: f64,
    pub overhead_per_unit: f64,
    pub hpp_per_unit: f64,
    pub pricing: PricingRule,
    pub selling_price: f64,
    pub profit_per_unit: f64,
}

/// [`HppResult`] rounded for display or storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedHpp {
    pub material_per_unit: Money,
    pub labor_per_unit: Money,
    pub overhead_per_unit: Money,
    pub hpp_per_unit: Money,
    pub selling_price: Money,
    pub profit_per_unit: Money,
}

impl HppResult {
    /// Round every figure to a whole currency unit
    pub fn rounded(&self) -> RoundedHpp {
        self.rounded_with(RoundingRule::Unit)
    }

    /// Round every figure with the given rule
    pub fn rounded_with(&self, rule: RoundingRule) -> RoundedHpp {
        RoundedHpp {
            material_per_unit: rule.apply(self.material_per_unit),
            labor_per_unit: rule.apply(self.labor_per_unit),
            overhead_per_unit: rule.apply(self.overhead_per_unit),
            hpp_per_unit: rule.apply(self.hpp_per_unit),
            selling_price: rule.apply(self.selling_price),
            profit_per_unit: rule.apply(self.profit_per_unit),
        }
    }

    /// Profit as a share of the selling price, in percent
    pub fn effective_margin(&self) -> f64 {
        if self.selling_price > 0.0 {
            self.profit_per_unit / self.selling_price * 100.0
        } else {
            0.0
        }
    }
}

fn require_non_negative(label: &str, value: f64) -> CostResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CostError::Validation(format!(
            "{} cannot be negative (got {})",
            label, value
        )));
    }
    Ok(())
}

/// Selling price for a unit cost under a pricing rule
///
/// Margin mode fails for percentages of 100 or more, since no price can keep
/// all of itself as profit.
pub fn selling_price(hpp_per_unit: f64, rule: &PricingRule) -> CostResult<f64> {
    let p = rule.percentage;
    if !p.is_finite() || p < 0.0 {
        return Err(CostError::Validation(format!(
            "{} percentage cannot be negative (got {})",
            rule.mode, p
        )));
    }

    match rule.mode {
        PricingMode::Markup => Ok(hpp_per_unit + hpp_per_unit * p / 100.0),
        PricingMode::Margin => {
            if p >= 100.0 {
                return Err(CostError::Validation(format!(
                    "Margin must be below 100% (got {}%)",
                    p
                )));
            }
            Ok(hpp_per_unit / (1.0 - p / 100.0))
        }
    }
}

/// Combine material, labor and overhead into HPP and price it
pub fn compose_hpp(
    material_per_unit: f64,
    labor_per_unit: f64,
    overhead_per_unit: f64,
    rule: &PricingRule,
) -> CostResult<HppResult> {
    require_non_negative("Material cost per unit", material_per_unit)?;
    require_non_negative("Labor cost per unit", labor_per_unit)?;
    require_non_negative("Overhead per unit", overhead_per_unit)?;

    let hpp_per_unit = material_per_unit + labor_per_unit + overhead_per_unit;
    let price = selling_price(hpp_per_unit, rule)?;

    Ok(HppResult {
        material_per_unit,
        labor_per_unit,
        overhead_per_unit,
        hpp_per_unit,
        pricing: *rule,
        selling_price: price,
        profit_per_unit: price - hpp_per_unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_scenario() {
        let result = compose_hpp(8000.0, 2000.0, 500.0, &PricingRule::markup(30.0)).unwrap();
        let rounded = result.rounded();

        assert_eq!(rounded.hpp_per_unit.units(), 10_500);
        assert_eq!(rounded.selling_price.units(), 13_650);
        assert_eq!(rounded.profit_per_unit.units(), 3_150);
    }

    #[test]
    fn test_markup_profit_is_percentage_of_hpp() {
        for (hpp, p) in [(10_500.0, 30.0), (7930.0, 35.0), (1.0, 0.0), (123_456.0, 250.0)] {
            let result = compose_hpp(hpp, 0.0, 0.0, &PricingRule::markup(p)).unwrap();
            let expected = hpp * p / 100.0;
            assert!((result.profit_per_unit - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_reference_recipe_prices() {
        let result = compose_hpp(4200.0, 3000.0, 730.0, &PricingRule::markup(35.0)).unwrap();
        assert_eq!(result.rounded().hpp_per_unit.units(), 7930);
        assert_eq!(result.rounded().selling_price.units(), 10_706);

        let result = compose_hpp(4200.0, 3000.0, 730.0, &PricingRule::margin(35.0)).unwrap();
        assert_eq!(result.rounded().selling_price.units(), 12_200);
        assert!((result.effective_margin() - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_margin_at_or_above_100_fails() {
        for p in [100.0, 100.5, 250.0] {
            let err = compose_hpp(1000.0, 0.0, 0.0, &PricingRule::margin(p)).unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn test_negative_percentage_fails() {
        assert!(compose_hpp(1000.0, 0.0, 0.0, &PricingRule::markup(-1.0))
            .unwrap_err()
            .is_validation());
        assert!(compose_hpp(1000.0, 0.0, 0.0, &PricingRule::margin(-1.0))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_negative_inputs_fail() {
        let rule = PricingRule::markup(10.0);
        assert!(compose_hpp(-1.0, 0.0, 0.0, &rule).is_err());
        assert!(compose_hpp(0.0, -1.0, 0.0, &rule).is_err());
        assert!(compose_hpp(0.0, 0.0, f64::NAN, &rule).is_err());
    }

    #[test]
    fn test_zero_cost_is_valid() {
        let result = compose_hpp(0.0, 0.0, 0.0, &PricingRule::margin(50.0)).unwrap();
        assert_eq!(result.selling_price, 0.0);
        assert_eq!(result.effective_margin(), 0.0);
    }

    #[test]
    fn test_rounding_happens_once_at_the_end() {
        // Each component alone would round down; their sum rounds up.
        let result = compose_hpp(100.4, 100.4, 100.4, &PricingRule::markup(0.0)).unwrap();
        let rounded = result.rounded();
        assert_eq!(rounded.material_per_unit.units(), 100);
        assert_eq!(rounded.hpp_per_unit.units(), 301);
    }

    #[test]
    fn test_rounded_with_rule() {
        let result = compose_hpp(4200.0, 3000.0, 730.0, &PricingRule::markup(35.0)).unwrap();
        let rounded = result.rounded_with(RoundingRule::Hundred);
        assert_eq!(rounded.hpp_per_unit.units(), 7900);
        assert_eq!(rounded.selling_price.units(), 10_700);
    }
}
