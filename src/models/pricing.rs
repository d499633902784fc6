//! Selling price rules

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the percentage relates cost to price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// Percentage added on top of cost: price = hpp × (1 + p/100)
    Markup,
    /// Percentage of the selling price kept as profit: price = hpp / (1 − p/100)
    Margin,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markup => write!(f, "Markup"),
            Self::Margin => write!(f, "Margin"),
        }
    }
}

/// Pricing mode plus percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    pub mode: PricingMode,
    pub percentage: f64,
}

impl PricingRule {
    pub fn markup(percentage: f64) -> Self {
        Self {
            mode: PricingMode::Markup,
            percentage,
        }
    }

    pub fn margin(percentage: f64) -> Self {
        Self {
            mode: PricingMode::Margin,
            percentage,
        }
    }
}

impl Default for PricingRule {
    fn default() -> Self {
        Self::markup(30.0)
    }
}

impl fmt::Display for PricingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}%", self.mode, self.percentage)
    }
}
