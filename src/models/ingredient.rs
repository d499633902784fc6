//! Recipe ingredient lines used to derive material cost per unit

use serde::{Deserialize, Serialize};

/// One ingredient of a recipe batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// Ingredient name
    pub name: String,

    /// Quantity used per batch, in the ingredient's purchase unit
    pub quantity: f64,

    /// Listed price per unit
    pub unit_price: f64,

    /// Weighted average cost per unit from inventory, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wac_price: Option<f64>,
}

impl IngredientLine {
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            wac_price: None,
        }
    }

    /// Attach a weighted average cost from inventory
    pub fn with_wac(mut self, wac_price: f64) -> Self {
        self.wac_price = Some(wac_price);
        self
    }
}
