//! Material cost per unit from recipe ingredients
//!
//! Inventory tracks a weighted average cost (WAC) per ingredient. It is
//! preferred over the listed price unless it looks implausible, in which case
//! the listed price is kept.

use serde::{Deserialize, Serialize};

use crate::error::{CostError, CostResult};
use crate::models::IngredientLine;

/// WAC prices above this per unit are treated as data errors
pub const MAX_WAC_PRICE: f64 = 1_000_000.0;

/// Allowed WAC / listed price ratio
const WAC_RATIO_RANGE: (f64, f64) = (0.1, 10.0);

/// Where an ingredient's effective price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Wac,
    Listed,
}

/// One priced ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub source: PriceSource,
    pub line_total: f64,
}

/// Material cost for a recipe batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCost {
    pub ingredients: Vec<PricedIngredient>,
    pub batch_total: f64,
    pub pieces: f64,
    pub per_unit: f64,
}

/// Pick the price to charge for one ingredient
pub fn effective_unit_price(line: &IngredientLine) -> (f64, PriceSource) {
    if let Some(wac) = line.wac_price {
        if wac.is_finite() && wac > 0.0 && wac <= MAX_WAC_PRICE {
            let plausible = if line.unit_price > 0.0 {
                let ratio = wac / line.unit_price;
                (WAC_RATIO_RANGE.0..=WAC_RATIO_RANGE.1).contains(&ratio)
            } else {
                true
            };
            if plausible {
                return (wac, PriceSource::Wac);
            }
            tracing::debug!(
                ingredient = %line.name,
                wac,
                listed = line.unit_price,
                "WAC price out of range, using listed price"
            );
        }
    }
    (line.unit_price, PriceSource::Listed)
}

/// Material cost per produced piece
///
/// `portions` batches of the recipe each yield `pieces_per_portion` pieces.
pub fn material_per_unit(
    lines: &[IngredientLine],
    portions: f64,
    pieces_per_portion: f64,
) -> CostResult<MaterialCost> {
    if lines.is_empty() {
        return Err(CostError::Validation(
            "A recipe needs at least one ingredient".into(),
        ));
    }
    if !(portions.is_finite() && portions > 0.0) {
        return Err(CostError::Validation(
            "Number of portions must be greater than zero".into(),
        ));
    }
    if !(pieces_per_portion.is_finite() && pieces_per_portion > 0.0) {
        return Err(CostError::Validation(
            "Pieces per portion must be greater than zero".into(),
        ));
    }

    let mut ingredients = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if !(line.quantity.is_finite() && line.quantity > 0.0) {
            return Err(CostError::Validation(format!(
                "Ingredient {} ({}): quantity must be greater than zero",
                i + 1,
                line.name
            )));
        }

        let (unit_price, source) = effective_unit_price(line);
        if !(unit_price.is_finite() && unit_price > 0.0) {
            return Err(CostError::Validation(format!(
                "Ingredient {} ({}): price must be greater than zero",
                i + 1,
                line.name
            )));
        }

        ingredients.push(PricedIngredient {
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price,
            source,
            line_total: line.quantity * unit_price,
        });
    }

    let batch_total: f64 = ingredients.iter().map(|i| i.line_total).sum();
    let pieces = portions * pieces_per_portion;

    Ok(MaterialCost {
        ingredients,
        batch_total,
        pieces,
        per_unit: batch_total / pieces,
    })
}
