//! HPP CLI command
//!
//! Composes cost of goods per unit from material, labor and overhead, then
//! prices it with a markup or margin.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::report::{format_hpp, format_material};
use crate::engine::{compose_hpp, material_per_unit};
use crate::error::{CostError, CostResult};
use crate::models::{IngredientLine, PricingRule};
use crate::services::{AllocationService, OverheadSource};
use crate::storage::Storage;

/// Arguments for `overhead hpp`
#[derive(Args, Debug)]
pub struct HppArgs {
    /// Material cost per unit
    #[arg(short, long, conflicts_with = "ingredient")]
    pub material: Option<f64>,

    /// Recipe ingredient as NAME:QTY:PRICE or NAME:QTY:PRICE:AVG_PRICE (repeatable)
    #[arg(short, long)]
    pub ingredient: Vec<String>,

    /// Number of recipe batches the ingredients make
    #[arg(long, default_value = "1")]
    pub portions: f64,

    /// Pieces produced by each batch
    #[arg(long, default_value = "1")]
    pub pieces: f64,

    /// Labor cost per unit
    #[arg(short, long, default_value = "0")]
    pub labor: f64,

    /// Overhead per unit; defaults to the saved snapshot, then the allocation settings
    #[arg(short, long)]
    pub overhead: Option<f64>,

    /// Markup percentage on top of HPP
    #[arg(long, conflicts_with = "margin")]
    pub markup: Option<f64>,

    /// Profit margin as a percentage of the selling price
    #[arg(long)]
    pub margin: Option<f64>,
}

impl HppArgs {
    fn pricing(&self, settings: &Settings) -> PricingRule {
        match (self.markup, self.margin) {
            (Some(p), _) => PricingRule::markup(p),
            (None, Some(p)) => PricingRule::margin(p),
            (None, None) => settings.default_pricing,
        }
    }
}

/// Parse `NAME:QTY:PRICE[:AVG_PRICE]`
pub fn parse_ingredient(input: &str) -> CostResult<IngredientLine> {
    let invalid = || {
        CostError::Validation(format!(
            "Invalid ingredient '{}'. Use NAME:QTY:PRICE or NAME:QTY:PRICE:AVG_PRICE",
            input
        ))
    };
    let number = |s: &str| s.trim().parse::<f64>().map_err(|_| invalid());

    let parts: Vec<&str> = input.split(':').collect();
    let (name, quantity, price, wac) = match parts.as_slice() {
        [name, qty, price] => (*name, number(*qty)?, number(*price)?, None),
        [name, qty, price, wac] => (
            *name,
            number(*qty)?,
            number(*price)?,
            Some(number(*wac)?),
        ),
        _ => return Err(invalid()),
    };
    if name.trim().is_empty() {
        return Err(invalid());
    }

    let line = IngredientLine::new(name.trim(), quantity, price);
    Ok(match wac {
        Some(w) => line.with_wac(w),
        None => line,
    })
}

/// Handle the hpp command
pub fn handle_hpp_command(storage: &Storage, settings: &Settings, args: HppArgs) -> CostResult<()> {
    let symbol = settings.currency_symbol.as_str();

    let material = match args.material {
        Some(m) => m,
        None if !args.ingredient.is_empty() => {
            let lines = args
                .ingredient
                .iter()
                .map(|i| parse_ingredient(i))
                .collect::<CostResult<Vec<_>>>()?;
            let material = material_per_unit(&lines, args.portions, args.pieces)?;
            println!("{}", format_material(&material, symbol));
            material.per_unit
        }
        None => {
            return Err(CostError::Validation(
                "Give a material cost with --material or recipe lines with --ingredient".into(),
            ))
        }
    };

    let (overhead, note) = match args.overhead {
        Some(o) => (o, ""),
        None => {
            let source = AllocationService::new(storage).overhead_for_hpp(material)?;
            let note = match source {
                OverheadSource::Snapshot(_) => "(saved snapshot)",
                OverheadSource::Configured(_) => "(from allocation settings)",
            };
            (source.per_unit(), note)
        }
    };

    let result = compose_hpp(material, args.labor, overhead, &args.pricing(settings))?;
    print!("{}", format_hpp(&result, note, symbol, settings.rounding));

    Ok(())
}
