//! Report formatting for allocation, HPP and audit output

use crate::audit::AuditEntry;
use crate::engine::{DualModeResult, HppResult, MaterialCost, OverheadResult, PriceSource, RecomputeOutcome};
use crate::models::{AllocationMethod, Money, RoundingRule};
use crate::services::Classification;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{:.0}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.2}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a single overhead allocation
pub fn format_overhead(result: &OverheadResult, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Overhead allocation ({})\n", result.config));
    output.push_str(&format!(
        "  Cost pool:          {} per month\n",
        result.total_cost.format_with_symbol(symbol)
    ));

    match result.config.method {
        AllocationMethod::PerUnit => output.push_str(&format!(
            "  Monthly output:     {} units\n",
            result.config.basis_value
        )),
        AllocationMethod::PercentOfMaterial => output.push_str(&format!(
            "  Material per unit:  {}\n",
            Money::round_from(result.material_cost_per_unit.unwrap_or(0.0))
                .format_with_symbol(symbol)
        )),
    }

    output.push_str(&format!(
        "  Overhead per unit:  {}\n",
        result.rounded().format_with_symbol(symbol)
    ));
    output
}

/// Format per-unit figures for both cost groups
pub fn format_dual_mode(result: &DualModeResult, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Per-unit costs at {} units per month\n",
        result.target_output
    ));
    output.push_str(&separator(48));
    output.push('\n');
    output.push_str(&format!(
        "  Production overhead:  {:>16}  (pool {})\n",
        result.cost_of_goods.rounded().format_with_symbol(symbol),
        result.cost_of_goods.total_cost.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Operational cost:     {:>16}  (pool {})\n",
        result.operational.rounded().format_with_symbol(symbol),
        result.operational.total_cost.format_with_symbol(symbol)
    ));
    output.push_str(&separator(48));
    output.push('\n');
    output.push_str(&format!(
        "  Combined:             {:>16}\n",
        result.combined_rounded().format_with_symbol(symbol)
    ));
    output
}

/// Format a recipe's material cost breakdown
pub fn format_material(material: &MaterialCost, symbol: &str) -> String {
    let money = |v: f64| Money::round_from(v).format_with_symbol(symbol);
    let mut output = String::from("Material cost\n");

    for line in &material.ingredients {
        let source = match line.source {
            PriceSource::Wac => " (avg)",
            PriceSource::Listed => "",
        };
        output.push_str(&format!(
            "  {:<24} {:>8} x {}{} = {}\n",
            line.name,
            line.quantity,
            money(line.unit_price),
            source,
            money(line.line_total)
        ));
    }

    output.push_str(&format!(
        "  Batch total {} over {} pieces: {} per piece\n",
        money(material.batch_total),
        material.pieces,
        money(material.per_unit)
    ));
    output
}

/// Format an HPP breakdown and selling price
///
/// `overhead_note` says where the overhead figure came from.
pub fn format_hpp(
    result: &HppResult,
    overhead_note: &str,
    symbol: &str,
    rounding: RoundingRule,
) -> String {
    let rounded = result.rounded_with(rounding);
    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str("HPP per unit\n");
    output.push_str(&format!("  Material:       {:>16}\n", money(rounded.material_per_unit)));
    output.push_str(&format!("  Labor:          {:>16}\n", money(rounded.labor_per_unit)));
    output.push_str(&format!(
        "  Overhead:       {:>16}  {}\n",
        money(rounded.overhead_per_unit),
        overhead_note
    ));
    output.push_str(&format!("  {}\n", separator(32)));
    output.push_str(&format!("  HPP:            {:>16}\n", money(rounded.hpp_per_unit)));
    output.push('\n');
    output.push_str(&format!("Selling price ({})\n", result.pricing));
    output.push_str(&format!("  Price:          {:>16}\n", money(rounded.selling_price)));
    output.push_str(&format!(
        "  Profit:         {:>16}  ({} of price)\n",
        money(rounded.profit_per_unit),
        format_percentage(result.effective_margin())
    ));
    output
}

/// Format a group suggestion for a cost name
pub fn format_classification(name: &str, classification: &Classification) -> String {
    let mut output = match classification.suggested_group {
        Some(group) => format!(
            "'{}' looks like: {} ({} confidence)\n",
            name,
            group.label(),
            classification.confidence
        ),
        None => format!("No confident suggestion for '{}'\n", name),
    };

    if !classification.matched_keywords.is_empty() {
        output.push_str(&format!(
            "  Matched keywords: {}\n",
            classification.matched_keywords.join(", ")
        ));
    }
    output
}

/// Format audit entries, one block per entry
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries.".to_string();
    }

    entries
        .iter()
        .map(|e| e.format_human_readable())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one watch-mode recomputation
pub fn format_recompute(outcome: &RecomputeOutcome, symbol: &str, rounding: RoundingRule) -> String {
    let mut output = format!(
        "Active costs: {} ({} records), overhead per unit {}\n",
        outcome.summary.total_active.format_with_symbol(symbol),
        outcome.summary.active_count,
        outcome.overhead.rounded().format_with_symbol(symbol)
    );

    if let Some(hpp) = &outcome.hpp {
        let rounded = hpp.rounded_with(rounding);
        output.push_str(&format!(
            "HPP {} -> price {}\n",
            rounded.hpp_per_unit.format_with_symbol(symbol),
            rounded.selling_price.format_with_symbol(symbol)
        ));
    }
    output
}
