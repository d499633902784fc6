//! Cost display formatting
//!
//! Table, detail and summary views of cost records for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::engine::CostSummary;
use crate::models::{CostGroup, CostRecord, Money};
use crate::services::BusinessType;

#[derive(Tabled)]
struct CostRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl CostRow {
    fn new(cost: &CostRecord, symbol: &str) -> Self {
        Self {
            id: cost.id.to_string(),
            name: cost.name.clone(),
            monthly: cost.monthly_amount.format_with_symbol(symbol),
            kind: cost.kind.to_string(),
            group: cost.group.to_string(),
            status: cost.status.to_string(),
        }
    }
}

/// Format a list of costs as a table
pub fn format_cost_list(costs: &[CostRecord], symbol: &str) -> String {
    if costs.is_empty() {
        return "No costs found.".to_string();
    }

    let rows: Vec<CostRow> = costs.iter().map(|c| CostRow::new(c, symbol)).collect();
    let mut output = Table::new(rows).with(Style::rounded()).to_string();

    let total: Money = costs
        .iter()
        .filter(|c| c.is_active())
        .map(|c| c.monthly_amount)
        .sum();
    output.push_str(&format!(
        "\n{} cost(s), active total {} per month\n",
        costs.len(),
        total.format_with_symbol(symbol)
    ));
    output
}

/// Format a single cost's details
pub fn format_cost_details(cost: &CostRecord, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Cost: {}\n", cost.name));
    output.push_str(&format!("  ID:       {}\n", cost.id));
    output.push_str(&format!(
        "  Monthly:  {}\n",
        cost.monthly_amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Kind:     {}\n", cost.kind));
    output.push_str(&format!("  Group:    {}\n", cost.group.label()));
    output.push_str(&format!("  Status:   {}\n", cost.status));

    if let Some(description) = &cost.description {
        output.push_str(&format!("  Notes:    {}\n", description));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        cost.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  Updated:  {}\n",
        cost.updated_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

/// Format monthly totals by kind and group
pub fn format_summary(summary: &CostSummary, symbol: &str) -> String {
    if summary.is_empty() {
        return "No costs recorded yet.".to_string();
    }

    let money = |m: Money| m.format_with_symbol(symbol);
    let mut output = String::new();

    output.push_str("Monthly Cost Summary\n");
    output.push_str(&format!(
        "  Active costs:    {} ({} inactive)\n",
        summary.active_count, summary.inactive_count
    ));
    output.push_str(&format!("  Total active:    {}\n", money(summary.total_active)));
    output.push_str(&format!("    Fixed:         {}\n", money(summary.total_fixed)));
    output.push_str(&format!("    Variable:      {}\n", money(summary.total_variable)));
    output.push('\n');

    for group in CostGroup::all() {
        output.push_str(&format!(
            "  {}: {} across {} cost(s)\n",
            group.label(),
            money(summary.total_by_group(*group)),
            summary.active_count_by_group(*group)
        ));
    }

    output
}

/// Format one quick-setup template with its cost lines
pub fn format_template(business: BusinessType, symbol: &str) -> String {
    let mut output = format!(
        "{} - {} (about {} per month)\n",
        business.key(),
        business.description(),
        business.estimated_monthly_total().format_with_symbol(symbol)
    );

    for template in business.templates() {
        output.push_str(&format!(
            "  {:<28} {:>14}  {:<8}  {}\n",
            template.name,
            Money::from_units(template.monthly_amount).format_with_symbol(symbol),
            template.kind.to_string(),
            template.group
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate;
    use crate::models::{CostKind, CostStatus};

    fn sample() -> Vec<CostRecord> {
        let mut marketing = CostRecord::new(
            "Marketing",
            Money::from_units(4_000_000),
            CostKind::Variable,
            CostGroup::Operational,
        );
        marketing.set_status(CostStatus::Inactive);
        vec![
            CostRecord::new(
                "Gas Oven",
                Money::from_units(690_000),
                CostKind::Fixed,
                CostGroup::CostOfGoods,
            ),
            marketing,
        ]
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_cost_list(&[], "Rp"), "No costs found.");
    }

    #[test]
    fn test_cost_list_table() {
        let output = format_cost_list(&sample(), "Rp");
        assert!(output.contains("Gas Oven"));
        assert!(output.contains("Rp 690.000"));
        assert!(output.contains("Inactive"));
        assert!(output.contains("2 cost(s), active total Rp 690.000 per month"));
    }

    #[test]
    fn test_cost_details() {
        let mut cost = sample().remove(0);
        cost.description = Some("Tabung 12 kg".into());

        let output = format_cost_details(&cost, "IDR");
        assert!(output.starts_with("Cost: Gas Oven"));
        assert!(output.contains("IDR 690.000"));
        assert!(output.contains("Production overhead (in HPP)"));
        assert!(output.contains("Tabung 12 kg"));
    }

    #[test]
    fn test_summary() {
        let costs = sample();
        let output = format_summary(&aggregate(&costs), "Rp");
        assert!(output.contains("Active costs:    1 (1 inactive)"));
        assert!(output.contains("Operational (outside HPP): Rp 0 across 0 cost(s)"));
    }

    #[test]
    fn test_template_listing() {
        let output = format_template(BusinessType::Bakery, "Rp");
        assert!(output.starts_with("bakery - Bakery and pastry (about Rp 4.200.000 per month)"));
        assert!(output.contains("Sewa Dapur"));
    }
}
