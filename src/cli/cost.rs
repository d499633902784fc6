//! Cost CLI commands
//!
//! Create, browse, edit and remove cost records, plus quick-setup templates.

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::cost::{format_cost_details, format_cost_list, format_summary, format_template};
use crate::error::{CostError, CostResult};
use crate::models::{CostGroup, CostId, CostKind, CostStatus, Money};
use crate::services::{
    apply_template, classify, BulkCostUpdate, BusinessType, Confidence, CostFilter, CostService,
    CostUpdate, NewCost,
};
use crate::storage::Storage;

/// Cost kind argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Fixed,
    Variable,
}

impl From<KindArg> for CostKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Fixed => CostKind::Fixed,
            KindArg::Variable => CostKind::Variable,
        }
    }
}

/// Cost group argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GroupArg {
    /// Production overhead, part of HPP
    #[value(name = "cogs", alias = "cost-of-goods")]
    CostOfGoods,
    /// Marketing, admin and other running costs
    #[value(name = "operational", alias = "ops")]
    Operational,
}

impl From<GroupArg> for CostGroup {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::CostOfGoods => CostGroup::CostOfGoods,
            GroupArg::Operational => CostGroup::Operational,
        }
    }
}

/// Cost status argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for CostStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => CostStatus::Active,
            StatusArg::Inactive => CostStatus::Inactive,
        }
    }
}

/// Cost subcommands
#[derive(Subcommand)]
pub enum CostCommands {
    /// List costs, newest first
    List {
        /// Only this kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// Only this group
        #[arg(short, long, value_enum)]
        group: Option<GroupArg>,
        /// Only this status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,
        /// Case-insensitive text in name or notes
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a new monthly cost
    Add {
        /// Cost name
        name: String,
        /// Monthly amount (e.g. "1500000" or "1.500.000")
        amount: String,
        /// Fixed or variable
        #[arg(short, long, value_enum, default_value = "fixed")]
        kind: KindArg,
        /// Cost group; suggested from the name when omitted
        #[arg(short, long, value_enum)]
        group: Option<GroupArg>,
        /// Create the cost as inactive
        #[arg(long)]
        inactive: bool,
        /// Optional notes
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Show cost details
    Show {
        /// Cost name or ID
        cost: String,
    },
    /// Edit a cost
    Edit {
        /// Cost name or ID
        cost: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New monthly amount
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        #[arg(short, long, value_enum)]
        group: Option<GroupArg>,
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,
        /// New notes; an empty string clears them
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a cost
    Delete {
        /// Cost name or ID
        cost: String,
    },
    /// Change kind, group or status of several costs at once
    BulkEdit {
        /// Cost names or IDs
        #[arg(required = true)]
        costs: Vec<String>,
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        #[arg(short, long, value_enum)]
        group: Option<GroupArg>,
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Delete several costs at once
    BulkDelete {
        /// Cost names or IDs
        #[arg(required = true)]
        costs: Vec<String>,
    },
    /// Monthly totals by kind and group
    Summary,
    /// List the quick-setup templates
    Templates,
    /// Create the costs of a quick-setup template
    ApplyTemplate {
        /// bakery, restaurant, online-shop or general
        business: String,
    },
}

/// Parse a monthly amount argument
pub fn parse_amount(input: &str) -> CostResult<Money> {
    Money::parse(input).map_err(|e| {
        CostError::Validation(format!(
            "Invalid amount '{}'. Use a form like 1500000, 1.500.000 or 1500000.00. Error: {}",
            input, e
        ))
    })
}

fn resolve_ids(service: &CostService<'_>, identifiers: &[String]) -> CostResult<Vec<CostId>> {
    identifiers
        .iter()
        .map(|i| service.require(i).map(|c| c.id))
        .collect()
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("Warning: {}", warning);
    }
}

/// Handle a cost command
pub fn handle_cost_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CostCommands,
) -> CostResult<()> {
    let service = CostService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CostCommands::List {
            kind,
            group,
            status,
            search,
        } => {
            let filter = CostFilter {
                kind: kind.map(Into::into),
                status: status.map(Into::into),
                group: group.map(Into::into),
                search,
            };
            print!("{}", format_cost_list(&service.list(&filter)?, symbol));
        }

        CostCommands::Add {
            name,
            amount,
            kind,
            group,
            inactive,
            description,
        } => {
            let group = match group {
                Some(g) => g.into(),
                None => {
                    let suggestion = classify(&name);
                    match suggestion.suggested_group {
                        Some(g) if suggestion.confidence >= Confidence::Medium => {
                            println!(
                                "Group not given; using {} ({} confidence)",
                                g, suggestion.confidence
                            );
                            g
                        }
                        _ => {
                            return Err(CostError::Validation(format!(
                                "Cannot tell which group '{}' belongs to. Pass --group cogs or --group operational",
                                name
                            )))
                        }
                    }
                }
            };

            let mut input = NewCost::new(name, parse_amount(&amount)?, kind.into(), group);
            if inactive {
                input.status = CostStatus::Inactive;
            }
            input.description = description;

            let cost = service.create(input)?;
            println!("Created cost: {}", cost.name);
            println!("  Monthly: {}", cost.monthly_amount.format_with_symbol(symbol));
            println!("  Group:   {}", cost.group);
            println!("  ID:      {}", cost.id);
            print_warnings(&cost.warnings());
        }

        CostCommands::Show { cost } => {
            let found = service.require(&cost)?;
            print!("{}", format_cost_details(&found, symbol));
        }

        CostCommands::Edit {
            cost,
            name,
            amount,
            kind,
            group,
            status,
            description,
        } => {
            let found = service.require(&cost)?;
            let changes = CostUpdate {
                name,
                monthly_amount: amount.as_deref().map(parse_amount).transpose()?,
                kind: kind.map(Into::into),
                status: status.map(Into::into),
                group: group.map(Into::into),
                description,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --name, --amount, --kind, --group, --status or --description.");
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated cost: {}", updated.name);
            print_warnings(&updated.warnings());
        }

        CostCommands::Delete { cost } => {
            let found = service.require(&cost)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted cost: {}", deleted.name);
        }

        CostCommands::BulkEdit {
            costs,
            kind,
            group,
            status,
        } => {
            let changes = BulkCostUpdate {
                kind: kind.map(Into::into),
                status: status.map(Into::into),
                group: group.map(Into::into),
            };
            let ids = resolve_ids(&service, &costs)?;
            let changed = service.bulk_update(&ids, changes)?;
            println!("Updated {} of {} cost(s)", changed, ids.len());
        }

        CostCommands::BulkDelete { costs } => {
            let ids = resolve_ids(&service, &costs)?;
            let deleted = service.bulk_delete(&ids)?;
            println!("Deleted {} cost(s)", deleted);
        }

        CostCommands::Summary => {
            print!("{}", format_summary(&service.summary()?, symbol));
        }

        CostCommands::Templates => {
            for business in BusinessType::all() {
                println!("{}", format_template(*business, symbol));
            }
            println!("Run 'overhead cost apply-template <business>' to add one.");
        }

        CostCommands::ApplyTemplate { business } => {
            let business: BusinessType = business.parse()?;
            let outcome = apply_template(&service, business)?;

            println!(
                "Applied '{}' template: {} cost(s) created",
                business,
                outcome.created.len()
            );
            for cost in &outcome.created {
                println!(
                    "  + {} ({})",
                    cost.name,
                    cost.monthly_amount.format_with_symbol(symbol)
                );
            }
            for name in &outcome.skipped {
                println!("  = {} (already exists, skipped)", name);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.500.000").unwrap().units(), 1_500_000);
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(CostGroup::from(GroupArg::CostOfGoods), CostGroup::CostOfGoods);
        assert_eq!(CostKind::from(KindArg::Variable), CostKind::Variable);
        assert_eq!(CostStatus::from(StatusArg::Inactive), CostStatus::Inactive);
    }
}
