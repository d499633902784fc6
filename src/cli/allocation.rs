//! Allocation CLI commands
//!
//! Configure how overhead is spread over output and run the allocation.

use clap::{Subcommand, ValueEnum};

use super::cost::GroupArg;
use crate::config::settings::Settings;
use crate::display::report::{format_dual_mode, format_overhead};
use crate::error::CostResult;
use crate::models::AllocationConfig;
use crate::services::AllocationService;
use crate::storage::Storage;

/// Allocation method argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    /// Divide the monthly pool by estimated monthly units
    PerUnit,
    /// Charge a percentage of each unit's material cost
    #[value(alias = "percent")]
    PercentOfMaterial,
}

/// Allocation subcommands
#[derive(Subcommand)]
pub enum AllocationCommands {
    /// Show allocation settings and the saved snapshot
    Show,
    /// Store allocation settings
    Set {
        #[arg(value_enum)]
        method: MethodArg,
        /// Monthly units (per-unit) or percentage (percent-of-material)
        value: f64,
    },
    /// Remove allocation settings
    Clear,
    /// Allocate active costs with the stored settings
    Calc {
        /// Restrict the pool to one cost group
        #[arg(short, long, value_enum)]
        group: Option<GroupArg>,
        /// Material cost per unit, for percent-of-material
        #[arg(short, long)]
        material: Option<f64>,
    },
    /// Per-unit production overhead and operational cost for one output target
    Dual {
        /// Estimated monthly output in units
        target: f64,
        /// Save the result for later HPP calculations
        #[arg(long)]
        save: bool,
    },
}

/// Handle an allocation command
pub fn handle_allocation_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AllocationCommands,
) -> CostResult<()> {
    let service = AllocationService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AllocationCommands::Show => {
            match service.get_config()? {
                Some(config) => println!("Allocation: {}", config),
                None => println!("Allocation: not configured"),
            }

            match service.snapshot()? {
                Some(snapshot) => {
                    println!(
                        "Saved snapshot ({} units/month, {}):",
                        snapshot.target_output,
                        snapshot.calculated_at.format("%Y-%m-%d %H:%M")
                    );
                    println!(
                        "  Production overhead: {}",
                        snapshot.cost_of_goods_per_unit.format_with_symbol(symbol)
                    );
                    println!(
                        "  Operational cost:    {}",
                        snapshot.operational_per_unit.format_with_symbol(symbol)
                    );
                    println!(
                        "  Combined per unit:   {}",
                        snapshot.combined_per_unit().format_with_symbol(symbol)
                    );
                }
                None => println!("Saved snapshot: none"),
            }
        }

        AllocationCommands::Set { method, value } => {
            let config = match method {
                MethodArg::PerUnit => AllocationConfig::per_unit(value),
                MethodArg::PercentOfMaterial => AllocationConfig::percent_of_material(value),
            };
            let (config, warnings) = service.set_config(config)?;
            println!("Allocation set: {}", config);
            for warning in warnings {
                println!("Warning: {}", warning);
            }
        }

        AllocationCommands::Clear => {
            if service.clear_config()? {
                println!("Allocation settings removed");
            } else {
                println!("No allocation settings to remove");
            }
        }

        AllocationCommands::Calc { group, material } => {
            let result = service.calculate(group.map(Into::into), material)?;
            print!("{}", format_overhead(&result, symbol));
        }

        AllocationCommands::Dual { target, save } => {
            let result = service.calculate_dual_mode(target)?;
            print!("{}", format_dual_mode(&result, symbol));

            if save {
                let snapshot = service.save_snapshot(&result)?;
                println!(
                    "Saved: {} per unit will be used as overhead by 'overhead hpp'",
                    snapshot.combined_per_unit().format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}
