use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use overhead_cli::audit::EntityType;
use overhead_cli::cli::{
    handle_allocation_command, handle_cost_command, handle_export_command, handle_hpp_command,
    handle_watch_command, AllocationCommands, CostCommands, ExportArgs, HppArgs, WatchArgs,
};
use overhead_cli::config::{paths::OverheadPaths, settings::Settings};
use overhead_cli::display::{format_audit_entries, format_classification};
use overhead_cli::services::{classify, CostService};
use overhead_cli::storage::{init::needs_initialization, initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "overhead",
    version,
    about = "Operational cost tracking and HPP calculator for small food businesses",
    long_about = "overhead-cli tracks the recurring monthly costs of a bakery or food \
                  business, spreads them over output as overhead per unit, and turns \
                  material, labor and overhead into cost of goods (HPP) and a selling price."
)]
struct Cli {
    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Cost record commands
    #[command(subcommand)]
    Cost(CostCommands),

    /// Overhead allocation commands
    #[command(subcommand, alias = "allocation")]
    Alloc(AllocationCommands),

    /// Compose HPP per unit and a selling price
    Hpp(HppArgs),

    /// Suggest a cost group for a cost name
    Classify {
        /// Cost name
        name: String,
    },

    /// Export data to CSV, JSON or YAML
    Export(ExportArgs),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only changes to this cost (name or ID)
        #[arg(short, long)]
        cost: Option<String>,
    },

    /// Recompute totals and overhead whenever the data files change
    Watch(WatchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    overhead_cli::logging::init(cli.verbose);

    let paths = OverheadPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            let fresh = needs_initialization(&paths) || !paths.is_initialized();
            initialize_storage(&paths)?;
            settings.save(&paths)?;

            if fresh {
                println!("Initialized overhead-cli at: {}", paths.base_dir().display());
                println!();
                println!("Next steps:");
                println!("  overhead cost templates            see starter cost lists");
                println!("  overhead cost add NAME AMOUNT      add a monthly cost");
                println!("  overhead alloc set per-unit 3000   set monthly output");
            } else {
                println!("Already initialized at: {}", paths.base_dir().display());
            }
        }
        Some(Commands::Config) => {
            println!("overhead-cli Configuration");
            println!("==========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Rounding:          nearest {}", settings.rounding.step());
            println!("  Recompute delay:   {} ms", settings.recompute_debounce_ms);
            println!("  Default pricing:   {}", settings.default_pricing);
        }
        Some(Commands::Cost(cmd)) => handle_cost_command(&storage, &settings, cmd)?,
        Some(Commands::Alloc(cmd)) => handle_allocation_command(&storage, &settings, cmd)?,
        Some(Commands::Hpp(args)) => handle_hpp_command(&storage, &settings, args)?,
        Some(Commands::Classify { name }) => {
            print!("{}", format_classification(&name, &classify(&name)));
        }
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Audit { limit, cost }) => {
            let mut entries = match cost {
                Some(identifier) => {
                    let entity_id = match CostService::new(&storage).find(&identifier)? {
                        Some(found) => found.id.to_string(),
                        None => identifier,
                    };
                    storage
                        .audit()
                        .read_for(Some(EntityType::Cost), Some(&entity_id))?
                }
                None => storage.audit().read_all()?,
            };
            let start = entries.len().saturating_sub(limit);
            println!("{}", format_audit_entries(&entries.split_off(start)));
        }
        Some(Commands::Watch(args)) => handle_watch_command(&mut storage, &settings, args)?,
        None => {
            println!("overhead-cli - operational costs, overhead and HPP");
            println!();
            println!("Run 'overhead --help' for usage information.");
        }
    }

    Ok(())
}
