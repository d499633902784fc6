//! Watch mode
//!
//! Polls the data files and recomputes totals, overhead and optionally HPP
//! once edits have settled for the configured debounce window.

use std::thread;
use std::time::{Duration, Instant, SystemTime};

use chrono::Local;
use clap::Args;

use super::cost::GroupArg;
use crate::config::settings::Settings;
use crate::display::report::format_recompute;
use crate::engine::{recompute, Debouncer, HppInputs, RecomputeInputs};
use crate::error::CostResult;
use crate::models::PricingRule;
use crate::storage::file_io::modified_time;
use crate::storage::Storage;

/// Arguments for `overhead watch`
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Restrict the overhead pool to one cost group
    #[arg(short, long, value_enum)]
    pub group: Option<GroupArg>,

    /// Material cost per unit; enables the HPP line
    #[arg(short, long)]
    pub material: Option<f64>,

    /// Labor cost per unit for the HPP line
    #[arg(short, long, default_value = "0")]
    pub labor: f64,

    /// Markup percentage for the HPP line
    #[arg(long, conflicts_with = "margin")]
    pub markup: Option<f64>,

    /// Margin percentage for the HPP line
    #[arg(long)]
    pub margin: Option<f64>,

    /// How often to check the data files, in milliseconds
    #[arg(long, default_value = "100")]
    pub poll_ms: u64,

    /// Print the current figures and exit
    #[arg(long)]
    pub once: bool,

    /// Stop after this many recomputations
    #[arg(long)]
    pub max_updates: Option<usize>,
}

type Stamps = Vec<Option<SystemTime>>;

fn file_stamps(storage: &Storage) -> Stamps {
    storage
        .paths()
        .watched_files()
        .iter()
        .map(modified_time)
        .collect()
}

fn build_inputs(
    storage: &Storage,
    settings: &Settings,
    args: &WatchArgs,
) -> CostResult<RecomputeInputs> {
    let pricing = match (args.markup, args.margin) {
        (Some(p), _) => PricingRule::markup(p),
        (None, Some(p)) => PricingRule::margin(p),
        (None, None) => settings.default_pricing,
    };

    Ok(RecomputeInputs {
        records: storage.costs.get_all()?,
        config: storage.allocation.get_config()?,
        group: args.group.map(Into::into),
        hpp: args.material.map(|material| HppInputs {
            material_per_unit: material,
            labor_per_unit: args.labor,
            pricing,
        }),
    })
}

fn print_recompute(storage: &Storage, settings: &Settings, args: &WatchArgs) -> CostResult<()> {
    let inputs = build_inputs(storage, settings, args)?;
    let stamp = Local::now().format("%H:%M:%S");

    match recompute(&inputs) {
        Ok(outcome) => print!(
            "[{}] {}",
            stamp,
            format_recompute(&outcome, &settings.currency_symbol, settings.rounding)
        ),
        Err(e) if e.is_configuration_missing() || e.is_validation() => {
            println!("[{}] Cannot recompute: {}", stamp, e)
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Handle the watch command
pub fn handle_watch_command(
    storage: &mut Storage,
    settings: &Settings,
    args: WatchArgs,
) -> CostResult<()> {
    print_recompute(storage, settings, &args)?;
    if args.once {
        return Ok(());
    }

    let mut debouncer = Debouncer::new(settings.recompute_debounce());
    println!(
        "Watching {} (debounce {} ms)",
        storage.paths().data_dir().display(),
        debouncer.delay().as_millis()
    );

    let poll = Duration::from_millis(args.poll_ms.max(10));
    let mut last_seen = file_stamps(storage);
    let mut updates = 0usize;

    loop {
        thread::sleep(poll);
        let now = Instant::now();

        let current = file_stamps(storage);
        if current != last_seen {
            tracing::debug!("data files changed");
            last_seen = current.clone();
            debouncer.push(current, now);
        }

        if debouncer.poll(now).is_none() {
            continue;
        }

        if let Err(e) = storage.load_all() {
            tracing::warn!(error = %e, "reload failed, keeping previous data");
            println!("Reload failed: {}", e);
            continue;
        }
        print_recompute(storage, settings, &args)?;

        updates += 1;
        if args.max_updates.map_or(false, |max| updates >= max) {
            return Ok(());
        }
    }
}
