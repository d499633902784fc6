//! CSV export
//!
//! Cost records and group totals in a spreadsheet-friendly layout.

use std::io::Write;

use crate::engine::aggregate;
use crate::error::{CostError, CostResult};
use crate::models::CostGroup;
use crate::storage::Storage;

const COST_HEADER: &[&str] = &[
    "ID",
    "Name",
    "Monthly Amount",
    "Kind",
    "Status",
    "Group",
    "Description",
    "Created At",
];

fn export_err(e: impl std::fmt::Display) -> CostError {
    CostError::Export(e.to_string())
}

/// Export every cost record, newest first
pub fn export_costs_csv<W: Write>(storage: &Storage, writer: W) -> CostResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(COST_HEADER).map_err(export_err)?;

    for cost in storage.costs.get_all()? {
        out.write_record([
            cost.id.to_string(),
            cost.name.clone(),
            cost.monthly_amount.units().to_string(),
            cost.kind.to_string(),
            cost.status.to_string(),
            cost.group.to_string(),
            cost.description.clone().unwrap_or_default(),
            cost.created_at.to_rfc3339(),
        ])
        .map_err(export_err)?;
    }

    out.flush().map_err(export_err)?;
    Ok(())
}

/// Export active totals per cost group
pub fn export_summary_csv<W: Write>(storage: &Storage, writer: W) -> CostResult<()> {
    let costs = storage.costs.get_all()?;
    let summary = aggregate(&costs);

    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Group", "Active Costs", "Monthly Total"])
        .map_err(export_err)?;

    for group in CostGroup::all() {
        out.write_record([
            group.to_string(),
            summary.active_count_by_group(*group).to_string(),
            summary.total_by_group(*group).units().to_string(),
        ])
        .map_err(export_err)?;
    }
    out.write_record([
        "Total".to_string(),
        summary.active_count.to_string(),
        summary.total_active.units().to_string(),
    ])
    .map_err(export_err)?;

    out.flush().map_err(export_err)?;
    Ok(())
}
