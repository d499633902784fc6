//! JSON export
//!
//! Writes the complete data set with a schema version so later releases can
//! tell which layout they are reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::engine::{aggregate, CostSummary};
use crate::error::{CostError, CostResult};
use crate::models::{AllocationConfig, CostRecord, OverheadSnapshot};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All cost records, newest first
    pub costs: Vec<CostRecord>,

    /// Allocation settings, if configured
    pub config: Option<AllocationConfig>,

    /// Last saved dual-mode snapshot
    pub snapshot: Option<OverheadSnapshot>,

    /// Totals over `costs` at export time
    pub summary: CostSummary,
}

impl FullExport {
    /// Collect everything from storage
    pub fn from_storage(storage: &Storage) -> CostResult<Self> {
        let costs = storage.costs.get_all()?;
        let summary = aggregate(&costs);

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            costs,
            config: storage.allocation.get_config()?,
            snapshot: storage.allocation.get_snapshot()?,
            summary,
        })
    }

    /// Check the export is internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut seen = HashSet::new();
        for cost in &self.costs {
            if !seen.insert(cost.id) {
                return Err(format!("Duplicate cost ID {}", cost.id));
            }
        }

        if aggregate(&self.costs) != self.summary {
            return Err("Summary does not match the exported costs".into());
        }

        Ok(())
    }
}

/// Export everything as JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> CostResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| CostError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OverheadPaths;
    use crate::models::{CostGroup, CostKind, Money};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = OverheadPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &Storage) {
        storage
            .costs
            .upsert(CostRecord::new(
                "Gas Oven",
                Money::from_units(690_000),
                CostKind::Fixed,
                CostGroup::CostOfGoods,
            ))
            .unwrap();
        storage
            .allocation
            .set_config(Some(AllocationConfig::per_unit(3000.0)))
            .unwrap();
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.costs.len(), 1);
        assert_eq!(export.config, Some(AllocationConfig::per_unit(3000.0)));
        assert!(export.snapshot.is_none());
        assert_eq!(export.summary.total_cost_of_goods.units(), 690_000);
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_stale_summary() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut export = FullExport::from_storage(&storage).unwrap();
        export.costs.clear();
        assert!(export.validate().is_err());

        let mut export = FullExport::from_storage(&storage).unwrap();
        export.schema_version = "0.1.0".into();
        assert!(export.validate().unwrap_err().contains("Schema version"));
    }

    #[test]
    fn test_json_output_parses_back() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.costs[0].name, "Gas Oven");
        assert!(parsed.validate().is_ok());
    }
}
