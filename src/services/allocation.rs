//! Allocation service
//!
//! Stores allocation settings and overhead snapshots, and runs the engine
//! against the persisted cost list.

use chrono::Utc;

use crate::audit::EntityType;
use crate::engine::{
    aggregate, allocate_configured, allocate_dual_mode, DualModeResult, OverheadResult,
};
use crate::error::{CostError, CostResult};
use crate::models::{AllocationConfig, CostGroup, Money, OverheadSnapshot};
use crate::storage::Storage;

/// Audit ID of the single allocation settings record
const SETTINGS_ENTITY_ID: &str = "allocation";
/// Audit ID of the single overhead snapshot
const SNAPSHOT_ENTITY_ID: &str = "snapshot";

/// Where an overhead figure for HPP came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverheadSource {
    /// Last saved dual-mode snapshot
    Snapshot(Money),
    /// Live allocation with the stored settings
    Configured(f64),
}

impl OverheadSource {
    pub fn per_unit(&self) -> f64 {
        match self {
            Self::Snapshot(m) => m.as_f64(),
            Self::Configured(v) => *v,
        }
    }
}

/// Service for allocation settings and overhead calculations
pub struct AllocationService<'a> {
    storage: &'a Storage,
}

impl<'a> AllocationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn get_config(&self) -> CostResult<Option<AllocationConfig>> {
        self.storage.allocation.get_config()
    }

    /// Validate and store allocation settings
    ///
    /// Returns the stored config together with any non-blocking warnings.
    pub fn set_config(
        &self,
        config: AllocationConfig,
    ) -> CostResult<(AllocationConfig, Vec<String>)> {
        config
            .validate()
            .map_err(|e| CostError::Validation(e.to_string()))?;

        let previous = self.storage.allocation.set_config(Some(config))?;
        self.storage.allocation.save()?;

        match previous {
            Some(before) if before == config => {}
            Some(before) => self.storage.log_update(
                EntityType::AllocationSettings,
                SETTINGS_ENTITY_ID,
                None,
                &before,
                &config,
            )?,
            None => self.storage.log_create(
                EntityType::AllocationSettings,
                SETTINGS_ENTITY_ID,
                None,
                &config,
            )?,
        }

        tracing::info!(%config, "allocation settings saved");
        Ok((config, config.warnings()))
    }

    /// Remove the allocation settings. Returns false if none were stored.
    pub fn clear_config(&self) -> CostResult<bool> {
        let Some(previous) = self.storage.allocation.set_config(None)? else {
            return Ok(false);
        };
        self.storage.allocation.save()?;

        self.storage.log_delete(
            EntityType::AllocationSettings,
            SETTINGS_ENTITY_ID,
            None,
            &previous,
        )?;
        Ok(true)
    }

    /// Allocate active costs with the stored settings
    ///
    /// `group` restricts the pool to one cost group. Fails with
    /// `ConfigurationMissing` when no settings are stored.
    pub fn calculate(
        &self,
        group: Option<CostGroup>,
        material_cost_per_unit: Option<f64>,
    ) -> CostResult<OverheadResult> {
        let summary = aggregate(&self.storage.costs.get_all()?);
        let config = self.get_config()?;
        allocate_configured(summary.pool(group), config.as_ref(), material_cost_per_unit)
    }

    /// Per-unit figures for both groups over one monthly output target
    pub fn calculate_dual_mode(&self, target_output: f64) -> CostResult<DualModeResult> {
        AllocationConfig::per_unit(target_output)
            .validate()
            .map_err(|e| CostError::Validation(e.to_string()))?;

        let summary = aggregate(&self.storage.costs.get_all()?);
        allocate_dual_mode(&summary, target_output)
    }

    /// Persist a dual-mode result, rounded, for later HPP calculations
    pub fn save_snapshot(&self, result: &DualModeResult) -> CostResult<OverheadSnapshot> {
        let snapshot = OverheadSnapshot {
            target_output: result.target_output,
            cost_of_goods_per_unit: result.cost_of_goods.rounded(),
            operational_per_unit: result.operational.rounded(),
            calculated_at: Utc::now(),
        };

        let previous = self.storage.allocation.set_snapshot(Some(snapshot.clone()))?;
        self.storage.allocation.save()?;

        match previous {
            Some(before) => self.storage.log_update(
                EntityType::OverheadSnapshot,
                SNAPSHOT_ENTITY_ID,
                None,
                &before,
                &snapshot,
            )?,
            None => self.storage.log_create(
                EntityType::OverheadSnapshot,
                SNAPSHOT_ENTITY_ID,
                None,
                &snapshot,
            )?,
        }

        Ok(snapshot)
    }

    pub fn snapshot(&self) -> CostResult<Option<OverheadSnapshot>> {
        self.storage.allocation.get_snapshot()
    }

    /// Combined overhead per unit from the saved snapshot, if any
    pub fn combined_overhead_per_unit(&self) -> CostResult<Option<Money>> {
        Ok(self.snapshot()?.map(|s| s.combined_per_unit()))
    }

    /// Overhead to fold into HPP when the caller gave none
    ///
    /// Prefers the saved snapshot, then a live allocation over all active
    /// costs with the stored settings.
    pub fn overhead_for_hpp(&self, material_cost_per_unit: f64) -> CostResult<OverheadSource> {
        if let Some(combined) = self.combined_overhead_per_unit()? {
            return Ok(OverheadSource::Snapshot(combined));
        }

        let result = self.calculate(None, Some(material_cost_per_unit))?;
        Ok(OverheadSource::Configured(result.overhead_per_unit))
    }
}
