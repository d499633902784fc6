//! Cost service
//!
//! Business logic for cost records: validation, duplicate-name checks,
//! filtering, bulk edits and the audit trail.

use chrono::Utc;

use crate::audit::{AuditEntry, EntityType};
use crate::engine::{aggregate, CostSummary};
use crate::error::{CostError, CostResult};
use crate::models::{CostGroup, CostId, CostKind, CostRecord, CostStatus, Money};
use crate::storage::{update_entry, Storage};

/// Fields for a new cost record
#[derive(Debug, Clone)]
pub struct NewCost {
    pub name: String,
    pub monthly_amount: Money,
    pub kind: CostKind,
    pub group: CostGroup,
    pub status: CostStatus,
    pub description: Option<String>,
}

impl NewCost {
    pub fn new(
        name: impl Into<String>,
        monthly_amount: Money,
        kind: CostKind,
        group: CostGroup,
    ) -> Self {
        Self {
            name: name.into(),
            monthly_amount,
            kind,
            group,
            status: CostStatus::Active,
            description: None,
        }
    }
}

/// Partial update of one cost record. `None` leaves a field unchanged; an
/// empty description clears it.
#[derive(Debug, Clone, Default)]
pub struct CostUpdate {
    pub name: Option<String>,
    pub monthly_amount: Option<Money>,
    pub kind: Option<CostKind>,
    pub status: Option<CostStatus>,
    pub group: Option<CostGroup>,
    pub description: Option<String>,
}

impl CostUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.monthly_amount.is_none()
            && self.kind.is_none()
            && self.status.is_none()
            && self.group.is_none()
            && self.description.is_none()
    }
}

/// Fields a bulk edit may change on every selected record
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkCostUpdate {
    pub kind: Option<CostKind>,
    pub status: Option<CostStatus>,
    pub group: Option<CostGroup>,
}

impl BulkCostUpdate {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.status.is_none() && self.group.is_none()
    }

    fn apply(&self, cost: &mut CostRecord) {
        if let Some(kind) = self.kind {
            cost.kind = kind;
        }
        if let Some(status) = self.status {
            cost.status = status;
        }
        if let Some(group) = self.group {
            cost.group = group;
        }
    }
}

/// Filter for listing costs. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct CostFilter {
    pub kind: Option<CostKind>,
    pub status: Option<CostStatus>,
    pub group: Option<CostGroup>,
    /// Case-insensitive substring of the name or description
    pub search: Option<String>,
}

impl CostFilter {
    pub fn matches(&self, cost: &CostRecord) -> bool {
        if self.kind.is_some_and(|k| k != cost.kind)
            || self.status.is_some_and(|s| s != cost.status)
            || self.group.is_some_and(|g| g != cost.group)
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let query = query.to_lowercase();
                cost.name.to_lowercase().contains(&query)
                    || cost
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
            }
            _ => true,
        }
    }
}

/// Service for cost management
pub struct CostService<'a> {
    storage: &'a Storage,
}

impl<'a> CostService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn ensure_unique_name(&self, name: &str, own_id: Option<CostId>) -> CostResult<()> {
        if let Some(existing) = self.storage.costs.get_by_name(name)? {
            if Some(existing.id) != own_id {
                return Err(CostError::duplicate_cost(name.trim()));
            }
        }
        Ok(())
    }

    /// Create a new cost record
    pub fn create(&self, input: NewCost) -> CostResult<CostRecord> {
        let name = input.name.trim();
        self.ensure_unique_name(name, None)?;

        let mut cost = CostRecord::new(name, input.monthly_amount, input.kind, input.group);
        cost.status = input.status;
        cost.description = normalize_description(input.description);

        cost.validate()
            .map_err(|e| CostError::Validation(e.to_string()))?;

        self.storage.costs.upsert(cost.clone())?;
        self.storage.costs.save()?;

        self.storage.log_create(
            EntityType::Cost,
            cost.id.to_string(),
            Some(cost.name.clone()),
            &cost,
        )?;

        tracing::info!(cost = %cost.name, amount = %cost.monthly_amount, "created cost");
        Ok(cost)
    }

    pub fn get(&self, id: CostId) -> CostResult<Option<CostRecord>> {
        self.storage.costs.get(id)
    }

    /// Find a cost by name (case-insensitive), full ID or short ID
    pub fn find(&self, identifier: &str) -> CostResult<Option<CostRecord>> {
        if let Some(cost) = self.storage.costs.get_by_name(identifier)? {
            return Ok(Some(cost));
        }

        if let Ok(id) = identifier.trim().parse::<CostId>() {
            if let Some(cost) = self.storage.costs.get(id)? {
                return Ok(Some(cost));
            }
        }

        self.storage.costs.get_by_short_id(identifier.trim())
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn require(&self, identifier: &str) -> CostResult<CostRecord> {
        self.find(identifier)?
            .ok_or_else(|| CostError::cost_not_found(identifier))
    }

    /// Costs matching the filter, newest first
    pub fn list(&self, filter: &CostFilter) -> CostResult<Vec<CostRecord>> {
        Ok(self
            .storage
            .costs
            .get_all()?
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect())
    }

    /// Apply a partial update
    pub fn update(&self, id: CostId, changes: CostUpdate) -> CostResult<CostRecord> {
        let mut cost = self
            .storage
            .costs
            .get(id)?
            .ok_or_else(|| CostError::cost_not_found(id.to_string()))?;
        let before = cost.clone();

        if let Some(name) = changes.name {
            let name = name.trim();
            self.ensure_unique_name(name, Some(id))?;
            cost.name = name.to_string();
        }
        if let Some(amount) = changes.monthly_amount {
            cost.monthly_amount = amount;
        }
        if let Some(kind) = changes.kind {
            cost.kind = kind;
        }
        if let Some(status) = changes.status {
            cost.status = status;
        }
        if let Some(group) = changes.group {
            cost.group = group;
        }
        if changes.description.is_some() {
            cost.description = normalize_description(changes.description);
        }

        if cost == before {
            return Ok(cost);
        }

        cost.updated_at = Utc::now();
        cost.validate()
            .map_err(|e| CostError::Validation(e.to_string()))?;

        self.storage.costs.upsert(cost.clone())?;
        self.storage.costs.save()?;

        self.storage.log_update(
            EntityType::Cost,
            cost.id.to_string(),
            Some(cost.name.clone()),
            &before,
            &cost,
        )?;

        Ok(cost)
    }

    /// Activate or deactivate a cost
    pub fn set_status(&self, id: CostId, status: CostStatus) -> CostResult<CostRecord> {
        self.update(
            id,
            CostUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    /// Look up every ID, failing on the first unknown one
    fn require_all(&self, ids: &[CostId]) -> CostResult<Vec<CostRecord>> {
        if ids.is_empty() {
            return Err(CostError::Validation("No costs selected".into()));
        }

        let mut seen = Vec::with_capacity(ids.len());
        let mut costs = Vec::with_capacity(ids.len());
        for &id in ids {
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            let cost = self
                .storage
                .costs
                .get(id)?
                .ok_or_else(|| CostError::cost_not_found(id.to_string()))?;
            costs.push(cost);
        }
        Ok(costs)
    }

    /// Apply the same change to several costs with a single save
    ///
    /// Nothing is written unless every ID exists. Returns how many records
    /// actually changed.
    pub fn bulk_update(&self, ids: &[CostId], changes: BulkCostUpdate) -> CostResult<usize> {
        if changes.is_empty() {
            return Err(CostError::Validation(
                "Bulk edit needs at least one field to change".into(),
            ));
        }

        let costs = self.require_all(ids)?;
        let now = Utc::now();
        let mut entries = Vec::new();

        for before in costs {
            let mut cost = before.clone();
            changes.apply(&mut cost);
            if cost == before {
                continue;
            }
            cost.updated_at = now;

            entries.push(update_entry(
                EntityType::Cost,
                cost.id.to_string(),
                Some(cost.name.clone()),
                &before,
                &cost,
            )?);
            self.storage.costs.upsert(cost)?;
        }

        if entries.is_empty() {
            return Ok(0);
        }

        self.storage.costs.save()?;
        self.storage.log_batch(&entries)?;

        tracing::info!(count = entries.len(), "bulk updated costs");
        Ok(entries.len())
    }

    /// Permanently remove a cost
    pub fn delete(&self, id: CostId) -> CostResult<CostRecord> {
        let cost = self
            .storage
            .costs
            .delete(id)?
            .ok_or_else(|| CostError::cost_not_found(id.to_string()))?;
        self.storage.costs.save()?;

        self.storage.log_delete(
            EntityType::Cost,
            cost.id.to_string(),
            Some(cost.name.clone()),
            &cost,
        )?;

        Ok(cost)
    }

    /// Remove several costs with a single save
    ///
    /// Nothing is removed unless every ID exists.
    pub fn bulk_delete(&self, ids: &[CostId]) -> CostResult<usize> {
        let costs = self.require_all(ids)?;

        let mut entries = Vec::with_capacity(costs.len());
        for cost in &costs {
            self.storage.costs.delete(cost.id)?;
            entries.push(AuditEntry::delete(
                EntityType::Cost,
                cost.id.to_string(),
                Some(cost.name.clone()),
                cost,
            ));
        }

        self.storage.costs.save()?;
        self.storage.log_batch(&entries)?;

        tracing::info!(count = costs.len(), "bulk deleted costs");
        Ok(costs.len())
    }

    /// Monthly totals over every stored cost
    pub fn summary(&self) -> CostResult<CostSummary> {
        Ok(aggregate(&self.storage.costs.get_all()?))
    }

    /// Number of stored costs
    pub fn count(&self) -> CostResult<usize> {
        self.storage.costs.count()
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::OverheadPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        crate::logging::init_test();
        let temp_dir = TempDir::new().unwrap();
        let paths = OverheadPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add(
        service: &CostService,
        name: &str,
        amount: i64,
        kind: CostKind,
        group: CostGroup,
    ) -> CostRecord {
        service
            .create(NewCost::new(name, Money::from_units(amount), kind, group))
            .unwrap()
    }

    #[test]
    fn test_create_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);

        let cost = add(&service, "  Gas Oven ", 690_000, CostKind::Fixed, CostGroup::CostOfGoods);
        assert_eq!(cost.name, "Gas Oven");

        assert_eq!(service.find("gas oven").unwrap().unwrap().id, cost.id);
        assert_eq!(service.find(&cost.id.to_string()).unwrap().unwrap().id, cost.id);
        assert_eq!(
            service.find(&cost.id.as_uuid().to_string()).unwrap().unwrap().id,
            cost.id
        );
        assert!(service.find("Electric Oven").unwrap().is_none());
        assert!(service.require("Electric Oven").unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_duplicate_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);

        add(&service, "Sewa Dapur", 1_500_000, CostKind::Fixed, CostGroup::CostOfGoods);
        let result = service.create(NewCost::new(
            "SEWA DAPUR",
            Money::from_units(1_000_000),
            CostKind::Fixed,
            CostGroup::CostOfGoods,
        ));
        assert!(matches!(result, Err(CostError::Duplicate { .. })));
    }

    #[test]
    fn test_create_rejects_invalid_amounts() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);

        for amount in [-5_000, 0, 999] {
            let err = service
                .create(NewCost::new(
                    "Marketing",
                    Money::from_units(amount),
                    CostKind::Variable,
                    CostGroup::Operational,
                ))
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_list_filters_newest_first() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);

        add(&service, "Gas Oven", 690_000, CostKind::Fixed, CostGroup::CostOfGoods);
        std::thread::sleep(std::time::Duration::from_millis(5));
        add(&service, "Marketing", 4_000_000, CostKind::Variable, CostGroup::Operational);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let rent = add(&service, "Sewa Dapur", 1_500_000, CostKind::Fixed, CostGroup::CostOfGoods);
        service.set_status(rent.id, CostStatus::Inactive).unwrap();

        let all = service.list(&CostFilter::default()).unwrap();
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Sewa Dapur", "Marketing", "Gas Oven"]);

        let fixed_active = service
            .list(&CostFilter {
                kind: Some(CostKind::Fixed),
                status: Some(CostStatus::Active),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(fixed_active.len(), 1);
        assert_eq!(fixed_active[0].name, "Gas Oven");

        let search = service
            .list(&CostFilter {
                search: Some("OVEN".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(search.len(), 1);

        let operational = service
            .list(&CostFilter {
                group: Some(CostGroup::Operational),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(operational[0].name, "Marketing");
    }

    #[test]
    fn test_update_logs_diff() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);
        let cost = add(&service, "Gas Oven", 690_000, CostKind::Fixed, CostGroup::CostOfGoods);

        let updated = service
            .update(
                cost.id,
                CostUpdate {
                    monthly_amount: Some(Money::from_units(750_000)),
                    description: Some("LPG 12kg".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.monthly_amount.units(), 750_000);
        assert_eq!(updated.description.as_deref(), Some("LPG 12kg"));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Update);
        let diff = entries[1].diff_summary.as_deref().unwrap();
        assert!(diff.contains("monthly_amount: 690000 -> 750000"));
    }

    #[test]
    fn test_update_without_changes_is_not_logged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);
        let cost = add(&service, "Gas Oven", 690_000, CostKind::Fixed, CostGroup::CostOfGoods);

        service
            .update(
                cost.id,
                CostUpdate {
                    kind: Some(CostKind::Fixed),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_rename_to_existing_name_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);
        add(&service, "Gas Oven", 690_000, CostKind::Fixed, CostGroup::CostOfGoods);
        let other = add(&service, "Marketing", 4_000_000, CostKind::Variable, CostGroup::Operational);

        let result = service.update(
            other.id,
            CostUpdate {
                name: Some("gas oven".into()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(CostError::Duplicate { .. })));
    }

    #[test]
    fn test_bulk_update() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);
        let a = add(&service, "Gas Oven", 690_000, CostKind::Fixed, CostGroup::CostOfGoods);
        let b = add(&service, "Marketing", 4_000_000, CostKind::Variable, CostGroup::Operational);

        let changed = service
            .bulk_update(
                &[a.id, b.id, a.id],
                BulkCostUpdate {
                    status: Some(CostStatus::Inactive),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(changed, 2);
        assert_eq!(service.summary().unwrap().inactive_count, 2);
    }

    #[test]
    fn test_bulk_update_unknown_id_changes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);
        let a = add(&service, "Gas Oven", 690_000, CostKind::Fixed, CostGroup::CostOfGoods);

        let err = service
            .bulk_update(
                &[a.id, CostId::new()],
                BulkCostUpdate {
                    group: Some(CostGroup::Operational),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(service.get(a.id).unwrap().unwrap().group, CostGroup::CostOfGoods);

        assert!(service
            .bulk_update(&[a.id], BulkCostUpdate::default())
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_delete_and_bulk_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);
        let a = add(&service, "Gas Oven", 690_000, CostKind::Fixed, CostGroup::CostOfGoods);
        let b = add(&service, "Marketing", 4_000_000, CostKind::Variable, CostGroup::Operational);
        let c = add(&service, "Sewa Dapur", 1_500_000, CostKind::Fixed, CostGroup::CostOfGoods);

        service.delete(a.id).unwrap();
        assert!(service.delete(a.id).unwrap_err().is_not_found());

        assert!(service.bulk_delete(&[b.id, a.id]).unwrap_err().is_not_found());
        assert_eq!(service.count().unwrap(), 2);

        assert_eq!(service.bulk_delete(&[b.id, c.id]).unwrap(), 2);
        assert_eq!(service.count().unwrap(), 0);

        let deletes = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .filter(|e| e.operation == Operation::Delete)
            .count();
        assert_eq!(deletes, 3);
    }

    #[test]
    fn test_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);
        add(&service, "Rent", 2_000_000, CostKind::Fixed, CostGroup::Operational);
        add(&service, "Packaging", 500_000, CostKind::Variable, CostGroup::CostOfGoods);

        let summary = service.summary().unwrap();
        assert_eq!(summary.total_active.units(), 2_500_000);
        assert_eq!(summary.total_by_group(CostGroup::CostOfGoods).units(), 500_000);
    }

    #[test]
    fn test_persists_across_reload() {
        let (temp_dir, storage) = create_test_storage();
        let service = CostService::new(&storage);
        add(&service, "Gas Oven", 690_000, CostKind::Fixed, CostGroup::CostOfGoods);

        let paths = OverheadPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(CostService::new(&reloaded).count().unwrap(), 1);
    }
}
