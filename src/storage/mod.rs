//! Storage layer for overhead-cli
//!
//! JSON file storage with atomic writes, plus the audit hooks services call
//! after every mutation.

pub mod allocation;
pub mod costs;
pub mod file_io;
pub mod init;

pub use allocation::{AllocationData, AllocationRepository};
pub use costs::{CostData, CostRepository};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::OverheadPaths;
use crate::error::CostError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: OverheadPaths,
    audit: AuditLogger,
    pub costs: CostRepository,
    pub allocation: AllocationRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: OverheadPaths) -> Result<Self, CostError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            costs: CostRepository::new(paths.costs_file()),
            allocation: AllocationRepository::new(paths.allocation_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &OverheadPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    ///
    /// Both files are read before either repository changes, so a failed
    /// read leaves the previously loaded data in place.
    pub fn load_all(&mut self) -> Result<(), CostError> {
        let costs = self.costs.read_file()?;
        let allocation = self.allocation.read_file()?;
        self.costs.replace(costs)?;
        self.allocation.replace(allocation)?;
        Ok(())
    }

    /// Record a created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), CostError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an updated entity, with a field diff
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), CostError> {
        self.audit.log(&update_entry(
            entity_type,
            entity_id.into(),
            entity_name,
            before,
            after,
        )?)
    }

    /// Record a deleted entity
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), CostError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record several entries from one bulk operation
    pub fn log_batch(&self, entries: &[AuditEntry]) -> Result<(), CostError> {
        self.audit.log_batch(entries)
    }
}

/// Build an update entry with its diff summary filled in
pub fn update_entry<T: Serialize>(
    entity_type: EntityType,
    entity_id: String,
    entity_name: Option<String>,
    before: &T,
    after: &T,
) -> Result<AuditEntry, CostError> {
    let diff = generate_diff(&serde_json::to_value(before)?, &serde_json::to_value(after)?);
    Ok(AuditEntry::update(
        entity_type,
        entity_id,
        entity_name,
        before,
        after,
        diff,
    ))
}
