//! Allocation settings repository
//!
//! Stores the single allocation config and the last saved overhead snapshot
//! in allocation.json. Both are optional: a fresh install has neither.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::CostError;
use crate::models::{AllocationConfig, OverheadSnapshot};

use super::file_io::{read_json, write_json_atomic};

/// Serializable allocation data structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<AllocationConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<OverheadSnapshot>,
}

/// Repository for allocation settings persistence
pub struct AllocationRepository {
    path: PathBuf,
    data: RwLock<AllocationData>,
}

impl AllocationRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(AllocationData::default()),
        }
    }

    pub fn load(&self) -> Result<(), CostError> {
        self.replace(self.read_file()?)
    }

    pub fn read_file(&self) -> Result<AllocationData, CostError> {
        read_json(&self.path)
    }

    pub fn replace(&self, file_data: AllocationData) -> Result<(), CostError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CostError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;
        Ok(())
    }

    pub fn save(&self) -> Result<(), CostError> {
        let data = self
            .data
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*data)
    }

    pub fn get_config(&self) -> Result<Option<AllocationConfig>, CostError> {
        let data = self
            .data
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.config)
    }

    /// Replace the config, returning the previous one
    pub fn set_config(
        &self,
        config: Option<AllocationConfig>,
    ) -> Result<Option<AllocationConfig>, CostError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CostError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(std::mem::replace(&mut data.config, config))
    }

    pub fn get_snapshot(&self) -> Result<Option<OverheadSnapshot>, CostError> {
        let data = self
            .data
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.snapshot.clone())
    }

    /// Replace the snapshot, returning the previous one
    pub fn set_snapshot(
        &self,
        snapshot: Option<OverheadSnapshot>,
    ) -> Result<Option<OverheadSnapshot>, CostError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CostError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(std::mem::replace(&mut data.snapshot, snapshot))
    }
}
