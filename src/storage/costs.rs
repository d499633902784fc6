//! Cost repository for JSON storage
//!
//! Manages loading and saving cost records to costs.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::CostError;
use crate::models::{CostId, CostRecord};

use super::file_io::{read_json, write_json_atomic};

/// Serializable cost data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostData {
    pub costs: Vec<CostRecord>,
}

/// Normalize a cost name for duplicate detection
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Repository for cost record persistence
pub struct CostRepository {
    path: PathBuf,
    data: RwLock<HashMap<CostId, CostRecord>>,
    /// Index: normalized name -> cost_id
    by_name: RwLock<HashMap<String, CostId>>,
}

impl CostRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load costs from disk
    pub fn load(&self) -> Result<(), CostError> {
        self.replace(self.read_file()?)
    }

    /// Read costs.json without touching the loaded data
    pub fn read_file(&self) -> Result<CostData, CostError> {
        read_json(&self.path)
    }

    /// Swap the loaded data for `file_data`
    pub fn replace(&self, file_data: CostData) -> Result<(), CostError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CostError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| CostError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_name.clear();

        for cost in file_data.costs {
            by_name.insert(normalize_name(&cost.name), cost.id);
            data.insert(cost.id, cost);
        }

        Ok(())
    }

    /// Save costs to disk, oldest first so the file diffs cleanly
    pub fn save(&self) -> Result<(), CostError> {
        let data = self
            .data
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut costs: Vec<_> = data.values().cloned().collect();
        costs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));

        write_json_atomic(&self.path, &CostData { costs })
    }

    pub fn get(&self, id: CostId) -> Result<Option<CostRecord>, CostError> {
        let data = self
            .data
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All costs, newest first
    pub fn get_all(&self) -> Result<Vec<CostRecord>, CostError> {
        let data = self
            .data
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut costs: Vec<_> = data.values().cloned().collect();
        costs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));
        Ok(costs)
    }

    /// Get a cost by exact name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<CostRecord>, CostError> {
        let data = self
            .data
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_name = self
            .by_name
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_name
            .get(&normalize_name(name))
            .and_then(|id| data.get(id))
            .cloned())
    }

    /// Find a cost whose short display ID (`cost-1a2b3c4d`) matches
    pub fn get_by_short_id(&self, short: &str) -> Result<Option<CostRecord>, CostError> {
        let data = self
            .data
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().find(|c| c.id.matches_short(short)).cloned())
    }

    /// Insert or update a cost
    pub fn upsert(&self, cost: CostRecord) -> Result<(), CostError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CostError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| CostError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.get(&cost.id) {
            by_name.remove(&normalize_name(&old.name));
        }

        by_name.insert(normalize_name(&cost.name), cost.id);
        data.insert(cost.id, cost);
        Ok(())
    }

    /// Delete a cost, returning it if it existed
    pub fn delete(&self, id: CostId) -> Result<Option<CostRecord>, CostError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CostError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| CostError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = data.remove(&id);
        if let Some(cost) = &removed {
            by_name.remove(&normalize_name(&cost.name));
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, CostError> {
        let data = self
            .data
            .read()
            .map_err(|e| CostError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
