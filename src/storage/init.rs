//! Storage initialization
//!
//! First-run setup: directories plus empty data files, so later reads and
//! the `watch` command always find something on disk.

use crate::config::paths::OverheadPaths;
use crate::error::CostError;

use super::allocation::AllocationData;
use super::costs::CostData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing data files are left untouched.
pub fn initialize_storage(paths: &OverheadPaths) -> Result<(), CostError> {
    paths.ensure_directories()?;

    if !paths.costs_file().exists() {
        write_json_atomic(paths.costs_file(), &CostData::default())?;
    }

    if !paths.allocation_file().exists() {
        write_json_atomic(paths.allocation_file(), &AllocationData::default())?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &OverheadPaths) -> bool {
    !paths.costs_file().exists() || !paths.allocation_file().exists()
}
