//! YAML export
//!
//! Same content as the JSON export, in a form that is easier to read by eye.

use std::io::Write;

use crate::error::{CostError, CostResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export everything as YAML with a short comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> CostResult<()> {
    let export = FullExport::from_storage(storage)?;

    write!(
        writer,
        "# overhead-cli data export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    )
    .map_err(|e| CostError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| CostError::Export(e.to_string()))
}
