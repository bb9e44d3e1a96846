//! Read/write the reference key JSON file.
//!
//! The key is a flat JSON object mapping age (as a string) to the
//! cross-county mean of normalized turnout. Writes truncate any previous file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::domain::ReferenceKey;
use crate::error::AppError;

/// Write the key, replacing any existing file at `path`.
pub fn write_key_json(path: &Path, key: &ReferenceKey) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create key file '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, key)
        .map_err(|e| AppError::io(format!("Failed to write key JSON: {e}")))?;
    writeln!(writer).map_err(|e| AppError::io(format!("Failed to write key JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush key file '{}': {e}", path.display())))?;

    info!(path = %path.display(), ages = key.len(), "wrote reference key");
    Ok(())
}

/// Read a key file.
pub fn read_key_json(path: &Path) -> Result<ReferenceKey, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open key file '{}': {e}", path.display())))?;
    let key: ReferenceKey = serde_json::from_reader(file)
        .map_err(|e| AppError::format(format!("Invalid key JSON '{}': {e}", path.display())))?;
    Ok(key)
}
