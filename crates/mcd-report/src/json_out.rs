use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use mcd_model::ItemsDocument;

/// Serialize `value` as two-space indented JSON.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("serialize {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}

pub fn write_items_json(path: &Path, document: &ItemsDocument) -> Result<()> {
    write_json_pretty(path, document)
}
