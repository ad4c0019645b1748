//! Error types for the transform stages.

use std::path::PathBuf;
use thiserror::Error;

use mcd_ingest::IngestError;

#[derive(Debug, Error)]
pub enum TransformError {
    /// Loading or column resolution failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// An overlay table was supplied without its `cpt` column.
    #[error("flag overlay {path} must include a 'cpt' column")]
    OverlayMissingCode { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, TransformError>;
