//! Ingestion of CMS Medicare Coverage Database CSV extracts.
//!
//! Every input is read as text, decoded with an ordered encoding fallback,
//! and has its column names normalized before any join. Join columns are
//! then resolved by alias lists through [`TextTable::pick`].

pub mod columns;
pub mod encoding;
pub mod error;
pub mod reader;
pub mod sources;
pub mod table;

pub use columns::normalize_column_name;
pub use encoding::{TextEncoding, decode_with_fallback, encodings_to_try};
pub use error::{IngestError, Result};
pub use reader::{parse_csv_text, read_csv_table};
pub use sources::{CmsFile, CmsSource, load_table};
pub use table::TextTable;
