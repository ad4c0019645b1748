//! Catalogue of CMS MCD extract files and required/optional loading.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::encoding::TextEncoding;
use crate::error::{IngestError, Result};
use crate::reader::read_csv_table;
use crate::table::TextTable;

/// A CSV table of the MCD "Articles" download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmsFile {
    Article,
    ArticleHcpcCode,
    ArticleContractor,
    Contractor,
    ContractorJurisdiction,
    StateLookup,
    ArticleUrls,
    ArticleRevisionHistory,
    RelatedNcdDocuments,
    RelatedDocuments,
}

impl CmsFile {
    /// Table name used in log lines and error messages.
    pub fn table_name(self) -> &'static str {
        match self {
            CmsFile::Article => "article",
            CmsFile::ArticleHcpcCode => "article_x_hcpc_code",
            CmsFile::ArticleContractor => "article_x_contractor",
            CmsFile::Contractor => "contractor",
            CmsFile::ContractorJurisdiction => "contractor_jurisdiction",
            CmsFile::StateLookup => "state_lookup",
            CmsFile::ArticleUrls => "article_x_urls",
            CmsFile::ArticleRevisionHistory => "article_x_revision_history",
            CmsFile::RelatedNcdDocuments => "article_related_ncd_documents",
            CmsFile::RelatedDocuments => "article_related_documents",
        }
    }

    /// File names to look for, in order. Relation tables are published under
    /// more than one name across releases.
    pub fn file_names(self) -> &'static [&'static str] {
        match self {
            CmsFile::Article => &["article.csv"],
            CmsFile::ArticleHcpcCode => &["article_x_hcpc_code.csv"],
            CmsFile::ArticleContractor => &["article_x_contractor.csv"],
            CmsFile::Contractor => &["contractor.csv"],
            CmsFile::ContractorJurisdiction => &["contractor_jurisdiction.csv"],
            CmsFile::StateLookup => &["state_lookup.csv"],
            CmsFile::ArticleUrls => &["article_x_urls.csv"],
            CmsFile::ArticleRevisionHistory => &["article_x_revision_history.csv"],
            CmsFile::RelatedNcdDocuments => &[
                "article_related_ncd_documents.csv",
                "article_related_ncd_documents_v2.csv",
            ],
            CmsFile::RelatedDocuments => &[
                "article_related_documents.csv",
                "article_related_documents_v2.csv",
            ],
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(
            self,
            CmsFile::ArticleUrls
                | CmsFile::ArticleRevisionHistory
                | CmsFile::RelatedNcdDocuments
                | CmsFile::RelatedDocuments
        )
    }
}

/// A directory of CMS extracts read with one encoding policy.
#[derive(Debug, Clone)]
pub struct CmsSource {
    dir: PathBuf,
    encoding: Option<TextEncoding>,
}

impl CmsSource {
    pub fn new(dir: impl Into<PathBuf>, encoding: Option<TextEncoding>) -> Self {
        Self {
            dir: dir.into(),
            encoding,
        }
    }

    /// First existing candidate path for `file`, else the primary name.
    pub fn resolve(&self, file: CmsFile) -> PathBuf {
        let names = file.file_names();
        names
            .iter()
            .map(|name| self.dir.join(name))
            .find(|path| path.is_file())
            .unwrap_or_else(|| self.dir.join(names[0]))
    }

    /// Load and normalize a table. Absent optional files yield an empty table.
    pub fn load(&self, file: CmsFile) -> Result<TextTable> {
        load_table(
            &self.resolve(file),
            file.table_name(),
            self.encoding,
            file.is_required(),
        )
    }
}

/// Read a CSV and normalize its columns.
///
/// When `required` is false, a missing or undecodable file degrades to an
/// empty, columnless table instead of an error.
pub fn load_table(
    path: &Path,
    table_name: &str,
    encoding: Option<TextEncoding>,
    required: bool,
) -> Result<TextTable> {
    match read_csv_table(path, table_name, encoding) {
        Ok(table) => {
            let table = table.normalized();
            info!(
                table = table_name,
                rows = table.height(),
                columns = table.width(),
                "loaded table"
            );
            Ok(table)
        }
        Err(IngestError::FileNotFound { path }) if !required => {
            warn!(table = table_name, path = %path.display(), "optional table not found");
            Ok(TextTable::empty(table_name))
        }
        Err(error @ IngestError::Undecodable { .. }) if !required => {
            warn!(table = table_name, %error, "optional table unreadable; treating as empty");
            Ok(TextTable::empty(table_name))
        }
        Err(error) => Err(error),
    }
}
