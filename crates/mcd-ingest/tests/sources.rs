//! Tests for CMS file loading.

use std::fs;

use mcd_ingest::{CmsFile, CmsSource, IngestError, TextEncoding, load_table};

#[test]
fn required_file_missing_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = CmsSource::new(dir.path(), None);
    let err = source.load(CmsFile::Article).unwrap_err();
    match err {
        IngestError::FileNotFound { path } => assert!(path.ends_with("article.csv")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn optional_file_missing_is_empty_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = CmsSource::new(dir.path(), None);
    let table = source.load(CmsFile::ArticleUrls).expect("optional load");
    assert_eq!(table.width(), 0);
    assert!(table.is_empty());
    assert_eq!(table.name(), "article_x_urls");
}

#[test]
fn loaded_columns_are_normalized() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("contractor.csv"),
        "Contractor ID,Contractor Bus Name\n1,Novitas\n",
    )
    .expect("write");
    let table = CmsSource::new(dir.path(), None)
        .load(CmsFile::Contractor)
        .expect("load");
    assert_eq!(table.columns(), &["contractor_id", "contractor_bus_name"]);
    assert_eq!(table.cell(0, 1), "Novitas");
}

#[test]
fn relation_tables_fall_back_to_v2_names() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("article_related_documents_v2.csv"),
        "article_id,related_document_id\n1,L1\n",
    )
    .expect("write");
    let source = CmsSource::new(dir.path(), None);
    assert!(
        source
            .resolve(CmsFile::RelatedDocuments)
            .ends_with("article_related_documents_v2.csv")
    );
    let table = source.load(CmsFile::RelatedDocuments).expect("load");
    assert_eq!(table.height(), 1);
}

#[test]
fn undecodable_optional_file_degrades_to_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("article_x_urls.csv");
    fs::write(&path, b"article_id,url\n1,\xFF\n").expect("write");
    let table = load_table(&path, "article_x_urls", Some(TextEncoding::Utf8), false)
        .expect("optional load");
    assert_eq!(table.width(), 0);

    let err = load_table(&path, "article_x_urls", Some(TextEncoding::Utf8), true).unwrap_err();
    assert!(matches!(err, IngestError::Undecodable { .. }));
}

#[test]
fn required_flags() {
    assert!(CmsFile::Article.is_required());
    assert!(CmsFile::StateLookup.is_required());
    assert!(!CmsFile::ArticleRevisionHistory.is_required());
    assert!(!CmsFile::RelatedNcdDocuments.is_required());
}
