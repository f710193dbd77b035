//! Integration tests for loading real PDF files through `lopdf`.
//!
//! PDFs are generated on the fly so the tests do not depend on the campus
//! documents being present.

use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use smartcampus::loader::SourceStatus;
use smartcampus::{
    AssistantService, DocumentLoaderBuilder, InteractionLog, KeywordMatcher, MatchMode, RecordId,
};
use std::path::Path;
use tempfile::tempdir;

/// Writes a PDF with one page per entry of `pages`. Empty entries produce a
/// page without any text operations.
fn write_pdf(path: &Path, pages: &[&str]) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Count" => kids.len() as i64,
        "Kids" => kids,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path)?;
    Ok(())
}

#[test]
fn pdf_pages_become_records_in_page_order() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(
        &dir.path().join("shuttle.pdf"),
        &["Shuttle departs at 6am", "Weekend shuttle runs hourly"],
    )?;

    let outcome = DocumentLoaderBuilder::new()
        .docs_dir(dir.path())
        .sources(["shuttle.pdf"])
        .build()
        .load();

    let records = outcome.knowledge_base.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), &RecordId::for_page("shuttle.pdf", 1));
    assert_eq!(records[1].id(), &RecordId::for_page("shuttle.pdf", 2));
    assert!(records[0].folded_text().contains("departs"));
    assert!(records[1].folded_text().contains("weekend"));
    assert_eq!(
        outcome.report[0].status,
        SourceStatus::Loaded { records: 2 }
    );
    Ok(())
}

#[test]
fn pages_without_text_are_skipped() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(
        &dir.path().join("map.pdf"),
        &["Volker campus map", "", "Parking structure"],
    )?;

    let outcome = DocumentLoaderBuilder::new()
        .docs_dir(dir.path())
        .sources(["map.pdf"])
        .build()
        .load();

    let ids: Vec<&str> = outcome
        .knowledge_base
        .records()
        .iter()
        .map(|r| r.id().as_str())
        .collect();
    assert_eq!(ids, vec!["map.pdf (Page 1)", "map.pdf (Page 3)"]);
    Ok(())
}

#[test]
fn corrupt_and_missing_sources_do_not_stop_loading() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("broken.pdf"), b"%PDF-1.5 truncated")?;
    write_pdf(&dir.path().join("safety.pdf"), &["Campus police escort"])?;

    let outcome = DocumentLoaderBuilder::new()
        .docs_dir(dir.path())
        .sources(["missing.pdf", "broken.pdf", "safety.pdf"])
        .build()
        .load();

    assert_eq!(outcome.knowledge_base.len(), 1);
    assert_eq!(outcome.report[0].status, SourceStatus::Missing);
    assert!(matches!(outcome.report[1].status, SourceStatus::Failed(_)));
    assert!(outcome.report[2].is_loaded());
    Ok(())
}

#[test]
fn questions_are_answered_from_loaded_pdf() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(
        &dir.path().join("catalog.pdf"),
        &["Tuition policy", "Library hours are posted online"],
    )?;

    let outcome = DocumentLoaderBuilder::new()
        .docs_dir(dir.path())
        .sources(["catalog.pdf"])
        .build()
        .load();
    let service = AssistantService::new(
        outcome.knowledge_base,
        KeywordMatcher::new(MatchMode::TokenCount),
        InteractionLog::new(dir.path().join("metrics.csv")),
    );

    let answered = service.ask("Library")?;
    assert_eq!(
        answered.result.evidence(),
        &[RecordId::for_page("catalog.pdf", 2)]
    );
    assert!(answered.result.answer().contains("Library hours"));
    Ok(())
}
