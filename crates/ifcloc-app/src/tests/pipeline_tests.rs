use std::collections::BTreeMap;
use std::path::PathBuf;

use ifcloc_translator::TokenSafeTranslator;
use ifcloc_translator::mock::MockChat;
use ifcloc_types::{SourceFile, SourceString, SourceText};

use super::fake_platform::FakePlatform;
use crate::pipeline::{Pipeline, RunMode, RunOptions};

fn options(mode: RunMode, limit: usize) -> RunOptions {
    RunOptions {
        limit,
        mode,
        strict_tokens: false,
        target_lang: "tr".to_string(),
    }
}

fn file(id: u64, name: &str) -> SourceFile {
    SourceFile {
        id,
        name: name.to_string(),
        path: None,
    }
}

fn echo_translator() -> TokenSafeTranslator {
    TokenSafeTranslator::new(MockChat::echo("TR: "), "Turkish", 1)
}

#[tokio::test]
async fn test_dry_run_lists_untranslated_without_model() {
    let platform = FakePlatform::new(500)
        .with_file(7, "X.pot", &[(1, "Wall"), (2, "Slab"), (3, "Beam")])
        .translated(&[2]);
    let model = MockChat::echo("TR: ");
    let calls = model.calls();
    let translator = TokenSafeTranslator::new(model, "Turkish", 1);

    let pipeline = Pipeline::new(&platform, Some(&translator), options(RunMode::DryRun, 10));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.handled, 2);
    assert_eq!(report.skipped_existing, 1);
    assert_eq!(calls.count(), 0);
    assert!(platform.uploads().is_empty());
}

#[tokio::test]
async fn test_dry_run_needs_no_translator() {
    let platform = FakePlatform::new(500).with_file(7, "X.pot", &[(1, "Wall")]);

    let pipeline = Pipeline::new(&platform, None, options(RunMode::DryRun, 10));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.handled, 1);
}

#[tokio::test]
async fn test_limit_stops_paging_early() {
    let owned: Vec<(u64, String)> = (1..=5).map(|id| (id, format!("Element {id}"))).collect();
    let texts: Vec<(u64, &str)> = owned.iter().map(|(id, t)| (*id, t.as_str())).collect();
    let platform = FakePlatform::new(2).with_file(7, "X.pot", &texts);
    let translator = echo_translator();

    let pipeline = Pipeline::new(&platform, Some(&translator), options(RunMode::Upload, 3));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.handled, 3);
    assert_eq!(
        platform.uploads(),
        vec![
            (1, "TR: Element 1".to_string()),
            (2, "TR: Element 2".to_string()),
            (3, "TR: Element 3".to_string()),
        ]
    );
    // Offsets 0 and 2 only; the page at offset 4 is never requested
    assert_eq!(platform.string_pages(), 2);
}

#[tokio::test]
async fn test_zero_limit_requests_nothing() {
    let platform = FakePlatform::new(500).with_file(7, "X.pot", &[(1, "Wall")]);
    let translator = echo_translator();

    let pipeline = Pipeline::new(&platform, Some(&translator), options(RunMode::Upload, 0));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.handled, 0);
    assert_eq!(platform.string_pages(), 0);
}

#[tokio::test]
async fn test_already_existing_upload_is_not_counted() {
    let platform = FakePlatform::new(500)
        .with_file(7, "X.pot", &[(1, "Wall"), (2, "Slab"), (3, "Beam")])
        .conflicting(&[2]);
    let translator = echo_translator();

    let pipeline = Pipeline::new(&platform, Some(&translator), options(RunMode::Upload, 10));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.handled, 2);
    assert_eq!(report.already_exists, 1);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn test_failed_uploads_do_not_stop_the_file() {
    let platform = FakePlatform::new(500)
        .with_file(7, "X.pot", &[(1, "Wall"), (2, "Slab"), (3, "Beam")])
        .rejecting(&[1])
        .broken(&[2]);
    let translator = echo_translator();

    let pipeline = Pipeline::new(&platform, Some(&translator), options(RunMode::Upload, 10));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.handled, 1);
    assert_eq!(report.failed, 2);
    assert_eq!(platform.uploads(), vec![(3, "TR: Beam".to_string())]);
}

#[tokio::test]
async fn test_translation_error_is_fatal() {
    let platform = FakePlatform::new(500).with_file(7, "X.pot", &[(1, "Wall"), (2, "Slab")]);
    let translator = TokenSafeTranslator::new(MockChat::failing("quota"), "Turkish", 1);

    let pipeline = Pipeline::new(&platform, Some(&translator), options(RunMode::Upload, 10));
    let err = pipeline.process_file(&file(7, "X.pot")).await.unwrap_err();

    assert!(format!("{err:#}").contains("quota"));
    assert!(platform.uploads().is_empty());
}

#[tokio::test]
async fn test_upload_mode_requires_translator() {
    let platform = FakePlatform::new(500).with_file(7, "X.pot", &[(1, "Wall")]);

    let pipeline = Pipeline::new(&platform, None, options(RunMode::Upload, 10));
    assert!(pipeline.process_file(&file(7, "X.pot")).await.is_err());
    assert_eq!(platform.string_pages(), 0);
}

#[tokio::test]
async fn test_lost_tokens_are_flagged_and_still_uploaded() {
    let platform = FakePlatform::new(500)
        .with_file(7, "X.pot", &[(1, "Height of [[IfcWall]]")]);
    let translator = TokenSafeTranslator::new(
        MockChat::scripted(["Duvar yüksekliği", "Duvar yüksekliği"]),
        "Turkish",
        1,
    );

    let pipeline = Pipeline::new(&platform, Some(&translator), options(RunMode::Upload, 10));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.flagged, 1);
    assert_eq!(report.handled, 1);
    assert_eq!(platform.uploads(), vec![(1, "Duvar yüksekliği".to_string())]);
}

#[tokio::test]
async fn test_strict_tokens_skips_flagged_translation() {
    let platform = FakePlatform::new(500)
        .with_file(7, "X.pot", &[(1, "Height of [[IfcWall]]"), (2, "Slab")]);
    let translator = TokenSafeTranslator::new(
        MockChat::scripted(["Duvar yüksekliği", "Duvar yüksekliği", "Döşeme"]),
        "Turkish",
        1,
    );
    let mut opts = options(RunMode::Upload, 10);
    opts.strict_tokens = true;

    let pipeline = Pipeline::new(&platform, Some(&translator), opts);
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.flagged, 1);
    assert_eq!(report.handled, 1);
    assert_eq!(platform.uploads(), vec![(2, "Döşeme".to_string())]);
}

#[tokio::test]
async fn test_plural_strings_are_skipped() {
    let plural = SourceString {
        id: 1,
        file_id: Some(7),
        identifier: Some("walls".to_string()),
        text: SourceText::Plural(BTreeMap::from([
            ("one".to_string(), "wall".to_string()),
            ("other".to_string(), "walls".to_string()),
        ])),
    };
    let plain = SourceString {
        id: 2,
        file_id: Some(7),
        identifier: None,
        text: SourceText::Plain("Slab".to_string()),
    };
    let platform = FakePlatform::new(500).add_file(7, "X.pot", vec![plural, plain]);
    let model = MockChat::echo("TR: ");
    let calls = model.calls();
    let translator = TokenSafeTranslator::new(model, "Turkish", 1);

    let pipeline = Pipeline::new(&platform, Some(&translator), options(RunMode::Upload, 10));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.skipped_plural, 1);
    assert_eq!(report.handled, 1);
    assert_eq!(calls.count(), 1);
}

#[tokio::test]
async fn test_export_mode_collects_entries_instead_of_uploading() {
    let platform = FakePlatform::new(500)
        .with_file(7, "X.pot", &[(1, "Wall"), (2, "Slab")])
        .translated(&[1]);
    let translator = echo_translator();
    let mode = RunMode::ExportPo {
        dir: PathBuf::from("unused"),
    };

    let pipeline = Pipeline::new(&platform, Some(&translator), options(mode, 10));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.handled, 1);
    assert_eq!(report.exported.len(), 1);
    assert_eq!(report.exported[0].string_id, 2);
    assert_eq!(report.exported[0].translation, "TR: Slab");
    assert!(!report.exported[0].fuzzy);
    assert!(platform.uploads().is_empty());
}

#[tokio::test]
async fn test_export_mode_translates_repeated_source_once() {
    let platform = FakePlatform::new(500)
        .with_file(7, "X.pot", &[(1, "Wall"), (2, "Slab"), (3, "Wall")]);
    let model = MockChat::echo("TR: ");
    let calls = model.calls();
    let translator = TokenSafeTranslator::new(model, "Turkish", 1);
    let mode = RunMode::ExportPo {
        dir: PathBuf::from("unused"),
    };

    let pipeline = Pipeline::new(&platform, Some(&translator), options(mode, 10));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.handled, 2);
    assert_eq!(report.skipped_duplicate, 1);
    assert_eq!(report.exported.len(), 2);
    assert_eq!(calls.count(), 2);
}

#[tokio::test]
async fn test_upload_mode_submits_repeated_source_per_string() {
    let platform = FakePlatform::new(500).with_file(7, "X.pot", &[(1, "Wall"), (2, "Wall")]);
    let translator = echo_translator();

    let pipeline = Pipeline::new(&platform, Some(&translator), options(RunMode::Upload, 10));
    let report = pipeline.process_file(&file(7, "X.pot")).await.unwrap();

    assert_eq!(report.handled, 2);
    assert_eq!(report.skipped_duplicate, 0);
}
