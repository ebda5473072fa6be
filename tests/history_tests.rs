//! Tests for the bounded file-backed project history.

mod common;

use adcraft::error::AdcraftError;
use adcraft::history::{FileHistoryStore, HistoryConfig, HistoryStore, EMERGENCY_KEEP};
use adcraft::types::{AdProject, CopyResult, GenerationRequest, ProjectPatch, SlideDraft, SlidePatch};
use common::png;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn project(title: &str) -> AdProject {
    let request = GenerationRequest::builder().brief(title).build();
    AdProject::from_copy(
        &request,
        CopyResult {
            title: title.to_string(),
            slides: vec![SlideDraft {
                headline: "h".into(),
                visual_prompt: "v".into(),
                ..Default::default()
            }],
        },
    )
}

fn store(dir: &TempDir, quota_bytes: usize) -> FileHistoryStore {
    let mut config = HistoryConfig::new(dir.path().to_path_buf());
    config.quota_bytes = quota_bytes;
    FileHistoryStore::new(config)
}

fn titles(projects: &[AdProject]) -> Vec<String> {
    projects.iter().map(|p| p.title.clone()).collect()
}

#[test]
fn keeps_the_five_newest_first() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir, usize::MAX);

    for i in 1..=7 {
        store.save(&project(&format!("p{i}"))).unwrap();
    }

    let listed = store.list().unwrap();
    assert_eq!(titles(&listed), vec!["p7", "p6", "p5", "p4", "p3"]);
}

#[test]
fn saving_an_existing_id_overwrites_and_moves_it_to_the_front() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir, usize::MAX);
    let first = project("first");
    store.save(&first).unwrap();
    store.save(&project("second")).unwrap();

    let renamed = first.apply(&ProjectPatch {
        title: Some("first v2".into()),
        ..Default::default()
    });
    let listed = store.save(&renamed).unwrap();

    assert_eq!(titles(&listed), vec!["first v2", "second"]);
    assert_eq!(listed[0].id, first.id);
}

#[test]
fn delete_removes_by_id() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir, usize::MAX);
    let keep = project("keep");
    let gone = project("gone");
    store.save(&keep).unwrap();
    store.save(&gone).unwrap();

    let remaining = store.delete(&gone.id).unwrap();
    assert_eq!(titles(&remaining), vec!["keep"]);
    assert_eq!(titles(&store.list().unwrap()), vec!["keep"]);
}

#[test]
fn images_survive_a_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir, usize::MAX);
    let with_image = project("img")
        .with_slide(0, &SlidePatch::image(png(8)))
        .unwrap();
    store.save(&with_image).unwrap();

    let loaded = store.list().unwrap();
    assert_eq!(loaded[0].slides[0].background_image, Some(png(8)));
    assert_eq!(loaded[0], with_image);
}

#[test]
fn over_quota_history_is_trimmed_to_the_newest_entries() {
    let dir = TempDir::new().unwrap();
    let unbounded = store(&dir, usize::MAX);
    for i in 1..=4 {
        unbounded.save(&project(&format!("p{i}"))).unwrap();
    }
    let size_of_three = std::fs::metadata(unbounded.path()).unwrap().len() as usize * 3 / 4;

    let bounded = store(&dir, size_of_three);
    let listed = bounded.save(&project("p5")).unwrap();

    assert_eq!(listed.len(), EMERGENCY_KEEP);
    assert_eq!(titles(&listed), vec!["p5", "p4"]);
    assert_eq!(titles(&bounded.list().unwrap()), vec!["p5", "p4"]);
}

#[test]
fn unsavable_project_keeps_the_previous_history() {
    let dir = TempDir::new().unwrap();
    let unbounded = store(&dir, usize::MAX);
    unbounded.save(&project("old")).unwrap();

    let tiny = store(&dir, 10);
    let err = tiny.save(&project("new")).unwrap_err();

    assert!(matches!(err, AdcraftError::HistoryQuotaExceeded { quota: 10, .. }));
    assert_eq!(titles(&unbounded.list().unwrap()), vec!["old"]);
}
