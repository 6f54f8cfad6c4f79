//! End-to-end card refresh against the fixture card store.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use manacard::{
    build, CardRecord, FetchOrchestrator, FetchTask, JsonDirStore, Manifest, SharedCardSlot, Span,
    SymbolId, TaskState,
};
use pretty_assertions::assert_eq;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("cards")
}

fn orchestrator() -> FetchOrchestrator {
    let slot = Arc::new(SharedCardSlot::new(CardRecord::sample()));
    FetchOrchestrator::new(Arc::new(JsonDirStore::new(fixtures_dir())), slot)
}

#[tokio::test]
async fn test_long_delay_overwrites_fresher_publish() {
    let orchestrator = orchestrator();
    let mut feed = orchestrator.slot().subscribe();

    let run = orchestrator.launch([
        FetchTask::new("Trench", "E001", Duration::from_millis(400)),
        FetchTask::new("Sarkhan", "CCH001", Duration::from_millis(20)),
    ]);

    let (first, rendered) = feed.next_render().await.unwrap();
    assert_eq!(first.record.name, "Sarkhan, el sin dragón");
    assert!(!rendered.unwrap().is_creature);

    let (second, rendered) = feed.next_render().await.unwrap();
    assert_eq!(second.record.name, "Trinchera de los caídos");
    assert_eq!(rendered.unwrap().badge(), None);

    let reports = run.join().await;
    assert!(reports.iter().all(|r| r.state == TaskState::Done));
    assert_eq!(orchestrator.slot().version(), 2);
}

#[tokio::test]
async fn test_missing_document_does_not_block_others() {
    let orchestrator = orchestrator();

    let reports = orchestrator
        .launch([
            FetchTask::new("Ghost", "NOPE01", Duration::ZERO),
            FetchTask::new("Glider", "RE001", Duration::from_millis(10)),
        ])
        .join()
        .await;

    assert!(matches!(reports[0].state, TaskState::Failed(_)));
    assert!(!reports[0].published);
    assert_eq!(reports[1].state, TaskState::Done);

    let card = orchestrator.slot().render_current().unwrap();
    assert_eq!(card.name, "Planeador de Aerópolis");
    assert_eq!(card.badge().as_deref(), Some("2/1"));
    assert_eq!(card.description[0], Span::text("Vuela.\n\n"));
    assert_eq!(card.description[1], Span::symbol("W"));
}

#[tokio::test]
async fn test_default_manifest_tasks_match_fixture_store() {
    let manifest = Manifest::default();
    let store = JsonDirStore::new(fixtures_dir());

    for task in manifest.fetch_tasks() {
        let raw = manacard::CardStore::fetch(&store, &task.document).await.unwrap();
        let card = build(&raw.sanitize()).unwrap();
        assert!(!card.name.is_empty(), "{}", task.label);
    }
}

#[test]
fn test_dual_colour_fixture_with_unknown_symbol() {
    let source = std::fs::read_to_string(fixtures_dir().join("CHH.json")).unwrap();
    let raw: manacard::RawRecord = serde_json::from_str(&source).unwrap();
    let card = build(&raw.sanitize()).unwrap();

    assert!(card.is_creature);
    assert_eq!(card.gradients.title.stops()[0].colour, manacard::ColorCode::Blue.theme().title);
    assert_eq!(card.gradients.title.stops()[3].colour, manacard::ColorCode::Red.theme().title);
    assert_eq!(card.description[0], Span::Symbol(SymbolId::COLORLESS));
    assert_eq!(
        card.description,
        vec![
            Span::Symbol(SymbolId::COLORLESS),
            Span::text(": Prodigio hace 1 punto de daño a cualquier objetivo.\nCopia "),
            Span::Symbol(SymbolId::Generic(1)),
            Span::symbol("U"),
            Span::text(" conjuros."),
        ]
    );
}
