//! Fetch command implementation.
//!
//! Launches the manifest's fetch tasks against a JSON directory store and
//! reports every publish as it lands, then a per-task summary.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use crate::config::Manifest;
use crate::error::{CardError, Result};
use crate::fetch::{
    FetchOrchestrator, JsonDirStore, PublishPolicy, Published, SharedCardSlot, TaskState,
};
use crate::output::{display_path, plural, Printer};
use crate::render::{build, RenderableCard};

/// Fetch cards concurrently and publish them into the current-card slot
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Manifest file (defaults to the nearest manacard.yaml, if any)
    #[arg(long, short)]
    pub manifest: Option<PathBuf>,

    /// Card store directory, overriding the manifest
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Drop publishes older than the card on display
    #[arg(long)]
    pub reject_stale: bool,

    /// Per-fetch timeout in milliseconds, overriding the manifest
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

pub async fn run(args: FetchArgs, printer: &Printer) -> Result<()> {
    let manifest = load_manifest(&args)?;

    let store_dir = args.store.clone().unwrap_or_else(|| manifest.store.clone());
    let policy = if args.reject_stale {
        PublishPolicy::RejectStale
    } else {
        manifest.policy
    };
    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .or_else(|| manifest.timeout());

    let slot = Arc::new(SharedCardSlot::with_policy(manifest.initial_card()?, policy));
    let store = Arc::new(JsonDirStore::new(&store_dir));
    let orchestrator = FetchOrchestrator::new(store, Arc::clone(&slot)).with_timeout(timeout);

    let initial = slot.render_current()?;
    printer.info("Showing", &initial.name);

    let tasks = manifest.fetch_tasks();
    printer.status(
        "Fetching",
        &format!("{} from {}", plural(tasks.len(), "card", "cards"), display_path(&store_dir)),
    );

    let mut feed = slot.subscribe();
    let join = orchestrator.launch(tasks).join();
    tokio::pin!(join);

    let reports = loop {
        tokio::select! {
            biased;
            Some((published, rendered)) = feed.next_render() => {
                report_publish(&published, rendered, printer);
            }
            reports = &mut join => break reports,
        }
    };

    // A publish can land between the last feed poll and join completing.
    if let Some(published) = feed.try_changed() {
        let rendered = build(&published.record);
        report_publish(&published, rendered, printer);
    }

    let mut failed = 0;
    for report in &reports {
        match &report.state {
            TaskState::Done if report.published => {}
            TaskState::Done => printer.warning(
                "Discarded",
                &format!("{} ({}) {}", report.label, report.document, printer.dim("stale")),
            ),
            TaskState::Failed(e) => {
                failed += 1;
                printer.error("Failed", &format!("{} ({}): {}", report.label, report.document, e));
            }
            TaskState::Panicked(e) => {
                failed += 1;
                let line = format!("{} ({}): {}", report.label, report.document, e);
                printer.error("Panicked", &line);
            }
            other => printer.warning("Stopped", &format!("{} ({})", report.label, other)),
        }
    }

    let current = slot.current();
    printer.status(
        "Finished",
        &format!("showing {} after {}", current.name, plural(reports.len(), "task", "tasks")),
    );

    if failed > 0 && failed == reports.len() {
        return Err(CardError::Config {
            message: format!("All {} failed", plural(failed, "fetch", "fetches")),
            help: Some(format!("Check that {} holds the card documents", display_path(&store_dir))),
        });
    }

    Ok(())
}

fn load_manifest(args: &FetchArgs) -> Result<Manifest> {
    if let Some(path) = &args.manifest {
        return Manifest::load(path);
    }

    let cwd = std::env::current_dir().map_err(|e| CardError::Io {
        path: PathBuf::from("."),
        message: e.to_string(),
    })?;

    match Manifest::find(&cwd) {
        Some(path) => Manifest::load(&path),
        None => Ok(Manifest::default()),
    }
}

fn report_publish(published: &Published, rendered: Result<RenderableCard>, printer: &Printer) {
    match rendered {
        Ok(card) => printer.status(
            "Published",
            &format!("{} {}", card.name, printer.dim(&format!("v{}", published.version))),
        ),
        Err(e) => printer.error("Unrenderable", &format!("{}: {}", published.record.name, e)),
    }
}
