//! Fetching cards from a store into the shared slot.
//!
//! - `CardStore` - async document source (`MemoryStore`, `JsonDirStore`)
//! - `SharedCardSlot` - the card on display, with change notifications
//! - `FetchOrchestrator` - independent fetch-delay-publish tasks

mod orchestrator;
mod slot;
mod store;

pub use orchestrator::{FetchOrchestrator, FetchRun, FetchTask, TaskReport, TaskState};
pub use slot::{CardFeed, PublishPolicy, Published, SharedCardSlot};
pub use store::{CardStore, JsonDirStore, MemoryStore};
