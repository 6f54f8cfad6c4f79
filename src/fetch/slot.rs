//! The shared "current card" slot.
//!
//! One slot holds the card on display. Fetch tasks publish into it without
//! coordinating with each other: by default the last publish wins, even when
//! it carries an older fetch. Every publish replaces the whole record at once
//! and wakes subscribers, which rebuild their render model from scratch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Result;
use crate::render::{build, RenderableCard};
use crate::types::CardRecord;

/// How the slot treats publishes that arrive out of launch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublishPolicy {
    /// Every publish overwrites the slot, whatever its launch order.
    #[default]
    LastWriteWins,
    /// Drop a publish whose task was launched before the task that
    /// produced the current card.
    RejectStale,
}

/// A card as held by the slot.
#[derive(Debug, Clone)]
pub struct Published {
    pub record: Arc<CardRecord>,
    /// Number of accepted publishes so far; 0 for the initial card.
    pub version: u64,
    /// Launch sequence of the task that published, `None` for the initial card.
    pub sequence: Option<u64>,
}

/// Process-wide holder of the current card.
#[derive(Debug)]
pub struct SharedCardSlot {
    current: watch::Sender<Published>,
    policy: PublishPolicy,
    sequence: AtomicU64,
}

impl SharedCardSlot {
    pub fn new(initial: CardRecord) -> Self {
        Self::with_policy(initial, PublishPolicy::default())
    }

    pub fn with_policy(initial: CardRecord, policy: PublishPolicy) -> Self {
        let (current, _) = watch::channel(Published {
            record: Arc::new(initial),
            version: 0,
            sequence: None,
        });

        Self {
            current,
            policy,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> PublishPolicy {
        self.policy
    }

    /// Reserve the next launch sequence number.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    /// The card currently on display.
    pub fn current(&self) -> Arc<CardRecord> {
        Arc::clone(&self.current.borrow().record)
    }

    /// Number of accepted publishes so far.
    pub fn version(&self) -> u64 {
        self.current.borrow().version
    }

    /// Replace the current card.
    ///
    /// `sequence` is the publishing task's launch sequence. It only matters
    /// under [`PublishPolicy::RejectStale`]. Returns whether the card was
    /// accepted.
    pub fn publish(&self, record: CardRecord, sequence: u64) -> bool {
        let policy = self.policy;

        self.current.send_if_modified(move |current| {
            let stale = matches!(current.sequence, Some(held) if sequence < held);
            if policy == PublishPolicy::RejectStale && stale {
                return false;
            }

            current.record = Arc::new(record);
            current.version += 1;
            current.sequence = Some(sequence);
            true
        })
    }

    /// Subscribe to publishes.
    pub fn subscribe(&self) -> CardFeed {
        CardFeed {
            rx: self.current.subscribe(),
        }
    }

    /// Build the render model for the current card.
    pub fn render_current(&self) -> Result<RenderableCard> {
        build(&self.current())
    }
}

/// Change notifications from a [`SharedCardSlot`].
#[derive(Debug, Clone)]
pub struct CardFeed {
    rx: watch::Receiver<Published>,
}

impl CardFeed {
    /// Wait for the next publish. `None` once the slot is gone.
    pub async fn changed(&mut self) -> Option<Published> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait for the next publish and rebuild its render model.
    pub async fn next_render(&mut self) -> Option<(Published, Result<RenderableCard>)> {
        let published = self.changed().await?;
        let rendered = build(&published.record);
        Some((published, rendered))
    }

    /// The next unseen publish, if one is already waiting.
    pub fn try_changed(&mut self) -> Option<Published> {
        if self.rx.has_changed().unwrap_or(false) {
            Some(self.rx.borrow_and_update().clone())
        } else {
            None
        }
    }

    /// The latest published card, without waiting.
    pub fn latest(&self) -> Published {
        self.rx.borrow().clone()
    }
}
