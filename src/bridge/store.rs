//! Observable bridge state.
//!
//! One writer, many readers. Each mutation replaces the published
//! [`BridgeSnapshot`] and wakes every subscriber; the last write wins.

use std::sync::Arc;
use tokio::sync::watch;

use crate::bridge::state::BridgeSnapshot;

#[derive(Debug, Clone)]
pub struct BridgeStore {
    tx: Arc<watch::Sender<BridgeSnapshot>>,
}

impl BridgeStore {
    pub fn new(initial: BridgeSnapshot) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> BridgeSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified after every change.
    pub fn subscribe(&self) -> watch::Receiver<BridgeSnapshot> {
        self.tx.subscribe()
    }

    /// Mutate in place and notify.
    pub fn update(&self, f: impl FnOnce(&mut BridgeSnapshot)) {
        self.tx.send_modify(f);
    }

    /// Replace wholesale and notify.
    pub fn replace(&self, snapshot: BridgeSnapshot) {
        self.tx.send_replace(snapshot);
    }
}

impl Default for BridgeStore {
    fn default() -> Self {
        Self::new(BridgeSnapshot::default())
    }
}
