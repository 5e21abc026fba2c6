// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, Snapshot};
use anyhow::Result;
use rusqlite::Connection;
use std::time::{Duration, Instant};

/// TTL cache around ledger snapshots. Explicit object rather than module
/// state, with an injectable clock; the analytics engine never touches it
/// and operates only on the snapshots it hands out.
pub struct SnapshotCache {
    ttl: Duration,
    clock: fn() -> Instant,
    slot: Option<(Instant, Snapshot)>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Instant::now)
    }

    pub fn with_clock(ttl: Duration, clock: fn() -> Instant) -> Self {
        Self {
            ttl,
            clock,
            slot: None,
        }
    }

    pub fn get(&self) -> Option<&Snapshot> {
        match &self.slot {
            Some((at, snap)) if (self.clock)().duration_since(*at) < self.ttl => Some(snap),
            _ => None,
        }
    }

    pub fn set(&mut self, snap: Snapshot) {
        self.slot = Some(((self.clock)(), snap));
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// Cached snapshot if fresh, otherwise one fresh read of the ledger.
    /// Reports computed within the TTL share a view and stay self-consistent.
    pub fn fetch(&mut self, conn: &Connection) -> Result<&Snapshot> {
        if self.get().is_none() {
            let snap = ledger::snapshot(conn)?;
            self.set(snap);
        }
        match &self.slot {
            Some((_, snap)) => Ok(snap),
            None => Err(anyhow::anyhow!("snapshot cache empty after fill")),
        }
    }
}
