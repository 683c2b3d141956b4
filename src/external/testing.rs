//! In-process stand-in for peer services.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::peer::{unavailable, Peer, RemoteEnrichment};
use crate::error::{AppError, AppResult};

/// Answers from a fixed table and records every call in order.
#[derive(Debug, Default)]
pub struct RecordingPeers {
    responses: HashMap<(Peer, i32), serde_json::Value>,
    down: HashSet<Peer>,
    calls: Mutex<Vec<(Peer, i32)>>,
}

impl RecordingPeers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, peer: Peer, id: i32, body: serde_json::Value) -> Self {
        self.responses.insert((peer, id), body);
        self
    }

    /// Every call to `peer` fails as unreachable.
    pub fn with_down(mut self, peer: Peer) -> Self {
        self.down.insert(peer);
        self
    }

    pub fn calls(&self) -> Vec<(Peer, i32)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RemoteEnrichment for RecordingPeers {
    async fn fetch_json(&self, peer: Peer, id: i32) -> AppResult<serde_json::Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((peer, id));
        }

        if self.down.contains(&peer) {
            return Err(unavailable(peer, "connection refused", None));
        }

        self.responses
            .get(&(peer, id))
            .cloned()
            .ok_or_else(|| AppError::PeerNotFound {
                peer: peer.to_string(),
                id: id.to_string(),
            })
    }
}
