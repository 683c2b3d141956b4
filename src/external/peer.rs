//! Peer services and the enrichment contract.

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// A service this process fetches related entities from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Peer {
    UserService,
    ProductService,
    OrderService,
}

impl Peer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Peer::UserService => "user-service",
            Peer::ProductService => "product-service",
            Peer::OrderService => "order-service",
        }
    }

    /// Path segment under `/api` holding this peer's entities
    pub fn collection(&self) -> &'static str {
        match self {
            Peer::UserService => "users",
            Peer::ProductService => "products",
            Peer::OrderService => "orders",
        }
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity served by a peer, identified by an integer id.
pub trait PeerEntity: DeserializeOwned + Send {
    const PEER: Peer;

    fn peer_id(&self) -> i32;
}

/// Fetch-by-id against a peer service.
///
/// One call is one request. Implementations report a peer's "no such entity"
/// answer as `AppError::PeerNotFound` and every other failure as
/// `AppError::PeerUnavailable`.
#[async_trait]
pub trait RemoteEnrichment: Send + Sync {
    async fn fetch_json(&self, peer: Peer, id: i32) -> AppResult<serde_json::Value>;
}

pub(crate) fn unavailable(
    peer: Peer,
    message: impl Into<String>,
    source: Option<anyhow::Error>,
) -> AppError {
    AppError::PeerUnavailable {
        peer: peer.to_string(),
        message: message.into(),
        source,
    }
}

/// Fetches and decodes `T`, rejecting a body that describes a different entity.
pub async fn fetch<T: PeerEntity>(peers: &dyn RemoteEnrichment, id: i32) -> AppResult<T> {
    let body = peers.fetch_json(T::PEER, id).await?;

    let entity: T = serde_json::from_value(body).map_err(|e| {
        unavailable(
            T::PEER,
            format!("undecodable body for id {}: {}", id, e),
            Some(e.into()),
        )
    })?;

    if entity.peer_id() != id {
        return Err(unavailable(
            T::PEER,
            format!("asked for id {} but got {}", id, entity.peer_id()),
            None,
        ));
    }

    Ok(entity)
}
