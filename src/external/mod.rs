pub mod client;
pub mod peer;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use client::PeerClient;
pub use peer::{fetch, Peer, PeerEntity, RemoteEnrichment};
pub use types::{OrderSummaryDto, ProductDto, UserDto};
