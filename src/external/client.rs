use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::peer::{unavailable, Peer, RemoteEnrichment};
use crate::config::{PeerConfig, PeersConfig};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone)]
struct Endpoint {
    base_url: String,
    timeout: Duration,
}

impl From<&PeerConfig> for Endpoint {
    fn from(config: &PeerConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// HTTP client for peer services
///
/// Built once at startup and shared by every service. All peers go through a
/// single pooled `reqwest::Client`; each request carries its own peer's
/// timeout.
///
/// - **Connection pooling**: idle connections are reused per host
/// - **Compression**: gzip responses are decoded transparently
/// - **Timeouts**: 5s connect, per-peer whole-request timeout
#[derive(Debug, Clone)]
pub struct PeerClient {
    client: reqwest::Client,
    endpoints: HashMap<Peer, Endpoint>,
}

impl PeerClient {
    pub fn from_config(config: &PeersConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .gzip(true)
            .user_agent(format!("storefront-rs/{}", crate::pkg_version()))
            .build()
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e).context("Failed to build peer HTTP client"),
            })?;

        let endpoints = HashMap::from([
            (Peer::UserService, Endpoint::from(&config.user_service)),
            (Peer::ProductService, Endpoint::from(&config.product_service)),
            (Peer::OrderService, Endpoint::from(&config.order_service)),
        ]);

        Ok(Self { client, endpoints })
    }

    fn endpoint(&self, peer: Peer) -> AppResult<&Endpoint> {
        self.endpoints
            .get(&peer)
            .ok_or_else(|| unavailable(peer, "no endpoint configured", None))
    }

    fn make_error(peer: Peer, url: &str, e: reqwest::Error) -> AppError {
        let reason = if e.is_timeout() {
            "timed out"
        } else if e.is_connect() {
            "connection failed"
        } else if e.is_decode() {
            "undecodable body"
        } else {
            "request failed"
        };
        unavailable(peer, format!("GET {} {}", url, reason), Some(e.into()))
    }
}

#[async_trait]
impl RemoteEnrichment for PeerClient {
    async fn fetch_json(&self, peer: Peer, id: i32) -> AppResult<serde_json::Value> {
        let endpoint = self.endpoint(peer)?;
        let url = format!("{}/api/{}/{}", endpoint.base_url, peer.collection(), id);

        let response = self
            .client
            .get(&url)
            .timeout(endpoint.timeout)
            .send()
            .await
            .map_err(|e| Self::make_error(peer, &url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::PeerNotFound {
                peer: peer.to_string(),
                id: id.to_string(),
            });
        }
        if !status.is_success() {
            return Err(unavailable(
                peer,
                format!("GET {} returned {}", url, status),
                None,
            ));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| Self::make_error(peer, &url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn user_by_id(Path(id): Path<i32>) -> Result<Json<Value>, AxumStatus> {
        match id {
            1 => Ok(Json(json!({"userId": 1, "firstName": "Ada"}))),
            500 => Err(AxumStatus::INTERNAL_SERVER_ERROR),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    async fn slow_product(Path(id): Path<i32>) -> Json<Value> {
        tokio::time::sleep(Duration::from_secs(3)).await;
        Json(json!({"productId": id}))
    }

    /// Serves a fake user and product service under `/user-service` and returns its base URL.
    async fn spawn_peer() -> String {
        let app = Router::new()
            .route("/user-service/api/users/{id}", get(user_by_id))
            .route("/product-service/api/products/{id}", get(slow_product));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base: &str) -> PeerClient {
        let config = PeersConfig {
            user_service: PeerConfig {
                base_url: format!("{}/user-service/", base),
                timeout_secs: 2,
            },
            product_service: PeerConfig {
                base_url: format!("{}/product-service", base),
                timeout_secs: 1,
            },
            // Nothing listens on port 1
            order_service: PeerConfig {
                base_url: "http://127.0.0.1:1/order-service".to_string(),
                timeout_secs: 1,
            },
        };
        PeerClient::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_json_returns_body() {
        let client = client_for(&spawn_peer().await);

        let body = client.fetch_json(Peer::UserService, 1).await.unwrap();
        assert_eq!(body["firstName"], "Ada");
    }

    #[tokio::test]
    async fn test_404_is_peer_not_found() {
        let client = client_for(&spawn_peer().await);

        let err = client.fetch_json(Peer::UserService, 2).await.unwrap_err();
        assert!(
            matches!(err, AppError::PeerNotFound { ref peer, ref id } if peer == "user-service" && id == "2")
        );
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let client = client_for(&spawn_peer().await);

        let err = client.fetch_json(Peer::UserService, 500).await.unwrap_err();
        assert!(matches!(err, AppError::PeerUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_unavailable() {
        let client = client_for(&spawn_peer().await);

        let err = client
            .fetch_json(Peer::ProductService, 7)
            .await
            .unwrap_err();
        match err {
            AppError::PeerUnavailable { peer, message, .. } => {
                assert_eq!(peer, "product-service");
                assert!(message.contains("timed out"), "unexpected message: {message}");
            }
            other => panic!("Expected PeerUnavailable, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_peer_is_unavailable() {
        let client = client_for(&spawn_peer().await);

        let err = client.fetch_json(Peer::OrderService, 1).await.unwrap_err();
        assert!(
            matches!(err, AppError::PeerUnavailable { ref peer, .. } if peer == "order-service")
        );
    }
}
