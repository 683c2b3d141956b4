//! Carts, owned by the order service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::aggregation::{related, CompositeEntity, DeletePolicy, UpdatePolicy};
use crate::error::AppResult;
use crate::external::{RemoteEnrichment, UserDto};
use crate::models::Cart;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    #[validate(range(min = 1))]
    pub cart_id: i32,
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}

pub struct CartEntity;

#[async_trait]
impl CompositeEntity for CartEntity {
    const KIND: &'static str = "Cart";
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Unchecked;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Unchecked;

    type Record = Cart;
    type Dto = CartDto;
    type Context = ();

    fn key_of(dto: &CartDto) -> i32 {
        dto.cart_id
    }

    fn shell(record: Cart) -> CartDto {
        CartDto {
            cart_id: record.cart_id,
            user_id: record.user_id,
            user: None,
        }
    }

    fn to_record(dto: CartDto) -> Cart {
        Cart {
            cart_id: dto.cart_id,
            user_id: dto.user_id,
        }
    }

    async fn enrich(
        dto: &mut CartDto,
        peers: &dyn RemoteEnrichment,
        _context: &(),
    ) -> AppResult<()> {
        dto.user = Some(related::<UserDto>(peers, dto.user_id).await?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::external::testing::RecordingPeers;
    use crate::external::Peer;
    use crate::repositories::MemoryStore;
    use crate::services::AggregationService;
    use serde_json::json;
    use std::sync::Arc;

    fn service(
        carts: Vec<Cart>,
        peers: Arc<RecordingPeers>,
    ) -> AggregationService<CartEntity> {
        AggregationService::<CartEntity>::new(Arc::new(MemoryStore::with_records(carts)), peers)
    }

    #[tokio::test]
    async fn test_body_update_of_unknown_cart_creates_it() {
        let peers = Arc::new(RecordingPeers::new().with(Peer::UserService, 1, json!({"userId": 1})));
        let service = service(vec![], peers.clone());

        let dto = service
            .update(CartDto {
                cart_id: 7,
                user_id: 1,
                user: None,
            })
            .await
            .unwrap();

        assert_eq!(dto.cart_id, 7);
        assert_eq!(dto.user.map(|u| u.user_id), Some(1));
        assert_eq!(service.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_existing_of_unknown_cart_is_rejected() {
        let peers = Arc::new(RecordingPeers::new());
        let service = service(vec![], peers.clone());

        let err = service
            .update_existing(CartDto {
                cart_id: 7,
                user_id: 1,
                user: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Cart with id: 7 not found");
        assert!(matches!(err, AppError::NotFound { .. }));
        assert!(peers.calls().is_empty());
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_existing_cart_replaces_it() {
        let peers = Arc::new(
            RecordingPeers::new().with(Peer::UserService, 2, json!({"userId": 2, "email": "b@shop.test"})),
        );
        let service = service(
            vec![Cart {
                cart_id: 7,
                user_id: 1,
            }],
            peers.clone(),
        );

        let dto = service
            .update_existing(CartDto {
                cart_id: 7,
                user_id: 2,
                user: None,
            })
            .await
            .unwrap();

        assert_eq!(dto.user_id, 2);
        assert_eq!(dto.user.and_then(|u| u.email).as_deref(), Some("b@shop.test"));
        assert_eq!(peers.calls(), vec![(Peer::UserService, 2)]);
    }
}
