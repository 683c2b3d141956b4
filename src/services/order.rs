//! Orders, owned by the order service.
//!
//! An order has no remote relations. Its cart lives in the same service,
//! so the nested cart is read from the local cart store, not from a peer.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::aggregation::{nested, CompositeEntity, DeletePolicy, UpdatePolicy};
use super::cart::{CartDto, CartEntity};
use crate::error::AppResult;
use crate::external::RemoteEnrichment;
use crate::models::{Cart, Order};
use crate::repositories::LocalStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[validate(range(min = 1))]
    pub order_id: i32,
    #[schema(value_type = String, example = "2024-01-15T10:00:00")]
    pub order_date: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub order_desc: Option<String>,
    #[validate(range(min = 0.0))]
    pub order_fee: f64,
    #[validate(range(min = 1))]
    pub cart_id: i32,
    /// Cart held by this service; its user is not fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<CartDto>,
}

pub struct OrderEntity;

#[async_trait]
impl CompositeEntity for OrderEntity {
    const KIND: &'static str = "Order";
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Unchecked;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Checked;

    type Record = Order;
    type Dto = OrderDto;
    type Context = Arc<dyn LocalStore<Cart>>;

    fn key_of(dto: &OrderDto) -> i32 {
        dto.order_id
    }

    fn shell(record: Order) -> OrderDto {
        OrderDto {
            order_id: record.order_id,
            order_date: record.order_date,
            order_desc: record.order_desc,
            order_fee: record.order_fee,
            cart_id: record.cart_id,
            cart: None,
        }
    }

    fn to_record(dto: OrderDto) -> Order {
        Order {
            order_id: dto.order_id,
            order_date: dto.order_date,
            order_desc: dto.order_desc,
            order_fee: dto.order_fee,
            cart_id: dto.cart_id,
        }
    }

    async fn enrich(
        dto: &mut OrderDto,
        _peers: &dyn RemoteEnrichment,
        carts: &Arc<dyn LocalStore<Cart>>,
    ) -> AppResult<()> {
        let cart = nested(carts.as_ref(), CartEntity::KIND, &dto.cart_id).await?;
        dto.cart = Some(CartEntity::shell(cart));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::external::testing::RecordingPeers;
    use crate::repositories::MemoryStore;
    use crate::services::AggregationService;
    use jiff::civil::date;

    fn order() -> Order {
        Order {
            order_id: 5,
            order_date: date(2024, 3, 1).at(9, 15, 0, 0),
            order_desc: Some("weekly groceries".to_string()),
            order_fee: 42.0,
            cart_id: 7,
        }
    }

    fn service_with(
        orders: Vec<Order>,
        carts: Vec<Cart>,
        peers: Arc<RecordingPeers>,
    ) -> AggregationService<OrderEntity> {
        AggregationService::<OrderEntity>::with_context(
            Arc::new(MemoryStore::with_records(orders)),
            peers,
            Arc::new(MemoryStore::with_records(carts)),
        )
    }

    fn cart() -> Cart {
        Cart {
            cart_id: 7,
            user_id: 3,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_nests_local_cart_without_peer_calls() {
        let peers = Arc::new(RecordingPeers::new());
        let service = service_with(vec![order()], vec![cart()], peers.clone());

        let dto = service.find_by_id(&5).await.unwrap();

        let held = dto.cart.clone().unwrap();
        assert_eq!((held.cart_id, held.user_id), (7, 3));
        assert!(held.user.is_none());
        assert_eq!(OrderEntity::to_record(dto), order());
        assert!(peers.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_cart_fails_the_read() {
        let service = service_with(vec![order()], vec![], Arc::new(RecordingPeers::new()));

        let err = service.find_by_id(&5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref entity, .. } if entity == "Cart"));
        assert_eq!(err.to_string(), "Cart with id: 7 not found");

        let err = service.find_all().await.unwrap_err();
        assert_eq!(err.to_string(), "Cart with id: 7 not found");
    }

    #[tokio::test]
    async fn test_save_answers_with_stored_cart_not_input_cart() {
        let service = service_with(vec![], vec![cart()], Arc::new(RecordingPeers::new()));

        let mut input = OrderEntity::shell(order());
        input.cart = Some(CartDto {
            cart_id: 7,
            user_id: 99,
            user: None,
        });

        let saved = service.save(input).await.unwrap();
        assert_eq!(saved.cart.map(|c| c.user_id), Some(3));
    }

    #[tokio::test]
    async fn test_delete_of_unknown_order_is_rejected_by_default() {
        let service = service_with(vec![order()], vec![cart()], Arc::new(RecordingPeers::new()));

        let err = service.delete_by_id(&6).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref id, .. } if id == "6"));

        service.delete_by_id(&5).await.unwrap();
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_wire_shape_omits_missing_description_and_cart() {
        let mut dto = OrderEntity::shell(order());
        dto.order_desc = None;

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["orderDate"], "2024-03-01T09:15:00");
        assert_eq!(value["cartId"], 7);
        assert!(value.get("orderDesc").is_none());
        assert!(value.get("cart").is_none());

        dto.cart = Some(CartEntity::shell(cart()));
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["cart"]["cartId"], 7);
        assert_eq!(value["cart"]["userId"], 3);
    }
}
