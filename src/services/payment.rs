//! Payments, one per order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::aggregation::{related, CompositeEntity, DeletePolicy, UpdatePolicy};
use crate::error::AppResult;
use crate::external::{OrderSummaryDto, RemoteEnrichment};
use crate::models::{Payment, PaymentStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    #[validate(range(min = 1))]
    pub payment_id: i32,
    #[validate(range(min = 1))]
    pub order_id: i32,
    pub is_payed: bool,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderSummaryDto>,
}

pub struct PaymentEntity;

#[async_trait]
impl CompositeEntity for PaymentEntity {
    const KIND: &'static str = "Payment";
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Unchecked;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Unchecked;

    type Record = Payment;
    type Dto = PaymentDto;
    type Context = ();

    fn key_of(dto: &PaymentDto) -> i32 {
        dto.payment_id
    }

    fn shell(record: Payment) -> PaymentDto {
        PaymentDto {
            payment_id: record.payment_id,
            order_id: record.order_id,
            is_payed: record.is_payed,
            payment_status: record.payment_status,
            order: None,
        }
    }

    fn to_record(dto: PaymentDto) -> Payment {
        Payment {
            payment_id: dto.payment_id,
            order_id: dto.order_id,
            is_payed: dto.is_payed,
            payment_status: dto.payment_status,
        }
    }

    async fn enrich(
        dto: &mut PaymentDto,
        peers: &dyn RemoteEnrichment,
        _context: &(),
    ) -> AppResult<()> {
        dto.order = Some(related::<OrderSummaryDto>(peers, dto.order_id).await?);
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

    #[tokio::test]
    async fn test_save_then_find_keeps_scalars() {
        let peers = Arc::new(
            RecordingPeers::new().with(Peer::OrderService, 5, json!({"orderId": 5, "orderDesc": "gift"})),
        );
        let service =
            AggregationService::<PaymentEntity>::new(Arc::new(MemoryStore::<Payment>::new()), peers.clone());

        let saved = service
            .save(PaymentDto {
                payment_id: 11,
                order_id: 5,
                is_payed: false,
                payment_status: PaymentStatus::InProgress,
                order: None,
            })
            .await
            .unwrap();
        let found = service.find_by_id(&11).await.unwrap();

        assert_eq!(found, saved);
        assert_eq!(found.payment_status, PaymentStatus::InProgress);
        assert_eq!(found.order.and_then(|o| o.order_desc).as_deref(), Some("gift"));
        assert_eq!(
            peers.calls(),
            vec![(Peer::OrderService, 5), (Peer::OrderService, 5)]
        );
    }

    #[tokio::test]
    async fn test_unreachable_order_service_fails_save_response() {
        let peers = Arc::new(RecordingPeers::new().with_down(Peer::OrderService));
        let service =
            AggregationService::<PaymentEntity>::new(Arc::new(MemoryStore::<Payment>::new()), peers);

        let err = service
            .save(PaymentDto {
                payment_id: 12,
                order_id: 5,
                is_payed: true,
                payment_status: PaymentStatus::Completed,
                order: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PeerUnavailable { .. }));
    }

    #[test]
    fn test_wire_shape() {
        let dto: PaymentDto = serde_json::from_value(json!({
            "paymentId": 1,
            "orderId": 2,
            "isPayed": true,
            "paymentStatus": "COMPLETED"
        }))
        .unwrap();
        assert_eq!(dto.payment_status, PaymentStatus::Completed);
        assert!(dto.order.is_none());
    }
}
