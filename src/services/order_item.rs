//! Order items, served by the shipping service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::aggregation::{related, CompositeEntity, DeletePolicy, UpdatePolicy};
use crate::error::AppResult;
use crate::external::{OrderSummaryDto, ProductDto, RemoteEnrichment};
use crate::models::{OrderItem, OrderItemId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    #[validate(range(min = 1))]
    pub order_id: i32,
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub ordered_quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderSummaryDto>,
}

pub struct OrderItemEntity;

#[async_trait]
impl CompositeEntity for OrderItemEntity {
    const KIND: &'static str = "OrderItem";
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Unchecked;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Unchecked;

    type Record = OrderItem;
    type Dto = OrderItemDto;
    type Context = ();

    fn key_of(dto: &OrderItemDto) -> OrderItemId {
        OrderItemId::new(dto.order_id, dto.product_id)
    }

    fn shell(record: OrderItem) -> OrderItemDto {
        OrderItemDto {
            order_id: record.order_id,
            product_id: record.product_id,
            ordered_quantity: record.ordered_quantity,
            product: None,
            order: None,
        }
    }

    fn to_record(dto: OrderItemDto) -> OrderItem {
        OrderItem {
            order_id: dto.order_id,
            product_id: dto.product_id,
            ordered_quantity: dto.ordered_quantity,
        }
    }

    async fn enrich(
        dto: &mut OrderItemDto,
        peers: &dyn RemoteEnrichment,
        _context: &(),
    ) -> AppResult<()> {
        dto.product = Some(related::<ProductDto>(peers, dto.product_id).await?);
        dto.order = Some(related::<OrderSummaryDto>(peers, dto.order_id).await?);
        Ok(())
    }
}
