//! Order item repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use super::store::LocalStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{OrderItem, OrderItemId};

#[derive(Clone)]
pub struct OrderItemRepository {
    pool: AsyncDbPool,
}

impl OrderItemRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore<OrderItem> for OrderItemRepository {
    async fn get(&self, key: &OrderItemId) -> AppResult<Option<OrderItem>> {
        use crate::schema::order_items::dsl::*;
        let mut conn = self.pool.get().await?;

        order_items
            .find((key.order_id, key.product_id))
            .select(OrderItem::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn get_all(&self) -> AppResult<Vec<OrderItem>> {
        use crate::schema::order_items::dsl::*;
        let mut conn = self.pool.get().await?;

        order_items
            .order((order_id, product_id))
            .select(OrderItem::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn put(&self, record: OrderItem) -> AppResult<OrderItem> {
        use crate::schema::order_items::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(order_items)
            .values(&record)
            .on_conflict((order_id, product_id))
            .do_update()
            .set(ordered_quantity.eq(excluded(ordered_quantity)))
            .returning(OrderItem::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, key: &OrderItemId) -> AppResult<bool> {
        use crate::schema::order_items::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(order_items.find((key.order_id, key.product_id)))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }
}
