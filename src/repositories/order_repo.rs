//! Order repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use super::store::LocalStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Order, OrderRow};

#[derive(Clone)]
pub struct OrderRepository {
    pool: AsyncDbPool,
}

impl OrderRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore<Order> for OrderRepository {
    async fn get(&self, key: &i32) -> AppResult<Option<Order>> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.pool.get().await?;

        orders
            .find(*key)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Order::from))
            .map_err(AppError::from)
    }

    async fn get_all(&self) -> AppResult<Vec<Order>> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows = orders
            .order(order_id)
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn put(&self, record: Order) -> AppResult<Order> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(orders)
            .values(OrderRow::from(&record))
            .on_conflict(order_id)
            .do_update()
            .set((
                order_date.eq(excluded(order_date)),
                order_desc.eq(excluded(order_desc)),
                order_fee.eq(excluded(order_fee)),
                cart_id.eq(excluded(cart_id)),
            ))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Order::from)
            .map_err(AppError::from)
    }

    async fn delete(&self, key: &i32) -> AppResult<bool> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(orders.find(*key)).execute(&mut conn).await?;
        Ok(affected > 0)
    }
}
