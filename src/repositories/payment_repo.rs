//! Payment repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use super::store::LocalStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Payment;

#[derive(Clone)]
pub struct PaymentRepository {
    pool: AsyncDbPool,
}

impl PaymentRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore<Payment> for PaymentRepository {
    async fn get(&self, key: &i32) -> AppResult<Option<Payment>> {
        use crate::schema::payments::dsl::*;
        let mut conn = self.pool.get().await?;

        payments
            .find(*key)
            .select(Payment::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn get_all(&self) -> AppResult<Vec<Payment>> {
        use crate::schema::payments::dsl::*;
        let mut conn = self.pool.get().await?;

        payments
            .order(payment_id)
            .select(Payment::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn put(&self, record: Payment) -> AppResult<Payment> {
        use crate::schema::payments::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(payments)
            .values(&record)
            .on_conflict(payment_id)
            .do_update()
            .set((
                order_id.eq(excluded(order_id)),
                is_payed.eq(excluded(is_payed)),
                payment_status.eq(excluded(payment_status)),
            ))
            .returning(Payment::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, key: &i32) -> AppResult<bool> {
        use crate::schema::payments::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(payments.find(*key)).execute(&mut conn).await?;
        Ok(affected > 0)
    }
}
