//! Cart repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use super::store::LocalStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Cart;

#[derive(Clone)]
pub struct CartRepository {
    pool: AsyncDbPool,
}

impl CartRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore<Cart> for CartRepository {
    async fn get(&self, key: &i32) -> AppResult<Option<Cart>> {
        use crate::schema::carts::dsl::*;
        let mut conn = self.pool.get().await?;

        carts
            .find(*key)
            .select(Cart::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn get_all(&self) -> AppResult<Vec<Cart>> {
        use crate::schema::carts::dsl::*;
        let mut conn = self.pool.get().await?;

        carts
            .order(cart_id)
            .select(Cart::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn put(&self, record: Cart) -> AppResult<Cart> {
        use crate::schema::carts::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(carts)
            .values(&record)
            .on_conflict(cart_id)
            .do_update()
            .set(user_id.eq(excluded(user_id)))
            .returning(Cart::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, key: &i32) -> AppResult<bool> {
        use crate::schema::carts::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(carts.find(*key)).execute(&mut conn).await?;
        Ok(affected > 0)
    }
}
