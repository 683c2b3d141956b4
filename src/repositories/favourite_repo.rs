//! Favourite repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::ToDiesel;

use super::store::LocalStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Favourite, FavouriteId, FavouriteRow};

/// Favourites table access. Every column is part of the key, so writes never update.
#[derive(Clone)]
pub struct FavouriteRepository {
    pool: AsyncDbPool,
}

impl FavouriteRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore<Favourite> for FavouriteRepository {
    async fn get(&self, key: &FavouriteId) -> AppResult<Option<Favourite>> {
        use crate::schema::favourites::dsl::*;
        let mut conn = self.pool.get().await?;

        favourites
            .filter(user_id.eq(key.user_id))
            .filter(product_id.eq(key.product_id))
            .filter(like_date.eq(key.like_date.to_diesel()))
            .select(FavouriteRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Favourite::from))
            .map_err(AppError::from)
    }

    async fn get_all(&self) -> AppResult<Vec<Favourite>> {
        use crate::schema::favourites::dsl::*;
        let mut conn = self.pool.get().await?;

        let rows = favourites
            .order((user_id, product_id, like_date))
            .select(FavouriteRow::as_select())
            .load(&mut conn)
            .await?;

        Ok(rows.into_iter().map(Favourite::from).collect())
    }

    async fn put(&self, record: Favourite) -> AppResult<Favourite> {
        use crate::schema::favourites::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(favourites)
            .values(FavouriteRow::from(&record))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await?;

        Ok(record)
    }

    async fn delete(&self, key: &FavouriteId) -> AppResult<bool> {
        use crate::schema::favourites::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(
            favourites
                .filter(user_id.eq(key.user_id))
                .filter(product_id.eq(key.product_id))
                .filter(like_date.eq(key.like_date.to_diesel())),
        )
        .execute(&mut conn)
        .await?;

        Ok(affected > 0)
    }
}
