//! Category repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use super::store::LocalStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Category;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore<Category> for CategoryRepository {
    async fn get(&self, key: &i32) -> AppResult<Option<Category>> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        categories
            .find(*key)
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn get_all(&self) -> AppResult<Vec<Category>> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        categories
            .order(category_id)
            .select(Category::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn put(&self, record: Category) -> AppResult<Category> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(categories)
            .values(&record)
            .on_conflict(category_id)
            .do_update()
            .set((
                category_title.eq(excluded(category_title)),
                image_url.eq(excluded(image_url)),
            ))
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, key: &i32) -> AppResult<bool> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(categories.find(*key))
            .execute(&mut conn)
            .await?;
        Ok(affected > 0)
    }
}
