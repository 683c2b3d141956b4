//! Product repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use super::store::LocalStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::Product;

#[derive(Clone)]
pub struct ProductRepository {
    pool: AsyncDbPool,
}

impl ProductRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore<Product> for ProductRepository {
    async fn get(&self, key: &i32) -> AppResult<Option<Product>> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        products
            .find(*key)
            .select(Product::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn get_all(&self) -> AppResult<Vec<Product>> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        products
            .order(product_id)
            .select(Product::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn put(&self, record: Product) -> AppResult<Product> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(products)
            .values(&record)
            .on_conflict(product_id)
            .do_update()
            .set((
                product_title.eq(excluded(product_title)),
                image_url.eq(excluded(image_url)),
                sku.eq(excluded(sku)),
                price_unit.eq(excluded(price_unit)),
                quantity.eq(excluded(quantity)),
                category_id.eq(excluded(category_id)),
            ))
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, key: &i32) -> AppResult<bool> {
        use crate::schema::products::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(products.find(*key)).execute(&mut conn).await?;
        Ok(affected > 0)
    }
}
