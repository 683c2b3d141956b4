//! User repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use super::store::LocalStore;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore<User> for UserRepository {
    async fn get(&self, key: &i32) -> AppResult<Option<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .find(*key)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn get_all(&self) -> AppResult<Vec<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .order(user_id)
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn put(&self, record: User) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users)
            .values(&record)
            .on_conflict(user_id)
            .do_update()
            .set((
                first_name.eq(excluded(first_name)),
                last_name.eq(excluded(last_name)),
                image_url.eq(excluded(image_url)),
                email.eq(excluded(email)),
                phone.eq(excluded(phone)),
                credential_id.eq(excluded(credential_id)),
                username.eq(excluded(username)),
                password.eq(excluded(password)),
                role_based_authority.eq(excluded(role_based_authority)),
                is_enabled.eq(excluded(is_enabled)),
                is_account_non_expired.eq(excluded(is_account_non_expired)),
                is_account_non_locked.eq(excluded(is_account_non_locked)),
                is_credentials_non_expired.eq(excluded(is_credentials_non_expired)),
            ))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, key: &i32) -> AppResult<bool> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(users.find(*key)).execute(&mut conn).await?;
        Ok(affected > 0)
    }
}
