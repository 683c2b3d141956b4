//! Store contract shared by every local record kind.

use std::fmt::Display;
use std::hash::Hash;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    Cart, Category, Favourite, FavouriteId, Order, OrderItem, OrderItemId, Payment, Product, User,
};

/// A record a service owns and persists under a natural key.
pub trait StoredRecord: Clone + Send + Sync + 'static {
    type Key: Clone + Eq + Hash + Display + Send + Sync + 'static;

    fn key(&self) -> Self::Key;
}

/// Create/read/update/delete over one record kind.
///
/// `get` reports absence as `None`; `delete` reports whether a row existed.
/// `put` is an upsert that fully replaces any row under the same key.
#[async_trait]
pub trait LocalStore<R: StoredRecord>: Send + Sync {
    async fn get(&self, key: &R::Key) -> AppResult<Option<R>>;

    async fn get_all(&self) -> AppResult<Vec<R>>;

    async fn put(&self, record: R) -> AppResult<R>;

    async fn delete(&self, key: &R::Key) -> AppResult<bool>;
}

impl StoredRecord for Favourite {
    type Key = FavouriteId;

    fn key(&self) -> FavouriteId {
        self.id()
    }
}

impl StoredRecord for OrderItem {
    type Key = OrderItemId;

    fn key(&self) -> OrderItemId {
        self.id()
    }
}

impl StoredRecord for Cart {
    type Key = i32;

    fn key(&self) -> i32 {
        self.cart_id
    }
}

impl StoredRecord for Order {
    type Key = i32;

    fn key(&self) -> i32 {
        self.order_id
    }
}

impl StoredRecord for Payment {
    type Key = i32;

    fn key(&self) -> i32 {
        self.payment_id
    }
}

impl StoredRecord for User {
    type Key = i32;

    fn key(&self) -> i32 {
        self.user_id
    }
}

impl StoredRecord for Category {
    type Key = i32;

    fn key(&self) -> i32 {
        self.category_id
    }
}

impl StoredRecord for Product {
    type Key = i32;

    fn key(&self) -> i32 {
        self.product_id
    }
}
