//! Repository layer for data access operations.
//!
//! Every record kind is reached through the [`LocalStore`] trait, backed
//! either by PostgreSQL (diesel_async) or by an in-process [`MemoryStore`].

mod cart_repo;
mod category_repo;
mod favourite_repo;
mod memory;
mod order_item_repo;
mod order_repo;
mod payment_repo;
mod product_repo;
mod store;
mod user_repo;

pub use cart_repo::CartRepository;
pub use category_repo::CategoryRepository;
pub use favourite_repo::FavouriteRepository;
pub use memory::MemoryStore;
pub use order_item_repo::OrderItemRepository;
pub use order_repo::OrderRepository;
pub use payment_repo::PaymentRepository;
pub use product_repo::ProductRepository;
pub use store::{LocalStore, StoredRecord};
pub use user_repo::UserRepository;

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::models::{Cart, Category, Favourite, Order, OrderItem, Payment, Product, User};

/// One store per record kind.
///
/// Cloning is cheap; every field is an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub favourites: Arc<dyn LocalStore<Favourite>>,
    pub order_items: Arc<dyn LocalStore<OrderItem>>,
    pub carts: Arc<dyn LocalStore<Cart>>,
    pub orders: Arc<dyn LocalStore<Order>>,
    pub payments: Arc<dyn LocalStore<Payment>>,
    pub users: Arc<dyn LocalStore<User>>,
    pub categories: Arc<dyn LocalStore<Category>>,
    pub products: Arc<dyn LocalStore<Product>>,
}

impl Repositories {
    /// PostgreSQL-backed stores sharing one connection pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            favourites: Arc::new(FavouriteRepository::new(pool.clone())),
            order_items: Arc::new(OrderItemRepository::new(pool.clone())),
            carts: Arc::new(CartRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool.clone())),
            payments: Arc::new(PaymentRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            categories: Arc::new(CategoryRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool)),
        }
    }

    /// Empty in-process stores.
    pub fn memory() -> Self {
        Self {
            favourites: Arc::new(MemoryStore::new()),
            order_items: Arc::new(MemoryStore::new()),
            carts: Arc::new(MemoryStore::new()),
            orders: Arc::new(MemoryStore::new()),
            payments: Arc::new(MemoryStore::new()),
            users: Arc::new(MemoryStore::new()),
            categories: Arc::new(MemoryStore::new()),
            products: Arc::new(MemoryStore::new()),
        }
    }
}
