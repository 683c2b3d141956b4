//! Service layer for business logic operations.
//!
//! Every entity kind is served by one [`AggregationService`], which reads
//! local records and completes them with related entities from peer services.

mod aggregation;
pub mod cart;
pub mod category;
pub mod favourite;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod user;

pub use aggregation::{
    nested, related, AggregationService, CompositeEntity, DeletePolicy, KeyOf, UpdatePolicy,
};
pub use cart::{CartDto, CartEntity};
pub use category::{CategoryDto, CategoryEntity};
pub use favourite::{FavouriteDto, FavouriteEntity};
pub use order::{OrderDto, OrderEntity};
pub use order_item::{OrderItemDto, OrderItemEntity};
pub use payment::{PaymentDto, PaymentEntity};
pub use product::{ProductDetailDto, ProductEntity};
pub use user::{CredentialDto, UserDetailDto, UserEntity};

use std::sync::Arc;

use crate::config::PoliciesConfig;
use crate::external::RemoteEnrichment;
use crate::repositories::Repositories;

pub type FavouriteService = AggregationService<FavouriteEntity>;
pub type OrderItemService = AggregationService<OrderItemEntity>;
pub type CartService = AggregationService<CartEntity>;
pub type OrderService = AggregationService<OrderEntity>;
pub type PaymentService = AggregationService<PaymentEntity>;
pub type UserService = AggregationService<UserEntity>;
pub type CategoryService = AggregationService<CategoryEntity>;
pub type ProductService = AggregationService<ProductEntity>;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since stores and the peer client sit behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub favourites: FavouriteService,
    pub order_items: OrderItemService,
    pub carts: CartService,
    pub orders: OrderService,
    pub payments: PaymentService,
    pub users: UserService,
    pub categories: CategoryService,
    pub products: ProductService,
}

impl Services {
    /// Creates every service over the given stores, sharing one peer client.
    ///
    /// Orders read their carts, and products their categories, from the
    /// same stores the cart and category services write to.
    pub fn new(
        repos: Repositories,
        peers: Arc<dyn RemoteEnrichment>,
        policies: &PoliciesConfig,
    ) -> Self {
        Self {
            favourites: FavouriteService::new(repos.favourites, peers.clone())
                .with_policy(policies.favourite),
            order_items: OrderItemService::new(repos.order_items, peers.clone())
                .with_policy(policies.order_item),
            carts: CartService::new(repos.carts.clone(), peers.clone()).with_policy(policies.cart),
            orders: OrderService::with_context(repos.orders, peers.clone(), repos.carts)
                .with_policy(policies.order),
            payments: PaymentService::new(repos.payments, peers.clone())
                .with_policy(policies.payment),
            users: UserService::new(repos.users, peers.clone()).with_policy(policies.user),
            categories: CategoryService::new(repos.categories.clone(), peers.clone())
                .with_policy(policies.category),
            products: ProductService::with_context(repos.products, peers, repos.categories)
                .with_policy(policies.product),
        }
    }
}
