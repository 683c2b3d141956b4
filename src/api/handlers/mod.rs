//! HTTP request handlers for API endpoints.
//!
//! Each service mounts only the resources it owns; see `routes`.

pub mod carts;
pub mod categories;
pub mod favourites;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod shippings;
pub mod users;
