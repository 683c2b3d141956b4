mod cart;
mod favourite;
mod keys;
mod order;
mod order_item;
mod payment;
mod product;
mod user;

pub use cart::Cart;
pub use favourite::{Favourite, FavouriteRow};
pub use keys::{FavouriteId, OrderItemId};
pub use order::{Order, OrderRow};
pub use order_item::OrderItem;
pub use payment::{Payment, PaymentStatus};
pub use product::{Category, Product};
pub use user::{RoleBasedAuthority, User};
