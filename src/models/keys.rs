//! Multi-field natural keys.
//!
//! Composite keys render as a brace-delimited tuple, e.g. `{1,1,2024-01-15T10:30:00}`.
//! Every component is mandatory.

use std::fmt;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Natural key of a favourite: who liked what, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteId {
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[schema(value_type = String, example = "2024-01-15T10:30:00")]
    pub like_date: DateTime,
}

impl FavouriteId {
    pub fn new(user_id: i32, product_id: i32, like_date: DateTime) -> Self {
        Self {
            user_id,
            product_id,
            like_date,
        }
    }
}

impl fmt::Display for FavouriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{},{}}}", self.user_id, self.product_id, self.like_date)
    }
}

/// Natural key of an order line: one product within one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemId {
    #[validate(range(min = 1))]
    pub order_id: i32,
    #[validate(range(min = 1))]
    pub product_id: i32,
}

impl OrderItemId {
    pub fn new(order_id: i32, product_id: i32) -> Self {
        Self {
            order_id,
            product_id,
        }
    }
}

impl fmt::Display for OrderItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}", self.order_id, self.product_id)
    }
}
