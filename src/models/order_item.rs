use diesel::prelude::*;

use super::keys::OrderItemId;

/// Quantity of one product shipped as part of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub ordered_quantity: i32,
}

impl OrderItem {
    pub fn id(&self) -> OrderItemId {
        OrderItemId::new(self.order_id, self.product_id)
    }
}
