use diesel::prelude::*;
use jiff::civil::DateTime;
use jiff_diesel::ToDiesel;

/// Order header. `cart_id` references a cart held by the same service.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: i32,
    pub order_date: DateTime,
    pub order_desc: Option<String>,
    pub order_fee: f64,
    pub cart_id: i32,
}

/// Row of the `orders` table.
#[derive(Debug, Queryable, Selectable, Insertable, Clone)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub order_id: i32,
    pub order_date: jiff_diesel::DateTime,
    pub order_desc: Option<String>,
    pub order_fee: f64,
    pub cart_id: i32,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            order_id: row.order_id,
            order_date: row.order_date.to_jiff(),
            order_desc: row.order_desc,
            order_fee: row.order_fee,
            cart_id: row.cart_id,
        }
    }
}

impl From<&Order> for OrderRow {
    fn from(record: &Order) -> Self {
        Self {
            order_id: record.order_id,
            order_date: record.order_date.to_diesel(),
            order_desc: record.order_desc.clone(),
            order_fee: record.order_fee,
            cart_id: record.cart_id,
        }
    }
}
