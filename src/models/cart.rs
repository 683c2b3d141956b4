use diesel::prelude::*;

/// Shopping cart owned by the order service. `user_id` points into the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::carts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Cart {
    pub cart_id: i32,
    pub user_id: i32,
}
