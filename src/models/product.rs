use diesel::prelude::*;

/// Product category owned by the product service.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub category_id: i32,
    pub category_title: String,
    pub image_url: Option<String>,
}

/// Catalogue entry. `category_id` references a category held by the same service.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub product_id: i32,
    pub product_title: String,
    pub image_url: Option<String>,
    pub sku: String,
    pub price_unit: f64,
    pub quantity: i32,
    pub category_id: i32,
}
