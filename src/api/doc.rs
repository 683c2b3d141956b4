use utoipa::OpenApi;

use crate::api::handlers::{
    carts, categories, favourites, health, orders, payments, products, shippings, users,
};
use crate::config::ServiceKind;

pub const HEALTH_TAG: &str = "Health";
pub const FAVOURITE_TAG: &str = "Favourites";
pub const SHIPPING_TAG: &str = "Shippings";
pub const CART_TAG: &str = "Carts";
pub const ORDER_TAG: &str = "Orders";
pub const PAYMENT_TAG: &str = "Payments";
pub const USER_TAG: &str = "Users";
pub const CATEGORY_TAG: &str = "Categories";
pub const PRODUCT_TAG: &str = "Products";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront",
        description = "Composite entity services for the storefront",
    ),
    paths(health::health_check, health::readiness_check, health::liveness_check),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::HealthResponse,
            crate::external::UserDto,
            crate::external::ProductDto,
            crate::external::OrderSummaryDto,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = FAVOURITE_TAG, description = "Favourites, enriched with user and product"),
        (name = SHIPPING_TAG, description = "Order items, enriched with product and order"),
        (name = CART_TAG, description = "Carts, enriched with user"),
        (name = ORDER_TAG, description = "Orders, with their carts"),
        (name = PAYMENT_TAG, description = "Payments, enriched with order"),
        (name = USER_TAG, description = "User accounts, with their credentials"),
        (name = CATEGORY_TAG, description = "Product categories"),
        (name = PRODUCT_TAG, description = "Products, with their categories"),
    )
)]
pub struct ApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        favourites::find_all,
        favourites::find_by_path,
        favourites::find_by_body,
        favourites::save,
        favourites::update,
        favourites::delete_by_path,
        favourites::delete_by_body,
    ),
    components(schemas(crate::services::FavouriteDto, crate::models::FavouriteId))
)]
struct FavouriteApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        shippings::find_all,
        shippings::find_by_path,
        shippings::find_by_body,
        shippings::save,
        shippings::update,
        shippings::delete_by_path,
        shippings::delete_by_body,
    ),
    components(schemas(crate::services::OrderItemDto, crate::models::OrderItemId))
)]
struct ShippingApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        carts::find_all,
        carts::find_by_id,
        carts::save,
        carts::update,
        carts::update_by_id,
        carts::delete_by_id,
        orders::find_all,
        orders::find_by_id,
        orders::save,
        orders::update,
        orders::update_by_id,
        orders::delete_by_id,
    ),
    components(schemas(crate::services::CartDto, crate::services::OrderDto))
)]
struct OrderApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        payments::find_all,
        payments::find_by_id,
        payments::save,
        payments::update,
        payments::delete_by_id,
    ),
    components(schemas(crate::services::PaymentDto, crate::models::PaymentStatus))
)]
struct PaymentApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        users::find_all,
        users::find_by_id,
        users::save,
        users::update,
        users::update_by_id,
        users::delete_by_id,
    ),
    components(schemas(
        crate::services::UserDetailDto,
        crate::services::CredentialDto,
        crate::models::RoleBasedAuthority,
    ))
)]
struct UserApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        categories::find_all,
        categories::find_by_id,
        categories::save,
        categories::update,
        categories::update_by_id,
        categories::delete_by_id,
        products::find_all,
        products::find_by_id,
        products::save,
        products::update,
        products::update_by_id,
        products::delete_by_id,
    ),
    components(schemas(crate::services::CategoryDto, crate::services::ProductDetailDto))
)]
struct ProductApi;

/// OpenAPI document listing only the routes `service` mounts.
pub fn api_doc(service: ServiceKind) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = format!("Storefront {}", service.service_name());
    doc.merge(match service {
        ServiceKind::Favourite => FavouriteApi::openapi(),
        ServiceKind::Shipping => ShippingApi::openapi(),
        ServiceKind::Order => OrderApi::openapi(),
        ServiceKind::Payment => PaymentApi::openapi(),
        ServiceKind::User => UserApi::openapi(),
        ServiceKind::Product => ProductApi::openapi(),
    });
    doc
}
