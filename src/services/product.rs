//! Products, owned by the product service.
//!
//! A product has no remote relations; its category is read from the
//! service's own category store.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::aggregation::{nested, CompositeEntity, DeletePolicy, UpdatePolicy};
use super::category::{CategoryDto, CategoryEntity};
use crate::error::AppResult;
use crate::external::RemoteEnrichment;
use crate::models::{Category, Product};
use crate::repositories::LocalStore;

/// Full product as served by the product service.
///
/// Peers read the same document as [`crate::external::ProductDto`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailDto {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub product_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub sku: String,
    #[validate(range(min = 0.0))]
    pub price_unit: f64,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDto>,
}

pub struct ProductEntity;

#[async_trait]
impl CompositeEntity for ProductEntity {
    const KIND: &'static str = "Product";
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Unchecked;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Checked;

    type Record = Product;
    type Dto = ProductDetailDto;
    type Context = Arc<dyn LocalStore<Category>>;

    fn key_of(dto: &ProductDetailDto) -> i32 {
        dto.product_id
    }

    fn shell(record: Product) -> ProductDetailDto {
        ProductDetailDto {
            product_id: record.product_id,
            product_title: record.product_title,
            image_url: record.image_url,
            sku: record.sku,
            price_unit: record.price_unit,
            quantity: record.quantity,
            category_id: record.category_id,
            category: None,
        }
    }

    fn to_record(dto: ProductDetailDto) -> Product {
        Product {
            product_id: dto.product_id,
            product_title: dto.product_title,
            image_url: dto.image_url,
            sku: dto.sku,
            price_unit: dto.price_unit,
            quantity: dto.quantity,
            category_id: dto.category_id,
        }
    }

    async fn enrich(
        dto: &mut ProductDetailDto,
        _peers: &dyn RemoteEnrichment,
        categories: &Arc<dyn LocalStore<Category>>,
    ) -> AppResult<()> {
        let category = nested(categories.as_ref(), CategoryEntity::KIND, &dto.category_id).await?;
        dto.category = Some(CategoryEntity::shell(category));
        Ok(())
    }
}
