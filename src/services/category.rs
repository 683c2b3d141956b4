//! Product categories, owned by the product service. No relations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::aggregation::{CompositeEntity, DeletePolicy, UpdatePolicy};
use crate::error::AppResult;
use crate::external::RemoteEnrichment;
use crate::models::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub category_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub image_url: Option<String>,
}

pub struct CategoryEntity;

#[async_trait]
impl CompositeEntity for CategoryEntity {
    const KIND: &'static str = "Category";
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Unchecked;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Unchecked;

    type Record = Category;
    type Dto = CategoryDto;
    type Context = ();

    fn key_of(dto: &CategoryDto) -> i32 {
        dto.category_id
    }

    fn shell(record: Category) -> CategoryDto {
        CategoryDto {
            category_id: record.category_id,
            category_title: record.category_title,
            image_url: record.image_url,
        }
    }

    fn to_record(dto: CategoryDto) -> Category {
        Category {
            category_id: dto.category_id,
            category_title: dto.category_title,
            image_url: dto.image_url,
        }
    }

    async fn enrich(
        _dto: &mut CategoryDto,
        _peers: &dyn RemoteEnrichment,
        _context: &(),
    ) -> AppResult<()> {
        Ok(())
    }
}
