//! Favourites: a user liking a product at a point in time.

use async_trait::async_trait;
use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::aggregation::{related, CompositeEntity, DeletePolicy, UpdatePolicy};
use crate::error::AppResult;
use crate::external::{ProductDto, RemoteEnrichment, UserDto};
use crate::models::{Favourite, FavouriteId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteDto {
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[schema(value_type = String, example = "2024-01-15T10:30:00")]
    pub like_date: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductDto>,
}

pub struct FavouriteEntity;

#[async_trait]
impl CompositeEntity for FavouriteEntity {
    const KIND: &'static str = "Favourite";
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Unchecked;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Unchecked;

    type Record = Favourite;
    type Dto = FavouriteDto;
    type Context = ();

    fn key_of(dto: &FavouriteDto) -> FavouriteId {
        FavouriteId::new(dto.user_id, dto.product_id, dto.like_date)
    }

    fn shell(record: Favourite) -> FavouriteDto {
        FavouriteDto {
            user_id: record.user_id,
            product_id: record.product_id,
            like_date: record.like_date,
            user: None,
            product: None,
        }
    }

    fn to_record(dto: FavouriteDto) -> Favourite {
        Favourite {
            user_id: dto.user_id,
            product_id: dto.product_id,
            like_date: dto.like_date,
        }
    }

    async fn enrich(
        dto: &mut FavouriteDto,
        peers: &dyn RemoteEnrichment,
        _context: &(),
    ) -> AppResult<()> {
        dto.user = Some(related::<UserDto>(peers, dto.user_id).await?);
        dto.product = Some(related::<ProductDto>(peers, dto.product_id).await?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use serde_json::json;

    #[test]
    fn test_dto_wire_shape() {
        let dto = FavouriteEntity::shell(Favourite {
            user_id: 1,
            product_id: 4,
            like_date: date(2024, 1, 15).at(10, 30, 0, 0),
        });

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            value,
            json!({"userId": 1, "productId": 4, "likeDate": "2024-01-15T10:30:00"})
        );
    }

    #[test]
    fn test_to_record_drops_nested_objects() {
        let dto: FavouriteDto = serde_json::from_value(json!({
            "userId": 1,
            "productId": 4,
            "likeDate": "2024-01-15T10:30:00",
            "user": {"userId": 1, "firstName": "Ada"}
        }))
        .unwrap();

        let key = FavouriteEntity::key_of(&dto);
        let record = FavouriteEntity::to_record(dto);
        assert_eq!(record.id(), key);
    }

    #[test]
    fn test_validation_rejects_non_positive_ids() {
        let mut dto = FavouriteEntity::shell(Favourite {
            user_id: 0,
            product_id: 4,
            like_date: date(2024, 1, 15).at(10, 30, 0, 0),
        });
        assert!(dto.validate().is_err());

        dto.user_id = 1;
        assert!(dto.validate().is_ok());
    }
}
