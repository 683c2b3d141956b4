//! User accounts, owned by the user service.
//!
//! A user has no remote relations. Its login credential is stored with the
//! account and always travels nested inside it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::aggregation::{CompositeEntity, DeletePolicy, UpdatePolicy};
use crate::error::AppResult;
use crate::external::RemoteEnrichment;
use crate::models::{RoleBasedAuthority, User};

fn granted() -> bool {
    true
}

/// Login credential of one user. The password is accepted but never returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDto {
    #[validate(range(min = 1))]
    pub credential_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[serde(skip_serializing)]
    #[schema(write_only)]
    #[validate(length(min = 1, max = 255))]
    pub password: String,
    pub role_based_authority: RoleBasedAuthority,
    #[serde(default = "granted")]
    pub is_enabled: bool,
    #[serde(default = "granted")]
    pub is_account_non_expired: bool,
    #[serde(default = "granted")]
    pub is_account_non_locked: bool,
    #[serde(default = "granted")]
    pub is_credentials_non_expired: bool,
}

/// Full user account as served by the user service.
///
/// Peers read the same document as [`crate::external::UserDto`], which
/// ignores the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailDto {
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub image_url: Option<String>,
    #[validate(email)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub phone: Option<String>,
    #[validate(nested)]
    pub credential: CredentialDto,
}

pub struct UserEntity;

#[async_trait]
impl CompositeEntity for UserEntity {
    const KIND: &'static str = "User";
    const UPDATE_POLICY: UpdatePolicy = UpdatePolicy::Unchecked;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Unchecked;

    type Record = User;
    type Dto = UserDetailDto;
    type Context = ();

    fn key_of(dto: &UserDetailDto) -> i32 {
        dto.user_id
    }

    fn shell(record: User) -> UserDetailDto {
        UserDetailDto {
            user_id: record.user_id,
            first_name: record.first_name,
            last_name: record.last_name,
            image_url: record.image_url,
            email: record.email,
            phone: record.phone,
            credential: CredentialDto {
                credential_id: record.credential_id,
                username: record.username,
                password: record.password,
                role_based_authority: record.role_based_authority,
                is_enabled: record.is_enabled,
                is_account_non_expired: record.is_account_non_expired,
                is_account_non_locked: record.is_account_non_locked,
                is_credentials_non_expired: record.is_credentials_non_expired,
            },
        }
    }

    fn to_record(dto: UserDetailDto) -> User {
        let credential = dto.credential;
        User {
            user_id: dto.user_id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            image_url: dto.image_url,
            email: dto.email,
            phone: dto.phone,
            credential_id: credential.credential_id,
            username: credential.username,
            password: credential.password,
            role_based_authority: credential.role_based_authority,
            is_enabled: credential.is_enabled,
            is_account_non_expired: credential.is_account_non_expired,
            is_account_non_locked: credential.is_account_non_locked,
            is_credentials_non_expired: credential.is_credentials_non_expired,
        }
    }

    async fn enrich(
        _dto: &mut UserDetailDto,
        _peers: &dyn RemoteEnrichment,
        _context: &(),
    ) -> AppResult<()> {
        Ok(())
    }
}
