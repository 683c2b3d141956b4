use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Authority granted to a credential
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum RoleBasedAuthority {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl RoleBasedAuthority {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleBasedAuthority::User => "ROLE_USER",
            RoleBasedAuthority::Admin => "ROLE_ADMIN",
        }
    }
}

impl ToSql<Text, Pg> for RoleBasedAuthority {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for RoleBasedAuthority {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "ROLE_USER" => Ok(RoleBasedAuthority::User),
            "ROLE_ADMIN" => Ok(RoleBasedAuthority::Admin),
            _ => Err(format!("Unrecognized role_based_authority: {}", s).into()),
        }
    }
}

/// User account owned by the user service.
///
/// The login credential is one-to-one with the account and is stored in
/// the same row; the DTO presents it as a nested object.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub credential_id: i32,
    pub username: String,
    pub password: String,
    pub role_based_authority: RoleBasedAuthority,
    pub is_enabled: bool,
    pub is_account_non_expired: bool,
    pub is_account_non_locked: bool,
    pub is_credentials_non_expired: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(
            serde_json::to_string(&RoleBasedAuthority::User).unwrap(),
            "\"ROLE_USER\""
        );
        let parsed: RoleBasedAuthority = serde_json::from_str("\"ROLE_ADMIN\"").unwrap();
        assert_eq!(parsed, RoleBasedAuthority::Admin);
        assert!(serde_json::from_str::<RoleBasedAuthority>("\"ADMIN\"").is_err());
    }
}
