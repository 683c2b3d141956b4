use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Progress of a payment
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::NotStarted => "NOT_STARTED",
            PaymentStatus::InProgress => "IN_PROGRESS",
            PaymentStatus::Completed => "COMPLETED",
        }
    }
}

impl ToSql<Text, Pg> for PaymentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for PaymentStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "NOT_STARTED" => Ok(PaymentStatus::NotStarted),
            "IN_PROGRESS" => Ok(PaymentStatus::InProgress),
            "COMPLETED" => Ok(PaymentStatus::Completed),
            _ => Err(format!("Unrecognized payment_status: {}", s).into()),
        }
    }
}

/// Payment for an order held by the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Payment {
    pub payment_id: i32,
    pub order_id: i32,
    pub is_payed: bool,
    pub payment_status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        let parsed: PaymentStatus = serde_json::from_str("\"NOT_STARTED\"").unwrap();
        assert_eq!(parsed, PaymentStatus::NotStarted);
        assert_eq!(PaymentStatus::Completed.as_str(), "COMPLETED");
    }
}
