use diesel::prelude::*;
use jiff::civil::DateTime;
use jiff_diesel::ToDiesel;

use super::keys::FavouriteId;

/// A user's like of a product at a point in time. The whole record is its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Favourite {
    pub user_id: i32,
    pub product_id: i32,
    pub like_date: DateTime,
}

impl Favourite {
    pub fn id(&self) -> FavouriteId {
        FavouriteId::new(self.user_id, self.product_id, self.like_date)
    }
}

/// Row of the `favourites` table.
#[derive(Debug, Queryable, Selectable, Insertable, Clone)]
#[diesel(table_name = crate::schema::favourites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FavouriteRow {
    pub user_id: i32,
    pub product_id: i32,
    pub like_date: jiff_diesel::DateTime,
}

impl From<FavouriteRow> for Favourite {
    fn from(row: FavouriteRow) -> Self {
        Self {
            user_id: row.user_id,
            product_id: row.product_id,
            like_date: row.like_date.to_jiff(),
        }
    }
}

impl From<&Favourite> for FavouriteRow {
    fn from(record: &Favourite) -> Self {
        Self {
            user_id: record.user_id,
            product_id: record.product_id,
            like_date: record.like_date.to_diesel(),
        }
    }
}
