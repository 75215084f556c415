use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// A child whose portfolio receives gifts. Belongs to one parent; the
// gift_link_code is the public handle contributors use to reach the gift page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Child {
    pub id: uuid::Uuid,
    pub parent_id: uuid::Uuid,
    pub name: String,
    pub age: i32,
    pub birthday: Option<NaiveDate>,
    pub gift_link_code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChild {
    pub name: String,
    pub age: i32,
    pub birthday: Option<NaiveDate>,
}

// Public view served on the gift page. Carries the parent's display name and
// nothing else about the family.
#[derive(Debug, Serialize, FromRow)]
pub struct GiftLinkChild {
    pub id: uuid::Uuid,
    pub name: String,
    pub age: i32,
    pub gift_link_code: String,
    pub parent_name: String,
}

impl Child {
    pub fn new(
        parent_id: uuid::Uuid,
        name: String,
        age: i32,
        birthday: Option<NaiveDate>,
        gift_link_code: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            parent_id,
            name,
            age,
            birthday,
            gift_link_code,
            created_at: chrono::Utc::now(),
        }
    }
}
