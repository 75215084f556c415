use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SproutRequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl SproutRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SproutRequestStatus::Pending => "pending",
            SproutRequestStatus::Accepted => "accepted",
            SproutRequestStatus::Declined => "declined",
        }
    }
}

// A parent-initiated invitation asking someone to contribute to a child.
// The request_code is what goes out in the text message.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SproutRequest {
    pub id: uuid::Uuid,
    pub parent_id: uuid::Uuid,
    pub child_id: uuid::Uuid,
    pub contributor_name: String,
    pub phone: String,
    pub request_code: String,
    pub status: String,
    pub responded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSproutRequest {
    pub child_id: uuid::Uuid,
    pub contributor_name: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct RespondSproutRequest {
    pub accept: bool,
}

impl SproutRequest {
    pub fn new(
        parent_id: uuid::Uuid,
        child_id: uuid::Uuid,
        contributor_name: String,
        phone: String,
        request_code: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            parent_id,
            child_id,
            contributor_name,
            phone,
            request_code,
            status: SproutRequestStatus::Pending.as_str().to_string(),
            responded_at: None,
            created_at: chrono::Utc::now(),
        }
    }
}
