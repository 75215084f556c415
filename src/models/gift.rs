use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftStatus {
    Pending,
    Approved,
    Rejected,
}

impl GiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GiftStatus::Pending => "pending",
            GiftStatus::Approved => "approved",
            GiftStatus::Rejected => "rejected",
        }
    }
}

// A contribution toward a child's portfolio. Stays pending until the parent
// approves or rejects it; only approval touches the holdings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Gift {
    pub id: uuid::Uuid,
    pub child_id: uuid::Uuid,
    pub contributor_id: Option<uuid::Uuid>,
    pub contributor_name: String,
    pub contributor_email: Option<String>,
    pub investment_id: uuid::Uuid,
    pub amount: BigDecimal,
    pub shares: BigDecimal,
    pub status: String,
    pub message: Option<String>,
    pub video_url: Option<String>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub rejected_at: Option<chrono::DateTime<chrono::Utc>>,
    pub viewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// Gift creation payload. investment_id is either an existing investment's
// UUID or a `temp_<SYMBOL>` marker straight out of search results, which we
// materialize into a real investment before the gift row is written.
#[derive(Debug, Deserialize)]
pub struct CreateGift {
    pub child_id: uuid::Uuid,
    pub investment_id: String,
    pub amount: BigDecimal,
    pub contributor_name: String,
    pub contributor_email: Option<String>,
    pub message: Option<String>,
    pub video_url: Option<String>,
}

// Gift joined with its investment, for child and contributor dashboards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GiftWithInvestment {
    pub id: uuid::Uuid,
    pub child_id: uuid::Uuid,
    pub contributor_id: Option<uuid::Uuid>,
    pub contributor_name: String,
    pub contributor_email: Option<String>,
    pub investment_id: uuid::Uuid,
    pub amount: BigDecimal,
    pub shares: BigDecimal,
    pub status: String,
    pub message: Option<String>,
    pub video_url: Option<String>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub rejected_at: Option<chrono::DateTime<chrono::Utc>>,
    pub viewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub symbol: String,
    pub investment_name: String,
    pub investment_type: String,
    pub current_price: BigDecimal,
}

impl Gift {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        child_id: uuid::Uuid,
        contributor_id: Option<uuid::Uuid>,
        contributor_name: String,
        contributor_email: Option<String>,
        investment_id: uuid::Uuid,
        amount: BigDecimal,
        shares: BigDecimal,
        message: Option<String>,
        video_url: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            child_id,
            contributor_id,
            contributor_name,
            contributor_email,
            investment_id,
            amount,
            shares,
            status: GiftStatus::Pending.as_str().to_string(),
            message,
            video_url,
            approved_at: None,
            rejected_at: None,
            viewed_at: None,
            created_at: chrono::Utc::now(),
        }
    }
}
