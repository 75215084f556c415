use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        }
    }
}

// A standing intention to gift on a schedule. This is a plan record only;
// nothing executes it automatically.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecurringContribution {
    pub id: uuid::Uuid,
    pub child_id: uuid::Uuid,
    pub contributor_name: String,
    pub contributor_email: Option<String>,
    pub investment_id: Option<uuid::Uuid>,
    pub amount: BigDecimal,
    pub frequency: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecurringContribution {
    pub child_id: uuid::Uuid,
    pub contributor_name: String,
    pub contributor_email: Option<String>,
    pub investment_id: Option<uuid::Uuid>,
    pub amount: BigDecimal,
    pub frequency: Frequency,
}

impl RecurringContribution {
    pub fn new(data: CreateRecurringContribution) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            child_id: data.child_id,
            contributor_name: data.contributor_name,
            contributor_email: data.contributor_email,
            investment_id: data.investment_id,
            amount: data.amount,
            frequency: data.frequency.as_str().to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}
