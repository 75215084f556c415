use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// A registered gift giver. Guests can gift with just a name and email; the
// account exists so repeat givers can see their gifting history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contributor {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateContributor {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContributorProfile {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct ContributorAuthResponse {
    pub token: String,
    pub contributor: ContributorProfile,
}

impl Contributor {
    pub fn new(name: String, email: String, phone: Option<String>, password_hash: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            created_at: chrono::Utc::now(),
        }
    }
}

impl From<Contributor> for ContributorProfile {
    fn from(contributor: Contributor) -> Self {
        Self {
            id: contributor.id,
            name: contributor.name,
            email: contributor.email,
            phone: contributor.phone,
            created_at: contributor.created_at,
        }
    }
}
