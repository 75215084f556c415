use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// A parent/custodian account. Owns children and approves their gifts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: uuid::Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub bank_account: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub bank_account: Option<String>,
    pub profile_image_url: Option<String>,
}

// What we hand back over the API. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: uuid::Uuid,
    pub email: String,
    pub name: String,
    pub bank_account: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

impl User {
    pub fn new(email: String, password_hash: String, name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            email,
            password_hash,
            name,
            bank_account: None,
            profile_image_url: None,
            created_at: chrono::Utc::now(),
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            bank_account: user.bank_account,
            profile_image_url: user.profile_image_url,
            created_at: user.created_at,
        }
    }
}
