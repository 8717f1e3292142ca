//! Authentication data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{User, UserId};

/// User registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub national_number: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub national_number: String,
    pub password: String,
}

/// JWT claims for session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenClaims {
    pub sub: UserId,
    pub national_number: String,
    pub iat: i64,
    pub exp: i64,
}

/// Client-facing view of a user, without the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub national_number: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub profile_complete: bool,
    pub dark_mode: bool,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            national_number: user.national_number.clone(),
            full_name: user.full_name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            profile_complete: user.profile_complete,
            dark_mode: user.dark_mode,
            language: user.language.clone(),
            created_at: user.created_at,
        }
    }
}
