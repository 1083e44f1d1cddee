use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(BookingError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub role: UserRole,
    pub band_id: Option<Uuid>,
    pub email: String,
}

/// Registration body. Everything is optional at the wire level so missing
/// fields surface as a validation error instead of a decoder rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    #[serde(
        default,
        alias = "bandId",
        deserialize_with = "crate::models::request::empty_uuid_as_none"
    )]
    pub band_id: Option<Uuid>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub hashed_password: String,
    pub role: UserRole,
    pub band_id: Option<Uuid>,
    pub email: String,
}
