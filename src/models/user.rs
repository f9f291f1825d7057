use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemId, UserId};

/// A user record as stored by the user-account service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Favorited item IDs. The store keeps whatever it was last sent.
    #[serde(default)]
    pub favorites: Vec<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub favorites: Vec<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewUser {
    pub fn new(full_name: String, email: String, password: String) -> Self {
        Self {
            full_name,
            email,
            password,
            favorites: Vec::new(),
            created_at: None,
        }
    }
}

/// Body of `PATCH /users/{id}`: only the present fields are replaced
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Vec<ItemId>>,
}

impl UserPatch {
    /// A patch that replaces the favorites field wholesale
    pub fn favorites(favorites: Vec<ItemId>) -> Self {
        Self {
            favorites: Some(favorites),
            ..Self::default()
        }
    }

    /// Applies the present fields to a record
    pub fn apply_to(self, user: &mut UserRecord) {
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(favorites) = self.favorites {
            user.favorites = favorites;
        }
    }
}
