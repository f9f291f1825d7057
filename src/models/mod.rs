use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod favorites;
pub mod movie;
pub mod session;
pub mod user;

pub use favorites::{FavoriteSet, FavoriteState};
pub use movie::{MovieSummary, TmdbMovie};
pub use session::Session;
pub use user::{NewUser, UserPatch, UserRecord};

/// Identifier of an account in the user store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// Identifier of a movie or show in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
