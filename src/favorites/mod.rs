//! Favorites synchronization.
//!
//! The favorite set lives on the user record in the user store. Every surface
//! that shows a heart keeps its own [`FavoriteSlot`], loads it through
//! [`FavoriteQuery`] and flips it through [`FavoriteMutator`], which applies
//! the change locally before talking to the store and reverts it if the write
//! fails.

use std::sync::Arc;

use crate::{
    models::{ItemId, UserId},
    services::UserStore,
    session::SessionProvider,
};

pub mod button;
pub mod listing;
pub mod mutator;
pub mod query;
pub mod slot;

pub use button::FavoriteButton;
pub use listing::{FavoritesListing, ListingEntry, ListingStatus};
pub use mutator::FavoriteMutator;
pub use query::FavoriteQuery;
pub use slot::FavoriteSlot;

/// Where a surface sends the user when a toggle needs a signed-in account
pub const LOGIN_REDIRECT: &str = "/login?redirect=/";

/// Result of a toggle as seen by the surface that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Nobody is signed in. Nothing was changed or sent.
    LoginRequired,
    /// A previous toggle of the same slot has not finished. Nothing was sent.
    InFlight,
    /// The store accepted the new set
    Confirmed { favorited: bool },
    /// The write failed and the slot went back to its earlier value
    Reverted { favorited: bool },
}

impl ToggleOutcome {
    /// Route to navigate to, if the toggle requires authentication first
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            ToggleOutcome::LoginRequired => Some(LOGIN_REDIRECT),
            _ => None,
        }
    }
}

/// A confirmed change, published to every surface that subscribed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteEvent {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub favorited: bool,
}

/// Everything a favorites surface needs, cheap to clone
#[derive(Clone)]
pub struct FavoritesContext {
    pub session: Arc<dyn SessionProvider>,
    pub query: FavoriteQuery,
    pub mutator: FavoriteMutator,
}

impl FavoritesContext {
    pub fn new(store: Arc<dyn UserStore>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            query: FavoriteQuery::new(store.clone()),
            mutator: FavoriteMutator::new(store, session.clone()),
            session,
        }
    }
}
