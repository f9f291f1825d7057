use std::sync::Arc;

use crate::{
    models::{FavoriteSet, ItemId, UserId},
    services::UserStore,
    session::SessionProvider,
};

/// Reads a user's favorite set from the user store
///
/// Lookups never fail: any error is logged and reported as an empty set, so a
/// broken store shows every heart as empty instead of breaking the page.
#[derive(Clone)]
pub struct FavoriteQuery {
    store: Arc<dyn UserStore>,
}

impl FavoriteQuery {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// The favorite set of `user_id`, or empty if the lookup failed
    pub async fn favorite_ids(&self, user_id: UserId) -> FavoriteSet {
        match self.store.get_user(user_id).await {
            Ok(user) => FavoriteSet::from(user.favorites),
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Favorite lookup failed, showing nothing as favorited"
                );
                FavoriteSet::new()
            }
        }
    }

    /// The favorite set of whoever is signed in. No session means no lookup.
    pub async fn for_session(&self, session: &dyn SessionProvider) -> FavoriteSet {
        match session.current_user_id() {
            Some(user_id) => self.favorite_ids(user_id).await,
            None => FavoriteSet::new(),
        }
    }

    /// Whether `item_id` is a favorite of `user_id`. False without a user.
    pub async fn is_favorite(&self, user_id: Option<UserId>, item_id: ItemId) -> bool {
        match user_id {
            Some(user_id) => self.favorite_ids(user_id).await.contains(item_id),
            None => false,
        }
    }
}
