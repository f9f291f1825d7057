use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{
    error::AppResult,
    favorites::{FavoriteEvent, FavoriteSlot, ToggleOutcome},
    models::{FavoriteSet, ItemId, UserId},
    services::UserStore,
    session::SessionProvider,
};

const EVENT_CAPACITY: usize = 64;

/// Flips favorites with an optimistic local update
///
/// The write is a read-modify-write of the whole set with no versioning, so
/// concurrent writers for the same user (other tabs, other devices) race and
/// the last write wins. Toggles of one slot are serialized by the slot's
/// pending state.
#[derive(Clone)]
pub struct FavoriteMutator {
    store: Arc<dyn UserStore>,
    session: Arc<dyn SessionProvider>,
    events: broadcast::Sender<FavoriteEvent>,
}

impl FavoriteMutator {
    pub fn new(store: Arc<dyn UserStore>, session: Arc<dyn SessionProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            session,
            events,
        }
    }

    /// Receiver of every confirmed change made through this mutator
    pub fn subscribe(&self) -> broadcast::Receiver<FavoriteEvent> {
        self.events.subscribe()
    }

    /// Reads the user's set, adds or removes `item_id`, and writes the whole set back
    pub async fn set_favorite(
        &self,
        user_id: UserId,
        item_id: ItemId,
        favorited: bool,
    ) -> AppResult<FavoriteSet> {
        let user = self.store.get_user(user_id).await?;
        let mut favorites = FavoriteSet::from(user.favorites);
        favorites.set(item_id, favorited);

        self.store
            .replace_favorites(user_id, &favorites.to_vec())
            .await?;

        Ok(favorites)
    }

    /// Flips the slot's current value
    pub async fn toggle(&self, slot: &FavoriteSlot) -> ToggleOutcome {
        self.apply(slot, !slot.is_favorite()).await
    }

    /// Moves the slot to `desired`, writing it through to the store
    ///
    /// The slot shows `desired` before the first network call. If the read or
    /// the write fails, the slot goes back to what it showed before.
    pub async fn apply(&self, slot: &FavoriteSlot, desired: bool) -> ToggleOutcome {
        let item_id = slot.item_id();

        let Some(user_id) = self.session.current_user_id() else {
            tracing::debug!(item_id = %item_id, "Favorite toggle without session");
            return ToggleOutcome::LoginRequired;
        };

        let Some(previous) = slot.begin(desired) else {
            tracing::debug!(
                user_id = %user_id,
                item_id = %item_id,
                "Favorite toggle already in flight"
            );
            return ToggleOutcome::InFlight;
        };

        match self.set_favorite(user_id, item_id, desired).await {
            Ok(favorites) => {
                slot.confirm();

                tracing::info!(
                    user_id = %user_id,
                    item_id = %item_id,
                    favorited = desired,
                    favorites = favorites.len(),
                    "Favorite updated"
                );

                // No subscribers is fine
                let _ = self.events.send(FavoriteEvent {
                    user_id,
                    item_id,
                    favorited: desired,
                });

                ToggleOutcome::Confirmed { favorited: desired }
            }
            Err(e) => {
                slot.revert();

                tracing::warn!(
                    user_id = %user_id,
                    item_id = %item_id,
                    favorited = desired,
                    error = %e,
                    "Favorite update failed, reverted"
                );

                ToggleOutcome::Reverted {
                    favorited: previous,
                }
            }
        }
    }
}
