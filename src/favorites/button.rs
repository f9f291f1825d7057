use std::sync::{Arc, Weak};

use tokio::{sync::watch, task::JoinHandle};

use crate::{
    favorites::{FavoriteEvent, FavoriteSlot, FavoritesContext, ToggleOutcome},
    models::{FavoriteState, ItemId, UserId},
};

/// The heart on a movie card or detail page
///
/// A mounted button lives in an `Arc`. Dropping the last `Arc` unmounts it;
/// lookups still in flight at that point are discarded.
pub struct FavoriteButton {
    ctx: FavoritesContext,
    slot: FavoriteSlot,
}

impl FavoriteButton {
    /// Creates an unloaded button
    pub fn new(ctx: FavoritesContext, item_id: ItemId) -> Self {
        Self {
            ctx,
            slot: FavoriteSlot::new(item_id),
        }
    }

    /// Creates a button and starts its initial lookup in the background
    pub fn mount(ctx: FavoritesContext, item_id: ItemId) -> Arc<Self> {
        let button = Arc::new(Self::new(ctx, item_id));
        button.spawn_load();
        button
    }

    pub fn item_id(&self) -> ItemId {
        self.slot.item_id()
    }

    pub fn state(&self) -> FavoriteState {
        self.slot.state()
    }

    pub fn is_favorite(&self) -> bool {
        self.slot.is_favorite()
    }

    /// Receiver that wakes whenever the heart should be redrawn
    pub fn subscribe(&self) -> watch::Receiver<FavoriteState> {
        self.slot.subscribe()
    }

    /// Looks the item up for the current user and settles the slot
    pub async fn load(&self) {
        let generation = self.slot.generation();
        let user_id = self.ctx.session.current_user_id();
        let favorited = self.ctx.query.is_favorite(user_id, self.item_id()).await;
        self.settle_lookup(generation, user_id, favorited);
    }

    /// Forgets the current value and looks it up again in the background
    ///
    /// Lookups still running for the previous value are discarded.
    pub fn reload(self: &Arc<Self>) {
        self.slot.reset();
        self.spawn_load();
    }

    /// Flips the heart. See [`crate::favorites::FavoriteMutator::apply`].
    ///
    /// If the slot was reloaded while the write was in flight, the value for
    /// the now current user is looked up once the toggle has settled.
    pub async fn toggle(&self) -> ToggleOutcome {
        let generation = self.slot.generation();
        let outcome = self.ctx.mutator.toggle(&self.slot).await;

        if self.slot.generation() != generation {
            tracing::debug!(item_id = %self.item_id(), "Session changed during toggle");
            self.load().await;
        }

        outcome
    }

    /// Adopts a change confirmed by another surface
    ///
    /// Returns true if the slot changed. Events for other items or other users
    /// are ignored, as are events arriving while this slot has its own toggle
    /// in flight.
    pub fn apply_event(&self, event: &FavoriteEvent) -> bool {
        if event.item_id != self.item_id()
            || self.ctx.session.current_user_id() != Some(event.user_id)
        {
            return false;
        }
        self.slot.settle(event.favorited)
    }

    /// Reloads the button every time someone signs in or out
    ///
    /// The task ends once the button is unmounted or the session source is gone.
    pub fn follow_session(self: &Arc<Self>) -> JoinHandle<()> {
        let weak = Arc::downgrade(self);
        let mut sessions = self.ctx.session.subscribe();

        tokio::spawn(async move {
            while sessions.changed().await.is_ok() {
                let Some(button) = weak.upgrade() else {
                    break;
                };
                button.reload();
            }
        })
    }

    /// Runs the lookup without keeping the button alive
    fn spawn_load(self: &Arc<Self>) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        let query = self.ctx.query.clone();
        let generation = self.slot.generation();
        let user_id = self.ctx.session.current_user_id();
        let item_id = self.item_id();

        tokio::spawn(async move {
            let favorited = query.is_favorite(user_id, item_id).await;
            match weak.upgrade() {
                Some(button) => {
                    button.settle_lookup(generation, user_id, favorited);
                }
                None => {
                    tracing::debug!(
                        item_id = %item_id,
                        "Button unmounted, dropping favorite lookup"
                    );
                }
            }
        })
    }

    /// Settles a lookup unless the slot or the signed-in user moved on since
    fn settle_lookup(&self, generation: u64, user_id: Option<UserId>, favorited: bool) {
        if self.ctx.session.current_user_id() != user_id {
            tracing::debug!(
                item_id = %self.item_id(),
                "Session changed, dropping favorite lookup"
            );
            return;
        }
        self.slot.settle_for(generation, favorited);
    }
}
