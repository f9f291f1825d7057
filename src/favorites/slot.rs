use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::models::{FavoriteState, ItemId};

/// One surface's cached favorite state for one item
///
/// Transitions: `Unknown` → `Favorited`/`NotFavorited` on load, then
/// `Pending` while a toggle is in flight, then back to a settled state.
/// Observers get a notification on every change.
///
/// Every `reset` starts a new load generation; lookups issued for an older
/// generation can no longer settle the slot.
pub struct FavoriteSlot {
    item_id: ItemId,
    state: watch::Sender<FavoriteState>,
    generation: AtomicU64,
}

impl FavoriteSlot {
    /// Creates a slot that has not been loaded yet
    pub fn new(item_id: ItemId) -> Self {
        Self::with_state(item_id, FavoriteState::Unknown)
    }

    pub fn with_state(item_id: ItemId, state: FavoriteState) -> Self {
        Self {
            item_id,
            state: watch::Sender::new(state),
            generation: AtomicU64::new(0),
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn state(&self) -> FavoriteState {
        *self.state.borrow()
    }

    pub fn is_favorite(&self) -> bool {
        self.state().is_favorite()
    }

    /// Receiver that wakes on every state change, for re-rendering
    pub fn subscribe(&self) -> watch::Receiver<FavoriteState> {
        self.state.subscribe()
    }

    /// Current load generation, to be passed back to [`Self::settle_for`]
    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Records a loaded value. Ignored while a toggle is pending.
    pub(crate) fn settle(&self, favorited: bool) -> bool {
        self.state
            .send_if_modified(|state| settle_state(state, favorited))
    }

    /// Records the result of a lookup issued at `generation`
    ///
    /// Ignored if the slot was reset since, or while a toggle is pending.
    pub(crate) fn settle_for(&self, generation: u64, favorited: bool) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            settle_state(state, favorited)
        })
    }

    /// Enters `Pending`, returning the boolean to restore on failure
    ///
    /// Returns `None` if a toggle is already pending.
    pub(crate) fn begin(&self, target: bool) -> Option<bool> {
        let mut previous = None;
        self.state.send_if_modified(|state| {
            if state.is_pending() {
                return false;
            }
            let was = state.is_favorite();
            previous = Some(was);
            *state = FavoriteState::Pending {
                target,
                previous: was,
            };
            true
        });
        previous
    }

    /// Keeps the optimistic value
    pub(crate) fn confirm(&self) {
        self.state.send_if_modified(|state| match *state {
            FavoriteState::Pending { target, .. } => {
                *state = FavoriteState::from_bool(target);
                true
            }
            _ => false,
        });
    }

    /// Restores the value from before the toggle
    pub(crate) fn revert(&self) {
        self.state.send_if_modified(|state| match *state {
            FavoriteState::Pending { previous, .. } => {
                *state = FavoriteState::from_bool(previous);
                true
            }
            _ => false,
        });
    }

    /// Forgets the loaded value, e.g. after the signed-in user changed
    ///
    /// Starts a new load generation and returns it. A pending toggle keeps its
    /// state so that it can still be confirmed or reverted.
    pub(crate) fn reset(&self) -> u64 {
        let mut generation = 0;
        self.state.send_if_modified(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            if state.is_pending() || *state == FavoriteState::Unknown {
                return false;
            }
            *state = FavoriteState::Unknown;
            true
        });
        generation
    }
}

fn settle_state(state: &mut FavoriteState, favorited: bool) -> bool {
    if state.is_pending() {
        return false;
    }
    let next = FavoriteState::from_bool(favorited);
    let changed = *state != next;
    *state = next;
    changed
}
