use serde::{Deserialize, Serialize};

use super::ItemId;

/// The favorite IDs of one user
///
/// Keeps the order items were added in, but never holds an ID twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    items: Vec<ItemId>,
}

impl FavoriteSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, returning false if it was already present
    pub fn insert(&mut self, item_id: ItemId) -> bool {
        if self.items.contains(&item_id) {
            return false;
        }
        self.items.push(item_id);
        true
    }

    /// Removes an item, returning false if it was absent
    pub fn remove(&mut self, item_id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|id| *id != item_id);
        self.items.len() != before
    }

    /// Inserts or removes an item depending on `favorited`
    pub fn set(&mut self, item_id: ItemId, favorited: bool) -> bool {
        if favorited {
            self.insert(item_id)
        } else {
            self.remove(item_id)
        }
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.items.contains(&item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }

    /// The IDs in the shape the user store expects
    pub fn to_vec(&self) -> Vec<ItemId> {
        self.items.clone()
    }
}

impl FromIterator<ItemId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        let mut set = Self::new();
        for item_id in iter {
            set.insert(item_id);
        }
        set
    }
}

impl From<Vec<ItemId>> for FavoriteSet {
    fn from(items: Vec<ItemId>) -> Self {
        items.into_iter().collect()
    }
}

impl<'de> Deserialize<'de> for FavoriteSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<ItemId>::deserialize(deserializer).map(Self::from)
    }
}

/// What a surface currently believes about one (user, item) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteState {
    /// Not loaded yet
    #[default]
    Unknown,
    Favorited,
    NotFavorited,
    /// A toggle is in flight. `target` is shown, `previous` is restored on failure.
    Pending { target: bool, previous: bool },
}

impl FavoriteState {
    pub fn from_bool(favorited: bool) -> Self {
        if favorited {
            FavoriteState::Favorited
        } else {
            FavoriteState::NotFavorited
        }
    }

    /// The boolean a surface renders. Unknown renders as not favorited.
    pub fn is_favorite(&self) -> bool {
        match self {
            FavoriteState::Favorited => true,
            FavoriteState::Pending { target, .. } => *target,
            FavoriteState::Unknown | FavoriteState::NotFavorited => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FavoriteState::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = FavoriteSet::from(vec![ItemId(101)]);
        assert!(!set.insert(ItemId(101)));
        assert_eq!(set.len(), 1);
        assert!(set.insert(ItemId(202)));
        assert_eq!(set.to_vec(), vec![ItemId(101), ItemId(202)]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut set = FavoriteSet::from(vec![ItemId(101)]);
        assert!(!set.remove(ItemId(303)));
        assert_eq!(set.to_vec(), vec![ItemId(101)]);
    }

    #[test]
    fn test_double_toggle_restores_original() {
        let original = FavoriteSet::from(vec![ItemId(1), ItemId(2)]);
        let mut set = original.clone();
        set.set(ItemId(3), true);
        set.set(ItemId(3), false);
        assert_eq!(set, original);
    }

    #[test]
    fn test_duplicates_collapse_on_load() {
        let set: FavoriteSet = serde_json::from_str("[5, 5, 6, 5]").unwrap();
        assert_eq!(set.to_vec(), vec![ItemId(5), ItemId(6)]);
    }

    #[test]
    fn test_state_rendering() {
        assert!(!FavoriteState::Unknown.is_favorite());
        assert!(FavoriteState::Favorited.is_favorite());
        assert!(!FavoriteState::NotFavorited.is_favorite());

        let pending = FavoriteState::Pending {
            target: true,
            previous: false,
        };
        assert!(pending.is_favorite());
        assert!(pending.is_pending());
        assert_eq!(FavoriteState::from_bool(false), FavoriteState::NotFavorited);
    }
}
