use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    favorites::{FavoriteEvent, FavoriteSlot, FavoritesContext, ToggleOutcome},
    models::{FavoriteState, ItemId, MovieSummary},
    services::CatalogProvider,
};

/// Load state of the favorites page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingStatus {
    Loading,
    /// Nobody is signed in
    LoginRequired,
    /// Entries are available (possibly none)
    Ready,
    /// The catalog could not resolve any favorite
    Failed(String),
}

/// One visible movie with its own heart
#[derive(Clone)]
pub struct ListingEntry {
    pub movie: MovieSummary,
    pub slot: Arc<FavoriteSlot>,
}

/// The "my favorites" page: every favorited movie, resolved through the catalog
///
/// Only favorited items are shown, so a confirmed removal evicts the entry
/// without reloading the page.
pub struct FavoritesListing {
    ctx: FavoritesContext,
    catalog: Arc<dyn CatalogProvider>,
    status: watch::Sender<ListingStatus>,
    entries: watch::Sender<Vec<ListingEntry>>,
}

impl FavoritesListing {
    pub fn new(ctx: FavoritesContext, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            ctx,
            catalog,
            status: watch::Sender::new(ListingStatus::Loading),
            entries: watch::Sender::new(Vec::new()),
        }
    }

    /// Creates the page and loads it in the background
    ///
    /// Results that arrive after the page was dropped are discarded.
    pub fn mount(ctx: FavoritesContext, catalog: Arc<dyn CatalogProvider>) -> Arc<Self> {
        let listing = Arc::new(Self::new(ctx, catalog));

        let weak = Arc::downgrade(&listing);
        let ctx = listing.ctx.clone();
        let catalog = listing.catalog.clone();
        tokio::spawn(async move {
            let (status, entries) = fetch(&ctx, catalog.as_ref()).await;
            match weak.upgrade() {
                Some(listing) => listing.publish(status, entries),
                None => tracing::debug!("Favorites page unmounted, dropping results"),
            }
        });

        listing
    }

    /// Loads the favorite IDs and resolves them to movies
    pub async fn load(&self) -> ListingStatus {
        self.status.send_replace(ListingStatus::Loading);
        let (status, entries) = fetch(&self.ctx, self.catalog.as_ref()).await;
        self.publish(status.clone(), entries);
        status
    }

    pub fn status(&self) -> ListingStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ListingStatus> {
        self.status.subscribe()
    }

    /// Receiver that wakes whenever the visible list changes
    pub fn subscribe(&self) -> watch::Receiver<Vec<ListingEntry>> {
        self.entries.subscribe()
    }

    /// The movies currently shown, in display order
    pub fn movies(&self) -> Vec<MovieSummary> {
        self.entries
            .borrow()
            .iter()
            .map(|entry| entry.movie.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Flips the heart of a shown movie; `None` if the movie is not shown
    ///
    /// A confirmed removal evicts the entry.
    pub async fn toggle(&self, item_id: ItemId) -> Option<ToggleOutcome> {
        let slot = self.slot(item_id)?;
        let outcome = self.ctx.mutator.toggle(&slot).await;

        if outcome == (ToggleOutcome::Confirmed { favorited: false }) {
            self.evict(item_id);
        }

        Some(outcome)
    }

    /// Drops entries removed on another surface
    ///
    /// Additions are not applied: they need a catalog lookup and show up on the
    /// next load.
    pub fn apply_event(&self, event: &FavoriteEvent) -> bool {
        if event.favorited || self.ctx.session.current_user_id() != Some(event.user_id) {
            return false;
        }
        match self.slot(event.item_id) {
            Some(slot) if !slot.state().is_pending() => self.evict(event.item_id),
            _ => false,
        }
    }

    fn slot(&self, item_id: ItemId) -> Option<Arc<FavoriteSlot>> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.movie.id == item_id)
            .map(|entry| entry.slot.clone())
    }

    fn evict(&self, item_id: ItemId) -> bool {
        let evicted = self.entries.send_if_modified(|entries| {
            let before = entries.len();
            entries.retain(|entry| entry.movie.id != item_id);
            entries.len() != before
        });

        if evicted {
            tracing::debug!(item_id = %item_id, "Removed from favorites page");
        }
        evicted
    }

    fn publish(&self, status: ListingStatus, entries: Vec<ListingEntry>) {
        self.entries.send_replace(entries);
        self.status.send_replace(status);
    }
}

async fn fetch(
    ctx: &FavoritesContext,
    catalog: &dyn CatalogProvider,
) -> (ListingStatus, Vec<ListingEntry>) {
    let Some(user_id) = ctx.session.current_user_id() else {
        return (ListingStatus::LoginRequired, Vec::new());
    };

    let favorites = ctx.query.favorite_ids(user_id).await;
    if favorites.is_empty() {
        return (ListingStatus::Ready, Vec::new());
    }

    match catalog.fetch_movies(favorites.to_vec()).await {
        Ok(movies) => {
            tracing::info!(
                user_id = %user_id,
                favorites = favorites.len(),
                shown = movies.len(),
                provider = catalog.name(),
                "Favorites page loaded"
            );

            let entries = movies
                .into_iter()
                .map(|movie| ListingEntry {
                    slot: Arc::new(FavoriteSlot::with_state(movie.id, FavoriteState::Favorited)),
                    movie,
                })
                .collect();
            (ListingStatus::Ready, entries)
        }
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Failed to load favorite movies");
            (ListingStatus::Failed(e.to_string()), Vec::new())
        }
    }
}
