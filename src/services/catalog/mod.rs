/// Catalog metadata abstraction
///
/// The favorites core only stores item IDs. Surfaces that show favorited items
/// resolve those IDs to titles and artwork through a `CatalogProvider`.
use crate::{
    error::{AppError, AppResult},
    models::{ItemId, MovieSummary},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Read-only source of movie metadata
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetches one movie
    ///
    /// Returns `None` when the catalog has no displayable record for the ID
    /// (unknown ID, or no poster artwork).
    async fn fetch_movie(&self, item_id: ItemId) -> AppResult<Option<MovieSummary>>;

    /// Fetches several movies in parallel, keeping the input order
    ///
    /// Individual failures are logged and skipped. Fails only if every lookup failed.
    async fn fetch_movies(&self, item_ids: Vec<ItemId>) -> AppResult<Vec<MovieSummary>> {
        let mut tasks = Vec::new();

        for item_id in item_ids {
            let provider = self.clone_for_task();
            let task = tokio::spawn(async move { provider.fetch_movie(item_id).await });
            tasks.push((item_id, task));
        }

        let mut movies = Vec::new();
        let mut attempted = 0;
        let mut errors = Vec::new();

        for (item_id, task) in tasks {
            attempted += 1;
            match task.await {
                Ok(Ok(Some(movie))) => movies.push(movie),
                Ok(Ok(None)) => {
                    tracing::debug!(item_id = %item_id, "Catalog has no displayable record");
                }
                Ok(Err(e)) => {
                    tracing::error!(item_id = %item_id, error = %e, "Movie fetch failed");
                    errors.push(e);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Task join error");
                    errors.push(AppError::Internal(e.to_string()));
                }
            }
        }

        if !errors.is_empty() {
            tracing::warn!(
                success_count = attempted - errors.len(),
                error_count = errors.len(),
                "Partial catalog fetch failure"
            );
        }

        if errors.len() == attempted && attempted > 0 {
            return Err(AppError::ExternalApi(
                "Failed to fetch any movie details".to_string(),
            ));
        }

        Ok(movies)
    }

    /// Clone provider for parallel task execution
    fn clone_for_task(&self) -> Box<dyn CatalogProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Catalog backed by a fixed table; IDs in `failing` return errors
    #[derive(Clone)]
    struct TableCatalog {
        movies: Arc<HashMap<ItemId, MovieSummary>>,
        failing: Arc<Vec<ItemId>>,
    }

    #[async_trait::async_trait]
    impl CatalogProvider for TableCatalog {
        async fn fetch_movie(&self, item_id: ItemId) -> AppResult<Option<MovieSummary>> {
            if self.failing.contains(&item_id) {
                return Err(AppError::ExternalApi("boom".to_string()));
            }
            Ok(self.movies.get(&item_id).cloned())
        }

        fn clone_for_task(&self) -> Box<dyn CatalogProvider> {
            Box::new(self.clone())
        }

        fn name(&self) -> &'static str {
            "table"
        }
    }

    fn movie(id: u64) -> MovieSummary {
        MovieSummary {
            id: ItemId(id),
            title: format!("Movie {}", id),
            poster_path: format!("/{}.jpg", id),
            vote_average: 7.0,
            release_date: "2020-01-01".to_string(),
        }
    }

    fn catalog(known: &[u64], failing: &[u64]) -> TableCatalog {
        TableCatalog {
            movies: Arc::new(known.iter().map(|id| (ItemId(*id), movie(*id))).collect()),
            failing: Arc::new(failing.iter().map(|id| ItemId(*id)).collect()),
        }
    }

    #[tokio::test]
    async fn test_fetch_movies_keeps_order_and_skips_unknown() {
        let catalog = catalog(&[1, 2, 3], &[]);
        let movies = catalog
            .fetch_movies(vec![ItemId(3), ItemId(9), ItemId(1)])
            .await
            .unwrap();

        let ids: Vec<ItemId> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![ItemId(3), ItemId(1)]);
    }

    #[tokio::test]
    async fn test_fetch_movies_tolerates_partial_failure() {
        let catalog = catalog(&[1], &[2]);
        let movies = catalog.fetch_movies(vec![ItemId(1), ItemId(2)]).await.unwrap();
        assert_eq!(movies.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_movies_fails_when_everything_fails() {
        let catalog = catalog(&[], &[1, 2]);
        let result = catalog.fetch_movies(vec![ItemId(1), ItemId(2)]).await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_fetch_movies_empty_input() {
        let catalog = catalog(&[], &[]);
        assert!(catalog.fetch_movies(vec![]).await.unwrap().is_empty());
    }
}
