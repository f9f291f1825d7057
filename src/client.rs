//! Client-side services wired from [`Config`].

use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    favorites::{FavoriteButton, FavoritesContext, FavoritesListing},
    models::ItemId,
    services::{AuthService, CatalogProvider, HttpUserStore, TmdbProvider, UserStore},
    session::SessionStore,
};

/// Everything the MovieZone surfaces talk to
///
/// The catalog is only available with a TMDB API key; without it buttons
/// still work but the favorites page cannot be opened.
pub struct MovieZoneClient {
    pub sessions: Arc<SessionStore>,
    pub auth: AuthService,
    pub favorites: FavoritesContext,
    catalog: Option<Arc<dyn CatalogProvider>>,
}

impl MovieZoneClient {
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let store: Arc<dyn UserStore> = Arc::new(HttpUserStore::from_config(config));
        let sessions = Arc::new(SessionStore::from_config(config).await?);

        let catalog: Option<Arc<dyn CatalogProvider>> = match TmdbProvider::from_config(config) {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                tracing::warn!(error = %e, "Catalog disabled");
                None
            }
        };

        tracing::info!(
            user_store = %config.user_store_url,
            session_path = %config.session_path.display(),
            catalog = catalog.is_some(),
            "Client configured"
        );

        Ok(Self {
            auth: AuthService::new(store.clone(), sessions.clone()),
            favorites: FavoritesContext::new(store, sessions.clone()),
            sessions,
            catalog,
        })
    }

    /// Mounts a heart for one movie
    pub fn button(&self, item_id: ItemId) -> Arc<FavoriteButton> {
        FavoriteButton::mount(self.favorites.clone(), item_id)
    }

    /// Mounts the favorites page; fails when no catalog is configured
    pub fn favorites_page(&self) -> AppResult<Arc<FavoritesListing>> {
        let catalog = self
            .catalog
            .clone()
            .ok_or_else(|| AppError::Config("TMDB_API_KEY is not set".to_string()))?;
        Ok(FavoritesListing::mount(self.favorites.clone(), catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{create_router, AppState};
    use crate::models::{UserId, UserRecord};
    use crate::session::SessionProvider;
    use std::path::PathBuf;

    async fn spawn_user_store() -> String {
        let state = AppState::with_users(vec![UserRecord {
            id: UserId(7),
            full_name: "Lan Nguyen".to_string(),
            email: "lan@example.com".to_string(),
            password: "secret1".to_string(),
            favorites: vec![ItemId(101)],
            created_at: None,
        }]);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn temp_session_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("moviezone-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    fn config(vars: &[(&str, &str)]) -> Config {
        envy::from_iter(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_from_config_uses_store_url_and_session_path() {
        let base_url = spawn_user_store().await;
        let path = temp_session_path();
        let config = config(&[
            ("USER_STORE_URL", base_url.as_str()),
            ("SESSION_PATH", path.to_str().unwrap()),
        ]);

        let client = MovieZoneClient::from_config(&config).await.unwrap();
        client.auth.login("lan@example.com", "secret1").await.unwrap();
        assert!(path.exists());

        let button = client.button(ItemId(101));
        button.load().await;
        assert!(button.is_favorite());

        let reopened = MovieZoneClient::from_config(&config).await.unwrap();
        assert_eq!(reopened.sessions.current_user_id(), Some(UserId(7)));
    }

    #[tokio::test]
    async fn test_favorites_page_requires_tmdb_key() {
        let path = temp_session_path();
        let without_key = config(&[("SESSION_PATH", path.to_str().unwrap())]);
        let client = MovieZoneClient::from_config(&without_key).await.unwrap();
        assert!(matches!(client.favorites_page(), Err(AppError::Config(_))));

        let with_key = config(&[
            ("SESSION_PATH", path.to_str().unwrap()),
            ("TMDB_API_KEY", "test_key"),
        ]);
        let client = MovieZoneClient::from_config(&with_key).await.unwrap();
        assert!(client.favorites_page().is_ok());
    }
}
