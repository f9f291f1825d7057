/// TMDB movie metadata provider
///
/// Only the `/movie/{id}` detail endpoint is needed to render favorited items.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ItemId, MovieSummary, TmdbMovie},
    services::catalog::CatalogProvider,
};
use reqwest::{Client as HttpClient, StatusCode};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    /// Builds the provider from `TMDB_*` settings; the API key is required
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api_key = config
            .tmdb_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Config("TMDB_API_KEY is not set".to_string()))?;

        Ok(Self::new(
            api_key,
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
        ))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn fetch_movie(&self, item_id: ItemId) -> AppResult<Option<MovieSummary>> {
        let url = format!("{}/movie/{}", self.api_url, item_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(item_id = %item_id, provider = "tmdb", "Movie not found");
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let movie: TmdbMovie = response.json().await?;
        let summary = movie.into_summary();

        tracing::debug!(
            item_id = %item_id,
            displayable = summary.is_some(),
            provider = "tmdb",
            "Movie fetched"
        );

        Ok(summary)
    }

    fn clone_for_task(&self) -> Box<dyn CatalogProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
