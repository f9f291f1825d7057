use serde::{Deserialize, Serialize};

use super::ItemId;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w300";

/// The fields a card needs to render a favorited movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: ItemId,
    pub title: String,
    pub poster_path: String,
    pub vote_average: f64,
    pub release_date: String,
}

impl MovieSummary {
    /// Full poster URL at card size
    pub fn poster_url(&self) -> String {
        format!("{}{}", POSTER_BASE_URL, self.poster_path)
    }

    /// Year part of the release date, if there is one
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .split('-')
            .next()
            .filter(|year| !year.is_empty())
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw `GET /movie/{id}` response
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    /// TV records carry `name` instead of `title`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl TmdbMovie {
    /// Converts to a summary. Records without artwork are not shown.
    pub fn into_summary(self) -> Option<MovieSummary> {
        let poster_path = self.poster_path.filter(|p| !p.is_empty())?;
        Some(MovieSummary {
            id: ItemId(self.id),
            title: self.title.or(self.name).unwrap_or_default(),
            poster_path,
            vote_average: self.vote_average,
            release_date: self.release_date.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_movie_to_summary() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "poster_path": "/inception.jpg",
            "vote_average": 8.4,
            "release_date": "2010-07-15"
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        let summary = movie.into_summary().unwrap();
        assert_eq!(summary.id, ItemId(27205));
        assert_eq!(summary.title, "Inception");
        assert_eq!(summary.poster_url(), "https://image.tmdb.org/t/p/w300/inception.jpg");
        assert_eq!(summary.release_year(), Some("2010"));
    }

    #[test]
    fn test_tmdb_movie_without_poster_is_dropped() {
        let json = r#"{"id": 1, "title": "Lost", "poster_path": null, "vote_average": 0}"#;
        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert!(movie.into_summary().is_none());
    }

    #[test]
    fn test_tv_record_uses_name() {
        let json = r#"{"id": 1399, "name": "Game of Thrones", "poster_path": "/got.jpg"}"#;
        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        let summary = movie.into_summary().unwrap();
        assert_eq!(summary.title, "Game of Thrones");
        assert_eq!(summary.release_year(), None);
    }
}
