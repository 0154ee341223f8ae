//! Conversion of AI item shapes into the canonical display entity.
//!
//! Recommendation, search and similarity hits all flatten genres to names and
//! carry a similarity score. They are wrapped in [`ScoredItem`] and converted by
//! one function so every call site applies the same rules.
use serde::Serialize;

use crate::models::{
    Genre, MovieEntity, RecommendationItem, SearchResultItem, SimilarMovieItem,
};

/// Any of the three scored item shapes returned by the AI endpoints
#[derive(Debug, Clone, PartialEq)]
pub enum ScoredItem {
    Recommendation(RecommendationItem),
    Search(SearchResultItem),
    Similar(SimilarMovieItem),
}

impl From<RecommendationItem> for ScoredItem {
    fn from(item: RecommendationItem) -> Self {
        ScoredItem::Recommendation(item)
    }
}

impl From<SearchResultItem> for ScoredItem {
    fn from(item: SearchResultItem) -> Self {
        ScoredItem::Search(item)
    }
}

impl From<SimilarMovieItem> for ScoredItem {
    fn from(item: SimilarMovieItem) -> Self {
        ScoredItem::Similar(item)
    }
}

/// A movie ready for a card, with its score and optional rationale
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayMovie {
    pub movie: MovieEntity,
    pub similarity_score: f64,
    pub reason: Option<String>,
}

impl DisplayMovie {
    /// Score as a whole percentage, clamped to 0..=100
    pub fn similarity_percent(&self) -> u8 {
        (self.similarity_score.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

impl ScoredItem {
    pub fn movie_id(&self) -> &str {
        match self {
            ScoredItem::Recommendation(item) => &item.movie_id,
            ScoredItem::Search(item) => &item.movie_id,
            ScoredItem::Similar(item) => &item.movie_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ScoredItem::Recommendation(item) => &item.title,
            ScoredItem::Search(item) => &item.title,
            ScoredItem::Similar(item) => &item.title,
        }
    }

    /// Identifier and title are both non-blank
    pub fn is_displayable(&self) -> bool {
        !self.movie_id().trim().is_empty() && !self.title().trim().is_empty()
    }

    /// Converts to a display entity, or `None` for items without id or title
    pub fn into_display(self) -> Option<DisplayMovie> {
        if !self.is_displayable() {
            tracing::debug!(movie_id = %self.movie_id(), "Skipping item without id or title");
            return None;
        }

        let display = match self {
            ScoredItem::Recommendation(item) => {
                let mut movie = base_entity(item.movie_id, item.title, item.genres);
                movie.overview = item.overview;
                movie.release_date = item.release_date;
                movie.poster_path = item.poster_path;
                movie.backdrop_path = item.backdrop_path;
                movie.vote_average = item.vote_average;
                movie.popularity = item.popularity;
                DisplayMovie {
                    movie,
                    similarity_score: item.similarity_score,
                    reason: item.reason,
                }
            }
            ScoredItem::Search(item) => {
                let mut movie = base_entity(item.movie_id, item.title, item.genres);
                movie.overview = item.overview;
                movie.poster_path = item.poster_path;
                movie.backdrop_path = item.backdrop_path;
                DisplayMovie {
                    movie,
                    similarity_score: item.similarity_score,
                    reason: None,
                }
            }
            ScoredItem::Similar(item) => {
                let mut movie = base_entity(item.movie_id, item.title, item.genres);
                movie.overview = item.overview;
                movie.poster_path = item.poster_path;
                movie.backdrop_path = item.backdrop_path;
                DisplayMovie {
                    movie,
                    similarity_score: item.similarity_score,
                    reason: None,
                }
            }
        };

        Some(display)
    }
}

fn base_entity(id: String, title: String, genres: Vec<String>) -> MovieEntity {
    let mut movie = MovieEntity::new(id, title);
    movie.genres = genres.into_iter().map(Genre::from_label).collect();
    movie
}

/// Normalizes a batch, preserving order and skipping undisplayable items
pub fn normalize_items<I>(items: I) -> Vec<DisplayMovie>
where
    I: IntoIterator,
    I::Item: Into<ScoredItem>,
{
    items
        .into_iter()
        .filter_map(|item| item.into().into_display())
        .collect()
}
