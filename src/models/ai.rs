use serde::{Deserialize, Serialize};

use super::lenient;

pub const DEFAULT_RECOMMEND_TOP_K: usize = 5;
pub const DEFAULT_SEARCH_TOP_K: usize = 10;
pub const DEFAULT_SIMILAR_TOP_K: usize = 5;

/// How the backend read the user's free-text query. Display only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryIntent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl QueryIntent {
    pub fn is_empty(&self) -> bool {
        self.mood.is_none()
            && self.genres.as_ref().map_or(true, Vec::is_empty)
            && self.keywords.as_ref().map_or(true, Vec::is_empty)
    }
}

/// Item of `POST /api/v1/ai/recommend`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    pub similarity_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Item of `POST /api/v1/ai/search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    pub similarity_score: f64,
}

/// Item of `GET /api/v1/ai/similar/{movie_id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarMovieItem {
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    pub similarity_score: f64,
}

/// The movie a similarity lookup was anchored on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceMovie {
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendRequest {
    pub query: String,
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub query: String,
    #[serde(default)]
    pub intent: QueryIntent,
    #[serde(deserialize_with = "lenient::items")]
    pub recommendations: Vec<RecommendationItem>,
    pub total: u64,
}

/// Optional narrowing for semantic search, forwarded verbatim
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_from: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_to: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub filters: Option<SearchFilters>,
    pub top_k: usize,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filters: None,
            top_k: DEFAULT_SEARCH_TOP_K,
        }
    }

    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    #[serde(deserialize_with = "lenient::items")]
    pub results: Vec<SearchResultItem>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_movie: Option<SourceMovie>,
    #[serde(deserialize_with = "lenient::items")]
    pub similar_movies: Vec<SimilarMovieItem>,
    pub total: u64,
}
