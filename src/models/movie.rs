use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::lenient;

/// Genre record as served by `/api/v1/genres` and embedded in movies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<i64>,
}

impl Genre {
    /// Genre built from a bare label; AI endpoints carry names only
    pub fn from_label(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            tmdb_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CreditRole {
    Actor,
    Director,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credit {
    pub person: Person,
    pub role: CreditRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_num: Option<u32>,
}

/// Canonical display record for a movie
///
/// Only `id` and `title` are guaranteed; renderers must treat every other
/// field as possibly absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieEntity {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credits: Vec<Credit>,
}

pub type Movie = MovieEntity;

impl MovieEntity {
    /// Minimal entity with only the required fields set
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tmdb_id: None,
            original_title: None,
            release_date: None,
            runtime: None,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
            vote_count: None,
            popularity: None,
            genres: Vec::new(),
            credits: Vec::new(),
        }
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }

    /// Year of `release_date`, accepting `YYYY-MM-DD` or a bare `YYYY`
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?.trim();
        if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return Some(parsed.year());
        }
        date.get(..4)
            .filter(|_| date.len() == 4)
            .and_then(|year| year.parse().ok())
    }

    pub fn poster_url(&self, image_base_url: &str, size: ImageSize) -> Option<String> {
        image_url(image_base_url, size, self.poster_path.as_deref()?)
    }

    pub fn backdrop_url(&self, image_base_url: &str, size: ImageSize) -> Option<String> {
        image_url(image_base_url, size, self.backdrop_path.as_deref()?)
    }

    pub fn directors(&self) -> Vec<&Person> {
        self.credits
            .iter()
            .filter(|c| c.role == CreditRole::Director)
            .map(|c| &c.person)
            .collect()
    }

    /// Actors in billing order; unordered credits go last
    pub fn cast(&self) -> Vec<&Credit> {
        let mut cast: Vec<&Credit> = self
            .credits
            .iter()
            .filter(|c| c.role == CreditRole::Actor)
            .collect();
        cast.sort_by_key(|c| c.order_num.unwrap_or(u32::MAX));
        cast
    }
}

/// TMDB image size segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W500,
    W780,
    Original,
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSize::W500 => write!(f, "w500"),
            ImageSize::W780 => write!(f, "w780"),
            ImageSize::Original => write!(f, "original"),
        }
    }
}

fn image_url(base: &str, size: ImageSize, path: &str) -> Option<String> {
    if path.trim().is_empty() {
        return None;
    }
    Some(format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        size,
        path.trim_start_matches('/')
    ))
}

/// Paged envelope from `/api/v1/movies` and `/api/v1/movies/search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieListResponse {
    #[serde(deserialize_with = "lenient::items")]
    pub movies: Vec<MovieEntity>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

impl MovieListResponse {
    pub fn total_pages(&self) -> u32 {
        if let Some(pages) = self.total_pages {
            return pages;
        }
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size)) as u32
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Rating,
    Year,
    Title,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Rating => write!(f, "rating"),
            SortKey::Year => write!(f, "year"),
            SortKey::Title => write!(f, "title"),
        }
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Listing parameters with defaults already applied
///
/// Two queries built from the same values compare equal, which is what the
/// reactive movie list keys on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieQuery {
    pub page: u32,
    pub page_size: u32,
    pub genre: Option<String>,
    pub min_rating: Option<f64>,
    pub sort_by: SortKey,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            genre: None,
            min_rating: None,
            sort_by: SortKey::default(),
        }
    }
}

impl MovieQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn sort_by(mut self, sort_by: SortKey) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Query-string pairs; absent filters are omitted
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];
        if let Some(genre) = &self.genre {
            pairs.push(("genre".to_string(), genre.clone()));
        }
        if let Some(min_rating) = self.min_rating {
            pairs.push(("min_rating".to_string(), min_rating.to_string()));
        }
        pairs.push(("sort_by".to_string(), self.sort_by.to_string()));
        pairs
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
