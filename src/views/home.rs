use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;

use crate::{
    error::ApiResult,
    models::{MovieEntity, MovieQuery, QueryIntent, SortKey, DEFAULT_RECOMMEND_TOP_K},
    normalize::DisplayMovie,
    services::{AiService, MovieService},
    state::{MovieList, QueryStatus, Recommendation},
};

const POPULAR_PAGE_SIZE: u32 = 6;

/// Landing page: a popular-movies strip plus the mood search box
#[derive(Clone)]
pub struct HomePage {
    popular: MovieList,
    recommendation: Recommendation,
    user_query: Arc<Mutex<Option<String>>>,
}

impl HomePage {
    pub fn new(movies: MovieService, ai: AiService) -> Self {
        Self {
            popular: MovieList::new(movies),
            recommendation: Recommendation::new(ai),
            user_query: Arc::new(Mutex::new(None)),
        }
    }

    /// Starts loading the popular strip; repeated calls do not refetch
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        self.popular.set_query(
            MovieQuery::default()
                .page_size(POPULAR_PAGE_SIZE)
                .sort_by(SortKey::Rating),
        )
    }

    /// Handles a submitted mood query.
    ///
    /// Errors are logged here and returned so the caller can skip follow-up
    /// work such as scrolling to the results.
    pub async fn submit_query(&self, query: &str) -> ApiResult<()> {
        *self
            .user_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(query.to_string());

        match self
            .recommendation
            .recommend(query, DEFAULT_RECOMMEND_TOP_K)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(error = %e, detail = ?e.detail, "AI recommendation failed");
                Err(e)
            }
        }
    }

    pub fn user_query(&self) -> Option<String> {
        self.user_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Results section is shown once a query has been submitted
    pub fn shows_recommendations(&self) -> bool {
        self.user_query().is_some()
    }

    pub fn popular_movies(&self) -> Vec<MovieEntity> {
        self.popular.movies()
    }

    pub fn popular_status(&self) -> QueryStatus {
        self.popular.status()
    }

    pub fn recommendations(&self) -> Vec<DisplayMovie> {
        self.recommendation.recommendations()
    }

    pub fn recommendation_status(&self) -> QueryStatus {
        self.recommendation.status()
    }

    pub fn intent(&self) -> Option<QueryIntent> {
        self.recommendation.intent()
    }
}
