use std::sync::Arc;

use tokio::task::JoinHandle;

use super::{
    machine::{AsyncResult, QueryMachine, QueryStatus},
    reactive::{QueryFuture, ReactiveQuery},
};
use crate::{
    error::{ApiError, ApiResult},
    models::{
        QueryIntent, RecommendResponse, SearchRequest, SearchResponse, SimilarResponse,
        SourceMovie,
    },
    normalize::{normalize_items, DisplayMovie},
    services::AiService,
};

/// A settled recommendation together with the `top_k` it was requested with
struct RankedResponse {
    response: Arc<RecommendResponse>,
    top_k: usize,
}

/// Free-text recommendation, triggered by the caller
#[derive(Clone)]
pub struct Recommendation {
    service: AiService,
    machine: QueryMachine<RankedResponse>,
}

impl Recommendation {
    pub fn new(service: AiService) -> Self {
        Self {
            service,
            machine: QueryMachine::new("ai_recommend"),
        }
    }

    /// Runs a recommendation; failures are recorded and also returned
    pub async fn recommend(&self, query: &str, top_k: usize) -> ApiResult<Arc<RecommendResponse>> {
        let service = self.service.clone();
        let query = query.to_string();
        let ranked = self
            .machine
            .execute(async move {
                let response = service.recommend(&query, top_k).await?;
                Ok::<_, ApiError>(RankedResponse {
                    response: Arc::new(response),
                    top_k,
                })
            })
            .await?;
        Ok(Arc::clone(&ranked.response))
    }

    pub fn reset(&self) {
        self.machine.reset();
    }

    pub fn snapshot(&self) -> AsyncResult<RecommendResponse> {
        let snapshot = self.machine.snapshot();
        AsyncResult {
            status: snapshot.status,
            data: snapshot.data.map(|ranked| Arc::clone(&ranked.response)),
            error: snapshot.error,
        }
    }

    pub fn status(&self) -> QueryStatus {
        self.machine.status()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.machine.error()
    }

    /// Displayable items of the last success, capped at the `top_k` it asked for
    pub fn recommendations(&self) -> Vec<DisplayMovie> {
        self.machine
            .data()
            .map(|ranked| {
                let mut items =
                    normalize_items(ranked.response.recommendations.iter().cloned());
                items.truncate(ranked.top_k);
                items
            })
            .unwrap_or_default()
    }

    pub fn intent(&self) -> Option<QueryIntent> {
        self.machine
            .data()
            .map(|ranked| ranked.response.intent.clone())
    }
}

/// Semantic search, triggered by the caller
#[derive(Clone)]
pub struct SemanticSearch {
    service: AiService,
    machine: QueryMachine<SearchResponse>,
}

impl SemanticSearch {
    pub fn new(service: AiService) -> Self {
        Self {
            service,
            machine: QueryMachine::new("ai_search"),
        }
    }

    pub async fn search(&self, request: &SearchRequest) -> ApiResult<Arc<SearchResponse>> {
        self.machine.execute(self.service.search(request)).await
    }

    pub fn reset(&self) {
        self.machine.reset();
    }

    pub fn snapshot(&self) -> AsyncResult<SearchResponse> {
        self.machine.snapshot()
    }

    pub fn status(&self) -> QueryStatus {
        self.machine.status()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.machine.error()
    }

    pub fn results(&self) -> Vec<DisplayMovie> {
        self.machine
            .data()
            .map(|response| normalize_items(response.results.iter().cloned()))
            .unwrap_or_default()
    }
}

/// Lookup key for similar movies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarKey {
    pub movie_id: Option<String>,
    pub top_k: usize,
}

/// Similar movies for a possibly-absent movie id
#[derive(Clone)]
pub struct SimilarMovies {
    query: ReactiveQuery<SimilarKey, SimilarResponse>,
}

impl SimilarMovies {
    pub fn new(service: AiService) -> Self {
        let query = ReactiveQuery::new("ai_similar", move |key: &SimilarKey| {
            let movie_id = key.movie_id.clone()?;
            let top_k = key.top_k;
            let service = service.clone();
            Some(Box::pin(async move { service.similar_to(&movie_id, top_k).await })
                as QueryFuture<SimilarResponse>)
        });
        Self { query }
    }

    /// Watches a movie id; nothing is requested while it is `None`
    pub fn set_movie(&self, movie_id: Option<String>, top_k: usize) -> Option<JoinHandle<()>> {
        self.query.set_input(SimilarKey { movie_id, top_k })
    }

    pub fn refetch(&self) -> Option<JoinHandle<()>> {
        self.query.refetch()
    }

    pub fn snapshot(&self) -> AsyncResult<SimilarResponse> {
        self.query.machine().snapshot()
    }

    pub fn status(&self) -> QueryStatus {
        self.query.machine().status()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.query.machine().error()
    }

    pub fn source_movie(&self) -> Option<SourceMovie> {
        self.query
            .machine()
            .data()
            .and_then(|response| response.source_movie.clone())
    }

    pub fn similar_movies(&self) -> Vec<DisplayMovie> {
        self.query
            .machine()
            .data()
            .map(|response| normalize_items(response.similar_movies.iter().cloned()))
            .unwrap_or_default()
    }
}
