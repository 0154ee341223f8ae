use crate::{
    error::ApiResult,
    models::{
        RecommendRequest, RecommendResponse, SearchFilters, SearchRequest, SearchResponse,
        SimilarResponse,
    },
    transport::ApiClient,
};

const AI_PATH: &str = "/api/v1/ai";

/// Recommendation, semantic search and similarity endpoints
///
/// Filters are forwarded as given; nothing is filtered client-side.
#[derive(Clone)]
pub struct AiService {
    client: ApiClient,
}

impl AiService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Mood/intent query answered by LLM parsing plus vector search
    pub async fn recommend(&self, query: &str, top_k: usize) -> ApiResult<RecommendResponse> {
        tracing::debug!(query = %query, top_k, "Requesting recommendations");

        let request = RecommendRequest {
            query: query.to_string(),
            top_k,
        };

        let response: RecommendResponse = self
            .client
            .post(&format!("{}/recommend", AI_PATH), &request)
            .await?;

        tracing::info!(
            results = response.recommendations.len(),
            mood = ?response.intent.mood,
            "Recommendations received"
        );

        Ok(response)
    }

    pub async fn semantic_search(
        &self,
        query: &str,
        filters: Option<SearchFilters>,
        top_k: usize,
    ) -> ApiResult<SearchResponse> {
        let request = SearchRequest {
            query: query.to_string(),
            filters,
            top_k,
        };
        self.search(&request).await
    }

    /// Same as [`AiService::semantic_search`] with a prebuilt request
    pub async fn search(&self, request: &SearchRequest) -> ApiResult<SearchResponse> {
        let response: SearchResponse = self
            .client
            .post(&format!("{}/search", AI_PATH), request)
            .await?;

        tracing::info!(
            query = %request.query,
            results = response.results.len(),
            "Semantic search completed"
        );

        Ok(response)
    }

    pub async fn similar_to(&self, movie_id: &str, top_k: usize) -> ApiResult<SimilarResponse> {
        tracing::debug!(movie_id = %movie_id, top_k, "Fetching similar movies");
        self.client
            .get(
                &format!("{}/similar/{}", AI_PATH, movie_id),
                vec![("top_k".to_string(), top_k.to_string())],
            )
            .await
    }
}
