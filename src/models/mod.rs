pub mod ai;
pub mod movie;

pub use ai::{
    QueryIntent, RecommendRequest, RecommendResponse, RecommendationItem, SearchFilters,
    SearchRequest, SearchResponse, SearchResultItem, SimilarMovieItem, SimilarResponse,
    SourceMovie, DEFAULT_RECOMMEND_TOP_K, DEFAULT_SEARCH_TOP_K, DEFAULT_SIMILAR_TOP_K,
};
pub use movie::{
    Credit, CreditRole, Genre, HealthStatus, ImageSize, Movie, MovieEntity, MovieListResponse,
    MovieQuery, Person, SortKey, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};

/// Item-array decoding that tolerates bad entries
pub(crate) mod lenient {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};

    /// Decodes a JSON array, dropping elements that do not fit `T`.
    ///
    /// The envelope still fails if the field is not an array.
    pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let total = raw.len();

        let items: Vec<T> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<T>(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::debug!(error = %e, "Dropping malformed item");
                    None
                }
            })
            .collect();

        if items.len() < total {
            tracing::warn!(
                kept = items.len(),
                dropped = total - items.len(),
                "Response contained malformed items"
            );
        }

        Ok(items)
    }
}
