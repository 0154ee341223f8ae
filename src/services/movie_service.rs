use crate::{
    error::ApiResult,
    models::{Genre, MovieEntity, MovieListResponse, MovieQuery},
    transport::ApiClient,
};

const MOVIES_PATH: &str = "/api/v1/movies";
const GENRES_PATH: &str = "/api/v1/genres";

/// Catalogue endpoints: listing, detail, genres and keyword search
#[derive(Clone)]
pub struct MovieService {
    client: ApiClient,
}

impl MovieService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Paged, filtered and sorted listing
    pub async fn list_movies(&self, query: &MovieQuery) -> ApiResult<MovieListResponse> {
        tracing::debug!(page = query.page, page_size = query.page_size, "Fetching movie list");

        let list: MovieListResponse = self
            .client
            .get(MOVIES_PATH, query.to_query_pairs())
            .await?;

        tracing::info!(
            returned = list.movies.len(),
            total = list.total,
            "Movie list fetched"
        );

        Ok(list)
    }

    pub async fn get_movie(&self, id: &str) -> ApiResult<MovieEntity> {
        tracing::debug!(movie_id = %id, "Fetching movie");
        self.client
            .get(&format!("{}/{}", MOVIES_PATH, id), vec![])
            .await
    }

    pub async fn list_genres(&self) -> ApiResult<Vec<Genre>> {
        self.client.get(GENRES_PATH, vec![]).await
    }

    /// Keyword search over titles
    pub async fn search_movies(
        &self,
        text: &str,
        page: u32,
        page_size: u32,
    ) -> ApiResult<MovieListResponse> {
        let query = vec![
            ("q".to_string(), text.to_string()),
            ("page".to_string(), page.to_string()),
            ("page_size".to_string(), page_size.to_string()),
        ];

        let list: MovieListResponse = self
            .client
            .get(&format!("{}/search", MOVIES_PATH), query)
            .await?;

        tracing::info!(query = %text, results = list.movies.len(), "Movie search completed");

        Ok(list)
    }
}
