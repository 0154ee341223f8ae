use std::sync::Arc;

use tokio::task::JoinHandle;

use super::{
    machine::{AsyncResult, QueryStatus},
    reactive::{QueryFuture, ReactiveQuery},
};
use crate::{
    error::ApiError,
    models::{Genre, MovieEntity, MovieListResponse, MovieQuery, DEFAULT_PAGE, DEFAULT_PAGE_SIZE},
    services::MovieService,
};

/// Paged movie listing that refetches whenever its query changes
#[derive(Clone)]
pub struct MovieList {
    query: ReactiveQuery<MovieQuery, MovieListResponse>,
}

impl MovieList {
    pub fn new(service: MovieService) -> Self {
        let query = ReactiveQuery::new("movie_list", move |params: &MovieQuery| {
            let service = service.clone();
            let params = params.clone();
            Some(Box::pin(async move { service.list_movies(&params).await })
                as QueryFuture<MovieListResponse>)
        });
        Self { query }
    }

    pub fn set_query(&self, params: MovieQuery) -> Option<JoinHandle<()>> {
        self.query.set_input(params)
    }

    pub fn refetch(&self) -> Option<JoinHandle<()>> {
        self.query.refetch()
    }

    pub fn snapshot(&self) -> AsyncResult<MovieListResponse> {
        self.query.machine().snapshot()
    }

    pub fn status(&self) -> QueryStatus {
        self.query.machine().status()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.query.machine().error()
    }

    pub fn movies(&self) -> Vec<MovieEntity> {
        self.query
            .machine()
            .data()
            .map(|list| list.movies.clone())
            .unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.query.machine().data().map_or(0, |list| list.total)
    }

    pub fn page(&self) -> u32 {
        self.query
            .machine()
            .data()
            .map_or(DEFAULT_PAGE, |list| list.page)
    }

    pub fn page_size(&self) -> u32 {
        self.query
            .machine()
            .data()
            .map_or(DEFAULT_PAGE_SIZE, |list| list.page_size)
    }

    pub fn total_pages(&self) -> u32 {
        self.query
            .machine()
            .data()
            .map_or(0, |list| list.total_pages())
    }
}

/// Single movie keyed on a possibly-absent id
#[derive(Clone)]
pub struct MovieDetail {
    query: ReactiveQuery<Option<String>, MovieEntity>,
}

impl MovieDetail {
    pub fn new(service: MovieService) -> Self {
        let query = ReactiveQuery::new("movie_detail", move |id: &Option<String>| {
            let id = id.clone()?;
            let service = service.clone();
            Some(Box::pin(async move { service.get_movie(&id).await }) as QueryFuture<MovieEntity>)
        });
        Self { query }
    }

    pub fn set_id(&self, id: Option<String>) -> Option<JoinHandle<()>> {
        self.query.set_input(id)
    }

    pub fn snapshot(&self) -> AsyncResult<MovieEntity> {
        self.query.machine().snapshot()
    }

    pub fn status(&self) -> QueryStatus {
        self.query.machine().status()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.query.machine().error()
    }

    pub fn movie(&self) -> Option<Arc<MovieEntity>> {
        self.query.machine().data()
    }
}

/// Genre catalogue, fetched once on first load
#[derive(Clone)]
pub struct GenreList {
    query: ReactiveQuery<(), Vec<Genre>>,
}

impl GenreList {
    pub fn new(service: MovieService) -> Self {
        let query = ReactiveQuery::new("genres", move |_: &()| {
            let service = service.clone();
            Some(Box::pin(async move { service.list_genres().await }) as QueryFuture<Vec<Genre>>)
        });
        Self { query }
    }

    /// Issues the fetch on the first call only
    pub fn load(&self) -> Option<JoinHandle<()>> {
        self.query.set_input(())
    }

    pub fn status(&self) -> QueryStatus {
        self.query.machine().status()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.query.machine().error()
    }

    pub fn genres(&self) -> Vec<String> {
        self.query
            .machine()
            .data()
            .map(|genres| genres.iter().map(|g| g.name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn records(&self) -> Vec<Genre> {
        self.query
            .machine()
            .data()
            .map(|genres| (*genres).clone())
            .unwrap_or_default()
    }
}
