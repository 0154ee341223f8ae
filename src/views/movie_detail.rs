use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    models::{MovieEntity, DEFAULT_SIMILAR_TOP_K},
    normalize::DisplayMovie,
    services::{AiService, MovieService},
    state::{MovieDetail, QueryStatus, SimilarMovies},
};

/// What the detail page should render
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    NotFound,
    Ready(Arc<MovieEntity>),
}

/// Detail page for one movie plus its similar-movies rail
#[derive(Clone)]
pub struct MovieDetailPage {
    detail: MovieDetail,
    similar: SimilarMovies,
}

impl MovieDetailPage {
    pub fn new(movies: MovieService, ai: AiService) -> Self {
        Self {
            detail: MovieDetail::new(movies),
            similar: SimilarMovies::new(ai),
        }
    }

    /// Route parameter changed; `None` while the router has no id yet
    pub fn navigate(&self, movie_id: Option<String>) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();
        handles.extend(self.detail.set_id(movie_id.clone()));
        handles.extend(self.similar.set_movie(movie_id, DEFAULT_SIMILAR_TOP_K));
        handles
    }

    pub fn view(&self) -> DetailView {
        if self.detail.status() == QueryStatus::Loading {
            return DetailView::Loading;
        }
        match (self.detail.error(), self.detail.movie()) {
            (None, Some(movie)) => DetailView::Ready(movie),
            _ => DetailView::NotFound,
        }
    }

    pub fn similar_movies(&self) -> Vec<DisplayMovie> {
        self.similar.similar_movies()
    }
}
