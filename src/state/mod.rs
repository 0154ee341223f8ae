//! Async query state machines.
//!
//! [`QueryMachine`] owns one query's lifecycle and the last-issued-wins rule.
//! [`ReactiveQuery`] drives a machine from a watched input. The remaining
//! types wrap one backend capability each and expose defaulted view data.
pub mod ai;
pub mod machine;
pub mod movies;
pub mod reactive;

pub use ai::{Recommendation, SemanticSearch, SimilarKey, SimilarMovies};
pub use machine::{AsyncResult, Generation, QueryMachine, QueryStatus};
pub use movies::{GenreList, MovieDetail, MovieList};
pub use reactive::{QueryFuture, ReactiveQuery};
