//! Page-level consumers of the state machines. Rendering and routing live
//! outside this crate; these types only decide what to fetch and when.
pub mod home;
pub mod movie_detail;

pub use home::HomePage;
pub use movie_detail::{DetailView, MovieDetailPage};
