pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod services;
pub mod state;
pub mod transport;
pub mod views;

pub use config::Config;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use transport::ApiClient;
