pub mod ai_service;
pub mod health;
pub mod movie_service;

pub use ai_service::AiService;
pub use health::HealthService;
pub use movie_service::MovieService;
