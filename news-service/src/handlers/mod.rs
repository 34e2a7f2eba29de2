pub mod health;
pub mod news;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use news::{create_news, delete_news, list_news, update_news};
