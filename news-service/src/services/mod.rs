pub mod database;
pub mod metrics;

pub use database::NewsDb;
pub use self::metrics::{get_metrics, init_metrics, record_operation};
