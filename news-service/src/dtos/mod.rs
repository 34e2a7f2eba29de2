pub mod news;

pub use news::{DeleteResponse, NewsPayload, NewsResponse};
