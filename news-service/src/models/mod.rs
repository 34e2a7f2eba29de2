pub mod news;

pub use news::NewsItem;
