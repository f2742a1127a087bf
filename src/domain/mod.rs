pub mod feed;
pub mod item;

pub use feed::FeedSource;
pub use item::Item;
