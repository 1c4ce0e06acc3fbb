//! Vigil Sources - Open-source text adapters
//!
//! Turns external feeds into `Article` records:
//! - Shared HTTP client construction
//! - NewsAPI and GDELT news search
//! - Reddit subreddit search
//! - RSS/Atom feeds

pub mod adapter;
pub mod client;
pub mod gdelt;
pub mod newsapi;
pub mod reddit;
pub mod rss;

pub use adapter::*;
pub use client::*;
pub use gdelt::GdeltAdapter;
pub use newsapi::NewsApiAdapter;
pub use reddit::RedditAdapter;
pub use rss::RssAdapter;
