//! Feed retrieval and parsing split into submodules.

pub mod feed;
pub mod parse;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub use feed::{fetch_trends, mock_trends};
pub use parse::parse_feed;
