pub mod extractor;
pub mod fetcher;
pub mod pacing;
pub mod scrape_pipeline;

pub use extractor::*;
pub use fetcher::*;
pub use pacing::*;
pub use scrape_pipeline::*;
