pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::CatalogConfig;

pub use adapters::{Database, OpenLibraryApiClient, SqliteBookRepository, SqliteReviewRepository};
pub use self::core::{
    review_service::ReviewService, review_verifier::ReviewVerifier,
    synchronization::BookSynchronizationListener,
};
pub use domain::model::{Book, BookSynchronization, NewReview, Review, ReviewStatistic};
pub use utils::error::{CatalogError, Result};
