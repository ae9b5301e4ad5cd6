pub mod review_service;
pub mod review_verifier;
pub mod synchronization;

pub use crate::domain::model::{Book, BookSynchronization, NewReview, Review, ReviewStatistic};
pub use crate::domain::ports::{BookRepository, MetadataClient, ReviewRepository};
pub use crate::utils::error::Result;
