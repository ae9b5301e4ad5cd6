// Adapters layer: concrete implementations of the domain ports.

pub mod open_library;
pub mod sqlite;

pub use open_library::OpenLibraryApiClient;
pub use sqlite::{Database, SqliteBookRepository, SqliteReviewRepository};
