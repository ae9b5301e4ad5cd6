use crate::core::review_verifier::{ReviewVerifier, Verdict};
use crate::domain::model::{NewReview, Review, ReviewStatistic};
use crate::domain::ports::{BookRepository, ReviewRepository};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::validate_range;

pub struct ReviewService<B: BookRepository, R: ReviewRepository> {
    book_repository: B,
    review_repository: R,
    verifier: ReviewVerifier,
}

impl<B: BookRepository, R: ReviewRepository> ReviewService<B, R> {
    pub fn new(book_repository: B, review_repository: R) -> Self {
        Self {
            book_repository,
            review_repository,
            verifier: ReviewVerifier::new(),
        }
    }

    /// 驗證評分與內容後建立評論，回傳新評論的 id
    pub async fn create_review(&self, isbn: &str, new_review: NewReview) -> Result<i64> {
        validate_range("rating", new_review.rating, 1, 5)?;

        if let Verdict::Rejected(reason) = self.verifier.verify(&new_review.content) {
            tracing::info!("Rejected review for ISBN {}: {}", isbn, reason);
            return Err(CatalogError::BadReview {
                reason: reason.to_string(),
            });
        }

        let book = self
            .book_repository
            .find_by_isbn(isbn)
            .await?
            .ok_or_else(|| CatalogError::BookNotFound {
                isbn: isbn.to_string(),
            })?;

        let book_id = book.id.ok_or_else(|| CatalogError::Validation {
            message: format!("book {} has not been persisted", isbn),
        })?;

        let review = Review {
            id: None,
            book_id,
            rating: new_review.rating,
            title: new_review.title,
            content: new_review.content,
            user_id: new_review.user_id,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let saved = self.review_repository.save(review).await?;
        let id = saved.id.ok_or_else(|| CatalogError::Validation {
            message: "review repository returned no id".to_string(),
        })?;

        tracing::info!("Stored review {} for ISBN {}", id, isbn);
        Ok(id)
    }

    /// 某本書的所有評論，書籍不存在時回傳 BookNotFound
    pub async fn reviews_for_book(&self, isbn: &str) -> Result<Vec<Review>> {
        let book_id = self
            .book_repository
            .find_by_isbn(isbn)
            .await?
            .and_then(|book| book.id)
            .ok_or_else(|| CatalogError::BookNotFound {
                isbn: isbn.to_string(),
            })?;

        self.review_repository.find_by_book_id(book_id).await
    }

    pub async fn statistics(&self) -> Result<Vec<ReviewStatistic>> {
        self.review_repository.get_review_statistics().await
    }
}
