use crate::domain::model::{Book, Review, ReviewStatistic};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>>;
    /// 回傳帶有資料庫 id 的書籍
    async fn save(&self, book: Book) -> Result<Book>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn save(&self, review: Review) -> Result<Review>;
    async fn count(&self) -> Result<i64>;
    /// 最新的評論在前
    async fn find_by_book_id(&self, book_id: i64) -> Result<Vec<Review>>;
    /// 依評分數遞減、書籍 id 遞增排序；沒有評論的書不列出
    async fn get_review_statistics(&self) -> Result<Vec<ReviewStatistic>>;
}

#[async_trait]
pub trait MetadataClient: Send + Sync {
    async fn fetch_metadata_for_book(&self, isbn: &str) -> Result<Book>;
}
