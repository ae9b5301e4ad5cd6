use crate::domain::model::BookSynchronization;
use crate::domain::ports::{BookRepository, MetadataClient};
use crate::utils::error::Result;
use crate::utils::validation::is_valid_isbn;

/// 處理書籍同步訊息：ISBN 不存在時才向外部來源取得資料並儲存。
///
/// 先查後寫並非交易性保證，重複投遞時的唯一性由資料表的 UNIQUE(isbn) 負責。
pub struct BookSynchronizationListener<R: BookRepository, C: MetadataClient> {
    book_repository: R,
    metadata_client: C,
}

impl<R: BookRepository, C: MetadataClient> BookSynchronizationListener<R, C> {
    pub fn new(book_repository: R, metadata_client: C) -> Self {
        Self {
            book_repository,
            metadata_client,
        }
    }

    #[tracing::instrument(name = "book_sync", skip_all, fields(isbn = %request.isbn))]
    pub async fn consume_book_updates(&self, request: BookSynchronization) -> Result<()> {
        let isbn = request.isbn;
        tracing::debug!("Incoming book synchronization for ISBN {}", isbn);

        if !is_valid_isbn(&isbn) {
            tracing::warn!("Skipping synchronization, malformed ISBN: {:?}", isbn);
            return Ok(());
        }

        if self.book_repository.find_by_isbn(&isbn).await?.is_some() {
            tracing::debug!("Book with ISBN {} already exists, nothing to do", isbn);
            return Ok(());
        }

        let book = self.metadata_client.fetch_metadata_for_book(&isbn).await?;
        let stored = self.book_repository.save(book).await?;

        tracing::info!(
            "Stored book '{}' (ISBN {}) with id {:?}",
            stored.title,
            stored.isbn,
            stored.id
        );
        Ok(())
    }

    pub fn book_repository(&self) -> &R {
        &self.book_repository
    }
}
