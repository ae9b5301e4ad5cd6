use crate::domain::model::{Book, Review, ReviewStatistic};
use crate::domain::ports::{BookRepository, ReviewRepository};
use crate::utils::error::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, SqlitePool};
use std::path::Path;
use tracing::info;

pub struct Database;

impl Database {
    /// 記憶體資料庫 URL 走單一連線的 in_memory，其餘走檔案資料庫
    pub async fn connect(database_url: &str) -> Result<SqlitePool> {
        if is_in_memory_url(database_url) {
            Self::in_memory().await
        } else {
            Self::initialize(database_url).await
        }
    }

    pub async fn initialize(database_url: &str) -> Result<SqlitePool> {
        if let Some(parent) = database_file_path(database_url).and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        info!("Database connected: {}", database_url);
        Self::run_migrations(&pool).await?;
        Ok(pool)
    }

    /// 單一連線的記憶體資料庫；連線關閉後資料即消失
    pub async fn in_memory() -> Result<SqlitePool> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(IN_MEMORY_URL)
            .await?;

        Self::run_migrations(&pool).await?;
        Ok(pool)
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations completed");
        Ok(())
    }
}

pub const IN_MEMORY_URL: &str = "sqlite::memory:";

fn is_in_memory_url(database_url: &str) -> bool {
    database_url
        .strip_prefix("sqlite:")
        .map(|rest| rest.trim_start_matches('/').split('?').next() == Some(":memory:"))
        .unwrap_or(false)
}

fn database_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next()?;
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(Path::new(path))
}

#[derive(Clone)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, isbn, title, author, publisher, pages, thumbnail_url, description, genre
            FROM books
            WHERE isbn = ?1
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn save(&self, mut book: Book) -> Result<Book> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (isbn, title, author, publisher, pages, thumbnail_url, description, genre)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(book.pages)
        .bind(&book.thumbnail_url)
        .bind(&book.description)
        .bind(&book.genre)
        .execute(&self.pool)
        .await?;

        book.id = Some(result.last_insert_rowid());
        Ok(book)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[derive(Clone)]
pub struct SqliteReviewRepository {
    pool: SqlitePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepository {
    async fn save(&self, mut review: Review) -> Result<Review> {
        let result = sqlx::query(
            r#"
            INSERT INTO reviews (book_id, rating, title, content, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(review.book_id)
        .bind(review.rating)
        .bind(&review.title)
        .bind(&review.content)
        .bind(&review.user_id)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;

        review.id = Some(result.last_insert_rowid());
        Ok(review)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_by_book_id(&self, book_id: i64) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, book_id, rating, title, content, user_id, created_at
            FROM reviews
            WHERE book_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn get_review_statistics(&self) -> Result<Vec<ReviewStatistic>> {
        let rows = sqlx::query_as::<_, ReviewTotalsRow>(
            r#"
            SELECT books.id AS id,
                   books.isbn AS isbn,
                   SUM(reviews.rating) AS rating_sum,
                   COUNT(*) AS ratings
            FROM reviews
            JOIN books ON books.id = reviews.book_id
            GROUP BY books.id, books.isbn
            ORDER BY ratings DESC, books.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ReviewStatistic::from_totals(row.id, row.isbn, row.rating_sum, row.ratings))
            .collect())
    }
}

/// 平均在 Rust 端以定點小數計算，避免 SQLite REAL 的捨入誤差
#[derive(FromRow)]
struct ReviewTotalsRow {
    id: i64,
    isbn: String,
    rating_sum: i64,
    ratings: i64,
}
