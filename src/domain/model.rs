use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    /// 儲存後才會有值
    pub id: Option<i64>,
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub pages: Option<i64>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
}

impl Book {
    pub fn new(isbn: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Option<i64>,
    pub book_id: i64,
    pub rating: i64,
    pub title: Option<String>,
    pub content: String,
    pub user_id: Option<String>,
    pub created_at: i64,
}

/// 尚未綁定書籍的評論輸入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub rating: i64,
    pub title: Option<String>,
    pub content: String,
    pub user_id: Option<String>,
}

/// 每本書的評分統計，由資料庫即時彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStatistic {
    pub id: i64,
    pub isbn: String,
    /// 定點小數，四捨五入（中間值遠離零）到小數第二位
    pub avg: Decimal,
    pub ratings: i64,
}

impl ReviewStatistic {
    /// 由評分總和與筆數計算平均；`ratings` 為 0 時平均為 0
    pub fn from_totals(id: i64, isbn: String, rating_sum: i64, ratings: i64) -> Self {
        let mut avg = Decimal::from(rating_sum)
            .checked_div(Decimal::from(ratings))
            .unwrap_or(Decimal::ZERO)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        avg.rescale(2);

        Self {
            id,
            isbn,
            avg,
            ratings,
        }
    }

    pub fn avg_display(&self) -> String {
        format!("{:.2}", self.avg)
    }
}

/// 同步請求的訊息內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSynchronization {
    pub isbn: String,
}

impl BookSynchronization {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self { isbn: isbn.into() }
    }

    pub fn from_message(payload: &str) -> crate::utils::error::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synchronization_from_message() {
        let request = BookSynchronization::from_message(r#"{"isbn":"9780134685991"}"#).unwrap();
        assert_eq!(request, BookSynchronization::new("9780134685991"));

        assert!(BookSynchronization::from_message(r#"{"title":"no isbn"}"#).is_err());
    }

    #[test]
    fn test_avg_display_keeps_two_places() {
        let stat = ReviewStatistic::from_totals(2, "9780134685991".to_string(), 6, 2);
        assert_eq!(stat.avg, Decimal::new(300, 2));
        assert_eq!(stat.avg_display(), "3.00");
        assert_eq!(stat.avg.to_string(), "3.00");
    }

    #[test]
    fn test_average_rounds_half_away_from_zero() {
        // 107 / 40 = 2.675
        let stat = ReviewStatistic::from_totals(1, "9780134685991".to_string(), 107, 40);
        assert_eq!(stat.avg, Decimal::new(268, 2));

        // 10 / 3 = 3.333...
        let stat = ReviewStatistic::from_totals(1, "9780134685991".to_string(), 10, 3);
        assert_eq!(stat.avg_display(), "3.33");

        // 5 / 8 = 0.625
        let stat = ReviewStatistic::from_totals(1, "9780134685991".to_string(), 5, 8);
        assert_eq!(stat.avg_display(), "0.63");
    }

    #[test]
    fn test_zero_ratings_does_not_panic() {
        let stat = ReviewStatistic::from_totals(1, "9780134685991".to_string(), 0, 0);
        assert_eq!(stat.avg_display(), "0.00");
    }
}
