use crate::domain::model::Book;
use crate::domain::ports::MetadataClient;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

/// Open Library Books API (`jscmd=data`) 的回應片段
#[derive(Debug, Deserialize)]
struct OpenLibraryBook {
    title: String,
    #[serde(default)]
    authors: Vec<NamedEntry>,
    #[serde(default)]
    publishers: Vec<NamedEntry>,
    number_of_pages: Option<i64>,
    cover: Option<Cover>,
    #[serde(default)]
    subjects: Vec<NamedEntry>,
    notes: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Cover {
    small: Option<String>,
}

pub struct OpenLibraryApiClient {
    client: Client,
    base_url: String,
}

impl OpenLibraryApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MetadataClient for OpenLibraryApiClient {
    async fn fetch_metadata_for_book(&self, isbn: &str) -> Result<Book> {
        let url = format!("{}/api/books", self.base_url);
        let bibkey = format!("ISBN:{}", isbn);

        tracing::debug!("Requesting Open Library metadata for {}", bibkey);
        let response = self
            .client
            .get(&url)
            .query(&[("jscmd", "data"), ("format", "json"), ("bibkeys", bibkey.as_str())])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Open Library response status: {}", status);
        if !status.is_success() {
            return Err(CatalogError::MetadataFetch {
                isbn: isbn.to_string(),
                status: status.as_u16(),
            });
        }

        let mut entries: HashMap<String, OpenLibraryBook> = response.json().await?;
        let entry = entries
            .remove(&bibkey)
            .ok_or_else(|| CatalogError::BookNotFound {
                isbn: isbn.to_string(),
            })?;

        Ok(into_book(isbn, entry))
    }
}

fn into_book(isbn: &str, entry: OpenLibraryBook) -> Book {
    let description = entry.notes.and_then(|notes| match notes {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Object(obj) => obj
            .get("value")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    });

    Book {
        id: None,
        isbn: isbn.to_string(),
        title: entry.title,
        author: entry.authors.into_iter().next().map(|a| a.name),
        publisher: entry.publishers.into_iter().next().map(|p| p.name),
        pages: entry.number_of_pages,
        thumbnail_url: entry.cover.and_then(|c| c.small),
        description,
        genre: entry.subjects.into_iter().next().map(|s| s.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_book_maps_first_entries() {
        let entry: OpenLibraryBook = serde_json::from_value(serde_json::json!({
            "title": "Effective Java",
            "authors": [{"name": "Joshua Bloch"}, {"name": "Someone Else"}],
            "publishers": [{"name": "Addison-Wesley"}],
            "number_of_pages": 412,
            "cover": {"small": "https://covers.openlibrary.org/b/id/1-S.jpg"},
            "subjects": [{"name": "Java (Computer program language)"}],
            "notes": {"type": "/type/text", "value": "Third edition"}
        }))
        .unwrap();

        let book = into_book("9780134685991", entry);
        assert_eq!(book.id, None);
        assert_eq!(book.isbn, "9780134685991");
        assert_eq!(book.title, "Effective Java");
        assert_eq!(book.author.as_deref(), Some("Joshua Bloch"));
        assert_eq!(book.publisher.as_deref(), Some("Addison-Wesley"));
        assert_eq!(book.pages, Some(412));
        assert_eq!(
            book.thumbnail_url.as_deref(),
            Some("https://covers.openlibrary.org/b/id/1-S.jpg")
        );
        assert_eq!(book.description.as_deref(), Some("Third edition"));
        assert_eq!(book.genre.as_deref(), Some("Java (Computer program language)"));
    }

    #[test]
    fn test_into_book_with_title_only() {
        let entry: OpenLibraryBook =
            serde_json::from_value(serde_json::json!({"title": "Untitled Notes"})).unwrap();

        let book = into_book("1234567891234", entry);
        assert_eq!(book, Book::new("1234567891234", "Untitled Notes"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client =
            OpenLibraryApiClient::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
