#![allow(dead_code)]

use async_trait::async_trait;
use book_catalog::core::{BookRepository, MetadataClient};
use book_catalog::{Book, CatalogError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::{Arc, Mutex};

pub const VALID_ISBN: &str = "1234567891234";

/// 記錄呼叫次數的書籍儲存庫替身
#[derive(Clone, Default)]
pub struct RecordingBookRepository {
    state: Arc<Mutex<RepositoryState>>,
}

#[derive(Default)]
struct RepositoryState {
    existing: Vec<Book>,
    find_calls: Vec<String>,
    saved: Vec<Book>,
}

impl RecordingBookRepository {
    pub fn with_existing(book: Book) -> Self {
        let repository = Self::default();
        repository.state.lock().unwrap().existing.push(book);
        repository
    }

    pub fn find_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().find_calls.clone()
    }

    pub fn saved(&self) -> Vec<Book> {
        self.state.lock().unwrap().saved.clone()
    }

    pub fn interactions(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.find_calls.len() + state.saved.len()
    }
}

#[async_trait]
impl BookRepository for RecordingBookRepository {
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        let mut state = self.state.lock().unwrap();
        state.find_calls.push(isbn.to_string());
        Ok(state
            .existing
            .iter()
            .chain(state.saved.iter())
            .find(|b| b.isbn == isbn)
            .cloned())
    }

    async fn save(&self, mut book: Book) -> Result<Book> {
        let mut state = self.state.lock().unwrap();
        state.saved.push(book.clone());
        book.id = Some(state.saved.len() as i64);
        Ok(book)
    }

    async fn count(&self) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok((state.existing.len() + state.saved.len()) as i64)
    }
}

enum ScriptedResponse {
    Book(Book),
    Timeout,
}

/// 回傳預設結果的外部書籍資料來源替身
#[derive(Clone)]
pub struct ScriptedMetadataClient {
    response: Arc<ScriptedResponse>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedMetadataClient {
    pub fn returning(book: Book) -> Self {
        Self {
            response: Arc::new(ScriptedResponse::Book(book)),
            calls: Arc::default(),
        }
    }

    pub fn timing_out() -> Self {
        Self {
            response: Arc::new(ScriptedResponse::Timeout),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataClient for ScriptedMetadataClient {
    async fn fetch_metadata_for_book(&self, isbn: &str) -> Result<Book> {
        self.calls.lock().unwrap().push(isbn.to_string());
        match self.response.as_ref() {
            ScriptedResponse::Book(book) => Ok(book.clone()),
            ScriptedResponse::Timeout => Err(CatalogError::MetadataFetch {
                isbn: isbn.to_string(),
                status: 504,
            }),
        }
    }
}

const NEUTRAL_WORDS: &[&str] = &[
    "book", "author", "chapter", "examples", "clear", "java", "code", "learned", "practical",
    "reading", "explains", "concepts", "patterns", "team", "testing", "design", "useful", "pages",
];

const BLOCKED_WORDS: &[&str] = &["shit", "crap", "damn", "bullshit"];

fn neutral_sentence(rng: &mut StdRng, words: usize) -> Vec<String> {
    (0..words)
        .map(|_| NEUTRAL_WORDS.choose(&mut *rng).unwrap().to_string())
        .collect()
}

/// 產生一定不符合品質標準的隨機評論
pub fn random_bad_review(rng: &mut StdRng) -> String {
    match rng.gen_range(0..6) {
        0 => {
            let count = rng.gen_range(1..=6);
            neutral_sentence(rng, count).join(" ")
        }
        1 => {
            let mut words = neutral_sentence(rng, 12);
            let position = rng.gen_range(0..=words.len());
            let blocked = BLOCKED_WORDS.choose(rng).unwrap();
            words.insert(position, blocked.to_uppercase());
            words.join(" ")
        }
        2 => format!("Lorem ipsum {}", neutral_sentence(rng, 10).join(" ")),
        3 => {
            let mut words = neutral_sentence(rng, 12);
            let repeats = rng.gen_range(4..=9);
            words.push(format!("so{}", "o".repeat(repeats)));
            words.join(" ")
        }
        4 => {
            let mut words = neutral_sentence(rng, 12);
            words.push("visit https://spam.example.com".to_string());
            words.join(" ")
        }
        _ => neutral_sentence(rng, 12).join(" ").to_uppercase(),
    }
}
