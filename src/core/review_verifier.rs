use std::fmt;

/// 少於這個字數的評論視為內容不足
pub const MIN_WORDS: usize = 10;

/// 同一字母或標點連續出現的上限，數字不計
pub const MAX_REPEATED_CHARS: usize = 4;

const SHOUTING_MIN_LETTERS: usize = 10;

const BLOCKLIST: &[&str] = &[
    "shit", "shitty", "crap", "crappy", "damn", "fuck", "fucking", "bullshit", "bitch", "bastard",
    "asshole", "piss", "wtf", "moron", "retard",
];

const PLACEHOLDER_PHRASE: &str = "lorem ipsum";

const SPAM_MARKERS: &[&str] = &["http://", "https://", "www."];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    Empty,
    PlaceholderText,
    Profanity(String),
    TooShort { words: usize },
    RepeatedCharacters(char),
    Spam,
    Shouting,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::Empty => write!(f, "review is empty"),
            RejectionReason::PlaceholderText => write!(f, "review contains placeholder text"),
            RejectionReason::Profanity(word) => write!(f, "review contains blocked word '{}'", word),
            RejectionReason::TooShort { words } => write!(
                f,
                "review has {} words, at least {} are required",
                words, MIN_WORDS
            ),
            RejectionReason::RepeatedCharacters(c) => {
                write!(f, "review repeats '{}' too many times in a row", c)
            }
            RejectionReason::Spam => write!(f, "review contains links"),
            RejectionReason::Shouting => write!(f, "review is mostly upper case"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectionReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// 規則式的評論品質檢查，無狀態
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewVerifier;

impl ReviewVerifier {
    pub fn new() -> Self {
        Self
    }

    pub fn does_meet_quality_standards(&self, review: &str) -> bool {
        self.verify(review).is_accepted()
    }

    pub fn verify(&self, review: &str) -> Verdict {
        let text = review.trim();
        if text.is_empty() {
            return Verdict::Rejected(RejectionReason::Empty);
        }

        let lowered = text.to_lowercase();
        if lowered.contains(PLACEHOLDER_PHRASE) {
            return Verdict::Rejected(RejectionReason::PlaceholderText);
        }

        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        if let Some(word) = words.iter().find(|w| BLOCKLIST.contains(*w)) {
            return Verdict::Rejected(RejectionReason::Profanity(word.to_string()));
        }

        if SPAM_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            return Verdict::Rejected(RejectionReason::Spam);
        }

        if let Some(c) = longest_run_over_limit(text) {
            return Verdict::Rejected(RejectionReason::RepeatedCharacters(c));
        }

        if words.len() < MIN_WORDS {
            return Verdict::Rejected(RejectionReason::TooShort { words: words.len() });
        }

        if is_shouting(text) {
            return Verdict::Rejected(RejectionReason::Shouting);
        }

        Verdict::Accepted
    }
}

fn longest_run_over_limit(text: &str) -> Option<char> {
    let mut previous = None;
    let mut run = 0;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c.is_numeric() {
            previous = None;
            run = 0;
            continue;
        }
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= MAX_REPEATED_CHARS {
            return Some(c);
        }
    }
    None
}

fn is_shouting(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() < SHOUTING_MIN_LETTERS {
        return false;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    upper * 2 > letters.len()
}
