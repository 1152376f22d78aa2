//! Candidate generation: which query words may refer to catalog entries.
//!
//! Two strategies are available. `Tokens` treats every content word as one
//! candidate phrase. `Tagged` runs a small lexicon tagger and keeps the longest
//! adjective/noun run, which drops stray words like "please" or "there" from
//! the phrase used for fuzzy matching.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tokenizer::parse_number;

/// Function words and query verbs that never name an item.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "all", "an", "and", "any", "are", "at", "available", "be", "below",
    "between", "can", "categories", "category", "cheaper", "cost", "costs", "could", "count",
    "currently", "do", "does", "every", "everything", "find", "for", "get", "give", "got", "has",
    "have", "hello", "help", "hi", "how", "i", "in", "inventory", "is", "it", "item", "items",
    "its", "keep", "kind", "kinds", "least", "left", "less", "list", "locate", "located",
    "location", "look", "low", "many", "max", "maximum", "me", "min", "minimum", "more", "most",
    "much", "my", "need", "number", "of", "on", "or", "our", "over", "please", "price", "priced",
    "prices", "quantity", "remaining", "running", "search", "sell", "show", "some", "stock",
    "stocked", "tell", "than", "that", "the", "their", "them", "there", "these", "this", "those",
    "to", "under", "up", "us", "we", "what", "whats", "where", "wheres", "which", "with", "you",
    "your",
];

/// Descriptive words the tagger treats as adjectives.
const ADJECTIVES: &[&str] = &[
    "acoustic", "big", "black", "blue", "brown", "cheap", "digital", "electric", "gold", "gray",
    "green", "grey", "heavy", "large", "light", "long", "mini", "natural", "new", "orange",
    "pink", "premium", "purple", "red", "short", "silver", "small", "sunburst", "used",
    "vintage", "white", "wireless", "yellow",
];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Coarse part-of-speech tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tag {
    Function,
    Number,
    Adjective,
    Noun,
}

impl Tag {
    fn is_content(self) -> bool {
        matches!(self, Tag::Adjective | Tag::Noun)
    }
}

pub fn tag(token: &str) -> Tag {
    if parse_number(token).is_some() {
        Tag::Number
    } else if is_stop_word(token) {
        Tag::Function
    } else if ADJECTIVES.binary_search(&token).is_ok() {
        Tag::Adjective
    } else {
        Tag::Noun
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStrategy {
    Tokens,
    #[default]
    Tagged,
}

impl FromStr for CandidateStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tokens" => Ok(CandidateStrategy::Tokens),
            "tagged" => Ok(CandidateStrategy::Tagged),
            other => Err(format!("unknown candidate strategy: {other}")),
        }
    }
}

/// Words and phrase a query offers for matching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Candidates {
    /// Content words (no function words, no numbers), in query order.
    pub words: Vec<String>,
    /// Phrase compared against item names when nothing matches exactly.
    pub phrase: Option<String>,
}

impl CandidateStrategy {
    pub fn candidates(self, tokens: &[String]) -> Candidates {
        let tags: Vec<Tag> = tokens.iter().map(|t| tag(t)).collect();
        let words: Vec<String> = tokens
            .iter()
            .zip(&tags)
            .filter(|(_, t)| t.is_content())
            .map(|(w, _)| w.clone())
            .collect();

        let phrase = match self {
            CandidateStrategy::Tokens => (!words.is_empty()).then(|| words.join(" ")),
            CandidateStrategy::Tagged => longest_content_run(tokens, &tags),
        };

        Candidates { words, phrase }
    }
}

/// Longest contiguous adjective/noun run; the earliest wins ties.
fn longest_content_run(tokens: &[String], tags: &[Tag]) -> Option<String> {
    let mut best: Option<(usize, usize)> = None;
    let mut start = None;

    for i in 0..=tokens.len() {
        let content = tags.get(i).is_some_and(|t| t.is_content());
        match (content, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if best.is_none_or(|(bs, be)| i - s > be - bs) {
                    best = Some((s, i));
                }
                start = None;
            }
            _ => {}
        }
    }

    best.map(|(s, e)| tokens[s..e].join(" "))
}
