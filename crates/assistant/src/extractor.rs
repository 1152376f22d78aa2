//! Entity extraction: resolve query words against the catalog snapshot.
//!
//! Stages run in order and stop at the first one that finds anything:
//! 1. direct matches: an item name or category phrase appears in the query
//!    (`exact`), or query words overlap name/category words (`substring`)
//! 2. fuzzy matches: the candidate phrase is similar enough to an item name
//! 3. nothing: an empty [`MatchResult`], which handlers answer with a
//!    clarification
//!
//! Numbers are collected separately as [`NumericHint`]s.

use rust_decimal::Decimal;
use serde::Serialize;

use mustock_inventory::{CatalogSnapshot, Category, ItemRef};

use crate::config::AssistantConfig;
use crate::similarity::{JaroWinkler, Similarity};
use crate::tagging::{CandidateStrategy, Candidates};
use crate::tokenizer::{fold_plural, parse_number, tokenize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    ItemReference,
    CategoryReference,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Exact,
    Substring,
    Fuzzy,
}

/// A resolved reference from query text into the snapshot.
///
/// Items are referenced by position; the entity never copies the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub item: Option<ItemRef>,
    pub category: Option<Category>,
    pub confidence: f64,
    pub method: MatchMethod,
}

impl Entity {
    fn item(item: ItemRef, confidence: f64, method: MatchMethod) -> Self {
        Self {
            kind: EntityKind::ItemReference,
            item: Some(item),
            category: None,
            confidence,
            method,
        }
    }

    fn category(category: Category, method: MatchMethod) -> Self {
        Self {
            kind: EntityKind::CategoryReference,
            item: None,
            category: Some(category),
            confidence: 1.0,
            method,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Min,
    Max,
    Unbounded,
}

/// A number mentioned in the query, with the bound it expresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumericHint {
    pub value: Decimal,
    pub bound: Bound,
}

/// Entities ranked by confidence (descending), plus numeric hints.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MatchResult {
    pub entities: Vec<Entity>,
    pub hints: Vec<NumericHint>,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Matched item references, in rank order.
    pub fn items(&self) -> impl Iterator<Item = ItemRef> + '_ {
        self.entities.iter().filter_map(|e| e.item)
    }

    /// Matched categories, in rank order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.entities.iter().filter_map(|e| e.category.as_ref())
    }

    /// True when every entity came from the fuzzy stage.
    pub fn is_fuzzy(&self) -> bool {
        !self.entities.is_empty()
            && self.entities.iter().all(|e| e.method == MatchMethod::Fuzzy)
    }

    /// `(min, max)` bounds taken from the last hint of each kind.
    pub fn bounds(&self) -> (Option<Decimal>, Option<Decimal>) {
        let last = |bound: Bound| {
            self.hints
                .iter()
                .rev()
                .find(|h| h.bound == bound)
                .map(|h| h.value)
        };
        (last(Bound::Min), last(Bound::Max))
    }
}

#[derive(Debug, Clone)]
pub struct EntityExtractor<S = JaroWinkler> {
    similarity: S,
    fuzzy_threshold: f64,
    strategy: CandidateStrategy,
}

impl EntityExtractor<JaroWinkler> {
    pub fn new(config: &AssistantConfig) -> Self {
        Self::with_similarity(JaroWinkler, config)
    }
}

impl Default for EntityExtractor<JaroWinkler> {
    fn default() -> Self {
        Self::new(&AssistantConfig::default())
    }
}

impl<S: Similarity> EntityExtractor<S> {
    pub fn with_similarity(similarity: S, config: &AssistantConfig) -> Self {
        Self {
            similarity,
            fuzzy_threshold: config.fuzzy_threshold,
            strategy: config.candidate_strategy,
        }
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    /// Fuzzy acceptance is strict: a score equal to the threshold is rejected.
    pub fn accepts(&self, score: f64) -> bool {
        score > self.fuzzy_threshold
    }

    pub fn extract(&self, text: &str, catalog: &CatalogSnapshot) -> MatchResult {
        self.extract_tokens(&tokenize(text), catalog)
    }

    pub fn extract_tokens(&self, tokens: &[String], catalog: &CatalogSnapshot) -> MatchResult {
        let candidates = self.strategy.candidates(tokens);
        let hints = numeric_hints(tokens);

        let mut entities = direct_matches(tokens, &candidates, catalog);
        if entities.is_empty() {
            entities = self.fuzzy_matches(&candidates, catalog);
            if !entities.is_empty() {
                tracing::debug!("resolved {} entities by similarity", entities.len());
            }
        } else {
            tracing::debug!("resolved {} entities directly", entities.len());
        }

        MatchResult { entities, hints }
    }

    fn fuzzy_matches(&self, candidates: &Candidates, catalog: &CatalogSnapshot) -> Vec<Entity> {
        let Some(phrase) = candidates.phrase.as_deref() else {
            return Vec::new();
        };
        let single_word = !phrase.contains(' ');

        let mut entities: Vec<Entity> = catalog
            .iter_refs()
            .filter_map(|(r, item)| {
                let name_tokens = tokenize(&item.name);
                let mut score = self.similarity.score(phrase, &name_tokens.join(" "));
                if single_word {
                    for token in &name_tokens {
                        score = score.max(self.similarity.score(phrase, token));
                    }
                }
                self.accepts(score)
                    .then(|| Entity::item(r, score, MatchMethod::Fuzzy))
            })
            .collect();

        // Stable: equal scores keep catalog order.
        entities.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        entities
    }
}

/// Whether `needle` occurs as a contiguous run inside `haystack`.
fn contains_run(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

fn word_overlaps(word: &str, target: &str) -> bool {
    fold_plural(word) == fold_plural(target) || (word.len() >= 4 && target.starts_with(word))
}

/// Number of query words overlapping any of `targets`.
fn overlap(words: &[String], targets: &[String]) -> usize {
    words
        .iter()
        .filter(|w| targets.iter().any(|t| word_overlaps(w, t)))
        .count()
}

fn folded(tokens: &[String]) -> Vec<&str> {
    tokens.iter().map(|t| fold_plural(t)).collect()
}

/// Stage 1. Exact matches of a kind shadow substring matches of that kind;
/// among substring matches only the largest word overlap survives.
fn direct_matches(tokens: &[String], candidates: &Candidates, catalog: &CatalogSnapshot) -> Vec<Entity> {
    let query = folded(tokens);

    let mut exact_categories: Vec<&Category> = Vec::new();
    let mut partial_categories: Vec<(&Category, usize)> = Vec::new();
    for category in catalog.categories() {
        let words = tokenize(category.label());
        if contains_run(&query, &folded(&words)) {
            exact_categories.push(category);
        } else {
            let n = overlap(&candidates.words, &words);
            if n > 0 {
                partial_categories.push((category, n));
            }
        }
    }

    let mut exact_items: Vec<ItemRef> = Vec::new();
    let mut partial_items: Vec<(ItemRef, usize)> = Vec::new();
    for (r, item) in catalog.iter_refs() {
        let name = tokenize(&item.name);
        if contains_run(&query, &folded(&name)) || exact_categories.contains(&&item.category) {
            exact_items.push(r);
            continue;
        }
        let mut n = overlap(&candidates.words, &name);
        if item.category.is_known() {
            n = n.max(overlap(&candidates.words, &tokenize(item.category.label())));
        }
        if n > 0 {
            partial_items.push((r, n));
        }
    }

    let mut entities: Vec<Entity> = if exact_items.is_empty() {
        best_overlap(partial_items)
            .into_iter()
            .map(|r| Entity::item(r, 1.0, MatchMethod::Substring))
            .collect()
    } else {
        exact_items
            .into_iter()
            .map(|r| Entity::item(r, 1.0, MatchMethod::Exact))
            .collect()
    };

    if exact_categories.is_empty() {
        entities.extend(
            best_overlap(partial_categories)
                .into_iter()
                .map(|c| Entity::category(c.clone(), MatchMethod::Substring)),
        );
    } else {
        entities.extend(
            exact_categories
                .into_iter()
                .map(|c| Entity::category(c.clone(), MatchMethod::Exact)),
        );
    }

    entities
}

fn best_overlap<T>(scored: Vec<(T, usize)>) -> Vec<T> {
    let top = scored.iter().map(|(_, n)| *n).max().unwrap_or(0);
    scored
        .into_iter()
        .filter(|(_, n)| *n == top)
        .map(|(t, _)| t)
        .collect()
}

const MAX_MARKERS: &[&str] = &["below", "max", "maximum", "under", "within"];
const MIN_MARKERS: &[&str] = &["above", "min", "minimum", "over"];

fn numeric_hints(tokens: &[String]) -> Vec<NumericHint> {
    let mut hints = Vec::new();
    let mut in_between = false;

    for (i, token) in tokens.iter().enumerate() {
        if token == "between" {
            in_between = true;
            continue;
        }
        if parse_number(token).is_none() {
            continue;
        }
        let Ok(value) = token.parse::<Decimal>() else {
            continue;
        };

        let prev = i.checked_sub(1).map(|j| tokens[j].as_str());
        let prev2 = i.checked_sub(2).map(|j| tokens[j].as_str());
        let bound = match (prev2, prev) {
            (_, Some("between")) => Bound::Min,
            (_, Some("and")) if in_between => {
                in_between = false;
                Bound::Max
            }
            (_, Some(p)) if MAX_MARKERS.contains(&p) => Bound::Max,
            (_, Some(p)) if MIN_MARKERS.contains(&p) => Bound::Min,
            (Some("less" | "cheaper" | "fewer"), Some("than")) => Bound::Max,
            (Some("more" | "greater"), Some("than")) => Bound::Min,
            (Some("at"), Some("most")) => Bound::Max,
            (Some("at"), Some("least")) => Bound::Min,
            _ => Bound::Unbounded,
        };
        hints.push(NumericHint { value, bound });
    }

    hints
}
