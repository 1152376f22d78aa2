//! Bag-of-words intent classifier.
//!
//! Model: multinomial naive Bayes with add-one smoothing.
//! - features are query tokens with simple plurals folded (`guitars` -> `guitar`)
//! - `score(intent) = log P(intent) + sum(log P(token | intent))` over known tokens
//! - the highest score wins; exact ties go to the intent listed first in
//!   [`Intent::PRECEDENCE`]
//!
//! The model is trained once and never mutated afterwards, so one instance can
//! be shared by any number of concurrent dispatchers.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::corpus::TrainingCorpus;
use crate::error::AssistantError;
use crate::intent::Intent;
use crate::tokenizer::{fold_plural, tokenize};

/// Outcome of classifying one query.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub intent: Intent,
    /// Posterior probability of `intent` among the trained intents, in [0, 1].
    pub confidence: f64,
    /// How many query tokens the model has seen during training.
    pub evidence: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntentModel {
    vocab: BTreeMap<String, usize>,
    // log P(token | intent), flattened [intent * vocab_size + token]
    log_likelihood: Vec<f64>,
    // log P(intent); `None` for intents without training phrases
    log_prior: [Option<f64>; Intent::COUNT],
}

fn features(tokens: &[String]) -> impl Iterator<Item = &str> {
    tokens.iter().map(|t| fold_plural(t))
}

impl IntentModel {
    /// Train a model from scratch.
    ///
    /// Training is a pure function of the corpus: the same corpus always
    /// yields an equal model.
    pub fn train(corpus: &TrainingCorpus) -> Result<Self, AssistantError> {
        let documents: Vec<(Vec<String>, Intent)> = corpus
            .examples()
            .iter()
            .map(|e| (tokenize(&e.text), e.intent))
            .filter(|(tokens, _)| !tokens.is_empty())
            .collect();

        if documents.is_empty() {
            return Err(AssistantError::InvalidCorpus(
                "corpus has no usable examples".to_string(),
            ));
        }

        let vocab: BTreeMap<String, usize> = documents
            .iter()
            .flat_map(|(tokens, _)| features(tokens).map(str::to_string))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(i, token)| (token, i))
            .collect();
        let vocab_size = vocab.len();

        let mut doc_counts = [0usize; Intent::COUNT];
        let mut token_counts = vec![0usize; Intent::COUNT * vocab_size];
        let mut token_totals = [0usize; Intent::COUNT];

        for (tokens, intent) in &documents {
            let c = intent.index();
            doc_counts[c] += 1;
            for feature in features(tokens) {
                if let Some(&t) = vocab.get(feature) {
                    token_counts[c * vocab_size + t] += 1;
                    token_totals[c] += 1;
                }
            }
        }

        let total_docs = documents.len() as f64;
        let mut log_prior = [None; Intent::COUNT];
        let mut log_likelihood = vec![0.0; Intent::COUNT * vocab_size];

        for c in 0..Intent::COUNT {
            if doc_counts[c] == 0 {
                continue;
            }
            log_prior[c] = Some((doc_counts[c] as f64 / total_docs).ln());
            let denom = (token_totals[c] + vocab_size) as f64;
            for t in 0..vocab_size {
                let count = token_counts[c * vocab_size + t] as f64;
                log_likelihood[c * vocab_size + t] = ((count + 1.0) / denom).ln();
            }
        }

        tracing::debug!(
            "trained intent model on {} examples ({} vocabulary tokens)",
            documents.len(),
            vocab_size
        );

        Ok(Self {
            vocab,
            log_likelihood,
            log_prior,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn classify(&self, text: &str) -> Classification {
        self.classify_tokens(&tokenize(text))
    }

    /// Classify already-tokenized input.
    ///
    /// Never fails: empty input is `unknown`, and input made only of unseen
    /// words falls back to the class priors (`evidence == 0`).
    pub fn classify_tokens(&self, tokens: &[String]) -> Classification {
        if tokens.is_empty() {
            return Classification {
                intent: Intent::Unknown,
                confidence: 0.0,
                evidence: 0,
            };
        }

        let known: Vec<usize> = features(tokens)
            .filter_map(|f| self.vocab.get(f).copied())
            .collect();
        let scores = self.score_features(&known);

        let mut best: Option<(Intent, f64)> = None;
        for &(intent, score) in &scores {
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((intent, score));
            }
        }

        match best {
            Some((intent, top)) => {
                let normalizer: f64 = scores.iter().map(|(_, s)| (s - top).exp()).sum();
                Classification {
                    intent,
                    confidence: 1.0 / normalizer,
                    evidence: known.len(),
                }
            }
            None => Classification {
                intent: Intent::Unknown,
                confidence: 0.0,
                evidence: known.len(),
            },
        }
    }

    /// Log scores of every trained intent, in precedence order.
    pub fn scores(&self, text: &str) -> Vec<(Intent, f64)> {
        let tokens = tokenize(text);
        let known: Vec<usize> = features(&tokens)
            .filter_map(|f| self.vocab.get(f).copied())
            .collect();
        self.score_features(&known)
    }

    fn score_features(&self, known: &[usize]) -> Vec<(Intent, f64)> {
        let vocab_size = self.vocab.len();
        Intent::PRECEDENCE
            .iter()
            .filter_map(|&intent| {
                let c = intent.index();
                let prior = self.log_prior[c]?;
                let likelihood: f64 = known
                    .iter()
                    .map(|&t| self.log_likelihood[c * vocab_size + t])
                    .sum();
                Some((intent, prior + likelihood))
            })
            .collect()
    }
}
