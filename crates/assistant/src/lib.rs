//! `mustock-assistant`: natural-language inventory queries.
//!
//! A query goes through four stages:
//! - **tokenize**: lowercase word tokens ([`tokenizer`])
//! - **classify**: naive-Bayes intent model trained once at startup ([`classifier`])
//! - **extract**: resolve words against a [`CatalogSnapshot`](mustock_inventory::CatalogSnapshot),
//!   exact/substring first, similarity second ([`extractor`])
//! - **respond**: one handler per [`Intent`] ([`response`])
//!
//! [`QueryDispatcher`] composes them and is the only type hosts need:
//!
//! ```no_run
//! use mustock_assistant::{AssistantConfig, QueryDispatcher};
//! use mustock_inventory::CatalogSnapshot;
//!
//! let dispatcher = QueryDispatcher::builtin(AssistantConfig::from_env())?;
//! let result = dispatcher.handle("where is the fender stratocaster", &CatalogSnapshot::empty())?;
//! println!("{}", result.response_text);
//! # Ok::<(), mustock_assistant::AssistantError>(())
//! ```
//!
//! Nothing here does IO. The trained model is immutable and shared via `Arc`.

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod intent;
pub mod response;
pub mod similarity;
pub mod tagging;
pub mod tokenizer;

pub use classifier::{Classification, IntentModel};
pub use config::{AssistantConfig, DEFAULT_FUZZY_THRESHOLD, DEFAULT_LOW_STOCK_THRESHOLD};
pub use corpus::{TrainingCorpus, TrainingExample};
pub use dispatcher::{QueryDispatcher, QueryResult};
pub use error::AssistantError;
pub use extractor::{Bound, Entity, EntityExtractor, EntityKind, MatchMethod, MatchResult, NumericHint};
pub use intent::Intent;
pub use response::{Response, ResponseContext};
pub use similarity::{JaroWinkler, Similarity};
pub use tagging::CandidateStrategy;
pub use tokenizer::tokenize;
