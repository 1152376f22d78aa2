//! Labelled training phrases for the intent classifier.

use serde::{Deserialize, Serialize};

use crate::error::AssistantError;
use crate::intent::Intent;

const BUILTIN: &[(&str, Intent)] = &[
    ("find fender guitar", Intent::Search),
    ("search for gibson les paul", Intent::Search),
    ("do we have any marshall amplifiers", Intent::Search),
    ("look up yamaha keyboard", Intent::Search),
    ("find black guitar cables", Intent::Search),
    ("search inventory for drum sticks", Intent::Search),
    ("do you carry boss pedals", Intent::Search),
    ("show me guitars under 500", Intent::Search),
    ("how many stratocasters in stock", Intent::Quantity),
    ("how many gibson les pauls do we have", Intent::Quantity),
    ("how many units of yamaha keyboard are there", Intent::Quantity),
    ("what is the quantity of marshall amps", Intent::Quantity),
    ("count of drum kits", Intent::Quantity),
    ("how much stock of guitar strings do we have", Intent::Quantity),
    ("number of boss pedals on hand", Intent::Quantity),
    ("where is the fender stratocaster", Intent::Location),
    ("where is les paul located", Intent::Location),
    ("where are the guitar cables", Intent::Location),
    ("which shelf holds the yamaha keyboard", Intent::Location),
    ("location of marshall amplifier", Intent::Location),
    ("where can i find drum sticks", Intent::Location),
    ("what aisle are the boss pedals in", Intent::Location),
    ("where do we keep the studio monitors", Intent::Location),
    ("list electric guitars", Intent::ListCategory),
    ("list all electric guitars", Intent::ListCategory),
    ("list categories", Intent::ListCategory),
    ("what categories do we have", Intent::ListCategory),
    ("show all categories", Intent::ListCategory),
    ("list all keyboards", Intent::ListCategory),
    ("show items in the amplifiers category", Intent::ListCategory),
    ("list everything in effects pedals", Intent::ListCategory),
    ("what are our low stock items", Intent::LowStock),
    ("what instruments are low in stock", Intent::LowStock),
    ("which items are running low", Intent::LowStock),
    ("show low stock alert", Intent::LowStock),
    ("what needs to be reordered", Intent::LowStock),
    ("items running out of stock", Intent::LowStock),
    ("low inventory report", Intent::LowStock),
    ("price of yamaha keyboard", Intent::Price),
    ("how much does the fender stratocaster cost", Intent::Price),
    ("what is the price of les paul", Intent::Price),
    ("cost of marshall amplifier", Intent::Price),
    ("how much is the boss pedal", Intent::Price),
    ("what does a drum kit sell for", Intent::Price),
    ("price check on guitar strings", Intent::Price),
    ("hello", Intent::Unknown),
    ("hi there", Intent::Unknown),
    ("thanks", Intent::Unknown),
    ("what can you do", Intent::Unknown),
    ("help", Intent::Unknown),
    ("good morning", Intent::Unknown),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub intent: Intent,
}

/// Host-supplied record; the label is parsed leniently.
#[derive(Debug, Deserialize)]
struct RawExample {
    text: String,
    intent: String,
}

/// Fixed set of labelled phrases the classifier is trained on at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TrainingCorpus {
    examples: Vec<TrainingExample>,
}

impl TrainingCorpus {
    /// The phrases shipped with the assistant.
    pub fn builtin() -> Self {
        Self {
            examples: BUILTIN
                .iter()
                .map(|(text, intent)| TrainingExample {
                    text: (*text).to_string(),
                    intent: *intent,
                })
                .collect(),
        }
    }

    /// Build from `(text, label)` pairs.
    ///
    /// Labels outside the intent set are logged and trained as `unknown`.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            examples: pairs
                .into_iter()
                .map(|(text, label)| TrainingExample {
                    text: text.to_string(),
                    intent: parse_label(label),
                })
                .collect(),
        }
    }

    /// Parse a JSON array of `{"text": .., "intent": ..}` objects.
    pub fn from_json(json: &str) -> Result<Self, AssistantError> {
        let raw: Vec<RawExample> =
            serde_json::from_str(json).map_err(|e| AssistantError::InvalidCorpus(e.to_string()))?;
        Ok(Self::from_pairs(
            raw.iter().map(|r| (r.text.as_str(), r.intent.as_str())),
        ))
    }

    pub fn push(&mut self, text: impl Into<String>, intent: Intent) {
        self.examples.push(TrainingExample {
            text: text.into(),
            intent,
        });
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

fn parse_label(label: &str) -> Intent {
    label.parse().unwrap_or_else(|e| {
        tracing::warn!("training example relabelled as unknown: {e}");
        Intent::Unknown
    })
}
