//! Configuration options for normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Language of the categorical values the severity rule matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    /// "admitted" encounters, "died" in outcome descriptions.
    #[default]
    En,
    /// Source-extract wording: "Internado" encounters, "Óbito" in outcome descriptions.
    Pt,
}

impl Vocabulary {
    pub fn admitted_category(self) -> &'static str {
        match self {
            Vocabulary::En => "admitted",
            Vocabulary::Pt => "Internado",
        }
    }

    pub fn death_indicator(self) -> &'static str {
        match self {
            Vocabulary::En => "died",
            Vocabulary::Pt => "Óbito",
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vocabulary::En => f.write_str("en"),
            Vocabulary::Pt => f.write_str("pt"),
        }
    }
}

impl FromStr for Vocabulary {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Vocabulary::En),
            "pt" | "portuguese" => Ok(Vocabulary::Pt),
            _ => Err(ModelError::UnknownVocabulary(value.to_string())),
        }
    }
}

/// Options for normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Keep the raw `city` and `postal_code` codes in patient output.
    /// Default: false.
    pub keep_geography: bool,

    /// Wording used by the severity rule for outcome extracts.
    pub vocabulary: Vocabulary,
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keep_geography(mut self, keep: bool) -> Self {
        self.keep_geography = keep;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }
}
