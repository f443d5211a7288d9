//! The fixed set of languages a producer profile is published in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// One of the seven supported profile languages.
///
/// Serialized as its lowercase ISO 639-1 code, both as a value and as a
/// map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    El,
    En,
    De,
    Fr,
    It,
    Es,
    Pt,
}

/// Languages that receive storytelling copy in addition to a translation.
pub const STORYTELLING_LANGUAGES: [Language; 3] = [Language::En, Language::De, Language::Fr];

impl Language {
    pub const ALL: [Language; 7] = [
        Language::El,
        Language::En,
        Language::De,
        Language::Fr,
        Language::It,
        Language::Es,
        Language::Pt,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::El => "el",
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Es => "es",
            Self::Pt => "pt",
        }
    }

    /// English display name, as used in prompts.
    pub fn name(self) -> &'static str {
        match self {
            Self::El => "Greek",
            Self::En => "English",
            Self::De => "German",
            Self::Fr => "French",
            Self::It => "Italian",
            Self::Es => "Spanish",
            Self::Pt => "Portuguese",
        }
    }

    /// Look up a language by code. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Every supported language except `self`, in canonical order.
    pub fn targets(self) -> Vec<Language> {
        Self::ALL.into_iter().filter(|&lang| lang != self).collect()
    }

    pub fn has_storytelling(self) -> bool {
        STORYTELLING_LANGUAGES.contains(&self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ValidationError::UnsupportedLanguage(s.to_string()))
    }
}
