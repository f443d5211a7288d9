//! Producer submissions and the enriched profiles built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Language, ValidationError};

/// Upper bound on the original-language description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Categories offered to the model. The model's choice is not validated
/// against this list.
pub const CATEGORY_SUGGESTIONS: &[&str] = &[
    "Artisan Food",
    "Artisan Beverage",
    "Handmade Crafts",
    "Textiles",
    "Wellness Products",
    "Other",
];

pub fn is_suggested_category(category: &str) -> bool {
    CATEGORY_SUGGESTIONS.contains(&category)
}

/// A producer profile as entered, in its source language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerData {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub product_type: String,
    pub source_language: Language,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// A producer profile after enrichment.
///
/// `translations` carries every supported language; the source-language
/// entry is `original.description` verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedProfile {
    pub original: ProducerData,
    pub translations: BTreeMap<Language, String>,
    pub storytelling: BTreeMap<Language, String>,
    pub keywords: Vec<String>,
    pub category: String,
}

impl TranslatedProfile {
    pub fn translation(&self, lang: Language) -> Option<&str> {
        self.translations.get(&lang).map(String::as_str)
    }

    pub fn storytelling(&self, lang: Language) -> Option<&str> {
        self.storytelling
            .get(&lang)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// English description, falling back to the original text when no
    /// English translation is stored.
    pub fn english_description(&self) -> &str {
        match self.translation(Language::En) {
            Some(text) if !text.trim().is_empty() => text,
            _ => &self.original.description,
        }
    }
}

/// Raw body of a producer creation request. Every field is optional so that
/// missing fields surface as a [`ValidationError`] instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerSubmission {
    pub name: Option<String>,
    pub location: Option<String>,
    pub product_type: Option<String>,
    pub source_language: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub user_id: Option<String>,
}

impl ProducerSubmission {
    /// Check required fields and split the submission into profile data and
    /// the optional owning user id.
    ///
    /// `name`, `location`, `description` and `sourceLanguage` must be
    /// present and non-blank. Text is kept exactly as submitted.
    pub fn validate(self) -> Result<(ProducerData, Option<String>), ValidationError> {
        let (Some(name), Some(location), Some(description), Some(source_language)) = (
            present(self.name),
            present(self.location),
            present(self.description),
            present(self.source_language),
        ) else {
            return Err(ValidationError::MissingProducerFields);
        };

        let source_language: Language = source_language.parse()?;
        check_description(&description)?;

        let data = ProducerData {
            name,
            location,
            product_type: self.product_type.unwrap_or_default(),
            source_language,
            description,
            photo_url: present(self.photo_url),
        };
        Ok((data, present(self.user_id)))
    }
}

/// Raw body of a profile edit. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub product_type: Option<String>,
    pub source_language: Option<String>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
}

/// A validated [`ProducerPatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerChanges {
    pub name: Option<String>,
    pub location: Option<String>,
    pub product_type: Option<String>,
    pub source_language: Option<Language>,
    pub description: Option<String>,
    pub photo_url: Option<String>,
}

impl ProducerPatch {
    pub fn validate(self) -> Result<ProducerChanges, ValidationError> {
        let name = non_blank(self.name, "name")?;
        let location = non_blank(self.location, "location")?;
        let description = non_blank(self.description, "description")?;
        if let Some(text) = &description {
            check_description(text)?;
        }
        let source_language = match self.source_language {
            Some(code) => Some(code.parse::<Language>()?),
            None => None,
        };
        Ok(ProducerChanges {
            name,
            location,
            product_type: self.product_type,
            source_language,
            description,
            photo_url: self.photo_url,
        })
    }
}

impl ProducerChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_blank(value: Option<String>, field: &'static str) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ValidationError::EmptyField(field)),
        other => Ok(other),
    }
}

fn check_description(text: &str) -> Result<(), ValidationError> {
    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_CHARS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ProducerSubmission {
        ProducerSubmission {
            name: Some("Manolis Estate".into()),
            location: Some("Rethymno, Crete".into()),
            product_type: Some("Olive Oil".into()),
            source_language: Some("el".into()),
            description: Some("Παράγουμε βιολογικό ελαιόλαδο".into()),
            photo_url: None,
            user_id: Some("user-1".into()),
        }
    }

    #[test]
    fn valid_submission_splits_user_id() {
        let (data, user_id) = submission().validate().unwrap();
        assert_eq!(data.name, "Manolis Estate");
        assert_eq!(data.source_language, Language::El);
        assert_eq!(data.description, "Παράγουμε βιολογικό ελαιόλαδο");
        assert_eq!(user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn each_required_field_is_checked() {
        let clears: [fn(&mut ProducerSubmission); 4] = [
            |s| s.name = None,
            |s| s.location = None,
            |s| s.description = Some("   ".into()),
            |s| s.source_language = Some(String::new()),
        ];
        for clear in clears {
            let mut sub = submission();
            clear(&mut sub);
            assert_eq!(
                sub.validate().unwrap_err(),
                ValidationError::MissingProducerFields
            );
        }
    }

    #[test]
    fn product_type_is_optional() {
        let mut sub = submission();
        sub.product_type = None;
        let (data, _) = sub.validate().unwrap();
        assert_eq!(data.product_type, "");
    }

    #[test]
    fn unknown_language_rejected() {
        let mut sub = submission();
        sub.source_language = Some("nl".into());
        assert!(matches!(
            sub.validate(),
            Err(ValidationError::UnsupportedLanguage(code)) if code == "nl"
        ));
    }

    #[test]
    fn description_limit_counts_characters() {
        let mut sub = submission();
        // 500 two-byte Greek characters is 1000 bytes but still within limit.
        sub.description = Some("α".repeat(MAX_DESCRIPTION_CHARS));
        assert!(sub.clone().validate().is_ok());

        sub.description = Some("α".repeat(MAX_DESCRIPTION_CHARS + 1));
        assert_eq!(
            sub.validate().unwrap_err(),
            ValidationError::DescriptionTooLong { max: 500 }
        );
    }

    #[test]
    fn submission_deserializes_camel_case() {
        let json = r#"{
            "name": "Naxos Pottery Studio",
            "location": "Naxos",
            "productType": "Ceramics",
            "sourceLanguage": "el",
            "description": "Χειροποίητα κεραμικά",
            "photoUrl": "https://example.com/p.jpg",
            "userId": "u-7"
        }"#;
        let sub: ProducerSubmission = serde_json::from_str(json).unwrap();
        let (data, user_id) = sub.validate().unwrap();
        assert_eq!(data.product_type, "Ceramics");
        assert_eq!(data.photo_url.as_deref(), Some("https://example.com/p.jpg"));
        assert_eq!(user_id.as_deref(), Some("u-7"));
    }

    #[test]
    fn patch_rejects_blank_fields() {
        let patch = ProducerPatch {
            location: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(
            patch.validate().unwrap_err(),
            ValidationError::EmptyField("location")
        );
    }

    #[test]
    fn patch_parses_language() {
        let patch = ProducerPatch {
            source_language: Some("it".into()),
            ..Default::default()
        };
        let changes = patch.validate().unwrap();
        assert_eq!(changes.source_language, Some(Language::It));
        assert!(!changes.is_empty());
        assert!(ProducerPatch::default().validate().unwrap().is_empty());
    }

    #[test]
    fn english_description_falls_back_to_original() {
        let (data, _) = submission().validate().unwrap();
        let mut profile = TranslatedProfile {
            original: data,
            translations: BTreeMap::from([(Language::En, String::new())]),
            storytelling: BTreeMap::new(),
            keywords: vec![],
            category: "Artisan Food".into(),
        };
        assert_eq!(profile.english_description(), "Παράγουμε βιολογικό ελαιόλαδο");

        profile
            .translations
            .insert(Language::En, "We produce organic olive oil".into());
        assert_eq!(profile.english_description(), "We produce organic olive oil");
    }

    #[test]
    fn profile_json_shape() {
        let (data, _) = submission().validate().unwrap();
        let profile = TranslatedProfile {
            original: data,
            translations: BTreeMap::from([(Language::El, "Παράγουμε".into())]),
            storytelling: BTreeMap::from([(Language::En, "For four generations".into())]),
            keywords: vec!["olive oil".into()],
            category: "Artisan Food".into(),
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["original"]["productType"], "Olive Oil");
        assert_eq!(value["original"]["sourceLanguage"], "el");
        assert!(value["original"].get("photoUrl").is_none());
        assert_eq!(value["translations"]["el"], "Παράγουμε");
        assert_eq!(value["storytelling"]["en"], "For four generations");
    }

    #[test]
    fn suggested_categories() {
        assert!(is_suggested_category("Textiles"));
        assert!(!is_suggested_category("Jewellery"));
    }
}
