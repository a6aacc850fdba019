use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{
    caption_clause, normalize_keywords, one_line, to_camel_case_words, value_to_text,
};

pub const KEY_SLUG_WORDS: &str = "slug_words";
pub const KEY_TITLE: &str = "title";
pub const KEY_SHORT_DESCRIPTION: &str = "shortDescription";
pub const KEY_LONG_DESCRIPTION: &str = "longDescription";
pub const KEY_KEYWORDS: &str = "keywords";

/// Keys the model is instructed to return, in prompt order.
pub const RESPONSE_KEYS: [&str; 5] = [
    KEY_SLUG_WORDS,
    KEY_TITLE,
    KEY_SHORT_DESCRIPTION,
    KEY_LONG_DESCRIPTION,
    KEY_KEYWORDS,
];

/// The decoded model response.
///
/// Nothing about its shape is trusted: keys may be missing or carry the wrong type,
/// and the value may not even be an object. Accessors coerce instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedMetadata(Value);

impl ParsedMetadata {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    fn field(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&Value::Null)
    }

    /// `slug_words` as text; array entries are joined with a space.
    pub fn slug_words(&self) -> String {
        match self.field(KEY_SLUG_WORDS) {
            Value::Array(words) => words
                .iter()
                .map(value_to_text)
                .collect::<Vec<_>>()
                .join(" "),
            other => value_to_text(other),
        }
    }

    pub fn title(&self) -> String {
        value_to_text(self.field(KEY_TITLE))
    }

    pub fn short_description(&self) -> String {
        value_to_text(self.field(KEY_SHORT_DESCRIPTION))
    }

    pub fn long_description(&self) -> String {
        value_to_text(self.field(KEY_LONG_DESCRIPTION))
    }

    pub fn keywords(&self) -> &Value {
        self.field(KEY_KEYWORDS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFields {
    pub slug: String,
    pub title: String,
    pub short_desc: String,
    pub long_desc: String,
    pub keywords: Vec<String>,
}

impl NormalizedFields {
    pub fn from_metadata(metadata: &ParsedMetadata) -> Self {
        Self {
            slug: to_camel_case_words(&metadata.slug_words()),
            title: one_line(&metadata.title()),
            short_desc: caption_clause(&metadata.short_description()),
            long_desc: caption_clause(&metadata.long_description()),
            keywords: normalize_keywords(metadata.keywords()),
        }
    }

    /// Response keys whose normalized value came out empty. Keywords are optional.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (KEY_SLUG_WORDS, &self.slug),
            (KEY_TITLE, &self.title),
            (KEY_SHORT_DESCRIPTION, &self.short_desc),
            (KEY_LONG_DESCRIPTION, &self.long_desc),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_metadata_normalizes_every_field() {
        let metadata = ParsedMetadata::new(json!({
            "slug_words": ["night", "market"],
            "title": "  Night   Market\nVendors ",
            "shortDescription": "sells food.",
            "longDescription": "Vendors gather {nightly}.",
            "keywords": "food; Food | vendor"
        }));

        let fields = NormalizedFields::from_metadata(&metadata);

        assert_eq!(fields.slug, "NightMarket");
        assert_eq!(fields.title, "Night Market Vendors");
        assert_eq!(fields.short_desc, "sells food");
        assert_eq!(fields.long_desc, "Vendors gather nightly");
        assert_eq!(fields.keywords, vec!["food", "vendor"]);
        assert!(fields.is_complete());
    }

    #[test]
    fn test_missing_and_mistyped_keys() {
        let metadata = ParsedMetadata::new(json!({
            "slug_words": "!!!",
            "title": null,
            "shortDescription": 12,
        }));

        let fields = NormalizedFields::from_metadata(&metadata);

        assert_eq!(fields.short_desc, "12");
        assert!(fields.keywords.is_empty());
        assert_eq!(
            fields.missing_fields(),
            vec![KEY_SLUG_WORDS, KEY_TITLE, KEY_LONG_DESCRIPTION]
        );
    }

    #[test]
    fn test_non_object_response_has_no_fields() {
        let fields = NormalizedFields::from_metadata(&ParsedMetadata::new(json!([1, 2, 3])));
        assert_eq!(fields.missing_fields().len(), 4);

        let fields = NormalizedFields::from_metadata(&ParsedMetadata::new(Value::Null));
        assert!(!fields.is_complete());
    }
}
