//! Renders normalized fields into the Slug/Title/Caption/Keywords block.
//!
//! Brace-delimited tokens such as `{city:UC}` are left for the downstream metadata
//! tool to substitute. Field values never contain braces by the time they get here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::NormalizedFields;

pub const DEFAULT_CREDIT: &str = "David Degner / www.DavidDegner.com";

/// Placeholder tokens that appear in every rendered caption.
pub const CAPTION_PLACEHOLDERS: [&str; 8] = [
    "{city:UC}",
    "{state:UC}",
    "{iptcmonthname:UC}",
    "{day0}",
    "{iptcmonthname}",
    "{iptcyear4}",
    "{city}",
    "{state}",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Text inside the closing `( ... )` of the caption.
    pub credit: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            credit: DEFAULT_CREDIT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedOutput {
    pub slug: String,
    pub title: String,
    pub caption: String,
    pub keywords: String,
}

impl fmt::Display for RenderedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Slug: {}\nTitle: {}\nCaption: {}\nKeywords: {}",
            self.slug, self.title, self.caption, self.keywords
        )
    }
}

pub fn render_caption(short_desc: &str, long_desc: &str, credit: &str) -> String {
    format!(
        "{{city:UC}}, {{state:UC}} - {{iptcmonthname:UC}} {{day0}}: \
         {short_desc} on {{iptcmonthname}} {{day0}}, {{iptcyear4}} in {{city}}, {{state}}. \
         {long_desc}. ( {credit} )"
    )
}

pub fn render(fields: &NormalizedFields, options: &RenderOptions) -> RenderedOutput {
    RenderedOutput {
        slug: fields.slug.clone(),
        title: fields.title.clone(),
        caption: render_caption(&fields.short_desc, &fields.long_desc, &options.credit),
        keywords: fields.keywords.join(", "),
    }
}
