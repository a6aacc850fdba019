//! # Shoot Caption
//!
//! Turns free-text photo shoot notes into a fixed metadata block for photo-ingest
//! tooling. A language model extracts the subject, title, descriptions and keywords;
//! this crate recovers the JSON from whatever the model sends back, normalizes every
//! field and renders the result.
//!
//! ## Core Concepts
//!
//! - **Recovery**: code fences and chatter around the JSON object are stripped
//! - **Normalization**: whitespace, trailing periods, slug casing and keyword
//!   de-duplication are handled by small total functions
//! - **Placeholders**: tokens such as `{city:UC}` are left in the caption for the
//!   downstream metadata tool, and free text can never introduce new ones
//! - **Fail-stop pipeline**: empty notes, provider failures, undecodable responses
//!   and incomplete fields each end the run without producing output
//!
//! ## Example
//!
//! ```rust,ignore
//! use shoot_caption::*;
//!
//! let client = GeminiClient::new(std::env::var("GEMINI_API_KEY")?);
//! let pipeline = CaptionPipeline::new(client, PipelineConfig::from_env());
//!
//! let mut host = MemoryHost::new("Night market in Cairo, vendors selling koshari.");
//! let output = pipeline.run(&mut host, None).await?;
//! println!("{}", output);
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod llm;
pub mod normalize;
pub mod pipeline;
pub mod recovery;
pub mod render;
pub mod schema;

pub use config::{PipelineConfig, DEFAULT_MODEL};
pub use error::{CaptionError, Result};
pub use host::{FileHost, MemoryHost};
#[cfg(feature = "gemini")]
pub use llm::GeminiClient;
pub use llm::{build_prompt, CompletionProvider, PROMPT_VERSION, SYSTEM_INSTRUCTION};
pub use normalize::*;
pub use pipeline::*;
pub use recovery::extract_json;
pub use render::{render, render_caption, RenderOptions, RenderedOutput};
pub use schema::*;

/// Decodes, normalizes and renders a raw model response without touching any collaborator.
pub fn caption_from_response(raw: &str, options: &RenderOptions) -> Result<RenderedOutput> {
    let metadata = decode_response(raw)?;
    let fields = normalize_metadata(metadata)?;
    Ok(render(&fields, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_from_response_end_to_end() {
        let raw = r#"Sure! Here is the metadata:
```json
{
  "slug_words": "Night Market",
  "title": "Night Market Vendors",
  "shortDescription": "sells food.",
  "longDescription": "Vendors gather nightly.",
  "keywords": ["food", "Food", "vendor"]
}
```"#;

        let output = caption_from_response(raw, &RenderOptions::default()).unwrap();

        assert_eq!(output.slug, "NightMarket");
        assert!(output
            .caption
            .contains("sells food on {iptcmonthname} {day0}"));
        assert!(output
            .caption
            .contains("in {city}, {state}. Vendors gather nightly. ( David Degner"));
        assert_eq!(output.keywords, "food, vendor");

        let text = output.to_string();
        assert!(text.contains("\nKeywords: food, vendor"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_caption_from_response_rejects_punctuation_only_description() {
        let raw = r#"{"slug_words": "x", "title": "X", "shortDescription": "...", "longDescription": "y"}"#;
        let err = caption_from_response(raw, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, CaptionError::IncompleteFields { .. }));
    }
}
