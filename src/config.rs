use serde::{Deserialize, Serialize};

use crate::render::RenderOptions;

pub const DEFAULT_MODEL: &str = "models/gemini-3-flash-preview";

/// Environment variable that overrides [`DEFAULT_MODEL`].
pub const MODEL_ENV_VAR: &str = "CAPTION_MODEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Model identifier handed to the completion provider on every run.
    pub model: String,
    #[serde(default)]
    pub render: RenderOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            render: RenderOptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Defaults, with the model taken from `CAPTION_MODEL` when it is set and non-empty.
    pub fn from_env() -> Self {
        Self::default().with_model_override(std::env::var(MODEL_ENV_VAR).ok().as_deref())
    }

    /// Replaces the model only when `model` is present and not blank.
    pub fn with_model_override(self, model: Option<&str>) -> Self {
        match model.map(str::trim) {
            Some(model) if !model.is_empty() => self.with_model(model),
            _ => self,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_credit(mut self, credit: impl Into<String>) -> Self {
        self.render.credit = credit.into();
        self
    }
}
