use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("No shoot notes to process")]
    EmptyInput,

    #[error("AI provider failed: {message}")]
    ProviderError { message: String },

    #[error("Response was not valid JSON ({source}). Raw response: {raw}")]
    DecodeError {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response is missing required fields: {}", missing.join(", "))]
    IncompleteFields {
        missing: Vec<&'static str>,
        decoded: serde_json::Value,
    },

    /// Raised by `NoteHost` implementations whose storage is not a plain file.
    #[error("Host error: {0}")]
    Host(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CaptionError {
    /// Title used when the failure is surfaced to the operator.
    pub fn alert_title(&self) -> &'static str {
        match self {
            CaptionError::EmptyInput => "Empty Draft",
            CaptionError::ProviderError { .. } => "AI Error",
            CaptionError::DecodeError { .. } => "Parse Error",
            CaptionError::IncompleteFields { .. } => "Missing Fields",
            CaptionError::Host(_) | CaptionError::Io(_) => "Host Error",
            #[cfg(feature = "gemini")]
            CaptionError::Http(_) => "AI Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, CaptionError>;
