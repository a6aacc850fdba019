use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;

use crate::config::PipelineConfig;
use crate::error::{CaptionError, Result};
use crate::llm::{build_prompt, CompletionProvider};
use crate::recovery::extract_json;
use crate::render::{render, RenderedOutput};
use crate::schema::{NormalizedFields, ParsedMetadata};

/// The editing environment that owns the notes and receives the rendered block.
pub trait NoteHost {
    fn get_content(&self) -> String;

    /// Persist the note being processed before anything else happens.
    fn save_current(&mut self) -> Result<()> {
        Ok(())
    }

    /// Store `content` as a new note and make it the active one.
    fn create_and_activate(&mut self, content: &str) -> Result<()>;
}

/// Surfaces terminal failures to the operator. Must not block the caller.
pub trait Notifier {
    fn alert(&self, title: &str, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn alert(&self, title: &str, message: &str) {
        (**self).alert(title, message)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineEvent {
    Starting,
    Requesting { model: String },
    Decoding,
    Normalizing,
    Rendered,
    Failed { reason: String },
}

/// Parses the recovered JSON span of a raw model response.
pub fn decode_response(raw: &str) -> Result<ParsedMetadata> {
    let json_text = extract_json(raw);
    serde_json::from_str(&json_text)
        .map(ParsedMetadata::new)
        .map_err(|source| CaptionError::DecodeError {
            raw: raw.to_string(),
            source,
        })
}

/// Normalizes the decoded response, rejecting it when a required field comes out empty.
pub fn normalize_metadata(metadata: ParsedMetadata) -> Result<NormalizedFields> {
    let fields = NormalizedFields::from_metadata(&metadata);
    let missing = fields.missing_fields();
    if missing.is_empty() {
        Ok(fields)
    } else {
        Err(CaptionError::IncompleteFields {
            missing,
            decoded: metadata.into_value(),
        })
    }
}

/// Operator-facing text for a terminal failure, carrying the context needed to retry by hand.
pub fn alert_message(err: &CaptionError) -> String {
    match err {
        CaptionError::EmptyInput => "There is no text to process.".to_string(),
        CaptionError::ProviderError { message } => format!("Gemini failed: {}", message),
        CaptionError::DecodeError { raw, .. } => format!(
            "Gemini returned something that wasn't valid JSON.\n\nResponse was:\n{}",
            raw
        ),
        CaptionError::IncompleteFields { decoded, .. } => format!(
            "Gemini did not return all required fields. Got:\n{}",
            serde_json::to_string_pretty(decoded).unwrap_or_else(|_| decoded.to_string())
        ),
        other => other.to_string(),
    }
}

pub struct CaptionPipeline<P, N = LogNotifier> {
    provider: P,
    notifier: N,
    config: PipelineConfig,
}

impl<P: CompletionProvider> CaptionPipeline<P, LogNotifier> {
    pub fn new(provider: P, config: PipelineConfig) -> Self {
        Self {
            provider,
            notifier: LogNotifier,
            config,
        }
    }
}

impl<P: CompletionProvider, N: Notifier> CaptionPipeline<P, N> {
    pub fn with_notifier<M: Notifier>(self, notifier: M) -> CaptionPipeline<P, M> {
        CaptionPipeline {
            provider: self.provider,
            notifier,
            config: self.config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the notes in `host` through the model and hands the rendered block back to it.
    ///
    /// Every failure is terminal: the notifier is alerted once, nothing is retried, and
    /// the host never receives a partial block.
    pub async fn run<H: NoteHost>(
        &self,
        host: &mut H,
        progress: Option<Sender<PipelineEvent>>,
    ) -> Result<RenderedOutput> {
        self.send_event(&progress, PipelineEvent::Starting).await;

        match self.execute(host, &progress).await {
            Ok(output) => {
                self.send_event(&progress, PipelineEvent::Rendered).await;
                Ok(output)
            }
            Err(err) => {
                self.notifier.alert(err.alert_title(), &alert_message(&err));
                self.send_event(
                    &progress,
                    PipelineEvent::Failed {
                        reason: err.to_string(),
                    },
                )
                .await;
                Err(err)
            }
        }
    }

    async fn execute<H: NoteHost>(
        &self,
        host: &mut H,
        progress: &Option<Sender<PipelineEvent>>,
    ) -> Result<RenderedOutput> {
        let notes = host.get_content();
        if notes.trim().is_empty() {
            return Err(CaptionError::EmptyInput);
        }
        host.save_current()?;

        info!(
            "Requesting caption metadata from {} ({} chars of notes)",
            self.config.model,
            notes.chars().count()
        );
        self.send_event(
            progress,
            PipelineEvent::Requesting {
                model: self.config.model.clone(),
            },
        )
        .await;
        let raw = self.request(&notes).await?;

        self.send_event(progress, PipelineEvent::Decoding).await;
        let metadata = decode_response(&raw)?;

        self.send_event(progress, PipelineEvent::Normalizing).await;
        let fields = normalize_metadata(metadata)?;
        debug!(
            "Normalized slug={} with {} keywords",
            fields.slug,
            fields.keywords.len()
        );

        let output = render(&fields, &self.config.render);
        host.create_and_activate(&output.to_string())?;
        info!("Created caption note for {}", output.slug);

        Ok(output)
    }

    async fn request(&self, notes: &str) -> Result<String> {
        let prompt = build_prompt(notes);
        match self.provider.complete(&prompt, &self.config.model).await {
            Ok(raw) if raw.trim().is_empty() => Err(CaptionError::ProviderError {
                message: "Empty response received.".to_string(),
            }),
            Ok(raw) => Ok(raw),
            Err(err @ CaptionError::ProviderError { .. }) => Err(err),
            Err(other) => Err(CaptionError::ProviderError {
                message: other.to_string(),
            }),
        }
    }

    async fn send_event(&self, sender: &Option<Sender<PipelineEvent>>, event: PipelineEvent) {
        if let Some(tx) = sender {
            let _ = tx.send(event).await;
        }
    }
}
