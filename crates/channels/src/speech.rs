use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Spoken when no transcription backend is wired in (or the wired one
/// fails). Matches the placeholder reply of the transcription collaborator.
pub const TRANSCRIPTION_UNAVAILABLE: &str =
    "I'm sorry, speech recognition is currently unavailable.";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TranscribeError {
    #[error("transcription backend unavailable")]
    Unavailable,
    #[error("transcription failed: {0}")]
    Failed(String),
}

/// Speech-to-text collaborator. Model internals are out of scope; a real
/// backend implements this trait, everything else treats it as opaque.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscribeError>;
}

/// Default transcriber: no model loaded, every request fails fast.
#[derive(Default)]
pub struct UnavailableTranscriber;

#[async_trait]
impl Transcriber for UnavailableTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscribeError> {
        Err(TranscribeError::Unavailable)
    }
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("speech synthesis failed: {0}")]
    Io(String),
}

/// Text-to-speech collaborator.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Renders `text` to an audio file and returns its path.
    async fn synthesize(
        &self,
        text: &str,
        output_path: Option<PathBuf>,
    ) -> Result<PathBuf, SynthesisError>;

    fn voices(&self) -> Vec<&'static str>;
}

/// Stub synthesizer: writes an empty WAV per request so downstream plumbing
/// can be exercised without an engine installed.
pub struct SilentSynthesizer {
    voice: String,
    output_dir: PathBuf,
}

impl SilentSynthesizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { voice: "en_US-amy-medium".to_owned(), output_dir: output_dir.into() }
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn set_voice(&mut self, voice: impl Into<String>) {
        self.voice = voice.into();
    }
}

impl Default for SilentSynthesizer {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    async fn synthesize(
        &self,
        _text: &str,
        output_path: Option<PathBuf>,
    ) -> Result<PathBuf, SynthesisError> {
        let path = output_path
            .unwrap_or_else(|| self.output_dir.join(format!("tts_{}.wav", Uuid::new_v4())));

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|error| SynthesisError::Io(error.to_string()))?;
            }
        }

        tokio::fs::write(&path, b"")
            .await
            .map_err(|error| SynthesisError::Io(error.to_string()))?;
        Ok(path)
    }

    fn voices(&self) -> Vec<&'static str> {
        vec!["en_US-amy-medium", "en_US-amy-low", "en_US-amy-high"]
    }
}

#[cfg(test)]
mod tests {
    use super::{
        SilentSynthesizer, SpeechSynthesizer, TranscribeError, Transcriber, UnavailableTranscriber,
    };

    #[tokio::test]
    async fn default_transcriber_fails_fast() {
        let transcriber = UnavailableTranscriber;
        let error = transcriber.transcribe(b"riff-bytes").await.expect_err("should fail");
        assert_eq!(error, TranscribeError::Unavailable);
    }

    #[tokio::test]
    async fn silent_synthesizer_writes_an_empty_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let synthesizer = SilentSynthesizer::new(dir.path());

        let path = synthesizer.synthesize("hello there", None).await.expect("synthesize");
        let metadata = tokio::fs::metadata(&path).await.expect("file exists");
        assert_eq!(metadata.len(), 0);
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("wav"));
    }

    #[tokio::test]
    async fn explicit_output_path_is_honored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("reply.wav");
        let synthesizer = SilentSynthesizer::new(dir.path());

        let path =
            synthesizer.synthesize("hello", Some(target.clone())).await.expect("synthesize");
        assert_eq!(path, target);
    }

    #[test]
    fn voice_can_be_switched() {
        let mut synthesizer = SilentSynthesizer::default();
        assert_eq!(synthesizer.voice(), "en_US-amy-medium");
        synthesizer.set_voice("en_US-amy-low");
        assert_eq!(synthesizer.voice(), "en_US-amy-low");
        assert!(synthesizer.voices().contains(&"en_US-amy-low"));
    }
}
