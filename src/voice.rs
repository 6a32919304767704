//! Seams to the platform voice services. The crate never touches audio
//! hardware itself; hosts implement these traits and feed final
//! transcripts back through the assistant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum VoiceError {
    #[error("Speech recognition is not available")]
    RecognizerUnavailable,
    #[error("Speech recognition failed: {0}")]
    RecognitionFailed(String),
}

/// Tone configuration handed to the speech sink with every utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Preferred voice name; the sink falls back to any available voice.
    pub voice: Option<String>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        // Slightly slow, slightly high, soft.
        Self {
            rate: 0.8,
            pitch: 1.2,
            volume: 0.9,
            voice: None,
        }
    }
}

/// Single-shot speech recognition. One attempt yields one final
/// transcript through the host's event loop.
pub trait SpeechRecognizer {
    /// Begin one recognition attempt.
    fn start(&mut self) -> Result<(), VoiceError>;
    /// Cancel the attempt in flight, if any.
    fn cancel(&mut self);
}

/// Plays a line of speech with the given tone. `stop` cuts off any
/// utterance still playing.
pub trait SpeechSink {
    fn speak(&mut self, text: &str, settings: &VoiceSettings);
    fn stop(&mut self);
}

/// System-level notifications. Implementations without permission
/// should be swapped for [`NoopNotifier`].
pub trait NotificationSink {
    fn notify(&mut self, title: &str, body: &str);
}

/// Notification sink used when permission was denied: every call is a
/// no-op, the rest of the assistant keeps working.
pub struct NoopNotifier;

impl NotificationSink for NoopNotifier {
    fn notify(&mut self, _title: &str, _body: &str) {}
}

/// Tracks the single allowed recognition session. At most one attempt
/// is active at a time: starting while one is in flight cancels it and
/// restarts, never queues.
pub struct RecognitionGate<R: SpeechRecognizer> {
    recognizer: Option<R>,
    listening: bool,
}

impl<R: SpeechRecognizer> RecognitionGate<R> {
    /// Pass `None` when the platform has no recognizer; `begin` then
    /// reports the feature unavailable instead of panicking.
    pub fn new(recognizer: Option<R>) -> Self {
        Self {
            recognizer,
            listening: false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Start a recognition attempt, cancelling any attempt in flight.
    pub fn begin(&mut self) -> Result<(), VoiceError> {
        let recognizer = self
            .recognizer
            .as_mut()
            .ok_or(VoiceError::RecognizerUnavailable)?;
        if self.listening {
            recognizer.cancel();
        }
        recognizer.start()?;
        self.listening = true;
        Ok(())
    }

    /// Host callback once recognition ended, with or without a result.
    pub fn finished(&mut self) {
        self.listening = false;
    }
}
