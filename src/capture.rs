//! Boundary with the speech-capture collaborator.
//!
//! Recognizers emit unstable interim hypotheses, stable final segments and a
//! terminal end or failure event. Only the joined final segments of a capture
//! that ended cleanly are ever handed to the scorer.

use thiserror::Error;

use crate::error::ScoringError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureFailure {
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("speech recognition is not supported on this device")]
    Unsupported,
    #[error("no speech was detected")]
    NoSpeech,
    #[error("recognition engine error: {0}")]
    Recognition(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Unstable hypothesis for the segment in progress; replaces the previous one.
    Interim(String),
    /// Stable text appended to the transcript.
    Final(String),
    Failed(CaptureFailure),
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CaptureState {
    Listening,
    Ended,
    Failed(CaptureFailure),
}

/// Transcript that is safe to score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalTranscript(String);

impl FinalTranscript {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptCapture {
    final_segments: Vec<String>,
    interim: String,
    state: CaptureState,
}

impl TranscriptCapture {
    pub fn new() -> Self {
        Self {
            final_segments: Vec::new(),
            interim: String::new(),
            state: CaptureState::Listening,
        }
    }

    /// Applies one recognizer event. Returns `false` when the event arrived
    /// after the capture already ended or failed and was ignored.
    pub fn push(&mut self, event: CaptureEvent) -> bool {
        if self.state != CaptureState::Listening {
            tracing::debug!(?event, "capture: event after terminal state ignored");
            return false;
        }
        match event {
            CaptureEvent::Interim(text) => self.interim = text,
            CaptureEvent::Final(text) => {
                self.interim.clear();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    self.final_segments.push(trimmed.to_string());
                }
            }
            CaptureEvent::Failed(failure) => {
                tracing::warn!(%failure, "capture: recognizer reported failure");
                self.interim.clear();
                self.state = CaptureState::Failed(failure);
            }
            CaptureEvent::End => {
                self.interim.clear();
                self.state = CaptureState::Ended;
            }
        }
        true
    }

    /// Final text plus the current interim hypothesis, for live display only.
    pub fn live_text(&self) -> String {
        let mut parts: Vec<&str> = self.final_segments.iter().map(String::as_str).collect();
        if !self.interim.trim().is_empty() {
            parts.push(self.interim.trim());
        }
        parts.join(" ")
    }

    pub fn is_finished(&self) -> bool {
        self.state != CaptureState::Listening
    }

    pub fn finish(self) -> Result<FinalTranscript, ScoringError> {
        match self.state {
            CaptureState::Ended => Ok(FinalTranscript(self.final_segments.join(" "))),
            CaptureState::Failed(failure) => Err(ScoringError::capture(failure)),
            CaptureState::Listening => Err(ScoringError::invalid_input(
                "capture is still listening; wait for the end event before scoring",
            )),
        }
    }
}

impl Default for TranscriptCapture {
    fn default() -> Self {
        Self::new()
    }
}
