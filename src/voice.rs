// SPDX-License-Identifier: GPL-3.0-only

//! Voice command trigger
//!
//! Speech recognition happens elsewhere; this decides whether a finished
//! transcript should fire the shutter and dispatches captures for a stream
//! of transcripts.

use crate::app::{CaptureController, CaptureOutcome, CaptureReport};
use crate::constants::voice::TRIGGER_WORDS;
use crate::errors::AppResult;
use futures::future::join_all;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

/// What happened while listening to a transcript stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceSessionReport {
    /// Transcripts that contained a trigger word
    pub heard: usize,
    /// Triggers dropped because a sequence was already running
    pub ignored: usize,
    /// One report per sequence that ran
    pub captures: Vec<CaptureReport>,
}

/// Matches transcripts against the shutter trigger words
#[derive(Debug, Clone)]
pub struct VoiceTrigger {
    words: Vec<String>,
}

impl VoiceTrigger {
    /// Trigger on custom words (matched case-insensitively)
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Whether `transcript` contains any trigger word
    pub fn matches(&self, transcript: &str) -> bool {
        let command = transcript.trim().to_lowercase();
        self.words.iter().any(|word| command.contains(word.as_str()))
    }

    /// Request a capture for every triggering line of `transcripts`
    ///
    /// Each trigger starts its own request, so triggers arriving while a
    /// sequence runs are dropped by the controller. Returns once the input
    /// ends and every started sequence has finished.
    pub async fn listen<R>(
        &self,
        transcripts: R,
        controller: Arc<CaptureController>,
    ) -> AppResult<VoiceSessionReport>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = transcripts.lines();
        let mut requests = Vec::new();
        let mut report = VoiceSessionReport::default();

        while let Some(line) = lines.next_line().await? {
            if !self.matches(&line) {
                continue;
            }
            report.heard += 1;
            info!(transcript = line.trim(), "Voice trigger");

            let controller = Arc::clone(&controller);
            requests.push(tokio::spawn(async move { controller.request_capture().await }));
        }

        for outcome in join_all(requests).await {
            match outcome {
                Ok(CaptureOutcome::Completed(capture)) => report.captures.push(capture),
                Ok(CaptureOutcome::Ignored) => {
                    debug!("Voice trigger ignored, capture in progress");
                    report.ignored += 1;
                }
                Err(e) => warn!(error = %e, "Capture task failed"),
            }
        }

        Ok(report)
    }
}

impl Default for VoiceTrigger {
    fn default() -> Self {
        Self::with_words(TRIGGER_WORDS)
    }
}
