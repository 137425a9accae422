// SPDX-License-Identifier: GPL-3.0-only

//! Capture sequencing
//!
//! [`CaptureController::request_capture`] runs one full sequence:
//!
//! ```text
//! idle ──request──▶ busy ──countdown──▶ shot 1 ─800ms─▶ shot 2 ─800ms─▶ shot 3 ──▶ idle
//!                     │                  (single mode stops after shot 1)
//!                     └── requests while busy are dropped
//! ```
//!
//! The settings snapshot is taken once, when the sequence starts, and every
//! shot of a burst uses it. Changes made while a sequence runs apply to the
//! next request.

use super::countdown::{Countdown, CountdownObserver, CountdownState};
use super::gallery::GallerySink;
use super::state::{CaptureSettings, SettingsProvider};
use crate::backends::camera::LiveFrameSource;
use crate::constants::capture::INTER_SHOT_DELAY;
use crate::errors::PhotoError;
use crate::pipelines::photo::{CaptureStamp, FrameCompositor, ImageCompositor};
use chrono::Local;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Receives capture progress in addition to countdown ticks
///
/// All methods default to no-ops.
pub trait CaptureObserver: CountdownObserver {
    /// Flash side effect, fired right before each shot when flash is on
    fn on_flash(&self) {}

    /// A shot was composed and handed to the gallery
    fn on_shot_saved(&self, _id: i64, _shot_index: u32) {}

    /// A shot was skipped
    fn on_shot_failed(&self, _shot_index: u32, _error: &PhotoError) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CountdownObserver for NoopObserver {}
impl CaptureObserver for NoopObserver {}

/// Result of one `request_capture` call
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// A sequence was already running; nothing happened
    Ignored,
    /// The sequence ran to the end
    Completed(CaptureReport),
}

/// Per-sequence summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureReport {
    /// Ids of the images handed to the gallery, in shot order
    pub saved: Vec<i64>,
    /// Shots that were skipped
    pub failures: Vec<PhotoError>,
}

/// Busy flag held for the duration of a sequence
///
/// Dropping it returns the controller to idle, including when the sequence
/// future itself is dropped part-way. An interrupted countdown resets its own
/// state the same way.
struct CaptureSession<'a> {
    busy: &'a AtomicBool,
    shots_remaining: &'a AtomicU32,
}

impl<'a> CaptureSession<'a> {
    fn begin(busy: &'a AtomicBool, shots_remaining: &'a AtomicU32) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self {
            busy,
            shots_remaining,
        })
    }

    fn plan(&self, shot_count: u32) {
        self.shots_remaining.store(shot_count, Ordering::Release);
    }

    fn shot_finished(&self) {
        self.shots_remaining.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Drop for CaptureSession<'_> {
    fn drop(&mut self) {
        self.shots_remaining.store(0, Ordering::Release);
        self.busy.store(false, Ordering::Release);
    }
}

/// Sequences countdown, shots and pacing; at most one sequence at a time
pub struct CaptureController {
    frames: Arc<dyn LiveFrameSource>,
    settings: Arc<dyn SettingsProvider>,
    sink: Arc<dyn GallerySink>,
    observer: Arc<dyn CaptureObserver>,
    compositor: Arc<dyn FrameCompositor>,
    countdown: Countdown,
    inter_shot_delay: Duration,
    busy: AtomicBool,
    shots_remaining: AtomicU32,
    last_id: AtomicI64,
}

impl CaptureController {
    pub fn new(
        frames: Arc<dyn LiveFrameSource>,
        settings: Arc<dyn SettingsProvider>,
        sink: Arc<dyn GallerySink>,
    ) -> Self {
        Self {
            frames,
            settings,
            sink,
            observer: Arc::new(NoopObserver),
            compositor: Arc::new(ImageCompositor),
            countdown: Countdown::new(),
            inter_shot_delay: INTER_SHOT_DELAY,
            busy: AtomicBool::new(false),
            shots_remaining: AtomicU32::new(0),
            last_id: AtomicI64::new(i64::MIN),
        }
    }

    /// Report countdown and shot progress to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn CaptureObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Compose shots with `compositor` instead of the built-in pipeline
    pub fn with_compositor(mut self, compositor: Arc<dyn FrameCompositor>) -> Self {
        self.compositor = compositor;
        self
    }

    /// Whether a sequence is running
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Shots left in the running sequence (0 when idle)
    pub fn shots_remaining(&self) -> u32 {
        self.shots_remaining.load(Ordering::Acquire)
    }

    pub fn countdown_state(&self) -> CountdownState {
        self.countdown.state()
    }

    /// Follow countdown state changes, e.g. to drive an on-screen overlay
    pub fn subscribe_countdown(&self) -> watch::Receiver<CountdownState> {
        self.countdown.subscribe()
    }

    /// Run a capture sequence, or do nothing if one is already running
    ///
    /// Per-shot failures never abort the sequence; they are logged, reported
    /// to the observer and collected in the returned report.
    pub async fn request_capture(&self) -> CaptureOutcome {
        let Some(session) = CaptureSession::begin(&self.busy, &self.shots_remaining) else {
            debug!("Capture already in progress, ignoring request");
            return CaptureOutcome::Ignored;
        };

        let settings = self.settings.current();
        let shot_count = settings.mode.shot_count();
        session.plan(shot_count);

        info!(
            mode = settings.mode.display_name(),
            shot_count,
            countdown = settings.countdown_seconds,
            "Starting capture sequence"
        );

        self.countdown
            .run(settings.countdown_seconds, &*self.observer)
            .await;

        let mut report = CaptureReport::default();
        for shot_index in 0..shot_count {
            match self.take_shot(&settings).await {
                Ok(id) => {
                    self.observer.on_shot_saved(id, shot_index);
                    report.saved.push(id);
                }
                Err(e) => {
                    warn!(shot_index, error = %e, "Shot skipped");
                    self.observer.on_shot_failed(shot_index, &e);
                    report.failures.push(e);
                }
            }
            session.shot_finished();

            if shot_index + 1 < shot_count {
                tokio::time::sleep(self.inter_shot_delay).await;
            }
        }

        info!(
            saved = report.saved.len(),
            failed = report.failures.len(),
            "Capture sequence complete"
        );

        drop(session);
        CaptureOutcome::Completed(report)
    }

    /// Flash, grab the current frame, compose it and hand it to the sink
    async fn take_shot(&self, settings: &CaptureSettings) -> Result<i64, PhotoError> {
        if settings.flash_enabled {
            self.observer.on_flash();
        }

        let frame = self.frames.current_frame()?;
        debug!(
            frame_age_ms = frame.captured_at().elapsed().as_millis() as u64,
            "Took live frame"
        );
        let stamp = self.next_stamp();
        let settings = settings.clone();
        let compositor = Arc::clone(&self.compositor);

        let image = tokio::task::spawn_blocking(move || compositor.compose(&frame, &settings, &stamp))
            .await
            .map_err(|e| PhotoError::EncodingFailed(format!("Composition task error: {}", e)))??;

        let id = image.id;
        self.sink.accept(image);
        Ok(id)
    }

    /// Capture stamp with an id strictly greater than any issued before
    fn next_stamp(&self) -> CaptureStamp {
        let mut stamp = CaptureStamp::at(Local::now());
        let candidate = stamp.id;
        let previous = match self.last_id.fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
            Some(candidate.max(last.saturating_add(1)))
        }) {
            Ok(previous) | Err(previous) => previous,
        };
        stamp.id = candidate.max(previous.saturating_add(1));
        stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gallery::Gallery;
    use crate::backends::camera::{FrameSlot, StillFrameSource};
    use crate::backends::virtual_camera::test_pattern;

    fn settings(countdown_seconds: u32) -> CaptureSettings {
        CaptureSettings {
            countdown_seconds,
            ..CaptureSettings::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_shot_lands_in_gallery() {
        let gallery = Arc::new(Gallery::new());
        let controller = CaptureController::new(
            Arc::new(StillFrameSource::new(test_pattern(64, 36).unwrap())),
            Arc::new(settings(0)),
            gallery.clone(),
        );

        let outcome = controller.request_capture().await;
        let CaptureOutcome::Completed(report) = outcome else {
            panic!("capture was ignored");
        };
        assert_eq!(report.saved.len(), 1);
        assert_eq!(gallery.len(), 1);
        assert!(!controller.is_busy());
        assert_eq!(controller.shots_remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_frame_is_skipped_and_busy_cleared() {
        let gallery = Arc::new(Gallery::new());
        let controller = CaptureController::new(
            Arc::new(FrameSlot::new()),
            Arc::new(settings(0)),
            gallery.clone(),
        );

        let outcome = controller.request_capture().await;
        assert_eq!(
            outcome,
            CaptureOutcome::Completed(CaptureReport {
                saved: Vec::new(),
                failures: vec![PhotoError::FrameUnavailable],
            })
        );
        assert!(gallery.is_empty());
        assert!(!controller.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_are_strictly_increasing() {
        let controller = CaptureController::new(
            Arc::new(FrameSlot::new()),
            Arc::new(settings(0)),
            Arc::new(Gallery::new()),
        );
        let a = controller.next_stamp().id;
        let b = controller.next_stamp().id;
        let c = controller.next_stamp().id;
        assert!(a < b && b < c);
    }
}
