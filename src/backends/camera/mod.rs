// SPDX-License-Identifier: GPL-3.0-only

//! Live frame source abstraction
//!
//! The capture controller never talks to a device directly. It asks a
//! [`LiveFrameSource`] for the most recent frame at the moment of each shot.
//!
//! ```text
//! ┌─────────────────────┐
//! │  CaptureController  │
//! └──────────┬──────────┘
//!            │ current_frame()
//!            ▼
//! ┌─────────────────────┐
//! │ LiveFrameSource     │  ← FrameSlot (fed by a device loop)
//! └─────────────────────┘    StillFrameSource (image file, test pattern)
//! ```

pub mod types;

pub use types::*;

use crate::errors::PhotoError;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Source of the current raw frame
pub trait LiveFrameSource: Send + Sync {
    /// Return the latest frame, or [`PhotoError::FrameUnavailable`] if the
    /// device is not ready.
    fn current_frame(&self) -> Result<Arc<CameraFrame>, PhotoError>;
}

/// Latest-frame holder fed by a device loop
///
/// A producer publishes frames as they arrive; consumers always see the most
/// recent one. An empty slot means the device has not produced a frame yet.
#[derive(Debug, Default)]
pub struct FrameSlot {
    latest: RwLock<Option<Arc<CameraFrame>>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frame
    pub fn publish(&self, frame: CameraFrame) {
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *latest = Some(Arc::new(frame));
    }

    /// Drop the current frame (device stopped or switching lens)
    pub fn clear(&self) {
        debug!("Frame slot cleared");
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *latest = None;
    }

    /// Whether a frame is available
    pub fn is_ready(&self) -> bool {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl LiveFrameSource for FrameSlot {
    fn current_frame(&self) -> Result<Arc<CameraFrame>, PhotoError> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(PhotoError::FrameUnavailable)
    }
}

/// Source that always yields the same frame
#[derive(Debug, Clone)]
pub struct StillFrameSource {
    frame: Arc<CameraFrame>,
}

impl StillFrameSource {
    pub fn new(frame: CameraFrame) -> Self {
        Self {
            frame: Arc::new(frame),
        }
    }
}

impl LiveFrameSource for StillFrameSource {
    fn current_frame(&self) -> Result<Arc<CameraFrame>, PhotoError> {
        Ok(Arc::clone(&self.frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CameraFrame {
        CameraFrame::from_rgba(2, 1, vec![255u8; 8]).unwrap()
    }

    #[test]
    fn test_empty_slot_is_unavailable() {
        let slot = FrameSlot::new();
        assert!(!slot.is_ready());
        assert_eq!(
            slot.current_frame().unwrap_err(),
            PhotoError::FrameUnavailable
        );
    }

    #[test]
    fn test_slot_returns_latest_frame() {
        let slot = FrameSlot::new();
        slot.publish(frame());
        slot.publish(CameraFrame::from_rgba(1, 1, vec![0u8; 4]).unwrap());
        assert_eq!(slot.current_frame().unwrap().width(), 1);

        slot.clear();
        assert!(slot.current_frame().is_err());
    }
}
