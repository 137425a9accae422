// SPDX-License-Identifier: GPL-3.0-only

//! Capture application core
//!
//! - [`state`]: capture settings snapshot, filter presets, live settings store
//! - [`countdown`]: pre-capture countdown state machine
//! - [`controller`]: single-flight capture sequencing
//! - [`gallery`]: in-memory image gallery

pub mod controller;
pub mod countdown;
pub mod gallery;
pub mod state;

pub use controller::{CaptureController, CaptureObserver, CaptureOutcome, CaptureReport, NoopObserver};
pub use countdown::{Countdown, CountdownObserver, CountdownState};
pub use gallery::{Gallery, GallerySink};
pub use state::{CaptureMode, CaptureSettings, FilterPreset, SettingsProvider, SharedSettings};
