// SPDX-License-Identifier: GPL-3.0-only

//! Frame source layer
//!
//! - [`camera`]: the [`camera::LiveFrameSource`] trait, frame types and the
//!   latest-frame slot a device loop publishes into
//! - [`virtual_camera`]: image-file and test-pattern frames

pub mod camera;
pub mod virtual_camera;
