// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │ JPEG / PNG   │
//! │   (RGBA)     │     │  - Center crop    │     │   buffer     │
//! │              │     │  - Mirror         │     │              │
//! │              │     │  - Filter         │     │              │
//! │              │     │  - Watermark      │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```
//!
//! Composition is CPU-bound; callers on an async runtime should run it on
//! the blocking pool.

pub mod photo;
