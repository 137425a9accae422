// SPDX-License-Identifier: GPL-3.0-only

//! In-memory gallery
//!
//! Captured images live only for the lifetime of the process. `export`
//! writes copies to a directory on request; nothing is loaded back.

use crate::constants::gallery::THUMBNAIL_STRIP_LEN;
use crate::errors::{AppResult, PhotoError};
use crate::pipelines::photo::CapturedImage;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Receives finished images; the sink owns them afterwards
pub trait GallerySink: Send + Sync {
    fn accept(&self, image: CapturedImage);
}

/// Session gallery, newest image first
#[derive(Debug, Default)]
pub struct Gallery {
    photos: Mutex<VecDeque<Arc<CapturedImage>>>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    fn photos(&self) -> std::sync::MutexGuard<'_, VecDeque<Arc<CapturedImage>>> {
        self.photos.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.photos().len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos().is_empty()
    }

    /// All images, newest first
    pub fn images(&self) -> Vec<Arc<CapturedImage>> {
        self.photos().iter().cloned().collect()
    }

    /// The `count` newest images
    pub fn latest(&self, count: usize) -> Vec<Arc<CapturedImage>> {
        self.photos().iter().take(count).cloned().collect()
    }

    /// Images for the viewfinder thumbnail strip
    pub fn thumbnails(&self) -> Vec<Arc<CapturedImage>> {
        self.latest(THUMBNAIL_STRIP_LEN)
    }

    pub fn get(&self, id: i64) -> Option<Arc<CapturedImage>> {
        self.photos().iter().find(|p| p.id == id).cloned()
    }

    /// Delete every image; returns how many were removed
    pub fn clear(&self) -> usize {
        let mut photos = self.photos();
        let removed = photos.len();
        photos.clear();
        info!(removed, "Gallery cleared");
        removed
    }

    /// Write every image into `dir`, newest first
    ///
    /// Creates `dir` if needed and returns the written paths.
    pub async fn export(&self, dir: &Path) -> AppResult<Vec<PathBuf>> {
        let images = self.images();
        tokio::fs::create_dir_all(dir).await?;

        let mut written = Vec::with_capacity(images.len());
        for image in images {
            let path = dir.join(image.file_name());
            tokio::fs::write(&path, &image.buffer)
                .await
                .map_err(|e| PhotoError::SaveFailed(format!("{}: {}", path.display(), e)))?;
            debug!(path = %path.display(), size = image.buffer.len(), "Exported image");
            written.push(path);
        }

        info!(count = written.len(), dir = %dir.display(), "Gallery exported");
        Ok(written)
    }
}

impl GallerySink for Gallery {
    fn accept(&self, image: CapturedImage) {
        info!(id = image.id, format = ?image.format, "Photo saved to gallery");
        self.photos().push_front(Arc::new(image));
    }
}
