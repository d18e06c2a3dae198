//! Batch image loading: concurrent fetch + decode with order-preserving
//! reassembly.
//!
//! Every identifier in a batch is fetched and decoded on its own blocking
//! task. Results are written back into a pre-sized, index-addressed slot
//! table, so the output order always matches the input order no matter which
//! fetch finishes first — downstream offset computation depends on that.

use std::sync::Arc;

use image::RgbaImage;
use log::debug;

use crate::source::ByteSource;
use crate::{Error, Result};

/// A decoded image together with the identifier it was loaded from.
///
/// Immutable once decoded; the pipeline owns it for the duration of one
/// request and drops it afterwards.
#[derive(Debug)]
pub struct ImageHandle {
    identifier: String,
    image: RgbaImage,
}

impl ImageHandle {
    /// Decode `bytes` (any format the codec understands) into an RGBA handle.
    pub fn from_bytes(identifier: &str, bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| Error::DecodeFailure {
            identifier: identifier.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            identifier: identifier.to_string(),
            image: decoded.to_rgba8(),
        })
    }

    /// Wrap an already-decoded image. Used by callers that produce pixels
    /// themselves (tests, benchmarks, programmatic batches).
    pub fn from_image(identifier: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            identifier: identifier.into(),
            image,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Fetch and decode every identifier in `identifiers`, concurrently, and
/// return the handles in input order.
///
/// The batch fails atomically: the first fetch or decode error is returned
/// (tagged with the offending identifier) and no handles are produced.
/// In-flight sibling tasks are left to finish on the blocking pool; their
/// results are discarded.
pub async fn load_batch(
    source: Arc<dyn ByteSource>,
    identifiers: &[String],
) -> Result<Vec<ImageHandle>> {
    let tasks: Vec<_> = identifiers
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, identifier)| {
            let source = Arc::clone(&source);
            tokio::task::spawn_blocking(move || -> Result<(usize, ImageHandle)> {
                let bytes = source.fetch(&identifier)?;
                let handle = ImageHandle::from_bytes(&identifier, &bytes)?;
                debug!(
                    "decoded '{}' ({}x{})",
                    identifier,
                    handle.width(),
                    handle.height()
                );
                Ok((index, handle))
            })
        })
        .collect();

    // Index-addressed slot table: completion order never dictates output order.
    let mut slots: Vec<Option<ImageHandle>> = Vec::with_capacity(identifiers.len());
    slots.resize_with(identifiers.len(), || None);

    let results = futures::future::join_all(tasks).await;
    for (identifier, joined) in identifiers.iter().zip(results) {
        let (index, handle) = joined.map_err(|e| Error::SourceUnavailable {
            identifier: identifier.clone(),
            reason: format!("loader task failed: {}", e),
        })??;
        slots[index] = Some(handle);
    }

    debug_assert!(slots.iter().all(|s| s.is_some()));
    Ok(slots.into_iter().flatten().collect())
}
