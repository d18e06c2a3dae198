//! Canvas allocation and drawing.

use image::{GenericImage, ImageFormat, RgbaImage};
use log::debug;

use crate::loader::ImageHandle;
use crate::sheet::layout::{plan_layout, SheetLayout};
use crate::{Error, Result};

/// A finished composite: the drawn canvas plus the layout it was drawn from.
pub struct Sheet {
    /// RGBA canvas exactly bounding the union of all placed images
    pub canvas: RgbaImage,
    /// The slot table the canvas was drawn from, in input order
    pub layout: SheetLayout,
}

impl Sheet {
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Encode the canvas as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = std::io::Cursor::new(Vec::new());
        self.canvas
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| Error::EncodeFailure(e.to_string()))?;
        Ok(out.into_inner())
    }
}

/// Compose `handles` side-by-side onto a fresh transparent canvas.
///
/// The layout is planned once from the handles' dimensions; the draw loop
/// then walks handles zipped with their planned slots, so the geometry that
/// lands on the canvas and the descriptors handed to callers are the same
/// numbers. Images are drawn top-aligned at `(slot.offset_x, 0)` as a
/// straight overwrite — slots are disjoint by construction, so nothing is
/// ever painted over.
pub fn compose(handles: &[ImageHandle]) -> Result<Sheet> {
    let dimensions: Vec<(u32, u32)> = handles.iter().map(|h| (h.width(), h.height())).collect();
    let layout = plan_layout(&dimensions)?;

    // Refuse sizes whose RGBA buffer cannot be addressed, rather than letting
    // the allocation truncate or abort.
    let bytes = (layout.width as u64)
        .checked_mul(layout.height as u64)
        .and_then(|px| px.checked_mul(4));
    match bytes {
        Some(n) if n <= usize::MAX as u64 => {}
        _ => {
            return Err(Error::CanvasAllocationFailed {
                width: layout.width as u64,
                height: layout.height as u64,
            })
        }
    }

    // Zero-initialized, i.e. fully transparent.
    let mut canvas = RgbaImage::new(layout.width, layout.height);

    for (handle, slot) in handles.iter().zip(&layout.slots) {
        // Unreachable when the layout invariant holds: every slot lies
        // inside the canvas. Surfaced as its own error so a bounds bug
        // could never masquerade as an allocation failure.
        canvas
            .copy_from(handle.image(), slot.offset_x, 0)
            .map_err(|e| {
                Error::Other(format!(
                    "draw for '{}' escaped the canvas at x={}: {}",
                    handle.identifier(),
                    slot.offset_x,
                    e
                ))
            })?;
        debug!(
            "placed '{}' at x={} ({}x{})",
            handle.identifier(),
            slot.offset_x,
            slot.width,
            slot.height
        );
    }

    Ok(Sheet { canvas, layout })
}
