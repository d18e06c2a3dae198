//! Left-to-right layout planning for sprite sheets.

use crate::{Error, Result};

/// One image's rectangular slice of the composite sheet.
///
/// Descriptors are emitted in input order. `offset_x` of slot *i* equals the
/// sum of the widths of slots `0..i`; the first slot sits at offset 0. Every
/// image is drawn top-aligned, so the vertical offset is always 0 and is not
/// carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDescriptor {
    /// Horizontal offset of the slice within the sheet, in pixels
    pub offset_x: u32,
    /// Width of the slice in pixels
    pub width: u32,
    /// Height of the slice in pixels
    pub height: u32,
}

/// Planned dimensions of a sheet plus one slot per input image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    /// Total sheet width: the sum of all slot widths
    pub width: u32,
    /// Total sheet height: the maximum slot height
    pub height: u32,
    /// Per-image slots, in input order
    pub slots: Vec<LayoutDescriptor>,
}

/// Plan a left-to-right, top-aligned layout for images of the given
/// `(width, height)` dimensions.
///
/// A single linear scan keeps a running prefix sum of widths; each slot's
/// `offset_x` is the sum before its own width is added, and the final sum is
/// the sheet width. The same slot table later drives both drawing and CSS
/// generation, which is what keeps the two consistent.
///
/// Fails with `EmptyBatch` for zero images, `InvalidRequest` for any
/// zero-sized image, and `CanvasAllocationFailed` if the summed width
/// overflows.
pub fn plan_layout(dimensions: &[(u32, u32)]) -> Result<SheetLayout> {
    if dimensions.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let mut slots = Vec::with_capacity(dimensions.len());
    let mut offset: u32 = 0;
    let mut max_height: u32 = 0;

    for &(width, height) in dimensions {
        if width == 0 || height == 0 {
            return Err(Error::InvalidRequest(format!(
                "image has degenerate dimensions {}x{}",
                width, height
            )));
        }
        slots.push(LayoutDescriptor {
            offset_x: offset,
            width,
            height,
        });
        offset = offset
            .checked_add(width)
            .ok_or(Error::CanvasAllocationFailed {
                width: offset as u64 + width as u64,
                height: max_height as u64,
            })?;
        max_height = max_height.max(height);
    }

    Ok(SheetLayout {
        width: offset,
        height: max_height,
        slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_layout_matches_reference_scenario() {
        // (10,20), (30,5), (15,40) -> 55x40 with offsets 0, 10, 25
        let layout = plan_layout(&[(10, 20), (30, 5), (15, 40)]).unwrap();
        assert_eq!(layout.width, 55);
        assert_eq!(layout.height, 40);
        assert_eq!(
            layout.slots,
            vec![
                LayoutDescriptor { offset_x: 0, width: 10, height: 20 },
                LayoutDescriptor { offset_x: 10, width: 30, height: 5 },
                LayoutDescriptor { offset_x: 25, width: 15, height: 40 },
            ]
        );
    }

    #[test]
    fn single_image_occupies_the_whole_sheet() {
        let layout = plan_layout(&[(128, 64)]).unwrap();
        assert_eq!(layout.width, 128);
        assert_eq!(layout.height, 64);
        assert_eq!(layout.slots[0].offset_x, 0);
    }

    #[test]
    fn offsets_are_prefix_sums_of_widths() {
        let dims: Vec<(u32, u32)> = (1..=20).map(|i| (i * 3, 10 + i)).collect();
        let layout = plan_layout(&dims).unwrap();

        let mut expected_offset = 0u32;
        for (slot, &(w, _)) in layout.slots.iter().zip(&dims) {
            assert_eq!(slot.offset_x, expected_offset);
            expected_offset += w;
        }
        assert_eq!(layout.width, expected_offset);
        assert_eq!(layout.height, dims.iter().map(|d| d.1).max().unwrap());
    }

    #[test]
    fn slots_never_overlap() {
        let layout = plan_layout(&[(7, 7), (1, 1), (13, 2), (2, 30)]).unwrap();
        for pair in layout.slots.windows(2) {
            assert!(pair[0].offset_x + pair[0].width <= pair[1].offset_x);
        }
        let last = layout.slots.last().unwrap();
        assert_eq!(last.offset_x + last.width, layout.width);
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(plan_layout(&[]), Err(Error::EmptyBatch)));
    }

    #[test]
    fn zero_sized_images_are_rejected() {
        assert!(matches!(
            plan_layout(&[(10, 10), (0, 5)]),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn width_overflow_is_allocation_failure() {
        let result = plan_layout(&[(u32::MAX, 1), (2, 1)]);
        assert!(matches!(
            result,
            Err(Error::CanvasAllocationFailed { .. })
        ));
    }
}
