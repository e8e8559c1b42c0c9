//! Frame compositor: crop, stack, and aspect-normalize.
//!
//! Pure functions over pixel buffers. Inputs are never mutated and the
//! output is fully determined by the inputs.

use image::imageops::{self, FilterType};
use streamcut_clip_model::{Frame, Region, TargetAspect};
use streamcut_common::{StreamcutError, StreamcutResult};

/// Cubic interpolation, matching the original capture pipeline.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Crop a region out of a frame.
///
/// The region follows the transposed consumption contract on [`Region`]:
/// `x`/`width` select rows, `y`/`height` select columns. A region that
/// exceeds the frame extent fails with `RegionOutOfBounds`; there is no
/// partial-frame clamping.
pub fn crop_region(frame: &Frame, region: &Region) -> StreamcutResult<Frame> {
    let row_end = region.x.checked_add(region.width);
    let col_end = region.y.checked_add(region.height);
    let in_bounds = matches!(
        (row_end, col_end),
        (Some(rows), Some(cols)) if rows <= frame.height() && cols <= frame.width()
    );
    if !in_bounds {
        return Err(StreamcutError::RegionOutOfBounds {
            row_offset: region.x,
            row_extent: region.width,
            col_offset: region.y,
            col_extent: region.height,
            frame_width: frame.width(),
            frame_height: frame.height(),
        });
    }

    // Rows map to the image y-axis, columns to the x-axis.
    Ok(imageops::crop_imm(frame, region.y, region.x, region.height, region.width).to_image())
}

/// Composite an ordered sequence of images into one frame of exactly
/// `aspect` dimensions.
///
/// Every input is resized to the minimum input width (shrink-to-fit keeps
/// upscaling artifacts out of the narrower source), preserving its own
/// aspect ratio, then the results are stacked vertically in input order.
/// The stack is finally resized to `aspect` without preserving aspect
/// ratio, so the output container size is fixed.
pub fn composite(images: &[Frame], aspect: TargetAspect) -> StreamcutResult<Frame> {
    if images.is_empty() {
        return Err(StreamcutError::EmptyInput);
    }
    for img in images {
        if img.width() == 0 || img.height() == 0 {
            return Err(StreamcutError::InvalidDimensions {
                width: img.width(),
                height: img.height(),
            });
        }
    }

    let common_width = images.iter().map(|img| img.width()).min().unwrap_or(0);

    let mut total_height = 0u32;
    let resized: Vec<Frame> = images
        .iter()
        .map(|img| {
            let scaled_height = ((img.height() as f64 * common_width as f64
                / img.width() as f64)
                .round() as u32)
                .max(1);
            total_height += scaled_height;
            imageops::resize(img, common_width, scaled_height, RESIZE_FILTER)
        })
        .collect();

    let mut stacked = Frame::new(common_width, total_height);
    let mut y_offset = 0u32;
    for img in &resized {
        imageops::overlay(&mut stacked, img, 0, y_offset as i64);
        y_offset += img.height();
    }

    Ok(imageops::resize(
        &stacked,
        aspect.width,
        aspect.height,
        RESIZE_FILTER,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use proptest::prelude::*;

    fn solid(width: u32, height: u32, value: u8) -> Frame {
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
    }

    #[test]
    fn crop_honors_the_row_column_contract() {
        // 40 columns, 30 rows; paint rows 5..15, cols 10..30.
        let mut frame = solid(40, 30, 0);
        for row in 5..15 {
            for col in 10..30 {
                frame.put_pixel(col, row, Rgb([200, 200, 200]));
            }
        }

        let region = Region::new(5, 10, 10, 20);
        let crop = crop_region(&frame, &region).unwrap();
        assert_eq!(crop.width(), 20);
        assert_eq!(crop.height(), 10);
        assert!(crop.pixels().all(|p| p == &Rgb([200, 200, 200])));
    }

    #[test]
    fn crop_beyond_rows_is_out_of_bounds() {
        let frame = solid(40, 30, 0);
        let err = crop_region(&frame, &Region::new(25, 0, 10, 20)).unwrap_err();
        assert!(matches!(err, StreamcutError::RegionOutOfBounds { .. }));
    }

    #[test]
    fn crop_beyond_columns_is_out_of_bounds() {
        let frame = solid(40, 30, 0);
        let err = crop_region(&frame, &Region::new(0, 35, 10, 20)).unwrap_err();
        assert!(matches!(err, StreamcutError::RegionOutOfBounds { .. }));
    }

    #[test]
    fn crop_to_the_exact_edge_is_allowed() {
        let frame = solid(40, 30, 7);
        let crop = crop_region(&frame, &Region::new(0, 0, 30, 40)).unwrap();
        assert_eq!((crop.width(), crop.height()), (40, 30));
    }

    #[test]
    fn composite_forces_exact_target_dimensions() {
        let aspect = TargetAspect::new(720, 1280).unwrap();
        let out = composite(&[solid(320, 90, 10), solid(320, 400, 20)], aspect).unwrap();
        assert_eq!((out.width(), out.height()), (720, 1280));
    }

    #[test]
    fn composite_shrinks_to_the_narrowest_input() {
        // Wildly different widths and heights still land on the target.
        let aspect = TargetAspect::new(360, 640).unwrap();
        let out = composite(&[solid(1920, 1080, 10), solid(256, 64, 20)], aspect).unwrap();
        assert_eq!((out.width(), out.height()), (360, 640));
    }

    #[test]
    fn composite_stacks_in_input_order() {
        let aspect = TargetAspect::new(100, 200).unwrap();
        let out = composite(&[solid(100, 100, 250), solid(100, 100, 10)], aspect).unwrap();
        // First input on top, second below.
        assert!(out.get_pixel(50, 10).0[0] > 200);
        assert!(out.get_pixel(50, 190).0[0] < 60);
    }

    proptest! {
        /// Any pair of non-degenerate inputs lands on exactly the target
        /// dimensions, and compositing the same inputs twice is
        /// byte-identical.
        #[test]
        fn composite_is_exact_and_deterministic_for_any_input_dims(
            w1 in 1u32..240, h1 in 1u32..240,
            w2 in 1u32..240, h2 in 1u32..240,
        ) {
            let aspect = TargetAspect::new(72, 128).unwrap();
            let inputs = [solid(w1, h1, 33), solid(w2, h2, 99)];
            let a = composite(&inputs, aspect).unwrap();
            let b = composite(&inputs, aspect).unwrap();
            prop_assert_eq!((a.width(), a.height()), (72, 128));
            prop_assert_eq!(a.as_raw(), b.as_raw());
        }
    }

    #[test]
    fn composite_does_not_mutate_inputs() {
        let original = solid(64, 64, 42);
        let inputs = [original.clone(), solid(32, 32, 7)];
        composite(&inputs, TargetAspect::default()).unwrap();
        assert_eq!(inputs[0].as_raw(), original.as_raw());
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = composite(&[], TargetAspect::default()).unwrap_err();
        assert!(matches!(err, StreamcutError::EmptyInput));
    }

    #[test]
    fn zero_sized_input_is_rejected() {
        let err = composite(&[solid(64, 64, 1), Frame::new(0, 0)], TargetAspect::default())
            .unwrap_err();
        assert!(matches!(
            err,
            StreamcutError::InvalidDimensions {
                width: 0,
                height: 0
            }
        ));
    }

    #[test]
    fn single_image_composites_too() {
        let aspect = TargetAspect::new(720, 1280).unwrap();
        let out = composite(&[solid(640, 480, 128)], aspect).unwrap();
        assert_eq!((out.width(), out.height()), (720, 1280));
    }
}
