//! Selection overlay rendering.

use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use streamcut_clip_model::{Frame, Point};

const OVERLAY_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Render the candidate rectangle over a fresh copy of the reference frame.
///
/// The stored reference frame is never mutated; every redraw starts from a
/// clean copy so stale overlays cannot accumulate.
pub fn render_overlay(reference: &Frame, min: Point, max: Point) -> Frame {
    let mut preview = reference.clone();
    let rect = Rect::at(min.x as i32, min.y as i32).of_size(
        (max.x - min.x).max(1),
        (max.y - min.y).max(1),
    );
    draw_hollow_rect_mut(&mut preview, rect, OVERLAY_COLOR);
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn overlay_marks_the_border_and_leaves_the_reference_untouched() {
        let reference = RgbImage::from_pixel(64, 64, Rgb([10, 10, 10]));
        let preview = render_overlay(&reference, Point::new(8, 8), Point::new(24, 20));

        assert_eq!(preview.get_pixel(8, 8), &OVERLAY_COLOR);
        // Right border sits at min.x + (max.x - min.x) - 1.
        assert_eq!(preview.get_pixel(23, 8), &OVERLAY_COLOR);
        // Interior stays untouched.
        assert_eq!(preview.get_pixel(16, 14), &Rgb([10, 10, 10]));
        // The reference itself is never drawn on.
        assert_eq!(reference.get_pixel(8, 8), &Rgb([10, 10, 10]));
    }

    #[test]
    fn zero_size_candidate_still_draws_a_marker() {
        let reference = RgbImage::from_pixel(16, 16, Rgb([0, 0, 0]));
        let preview = render_overlay(&reference, Point::new(5, 5), Point::new(5, 5));
        assert_eq!(preview.get_pixel(5, 5), &OVERLAY_COLOR);
    }
}
