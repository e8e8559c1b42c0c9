//! Crop regions and display-space points.

use serde::{Deserialize, Serialize};

/// A rectangular crop region within a frame.
///
/// All components are non-negative; `width == 0 && height == 0` denotes
/// "no selection yet". A region is immutable once returned by the selector.
///
/// # Consumption contract
///
/// When a region is used for cropping, `x`/`width` address frame **rows**
/// and `y`/`height` address frame **columns** — i.e. the crop covers rows
/// `x..x + width` and columns `y..y + height`. This is the transposed
/// display-to-crop convention carried over from the original capture
/// behavior; downstream code must honor it rather than read the fields as
/// screen-space `(x, y, w, h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Region {
    /// Row offset.
    pub x: u32,
    /// Column offset.
    pub y: u32,
    /// Row extent.
    pub width: u32,
    /// Column extent.
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether this region denotes "no selection yet".
    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Convert a pair of display-space corners into a crop region.
    ///
    /// `min`/`max` are the component-wise corner extremes of a drag in
    /// display coordinates (x = horizontal, y = vertical). The returned
    /// region follows the transposed consumption contract above: the
    /// display y-axis becomes the row axis.
    pub fn from_display_corners(min: Point, max: Point) -> Self {
        Self {
            x: min.y,
            y: min.x,
            width: max.y.saturating_sub(min.y),
            height: max.x.saturating_sub(min.x),
        }
    }
}

/// A display-space pixel position (x = horizontal, y = vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum of two points.
    pub fn component_min(self, other: Point) -> Point {
        Point {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum of two points.
    pub fn component_max(self, other: Point) -> Point {
        Point {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_is_empty() {
        assert!(Region::default().is_empty());
        assert!(!Region::new(0, 0, 10, 10).is_empty());
    }

    #[test]
    fn display_corners_transpose_into_crop_axes() {
        // Display drag from (30, 10) to (90, 50): the vertical display span
        // (10..50) becomes the row span, the horizontal one the column span.
        let region = Region::from_display_corners(Point::new(30, 10), Point::new(90, 50));
        assert_eq!(region.x, 10);
        assert_eq!(region.y, 30);
        assert_eq!(region.width, 40);
        assert_eq!(region.height, 60);
    }

    #[test]
    fn component_extremes() {
        let a = Point::new(5, 40);
        let b = Point::new(20, 10);
        assert_eq!(a.component_min(b), Point::new(5, 10));
        assert_eq!(a.component_max(b), Point::new(20, 40));
    }
}
