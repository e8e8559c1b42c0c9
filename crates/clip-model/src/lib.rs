//! Streamcut Clip Model
//!
//! Pure data types shared by the selection and render stages:
//! - [`Region`] crop rectangles and display-space [`Point`]s
//! - [`TargetAspect`] output dimensions
//! - [`SurfaceEvent`] pointer/command streams for region selection
//!
//! Frames are plain RGB pixel buffers from the `image` crate.

pub mod aspect;
pub mod event;
pub mod region;

pub use aspect::TargetAspect;
pub use event::{parse_events, SurfaceEvent};
pub use region::{Point, Region};

/// A decoded video frame: a 2D grid of RGB pixels.
pub type Frame = image::RgbImage;
