//! Streamcut Selection Core — interactive region selection.
//!
//! Turns a pointer-drag gesture over a reference frame into a crop
//! [`Region`](streamcut_clip_model::Region):
//! - **Session:** explicit state machine driven by discrete surface events
//! - **Overlay:** rectangle preview rendered over a copy of the reference
//! - **Surface:** the narrow seam to whatever display hosts the frame
//!
//! The state machine is pure computation; all display I/O goes through the
//! [`SelectionSurface`] trait.

pub mod overlay;
pub mod session;
pub mod surface;

pub use session::{SelectionSession, Step};
pub use surface::{select_region, ScriptedSurface, SelectionSurface};
