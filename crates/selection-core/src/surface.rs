//! The display-collaborator seam and the blocking selection entry point.

use std::collections::VecDeque;

use streamcut_clip_model::{Frame, Region, SurfaceEvent};
use streamcut_common::{StreamcutError, StreamcutResult};

use crate::overlay::render_overlay;
use crate::session::{SelectionSession, Step};

/// The narrow contract a display collaborator must satisfy: show a frame,
/// deliver the next input event. The selector never touches windowing
/// machinery directly.
pub trait SelectionSurface {
    /// Display a frame (the reference, or a reference-plus-overlay copy).
    fn present(&mut self, frame: &Frame) -> StreamcutResult<()>;

    /// Block until the next event arrives. A disconnected surface (window
    /// closed, script exhausted) must fail rather than hang.
    fn next_event(&mut self) -> StreamcutResult<SurfaceEvent>;
}

/// Run one selection session to completion.
///
/// Blocks the calling stage until the operator confirms a rectangle or
/// aborts. Aborting fails the whole pipeline with
/// [`StreamcutError::UserAbort`].
pub fn select_region(
    surface: &mut dyn SelectionSurface,
    reference: &Frame,
    label: &str,
) -> StreamcutResult<Region> {
    tracing::info!(label, "Waiting for region selection");
    surface.present(reference)?;

    let mut session = SelectionSession::new();
    loop {
        match session.apply(surface.next_event()?) {
            Step::Pending => {}
            Step::Redraw => {
                if let Some((min, max)) = session.corners() {
                    surface.present(&render_overlay(reference, min, max))?;
                }
            }
            Step::Confirmed(region) => {
                if region.is_empty() {
                    tracing::warn!(label, "Confirmed an empty region");
                }
                tracing::info!(label, ?region, "Region confirmed");
                return Ok(region);
            }
            Step::Aborted => {
                tracing::warn!(label, "Selection aborted by operator");
                return Err(StreamcutError::UserAbort);
            }
        }
    }
}

/// A deterministic surface that replays a pre-recorded event stream.
///
/// Used for headless runs (`streamcut cut --events`) and tests. Running out
/// of events counts as an abort, the same as closing the window.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    events: VecDeque<SurfaceEvent>,
    presented: usize,
}

impl ScriptedSurface {
    pub fn new(events: impl IntoIterator<Item = SurfaceEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            presented: 0,
        }
    }

    /// Number of frames presented so far (reference + overlay redraws).
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl SelectionSurface for ScriptedSurface {
    fn present(&mut self, _frame: &Frame) -> StreamcutResult<()> {
        self.presented += 1;
        Ok(())
    }

    fn next_event(&mut self) -> StreamcutResult<SurfaceEvent> {
        self.events.pop_front().ok_or(StreamcutError::UserAbort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn reference() -> Frame {
        RgbImage::from_pixel(128, 128, Rgb([20, 20, 20]))
    }

    #[test]
    fn scripted_drag_selects_a_region() {
        let mut surface = ScriptedSurface::new([
            SurfaceEvent::down(30, 10),
            SurfaceEvent::drag(60, 20),
            SurfaceEvent::drag(90, 50),
            SurfaceEvent::up(90, 50),
            SurfaceEvent::Confirm,
        ]);

        let region = select_region(&mut surface, &reference(), "webcam").unwrap();
        assert_eq!(region, Region::new(10, 30, 40, 60));
        // Reference + down redraw + two drag redraws.
        assert_eq!(surface.presented(), 4);
    }

    #[test]
    fn abort_event_fails_with_user_abort() {
        let mut surface = ScriptedSurface::new([SurfaceEvent::down(5, 5), SurfaceEvent::Abort]);
        let err = select_region(&mut surface, &reference(), "gamefeed").unwrap_err();
        assert!(matches!(err, StreamcutError::UserAbort));
    }

    #[test]
    fn exhausted_script_counts_as_abort() {
        let mut surface = ScriptedSurface::new([SurfaceEvent::down(5, 5)]);
        let err = select_region(&mut surface, &reference(), "webcam").unwrap_err();
        assert!(matches!(err, StreamcutError::UserAbort));
    }

    #[test]
    fn events_parse_from_jsonl_script() {
        let jsonl = r#"
            # scripted selection
            {"type":"pointer_down","x":0,"y":0}
            {"type":"pointer_move","x":40,"y":40,"held":true}
            {"type":"pointer_up","x":40,"y":40}
            {"type":"confirm"}
        "#;
        let events = streamcut_clip_model::parse_events(jsonl).unwrap();
        let mut surface = ScriptedSurface::new(events);
        let region = select_region(&mut surface, &reference(), "webcam").unwrap();
        assert_eq!(region, Region::new(0, 0, 40, 40));
    }
}
