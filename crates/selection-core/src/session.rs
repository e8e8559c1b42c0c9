//! The drag-selection state machine.
//!
//! One session exists per `select_region` call and is discarded the moment
//! a confirming event is applied. States:
//!
//! - **Idle:** no anchor set. A pointer-down anchors the drag.
//! - **Dragging:** every held pointer-move recomputes the candidate corners
//!   as the component-wise min/max of the anchor and the pointer, so the
//!   rectangle is well-formed regardless of drag direction. Releasing the
//!   button keeps the candidate; a new pointer-down restarts the drag.
//! - **Terminal:** a confirm event converts the candidate from display
//!   coordinates to a crop [`Region`]; an abort event ends the whole run.

use streamcut_clip_model::{Point, Region, SurfaceEvent};

/// Outcome of applying one event to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing visible changed.
    Pending,
    /// The candidate rectangle changed; the overlay must be re-rendered.
    Redraw,
    /// The operator accepted the candidate.
    Confirmed(Region),
    /// The operator cancelled the run.
    Aborted,
}

/// Mutable selection state for a single session.
#[derive(Debug, Default)]
pub struct SelectionSession {
    anchor: Option<Point>,
    corners: Option<(Point, Point)>,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current candidate as `(min, max)` display corners, if any drag
    /// has happened yet.
    pub fn corners(&self) -> Option<(Point, Point)> {
        self.corners
    }

    /// Advance the state machine by one surface event.
    pub fn apply(&mut self, event: SurfaceEvent) -> Step {
        match event {
            SurfaceEvent::PointerDown { x, y } => {
                let p = Point::new(x, y);
                self.anchor = Some(p);
                self.corners = Some((p, p));
                Step::Redraw
            }
            SurfaceEvent::PointerMove { x, y, held } => {
                let Some(anchor) = self.anchor else {
                    return Step::Pending;
                };
                if held {
                    let p = Point::new(x, y);
                    self.corners = Some((anchor.component_min(p), anchor.component_max(p)));
                    Step::Redraw
                } else {
                    // Button released without an up event reaching us.
                    tracing::debug!("selection complete");
                    self.anchor = None;
                    Step::Pending
                }
            }
            SurfaceEvent::PointerUp { .. } => {
                // Candidate is retained; the operator may confirm or re-drag.
                self.anchor = None;
                Step::Pending
            }
            SurfaceEvent::Confirm => Step::Confirmed(self.candidate_region()),
            SurfaceEvent::Abort => Step::Aborted,
        }
    }

    /// The candidate converted to crop coordinates. Confirming before any
    /// drag yields the empty region, matching the observed source behavior.
    fn candidate_region(&self) -> Region {
        match self.corners {
            Some((min, max)) => Region::from_display_corners(min, max),
            None => Region::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drag(events: &[SurfaceEvent]) -> (SelectionSession, Step) {
        let mut session = SelectionSession::new();
        let mut last = Step::Pending;
        for event in events {
            last = session.apply(*event);
        }
        (session, last)
    }

    #[test]
    fn down_drag_up_confirm_returns_transposed_region() {
        let (_, step) = drag(&[
            SurfaceEvent::down(30, 10),
            SurfaceEvent::drag(90, 50),
            SurfaceEvent::up(90, 50),
            SurfaceEvent::Confirm,
        ]);
        assert_eq!(step, Step::Confirmed(Region::new(10, 30, 40, 60)));
    }

    #[test]
    fn reverse_drag_produces_the_same_region() {
        let (_, forward) = drag(&[
            SurfaceEvent::down(30, 10),
            SurfaceEvent::drag(90, 50),
            SurfaceEvent::up(90, 50),
            SurfaceEvent::Confirm,
        ]);
        let (_, reverse) = drag(&[
            SurfaceEvent::down(90, 50),
            SurfaceEvent::drag(30, 10),
            SurfaceEvent::up(30, 10),
            SurfaceEvent::Confirm,
        ]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn confirm_without_drag_yields_empty_region() {
        let (_, step) = drag(&[SurfaceEvent::Confirm]);
        assert_eq!(step, Step::Confirmed(Region::default()));
    }

    #[test]
    fn click_then_confirm_keeps_zero_size_candidate() {
        let (_, step) = drag(&[
            SurfaceEvent::down(25, 35),
            SurfaceEvent::up(25, 35),
            SurfaceEvent::Confirm,
        ]);
        assert_eq!(step, Step::Confirmed(Region::new(35, 25, 0, 0)));
    }

    #[test]
    fn redrag_replaces_the_candidate() {
        let (_, step) = drag(&[
            SurfaceEvent::down(0, 0),
            SurfaceEvent::drag(10, 10),
            SurfaceEvent::up(10, 10),
            SurfaceEvent::down(100, 100),
            SurfaceEvent::drag(160, 140),
            SurfaceEvent::up(160, 140),
            SurfaceEvent::Confirm,
        ]);
        assert_eq!(step, Step::Confirmed(Region::new(100, 100, 40, 60)));
    }

    #[test]
    fn unheld_move_clears_the_anchor_but_keeps_the_candidate() {
        let mut session = SelectionSession::new();
        session.apply(SurfaceEvent::down(10, 10));
        session.apply(SurfaceEvent::drag(50, 50));
        assert_eq!(session.apply(SurfaceEvent::hover(70, 70)), Step::Pending);
        // Further unheld moves change nothing.
        assert_eq!(session.apply(SurfaceEvent::hover(90, 90)), Step::Pending);
        assert_eq!(
            session.apply(SurfaceEvent::Confirm),
            Step::Confirmed(Region::new(10, 10, 40, 40))
        );
    }

    #[test]
    fn abort_wins_in_any_state() {
        let (_, step) = drag(&[SurfaceEvent::down(10, 10), SurfaceEvent::Abort]);
        assert_eq!(step, Step::Aborted);
        let (_, step) = drag(&[SurfaceEvent::Abort]);
        assert_eq!(step, Step::Aborted);
    }

    proptest! {
        /// For any drag endpoints, the candidate corners are the
        /// component-wise min/max regardless of drag direction.
        #[test]
        fn corners_are_component_extremes(
            ax in 0u32..4000, ay in 0u32..4000,
            bx in 0u32..4000, by in 0u32..4000,
        ) {
            let mut session = SelectionSession::new();
            session.apply(SurfaceEvent::down(ax, ay));
            session.apply(SurfaceEvent::drag(bx, by));
            session.apply(SurfaceEvent::up(bx, by));

            let (min, max) = session.corners().unwrap();
            prop_assert_eq!(min, Point::new(ax.min(bx), ay.min(by)));
            prop_assert_eq!(max, Point::new(ax.max(bx), ay.max(by)));
        }
    }
}
