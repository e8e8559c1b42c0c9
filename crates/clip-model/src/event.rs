//! Surface event types for region selection.
//!
//! The selector consumes a stream of discrete events from whatever display
//! collaborator hosts the reference frame: pointer gestures plus the two
//! commands (confirm, abort). Events serialize as JSONL so a selection
//! session can be scripted for headless runs and tests.

use serde::{Deserialize, Serialize};

/// A single input event delivered by a selection surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// Primary button pressed at a display position.
    PointerDown { x: u32, y: u32 },

    /// Pointer moved; `held` reports whether the primary button is down.
    PointerMove { x: u32, y: u32, held: bool },

    /// Primary button released at a display position.
    PointerUp { x: u32, y: u32 },

    /// Accept the current rectangle (e.g. Enter).
    Confirm,

    /// Terminate the entire run (e.g. 'q').
    Abort,
}

impl SurfaceEvent {
    pub fn down(x: u32, y: u32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn drag(x: u32, y: u32) -> Self {
        Self::PointerMove { x, y, held: true }
    }

    pub fn hover(x: u32, y: u32) -> Self {
        Self::PointerMove { x, y, held: false }
    }

    pub fn up(x: u32, y: u32) -> Self {
        Self::PointerUp { x, y }
    }
}

/// Parse a JSONL stream of surface events.
///
/// Blank lines and `#` comment lines are skipped.
pub fn parse_events(jsonl: &str) -> Result<Vec<SurfaceEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_round_trip_as_jsonl() {
        let events = vec![
            SurfaceEvent::down(10, 20),
            SurfaceEvent::drag(30, 40),
            SurfaceEvent::up(30, 40),
            SurfaceEvent::Confirm,
        ];

        let jsonl = events
            .iter()
            .map(|e| serde_json::to_string(e).unwrap())
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(parse_events(&jsonl).unwrap(), events);
    }

    #[test]
    fn parser_skips_comments_and_blanks() {
        let jsonl = "# selection script\n\n{\"type\":\"confirm\"}\n";
        assert_eq!(parse_events(jsonl).unwrap(), vec![SurfaceEvent::Confirm]);
    }

    #[test]
    fn tag_names_are_snake_case() {
        let json = serde_json::to_string(&SurfaceEvent::down(1, 2)).unwrap();
        assert!(json.contains("\"pointer_down\""));
    }
}
