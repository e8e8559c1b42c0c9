//! Target output dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The exact output dimensions of a composited clip.
///
/// Both components must be positive. The final compositor resize forces
/// these dimensions without preserving aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAspect {
    pub width: u32,
    pub height: u32,
}

impl TargetAspect {
    pub fn new(width: u32, height: u32) -> Result<Self, AspectParseError> {
        if width == 0 || height == 0 {
            return Err(AspectParseError::Zero);
        }
        Ok(Self { width, height })
    }
}

impl Default for TargetAspect {
    /// Vertical short-form default.
    fn default() -> Self {
        Self {
            width: 720,
            height: 1280,
        }
    }
}

impl fmt::Display for TargetAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors parsing a `WIDTHxHEIGHT` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AspectParseError {
    #[error("expected WIDTHxHEIGHT, e.g. 720x1280")]
    Malformed,
    #[error("aspect components must be positive integers")]
    Zero,
}

impl FromStr for TargetAspect {
    type Err = AspectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or(AspectParseError::Malformed)?;
        let width = w.parse::<u32>().map_err(|_| AspectParseError::Malformed)?;
        let height = h.parse::<u32>().map_err(|_| AspectParseError::Malformed)?;
        Self::new(width, height)
    }
}
