//! Engine error taxonomy
//!
//! None of these are fatal. Callers log them and degrade (no dodge this event,
//! no message this time).

use core::fmt;

use glam::Vec2;

/// Which measurement was missing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Measured {
    Element,
    Container,
}

impl fmt::Display for Measured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element => write!(f, "evading element"),
            Self::Container => write!(f, "container"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// A bounding rectangle was absent or not laid out
    MeasurementUnavailable { what: Measured },
    /// Container smaller than the element on at least one axis
    DegenerateBounds { container: Vec2, element: Vec2 },
    /// Message selection against an empty message set
    EmptyMessageSet,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeasurementUnavailable { what } => {
                write!(f, "{what} bounding rectangle unavailable")
            }
            Self::DegenerateBounds { container, element } => write!(
                f,
                "container {}x{} smaller than element {}x{}",
                container.x, container.y, element.x, element.y
            ),
            Self::EmptyMessageSet => write!(f, "message set is empty"),
        }
    }
}

impl std::error::Error for EngineError {}
