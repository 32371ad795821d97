//! Dodge placement for the evading element
//!
//! When the pointer comes within the proximity threshold the element jumps
//! to the far side of its container along the pointer→element axis. This is a
//! discrete relocation, not a gradual push.

use glam::Vec2;

use super::error::{EngineError, Measured};
use super::geometry::Rect;
use super::messages::{InteractionCounter, should_emit};
use crate::distance_and_angle;

/// Current displacement of the evading element from its layout position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DodgeState {
    pub offset: Vec2,
}

/// Result of a qualifying dodge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dodge {
    /// New offset for the element's render transform
    pub offset: Vec2,
    /// Dodge counter after this dodge
    pub count: u64,
    /// Whether a message should be shown for this dodge
    pub emit_message: bool,
}

/// Half the slack between container and element on each axis.
///
/// This is how far the element may travel from center without leaving the
/// container. Negative slack is clamped to zero.
pub fn travel_range(container: &Rect, element: &Rect) -> Vec2 {
    let raw = (container.size - element.size) / 2.0;
    if raw.x < 0.0 || raw.y < 0.0 {
        let err = EngineError::DegenerateBounds {
            container: container.size,
            element: element.size,
        };
        log::debug!("{err}, clamping travel");
    }
    raw.max(Vec2::ZERO)
}

/// Compute the dodge offset for a pointer, or `None` if it is far enough away
pub fn plan_dodge(pointer: Vec2, element: &Rect, container: &Rect, threshold: f32) -> Option<Vec2> {
    // Angle points from element center toward the pointer; flee the opposite way
    let (distance, theta) = distance_and_angle(element.center(), pointer);
    // Also rejects a NaN distance from a non-finite pointer
    if !(distance < threshold) {
        return None;
    }

    let max = travel_range(container, element);
    Some(Vec2::new(-theta.cos() * max.x, -theta.sin() * max.y))
}

/// Owns the dodge state and the dodge counter
#[derive(Debug, Clone, Default)]
pub struct AvoidanceController {
    state: DodgeState,
    counter: InteractionCounter,
}

impl AvoidanceController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DodgeState {
        self.state
    }

    pub fn count(&self) -> u64 {
        self.counter.get()
    }

    /// Evaluate one pointer event near the evading element.
    ///
    /// Returns `Ok(None)` when the pointer is out of range and
    /// `Err(MeasurementUnavailable)` when a rectangle is missing. Neither case
    /// touches state.
    pub fn evaluate(
        &mut self,
        pointer: Vec2,
        element: Option<&Rect>,
        container: Option<&Rect>,
        threshold: f32,
        cadence: u64,
    ) -> Result<Option<Dodge>, EngineError> {
        let element = measured(element, Measured::Element)?;
        let container = measured(container, Measured::Container)?;

        let Some(offset) = plan_dodge(pointer, element, container, threshold) else {
            return Ok(None);
        };

        self.state.offset = offset;
        let count = self.counter.increment();
        Ok(Some(Dodge {
            offset,
            count,
            emit_message: should_emit(count, cadence),
        }))
    }
}

fn measured(rect: Option<&Rect>, what: Measured) -> Result<&Rect, EngineError> {
    rect.filter(|r| r.is_measurable())
        .ok_or(EngineError::MeasurementUnavailable { what })
}
