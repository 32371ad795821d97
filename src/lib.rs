//! Evasive Control - a button that runs away from the cursor
//!
//! Core modules:
//! - `engine`: Pointer tracking, dodge placement, repulsion field, messaging cadence
//! - `tuning`: Data-driven thresholds and message set
//! - `platform`: Browser DOM binding (wasm32 only)

pub mod engine;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod tuning;

pub use engine::{
    Collaborators, DeviceClass, Dodge, EngineError, Message, Rect, Session, SessionPhase,
    StyleHint,
};
pub use tuning::Tuning;

use glam::Vec2;

/// Reference constants (defaults for [`Tuning`])
pub mod consts {
    /// Viewports narrower than this are treated as compact (touch-first) devices
    pub const COMPACT_BREAKPOINT_PX: f32 = 768.0;

    /// Pointer distance that triggers a dodge on compact devices
    pub const PROXIMITY_THRESHOLD_COMPACT: f32 = 150.0;
    /// Pointer distance that triggers a dodge on standard devices
    pub const PROXIMITY_THRESHOLD_STANDARD: f32 = 250.0;

    /// Radius of the ambient repulsion field
    pub const REPULSION_RADIUS: f32 = 200.0;
    /// Repulsion field recompute period (10 Hz keeps it cheap)
    pub const REPULSION_PERIOD_MS: u32 = 100;

    /// Every Nth dodge shows a message
    pub const MESSAGE_CADENCE: u64 = 5;
    /// How long a message stays on screen
    pub const MESSAGE_DURATION_MS: u32 = 3000;
    pub const MESSAGE_FONT_PX_COMPACT: u32 = 16;
    pub const MESSAGE_FONT_PX_STANDARD: u32 = 18;

    /// Ambient floating elements per device class
    pub const AMBIENT_COUNT_STANDARD: usize = 13;
    pub const AMBIENT_COUNT_COMPACT: usize = 6;
}

/// Distance and angle (radians) of `to` as seen from `from`
#[inline]
pub fn distance_and_angle(from: Vec2, to: Vec2) -> (f32, f32) {
    let delta = to - from;
    (delta.length(), delta.y.atan2(delta.x))
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_distance_and_angle() {
        let (d, theta) = distance_and_angle(Vec2::new(200.0, 150.0), Vec2::new(260.0, 150.0));
        assert!((d - 60.0).abs() < 1e-4);
        assert!(theta.abs() < 1e-6);

        let (d, theta) = distance_and_angle(Vec2::ZERO, Vec2::new(0.0, -10.0));
        assert!((d - 10.0).abs() < 1e-4);
        assert!((theta + PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_polar_round_trip_direction() {
        let p = polar_to_cartesian(25.0, PI / 4.0);
        let (d, theta) = distance_and_angle(Vec2::ZERO, p);
        assert!((d - 25.0).abs() < 1e-4);
        assert!((theta - PI / 4.0).abs() < 1e-5);
    }
}
