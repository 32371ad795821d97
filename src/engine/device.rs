//! Device class detection
//!
//! Coarse viewport-size category. Compact devices get a tighter dodge
//! threshold, fewer ambient elements and no repulsion field at all.

use super::messages::StyleHint;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// Narrow viewport, usually touch-first
    Compact,
    #[default]
    Standard,
}

impl DeviceClass {
    /// Classify a viewport by its width
    pub fn from_viewport_width(width: f32, tuning: &Tuning) -> Self {
        if width < tuning.compact_breakpoint_px {
            DeviceClass::Compact
        } else {
            DeviceClass::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Compact => "compact",
            DeviceClass::Standard => "standard",
        }
    }

    /// Pointer distance below which the evading element dodges
    pub fn proximity_threshold(&self, tuning: &Tuning) -> f32 {
        match self {
            DeviceClass::Compact => tuning.proximity_compact,
            DeviceClass::Standard => tuning.proximity_standard,
        }
    }

    /// Whether the ambient repulsion field runs at all
    pub fn repulsion_enabled(&self) -> bool {
        match self {
            DeviceClass::Compact => false,
            DeviceClass::Standard => true,
        }
    }

    /// Number of ambient floating elements
    pub fn ambient_count(&self, tuning: &Tuning) -> usize {
        match self {
            DeviceClass::Compact => tuning.ambient_count_compact,
            DeviceClass::Standard => tuning.ambient_count_standard,
        }
    }

    /// Styling hint for emitted messages
    pub fn message_style(&self) -> StyleHint {
        match self {
            DeviceClass::Compact => StyleHint::Regular,
            DeviceClass::Standard => StyleHint::Large,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint() {
        let t = Tuning::default();
        assert_eq!(DeviceClass::from_viewport_width(375.0, &t), DeviceClass::Compact);
        assert_eq!(DeviceClass::from_viewport_width(767.9, &t), DeviceClass::Compact);
        assert_eq!(DeviceClass::from_viewport_width(768.0, &t), DeviceClass::Standard);
        assert_eq!(DeviceClass::from_viewport_width(1920.0, &t), DeviceClass::Standard);
    }

    #[test]
    fn test_thresholds() {
        let t = Tuning::default();
        assert_eq!(DeviceClass::Compact.proximity_threshold(&t), 150.0);
        assert_eq!(DeviceClass::Standard.proximity_threshold(&t), 250.0);
        assert!(!DeviceClass::Compact.repulsion_enabled());
        assert!(DeviceClass::Standard.repulsion_enabled());
        assert_eq!(DeviceClass::Compact.ambient_count(&t), 6);
        assert_eq!(DeviceClass::Standard.ambient_count(&t), 13);
    }
}
