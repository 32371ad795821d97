//! Data-driven widget tuning
//!
//! Defaults reproduce the reference behavior. A host page may override any
//! field by embedding JSON in the arena's `data-tuning` attribute.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Messages shown every few dodges
pub const DEFAULT_MESSAGES: [&str; 10] = [
    "💔 You are breaking my heart 😢",
    "😭 Come on Pookie 😭",
    "🧎 Should I kneel down? 😭😭",
    "🥺 Please baby, just one chance 🥺",
    "💕 I promise to make you happy 💕",
    "😢 Don't do this to me 😢",
    "🌹 You're my everything 🌹",
    "💖 I'll wait forever for you 💖",
    "💞 Just say yes, pretty please 💞",
    "✨ You're the one I've been waiting for ✨",
];

/// Tunable thresholds and content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Viewport width below which the device is compact
    pub compact_breakpoint_px: f32,

    // === Avoidance ===
    pub proximity_compact: f32,
    pub proximity_standard: f32,

    // === Repulsion ===
    pub repulsion_radius: f32,
    pub repulsion_period_ms: u32,
    pub ambient_count_standard: usize,
    pub ambient_count_compact: usize,

    // === Messaging ===
    /// Emit a message on every Nth dodge
    pub message_cadence: u64,
    pub message_duration_ms: u32,
    pub message_font_px_compact: u32,
    pub message_font_px_standard: u32,
    pub messages: Vec<String>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            compact_breakpoint_px: COMPACT_BREAKPOINT_PX,

            proximity_compact: PROXIMITY_THRESHOLD_COMPACT,
            proximity_standard: PROXIMITY_THRESHOLD_STANDARD,

            repulsion_radius: REPULSION_RADIUS,
            repulsion_period_ms: REPULSION_PERIOD_MS,
            ambient_count_standard: AMBIENT_COUNT_STANDARD,
            ambient_count_compact: AMBIENT_COUNT_COMPACT,

            message_cadence: MESSAGE_CADENCE,
            message_duration_ms: MESSAGE_DURATION_MS,
            message_font_px_compact: MESSAGE_FONT_PX_COMPACT,
            message_font_px_standard: MESSAGE_FONT_PX_STANDARD,
            messages: DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse tuning, logging and falling back to defaults on error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(tuning) => {
                    log::info!("Loaded widget tuning");
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning JSON ({e}), using defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Clamp values that would break the engine
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.message_cadence == 0 {
            log::warn!("message_cadence must be >= 1, using {}", defaults.message_cadence);
            self.message_cadence = defaults.message_cadence;
        }
        if self.repulsion_period_ms == 0 {
            log::warn!(
                "repulsion_period_ms must be >= 1, using {}",
                defaults.repulsion_period_ms
            );
            self.repulsion_period_ms = defaults.repulsion_period_ms;
        }

        for (name, value, fallback) in [
            ("proximity_compact", &mut self.proximity_compact, defaults.proximity_compact),
            ("proximity_standard", &mut self.proximity_standard, defaults.proximity_standard),
            ("repulsion_radius", &mut self.repulsion_radius, defaults.repulsion_radius),
            (
                "compact_breakpoint_px",
                &mut self.compact_breakpoint_px,
                defaults.compact_breakpoint_px,
            ),
        ] {
            if !value.is_finite() || *value < 0.0 {
                log::warn!("{name} must be a non-negative number, using {fallback}");
                *value = fallback;
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let t = Tuning::default();
        assert_eq!(t.proximity_compact, 150.0);
        assert_eq!(t.proximity_standard, 250.0);
        assert_eq!(t.repulsion_radius, 200.0);
        assert_eq!(t.repulsion_period_ms, 100);
        assert_eq!(t.message_cadence, 5);
        assert_eq!(t.message_duration_ms, 3000);
        assert_eq!(t.messages.len(), 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "proximity_standard": 300 }"#).unwrap();
        assert_eq!(t.proximity_standard, 300.0);
        assert_eq!(t.proximity_compact, 150.0);
        assert_eq!(t.messages.len(), 10);
    }

    #[test]
    fn test_empty_message_list_is_allowed() {
        let t = Tuning::from_json(r#"{ "messages": [] }"#).unwrap();
        assert!(t.messages.is_empty());
    }

    #[test]
    fn test_sanitize_clamps_bad_values() {
        let t = Tuning::from_json(
            r#"{ "message_cadence": 0, "repulsion_period_ms": 0, "repulsion_radius": -5 }"#,
        )
        .unwrap();
        assert_eq!(t.message_cadence, 5);
        assert_eq!(t.repulsion_period_ms, 100);
        assert_eq!(t.repulsion_radius, 200.0);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(Tuning::from_json_or_default(Some("{not json")), Tuning::default());
        assert_eq!(Tuning::from_json_or_default(None), Tuning::default());
    }
}
