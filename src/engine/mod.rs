//! Evasion engine
//!
//! All widget behavior lives here. This module must stay platform-free:
//! - No DOM access (measurements arrive as plain rectangles)
//! - Time only through an injected `Clock`
//! - Randomness only through an injected `RandomSource`

pub mod avoidance;
pub mod device;
pub mod error;
pub mod geometry;
pub mod messages;
pub mod pointer;
pub mod repulsion;
pub mod scheduler;
pub mod session;

pub use avoidance::{AvoidanceController, Dodge, DodgeState, plan_dodge, travel_range};
pub use device::DeviceClass;
pub use error::{EngineError, Measured};
pub use geometry::Rect;
pub use messages::{
    InteractionCounter, Message, MessageBook, RandomSource, SeededRandom, StyleHint, should_emit,
};
pub use pointer::PointerTracker;
pub use repulsion::{AmbientElement, RepulsionField, repulsion_offset};
pub use scheduler::{Clock, ManualClock, Scheduler};
pub use session::{Collaborators, Session, SessionPhase};
