//! Session-scoped widget state
//!
//! Everything mutable lives in one `Session`. Event handlers and the repulsion
//! tick call into it; nothing else holds widget state.

use glam::Vec2;

use super::avoidance::{AvoidanceController, Dodge};
use super::device::DeviceClass;
use super::geometry::Rect;
use super::messages::{Message, MessageBook, RandomSource};
use super::pointer::PointerTracker;
use super::repulsion::{AmbientElement, RepulsionField};
use super::scheduler::{Clock, Scheduler};
use crate::tuning::Tuning;

/// One-shot calls out to rendering/feedback collaborators
pub trait Collaborators {
    /// Show a transient message; fire-and-forget
    fn show_message(&mut self, message: &Message);
    /// The non-evading control was accepted
    fn celebrate(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Dodging and repulsion running
    Active,
    /// Celebration triggered; the overlay covers the widget
    Accepted,
    /// Torn down
    Ended,
}

pub struct Session {
    tuning: Tuning,
    device: DeviceClass,
    phase: SessionPhase,
    pointer: PointerTracker,
    avoidance: AvoidanceController,
    field: RepulsionField,
    schedule: Scheduler,
    messages: MessageBook,
    clock: Box<dyn Clock>,
    random: Box<dyn RandomSource>,
}

impl Session {
    /// Start a session for a viewport of the given size
    pub fn new(
        tuning: Tuning,
        viewport: Vec2,
        clock: Box<dyn Clock>,
        mut random: Box<dyn RandomSource>,
    ) -> Self {
        let device = DeviceClass::from_viewport_width(viewport.x, &tuning);
        let field = RepulsionField::scattered(
            tuning.repulsion_radius,
            device.ambient_count(&tuning),
            viewport,
            random.as_mut(),
        );
        let messages = MessageBook::from_tuning(&tuning);
        if messages.is_empty() {
            log::warn!("No messages configured; dodge feedback disabled");
        }

        let mut session = Self {
            // Host timers run on the same period and may wake a little early
            schedule: Scheduler::new(tuning.repulsion_period_ms)
                .with_tolerance(f64::from(tuning.repulsion_period_ms) / 4.0),
            tuning,
            device,
            phase: SessionPhase::Active,
            pointer: PointerTracker::new(),
            avoidance: AvoidanceController::new(),
            field,
            messages,
            clock,
            random,
        };
        session.sync_schedule();

        log::info!(
            "Session started ({} device, {} ambient elements)",
            device.as_str(),
            session.field.elements().len()
        );
        session
    }

    // === Accessors ===

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer.current()
    }

    pub fn dodge_offset(&self) -> Vec2 {
        self.avoidance.state().offset
    }

    pub fn dodge_count(&self) -> u64 {
        self.avoidance.count()
    }

    pub fn ambient(&self) -> &[AmbientElement] {
        self.field.elements()
    }

    /// Whether the repulsion timer should be running
    pub fn repulsion_active(&self) -> bool {
        self.schedule.is_active()
    }

    // === Event path ===

    /// Global pointer move (feeds the repulsion field only)
    pub fn on_pointer_move(&mut self, pos: Vec2) {
        if self.phase == SessionPhase::Ended {
            return;
        }
        self.pointer.on_pointer_move(pos);
    }

    /// Global touch move; first touch wins
    pub fn on_touch(&mut self, touches: &[Vec2]) {
        if self.phase == SessionPhase::Ended {
            return;
        }
        self.pointer.on_touch(touches);
    }

    /// Pointer/touch move inside the arena: may dodge, may emit a message.
    ///
    /// `element` and `container` are the current bounding rectangles; `None`
    /// means not measurable, which skips this event.
    pub fn on_arena_pointer(
        &mut self,
        pos: Vec2,
        element: Option<Rect>,
        container: Option<Rect>,
        collaborators: &mut dyn Collaborators,
    ) -> Option<Dodge> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        self.pointer.on_pointer_move(pos);

        let threshold = self.device.proximity_threshold(&self.tuning);
        let dodge = match self.avoidance.evaluate(
            pos,
            element.as_ref(),
            container.as_ref(),
            threshold,
            self.tuning.message_cadence,
        ) {
            Ok(dodge) => dodge?,
            Err(e) => {
                log::debug!("Skipping dodge: {e}");
                return None;
            }
        };

        log::debug!(
            "Dodge #{} -> ({:.1}, {:.1})",
            dodge.count,
            dodge.offset.x,
            dodge.offset.y
        );

        if dodge.emit_message {
            self.emit_message(collaborators);
        }
        Some(dodge)
    }

    fn emit_message(&mut self, collaborators: &mut dyn Collaborators) {
        let text = match self.messages.pick(self.random.as_mut()) {
            Ok(text) => text.to_string(),
            Err(e) => {
                log::warn!("Skipping message: {e}");
                return;
            }
        };
        let style = self.device.message_style();
        let message = Message {
            text,
            duration_ms: self.tuning.message_duration_ms,
            style,
            font_px: style.font_px(&self.tuning),
        };
        collaborators.show_message(&message);
    }

    /// Viewport resized; returns true if the device class changed
    pub fn on_viewport_resize(&mut self, viewport: Vec2) -> bool {
        if self.phase == SessionPhase::Ended {
            return false;
        }
        let device = DeviceClass::from_viewport_width(viewport.x, &self.tuning);
        if device == self.device {
            return false;
        }

        log::info!("Device class {} -> {}", self.device.as_str(), device.as_str());
        self.device = device;
        self.sync_schedule();
        true
    }

    /// The non-evading control was activated. Celebrates at most once.
    pub fn accept(&mut self, collaborators: &mut dyn Collaborators) -> bool {
        if self.phase != SessionPhase::Active {
            return false;
        }
        self.phase = SessionPhase::Accepted;
        self.sync_schedule();
        log::info!("Accepted after {} dodges", self.dodge_count());
        collaborators.celebrate();
        true
    }

    // === Timer path ===

    /// Run the repulsion tick if one is due.
    ///
    /// `resolve` maps an ambient element to its on-screen center, or `None`
    /// if it cannot be found this tick.
    pub fn advance<F>(&mut self, resolve: F) -> bool
    where
        F: FnMut(&AmbientElement) -> Option<Vec2>,
    {
        if !self.schedule.poll(self.clock.now_ms()) {
            return false;
        }
        self.field.tick(self.pointer.current(), resolve);
        true
    }

    /// `advance` using each element's tracked center
    pub fn advance_headless(&mut self) -> bool {
        self.advance(|e| Some(e.center()))
    }

    // === Teardown ===

    pub fn teardown(&mut self) {
        if self.phase == SessionPhase::Ended {
            return;
        }
        self.phase = SessionPhase::Ended;
        self.schedule.cancel();
        log::info!("Session ended after {} dodges", self.dodge_count());
    }

    /// Arm or cancel the repulsion schedule to match device class and phase
    fn sync_schedule(&mut self) {
        let wanted = self.phase == SessionPhase::Active && self.device.repulsion_enabled();
        if wanted {
            self.schedule.start(self.clock.now_ms());
        } else if self.schedule.is_active() {
            self.schedule.cancel();
            self.field.relax();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.teardown();
    }
}
