//! Evasive Control entry point
//!
//! On the web this mounts the widget onto the page. Natively it runs a
//! scripted pointer path through the engine and logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Evasive Control starting...");
    if let Err(e) = evasive_control::platform::mount_widget() {
        log::error!("Failed to mount widget: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Evasive Control (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to mount the widget");

    headless::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use evasive_control::engine::{Collaborators, ManualClock, Message, Rect, SeededRandom};
    use evasive_control::{Session, Tuning};
    use glam::Vec2;

    struct LogCollaborators;

    impl Collaborators for LogCollaborators {
        fn show_message(&mut self, message: &Message) {
            log::info!(
                "[toast {}ms, {}px] {}",
                message.duration_ms,
                message.font_px,
                message.text
            );
        }

        fn celebrate(&mut self) {
            log::info!("🎉 Celebration!");
        }
    }

    /// Sweep the pointer across a 400x300 arena for a few seconds
    pub fn run() {
        let clock = ManualClock::new(0.0);
        let viewport = Vec2::new(1280.0, 800.0);
        let mut session = Session::new(
            Tuning::default(),
            viewport,
            Box::new(clock.clone()),
            Box::new(SeededRandom::new(0x5eed)),
        );
        let mut out = LogCollaborators;

        let container = Rect::new(440.0, 250.0, 400.0, 300.0);
        let natural = Rect::centered(container.center(), Vec2::new(100.0, 40.0));

        // Pointer circles the arena center, 16 ms per event
        let steps = 240;
        for step in 0..steps {
            let t = step as f32 / steps as f32 * std::f32::consts::TAU * 2.0;
            let pointer = container.center() + Vec2::new(t.cos() * 180.0, t.sin() * 120.0);

            session.on_pointer_move(pointer);
            let element = natural.translated(session.dodge_offset());
            if let Some(dodge) = session.on_arena_pointer(pointer, Some(element), Some(container), &mut out)
            {
                log::info!(
                    "dodge #{:>3}: offset ({:>7.1}, {:>7.1})",
                    dodge.count,
                    dodge.offset.x,
                    dodge.offset.y
                );
            }

            clock.advance(16.0);
            if session.advance_headless() {
                let pushed = session
                    .ambient()
                    .iter()
                    .filter(|e| e.offset != Vec2::ZERO)
                    .count();
                log::debug!("repulsion tick: {pushed} elements pushed");
            }
        }

        session.accept(&mut out);
        log::info!(
            "Demo finished: {} dodges, final offset ({:.1}, {:.1})",
            session.dodge_count(),
            session.dodge_offset().x,
            session.dodge_offset().y
        );
        session.teardown();
    }
}
