//! Ambient repulsion field
//!
//! Decorative elements are pushed away from the pointer with a strength that
//! decays linearly to zero at the field radius. Recomputed on a timer rather
//! than per event; elements never interact with each other.

use glam::Vec2;

use super::messages::RandomSource;
use crate::{distance_and_angle, polar_to_cartesian};

/// One decorative floating element
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientElement {
    pub id: u32,
    /// Layout center before any push
    pub base_center: Vec2,
    /// Push offset from the most recent tick
    pub offset: Vec2,
}

impl AmbientElement {
    pub fn new(id: u32, base_center: Vec2) -> Self {
        Self {
            id,
            base_center,
            offset: Vec2::ZERO,
        }
    }

    /// On-screen center including the current push
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.base_center + self.offset
    }
}

/// Push offset for an element centered at `center`
pub fn repulsion_offset(pointer: Vec2, center: Vec2, radius: f32) -> Vec2 {
    let (distance, theta) = distance_and_angle(pointer, center);
    // Also rejects a NaN distance from a non-finite pointer
    if !(distance < radius) {
        return Vec2::ZERO;
    }
    let push_strength = (radius - distance) / 2.0;
    polar_to_cartesian(push_strength, theta)
}

/// The set of ambient elements and their current offsets
#[derive(Debug, Clone)]
pub struct RepulsionField {
    radius: f32,
    elements: Vec<AmbientElement>,
}

impl RepulsionField {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            elements: Vec::new(),
        }
    }

    /// Scatter `count` elements uniformly over the viewport.
    ///
    /// The base centers are only read by [`RepulsionField::tick_headless`].
    /// In the browser the CSS places the elements and the tick resolver reads
    /// their real on-screen centers, so these positions do not affect it.
    pub fn scattered(
        radius: f32,
        count: usize,
        viewport: Vec2,
        random: &mut dyn RandomSource,
    ) -> Self {
        let mut field = Self::new(radius);
        for id in 0..count as u32 {
            let anchor = Vec2::new(random.next_unit(), random.next_unit());
            field.spawn(id, anchor * viewport);
        }
        field
    }

    pub fn spawn(&mut self, id: u32, base_center: Vec2) {
        self.elements.push(AmbientElement::new(id, base_center));
        self.elements.sort_by_key(|e| e.id);
    }

    pub fn elements(&self) -> &[AmbientElement] {
        &self.elements
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Recompute every offset.
    ///
    /// `resolve` returns the element's current on-screen center, or `None`
    /// when it cannot be found this tick; such elements keep their previous
    /// offset. Returns how many elements were updated.
    pub fn tick<F>(&mut self, pointer: Vec2, mut resolve: F) -> usize
    where
        F: FnMut(&AmbientElement) -> Option<Vec2>,
    {
        let mut updated = 0;
        for element in &mut self.elements {
            let Some(center) = resolve(element) else {
                continue;
            };
            element.offset = repulsion_offset(pointer, center, self.radius);
            updated += 1;
        }
        updated
    }

    /// Tick using each element's own tracked center
    pub fn tick_headless(&mut self, pointer: Vec2) -> usize {
        self.tick(pointer, |e| Some(e.center()))
    }

    /// Zero every offset (field switched off)
    pub fn relax(&mut self) {
        for element in &mut self.elements {
            element.offset = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::messages::SeededRandom;
    use proptest::prelude::*;

    #[test]
    fn test_push_inside_radius() {
        // Element 150px to the right of the pointer
        let offset = repulsion_offset(Vec2::new(100.0, 100.0), Vec2::new(250.0, 100.0), 200.0);
        assert!((offset.length() - 25.0).abs() < 1e-4);
        assert!((offset.x - 25.0).abs() < 1e-4);
        assert!(offset.y.abs() < 1e-4);
    }

    #[test]
    fn test_no_push_outside_radius() {
        let pointer = Vec2::new(0.0, 0.0);
        assert_eq!(repulsion_offset(pointer, Vec2::new(250.0, 0.0), 200.0), Vec2::ZERO);
        assert_eq!(repulsion_offset(pointer, Vec2::new(200.0, 0.0), 200.0), Vec2::ZERO);
    }

    #[test]
    fn test_non_finite_pointer_pushes_nothing() {
        let center = Vec2::new(10.0, 0.0);
        assert_eq!(repulsion_offset(Vec2::new(f32::NAN, 0.0), center, 200.0), Vec2::ZERO);
        assert_eq!(repulsion_offset(Vec2::new(0.0, f32::INFINITY), center, 200.0), Vec2::ZERO);

        let mut field = RepulsionField::new(200.0);
        field.spawn(0, center);
        field.tick_headless(Vec2::new(f32::NAN, f32::NAN));
        assert_eq!(field.elements()[0].offset, Vec2::ZERO);
    }

    #[test]
    fn test_push_points_away_from_pointer() {
        let pointer = Vec2::new(50.0, 50.0);
        let center = Vec2::new(20.0, 10.0);
        let offset = repulsion_offset(pointer, center, 200.0);
        assert!(offset.dot(center - pointer) > 0.0);
    }

    #[test]
    fn test_unresolved_element_keeps_offset() {
        let mut field = RepulsionField::new(200.0);
        field.spawn(0, Vec2::new(150.0, 0.0));
        field.spawn(1, Vec2::new(0.0, 100.0));

        assert_eq!(field.tick_headless(Vec2::ZERO), 2);
        let kept = field.elements()[1].offset;
        assert!(kept.length() > 0.0);

        // Element 1 disappears from the page; element 0 is still tracked
        let updated = field.tick(Vec2::new(1000.0, 1000.0), |e| {
            (e.id == 0).then(|| e.center())
        });
        assert_eq!(updated, 1);
        assert_eq!(field.elements()[0].offset, Vec2::ZERO);
        assert_eq!(field.elements()[1].offset, kept);
    }

    #[test]
    fn test_elements_are_independent() {
        let mut together = RepulsionField::new(200.0);
        together.spawn(0, Vec2::new(50.0, 0.0));
        together.spawn(1, Vec2::new(52.0, 0.0));
        together.tick_headless(Vec2::ZERO);

        let mut alone = RepulsionField::new(200.0);
        alone.spawn(0, Vec2::new(50.0, 0.0));
        alone.tick_headless(Vec2::ZERO);

        assert_eq!(together.elements()[0].offset, alone.elements()[0].offset);
    }

    #[test]
    fn test_scatter_within_viewport() {
        let mut random = SeededRandom::new(7);
        let viewport = Vec2::new(1280.0, 720.0);
        let field = RepulsionField::scattered(200.0, 13, viewport, &mut random);
        assert_eq!(field.elements().len(), 13);
        for (i, e) in field.elements().iter().enumerate() {
            assert_eq!(e.id, i as u32);
            assert!(e.base_center.cmpge(Vec2::ZERO).all());
            assert!(e.base_center.cmplt(viewport).all());
            assert_eq!(e.offset, Vec2::ZERO);
        }
    }

    #[test]
    fn test_tick_uses_resolved_center_over_base() {
        let mut random = SeededRandom::new(3);
        let mut field = RepulsionField::scattered(200.0, 1, Vec2::new(1280.0, 720.0), &mut random);
        // Laid out somewhere else on the page than the scattered guess
        let on_screen = Vec2::new(5000.0, 5000.0);
        field.tick(on_screen + Vec2::new(-150.0, 0.0), |_| Some(on_screen));
        assert!((field.elements()[0].offset.x - 25.0).abs() < 1e-3);
        assert!(field.elements()[0].offset.y.abs() < 1e-3);
    }

    #[test]
    fn test_relax() {
        let mut field = RepulsionField::new(200.0);
        field.spawn(0, Vec2::new(10.0, 0.0));
        field.tick_headless(Vec2::ZERO);
        field.relax();
        assert_eq!(field.elements()[0].offset, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_magnitude_decreases_with_distance(
            angle in 0.0f32..std::f32::consts::TAU,
            d1 in 0.0f32..199.0,
            gap in 0.5f32..100.0,
        ) {
            let d2 = d1 + gap;
            let dir = Vec2::new(angle.cos(), angle.sin());
            let near = repulsion_offset(Vec2::ZERO, dir * d1, 200.0).length();
            let far = repulsion_offset(Vec2::ZERO, dir * d2, 200.0).length();
            prop_assert!(far < near);
            if d2 >= 200.5 {
                prop_assert_eq!(far, 0.0);
            }
        }
    }
}
