//! Metaball field over the lattice.
//!
//! Twelve control points sit on a circle in circle-of-fifths order (pitch
//! class `i` at angle `2π·7i/12`). Each contributes `weight² / distance²`
//! with `weight = scale * chroma[i]`; the sum is offset by `-1` so the
//! inside of the shape is positive.

use glam::Vec2;

use crate::chroma::Chroma;
use crate::constants::{DISTANCE_EPSILON, FIFTH_STEP, ISO_OFFSET, PITCH_CLASSES};
use crate::lattice::{grid_coord, Lattice};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub position: Vec2,
    pub weight: f32,
}

/// Unit direction of pitch class `pitch_class` on the circle of fifths.
pub fn fifths_direction(pitch_class: usize) -> Vec2 {
    let angle =
        std::f32::consts::TAU * FIFTH_STEP * pitch_class as f32 / PITCH_CLASSES as f32;
    Vec2::from_angle(angle)
}

#[derive(Clone, Debug)]
pub struct FieldEvaluator {
    directions: [Vec2; PITCH_CLASSES],
}

impl Default for FieldEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldEvaluator {
    pub fn new() -> Self {
        Self {
            directions: std::array::from_fn(fifths_direction),
        }
    }

    pub fn control_points(
        &self,
        chroma: &Chroma,
        radius: f32,
        scale: f32,
    ) -> [ControlPoint; PITCH_CLASSES] {
        std::array::from_fn(|i| ControlPoint {
            position: self.directions[i] * radius,
            weight: scale * chroma[i],
        })
    }

    /// Field value at `p` (already aspect-corrected) for a set of control points.
    #[inline]
    pub fn sample(points: &[ControlPoint; PITCH_CLASSES], p: Vec2) -> f32 {
        let mut v = 0.0;
        for c in points {
            let d2 = p.distance_squared(c.position).max(DISTANCE_EPSILON);
            v += c.weight * c.weight / d2;
        }
        v - ISO_OFFSET
    }

    /// Overwrites every lattice sample from the display chroma.
    pub fn evaluate(&self, lattice: &mut Lattice, chroma: &Chroma, radius: f32, scale: f32) {
        if !lattice.is_ready() {
            return;
        }
        let points = self.control_points(chroma, radius, scale);
        let (sx, sy) = lattice.aspect_scale();
        let (w, h) = (lattice.width(), lattice.height());
        for (j, row) in lattice.values_mut().chunks_exact_mut(w).enumerate() {
            let y = sy * grid_coord(j, h);
            for (i, slot) in row.iter_mut().enumerate() {
                let x = sx * grid_coord(i, w);
                *slot = Self::sample(&points, Vec2::new(x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_follow_circle_of_fifths() {
        // C at angle 0, G (7) one fifth on, F (5) one fifth back.
        let c = fifths_direction(0);
        let g = fifths_direction(7);
        let f = fifths_direction(5);
        assert!((c - Vec2::X).length() < 1e-6);
        let step = std::f32::consts::TAU * 7.0 * 7.0 / 12.0;
        assert!((g - Vec2::from_angle(step)).length() < 1e-5);
        assert!((f.x - g.x).abs() < 1e-5 && (f.y + g.y).abs() < 1e-5);
    }

    #[test]
    fn silent_chroma_is_entirely_outside() {
        let eval = FieldEvaluator::new();
        let mut l = Lattice::new(64, 64, 16);
        eval.evaluate(&mut l, &[0.0; 12], 0.8, 0.1);
        assert!(l.values().iter().all(|&v| v == -1.0));
    }

    #[test]
    fn single_band_forms_a_disc_around_its_point() {
        let eval = FieldEvaluator::new();
        let mut chroma = [0.0; 12];
        chroma[0] = 1.0;
        let points = eval.control_points(&chroma, 0.5, 0.2);
        // weight 0.2 => field crosses zero at distance 0.2
        let inside = FieldEvaluator::sample(&points, Vec2::new(0.6, 0.0));
        let outside = FieldEvaluator::sample(&points, Vec2::new(0.8, 0.0));
        assert!((inside - 3.0).abs() < 1e-4, "inside {inside}");
        assert!(outside < 0.0);
    }

    #[test]
    fn coincident_sample_stays_finite() {
        let eval = FieldEvaluator::new();
        let mut chroma = [0.0; 12];
        chroma[0] = 1.0;
        // radius 1 puts pitch class 0 exactly on the lattice corner column
        let mut l = Lattice::new(100, 100, 3);
        eval.evaluate(&mut l, &chroma, 1.0, 0.1);
        assert!(l.get(2, 1).is_finite());
        assert!(l.get(2, 1) > 0.0);
    }

    #[test]
    fn evaluate_uses_aspect_corrected_distance() {
        let eval = FieldEvaluator::new();
        let mut chroma = [0.0; 12];
        chroma[0] = 1.0;
        let mut l = Lattice::new(200, 100, 9);
        assert_eq!((l.width(), l.height()), (9, 4));
        eval.evaluate(&mut l, &chroma, 0.5, 0.1);
        let points = eval.control_points(&chroma, 0.5, 0.1);
        let (sx, sy) = l.aspect_scale();
        let p = Vec2::new(sx * l.x_coord(6), sy * l.y_coord(1));
        assert_eq!(l.get(6, 1), FieldEvaluator::sample(&points, p));
    }
}
