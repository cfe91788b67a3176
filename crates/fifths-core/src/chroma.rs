//! Temporal stabilization of the raw chroma vector.
//!
//! Bands above a threshold are sharpened with a power curve, everything else
//! falls to a small floor value. The display vector then pursues that target
//! at a fixed rate and snaps onto it once it is close enough.

use crate::constants::{PITCH_CLASSES, SMOOTH_SNAP, SMOOTH_THRESHOLD};

pub type Chroma = [f32; PITCH_CLASSES];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmootherPreset {
    pub threshold: f32,
    pub gamma: f32,
    pub floor: f32,
    pub speed: f32, // fraction of the remaining distance covered per update
    pub snap: f32,
}

impl SmootherPreset {
    /// Strong contrast: only dominant pitch classes survive.
    pub const EMPHATIC: Self = Self {
        threshold: SMOOTH_THRESHOLD,
        gamma: 6.0,
        floor: 0.02,
        speed: 0.05,
        snap: SMOOTH_SNAP,
    };

    /// Passes strong bands through unchanged and lets the rest fade out.
    pub const LINEAR: Self = Self {
        threshold: SMOOTH_THRESHOLD,
        gamma: 1.0,
        floor: 0.0,
        speed: 0.3,
        snap: SMOOTH_SNAP,
    };

    /// The value a band settles on when `raw` is held constant.
    pub fn target(&self, raw: f32) -> f32 {
        // NaN fails the comparison and falls to the floor.
        if raw > self.threshold {
            // Overflow would turn the pursuit arithmetic into inf - inf.
            raw.powf(self.gamma).min(f32::MAX)
        } else {
            self.floor
        }
    }

    /// Upper bound on the updates needed to come within `snap` of a target
    /// starting `distance` away.
    pub fn settle_steps(&self, distance: f32) -> usize {
        let distance = distance.abs();
        if distance < self.snap {
            return 0;
        }
        if self.speed >= 1.0 {
            return 1;
        }
        // Decays geometrically until strictly inside snap, then one snapping update.
        let ratio = (self.snap / distance).ln() / (1.0 - self.speed).ln();
        ratio.floor() as usize + 2
    }
}

impl Default for SmootherPreset {
    fn default() -> Self {
        Self::EMPHATIC
    }
}

#[derive(Clone, Debug, Default)]
pub struct ChromaSmoother {
    pub preset: SmootherPreset,
    display: Chroma,
}

impl ChromaSmoother {
    pub fn new(preset: SmootherPreset) -> Self {
        Self {
            preset,
            display: [0.0; PITCH_CLASSES],
        }
    }

    pub fn display(&self) -> &Chroma {
        &self.display
    }

    pub fn reset(&mut self) {
        self.display = [0.0; PITCH_CLASSES];
    }

    /// Advances every band one step towards its target and returns the
    /// display vector.
    pub fn update(&mut self, raw: &Chroma) -> &Chroma {
        let p = self.preset;
        for (shown, &v) in self.display.iter_mut().zip(raw.iter()) {
            let target = p.target(v);
            let diff = target - *shown;
            if diff.abs() < p.snap {
                *shown = target;
            } else {
                *shown += p.speed * diff;
            }
        }
        &self.display
    }
}
