use crate::constants::{DEFAULT_BORDER_COLOR, DEFAULT_CENTER_COLOR, SMOOTH_GAMMA};

/// Uniform color used when smooth shading is off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlatFill {
    #[default]
    White,
    /// Halfway between the border and center colors.
    Midpoint,
}

/// Maps a vertex's field intensity to its color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    pub smooth: bool,
    pub border: [f32; 3],
    pub center: [f32; 3],
    pub flat: FlatFill,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            smooth: true,
            border: DEFAULT_BORDER_COLOR,
            center: DEFAULT_CENTER_COLOR,
            flat: FlatFill::White,
        }
    }
}

impl Shading {
    /// Color for a vertex of the given intensity. Intensity is clamped to
    /// [0, 1]; the isoline (0) takes the border color.
    pub fn color(&self, intensity: f32) -> [f32; 3] {
        if !self.smooth {
            return self.flat_color();
        }
        let t = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0).powf(SMOOTH_GAMMA)
        };
        std::array::from_fn(|k| self.border[k] + t * (self.center[k] - self.border[k]))
    }

    pub fn flat_color(&self) -> [f32; 3] {
        match self.flat {
            FlatFill::White => [1.0; 3],
            FlatFill::Midpoint => std::array::from_fn(|k| 0.5 * (self.border[k] + self.center[k])),
        }
    }
}
