//! User-facing tunables and their valid ranges.

use crate::chroma::SmootherPreset;
use crate::constants::*;
use crate::error::ParamsError;
use crate::shading::{FlatFill, Shading};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    pub radius: f32,
    pub scale: f32,
    pub resolution: u32,
    pub smooth: bool,
    pub border_color: [f32; 3],
    pub center_color: [f32; 3],
    pub background_color: [f32; 3],
    pub flat_fill: FlatFill,
    pub smoother: SmootherPreset,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            scale: DEFAULT_SCALE,
            resolution: DEFAULT_RESOLUTION,
            smooth: true,
            border_color: DEFAULT_BORDER_COLOR,
            center_color: DEFAULT_CENTER_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            flat_fill: FlatFill::White,
            smoother: SmootherPreset::EMPHATIC,
        }
    }
}

fn check_range(value: f32, (min, max): (f32, f32)) -> bool {
    (min..=max).contains(&value)
}

impl Params {
    pub fn validate(&self) -> Result<(), ParamsError> {
        let (rmin, rmax) = RESOLUTION_RANGE;
        if !(rmin..=rmax).contains(&self.resolution) {
            return Err(ParamsError::Resolution {
                value: self.resolution,
                min: rmin,
                max: rmax,
            });
        }
        if !check_range(self.radius, RADIUS_RANGE) {
            return Err(ParamsError::Radius {
                value: self.radius,
                min: RADIUS_RANGE.0,
                max: RADIUS_RANGE.1,
            });
        }
        if !check_range(self.scale, SCALE_RANGE) {
            return Err(ParamsError::Scale {
                value: self.scale,
                min: SCALE_RANGE.0,
                max: SCALE_RANGE.1,
            });
        }
        for (name, color) in [
            ("border", &self.border_color),
            ("center", &self.center_color),
            ("background", &self.background_color),
        ] {
            if let Some(&value) = color.iter().find(|c| !check_range(**c, (0.0, 1.0))) {
                return Err(ParamsError::Color { name, value });
            }
        }
        let s = &self.smoother;
        if !(s.speed > 0.0 && s.speed <= 1.0) {
            return Err(ParamsError::SmootherSpeed(s.speed));
        }
        if !(s.snap > 0.0) {
            return Err(ParamsError::SmootherSnap(s.snap));
        }
        Ok(())
    }

    pub fn shading(&self) -> Shading {
        Shading {
            smooth: self.smooth,
            border: self.border_color,
            center: self.center_color,
            flat: self.flat_fill,
        }
    }

    /// Resolution moved by `steps` slider notches, kept inside the valid range.
    pub fn stepped_resolution(&self, steps: i32) -> u32 {
        let (min, max) = RESOLUTION_RANGE;
        let next = self.resolution as i64 + steps as i64 * RESOLUTION_STEP as i64;
        next.clamp(min as i64, max as i64) as u32
    }
}
