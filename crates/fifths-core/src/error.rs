use thiserror::Error;

/// Rejected parameter values. The pipeline itself has no failure modes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("resolution {value} outside {min}..={max}")]
    Resolution { value: u32, min: u32, max: u32 },
    #[error("radius {value} outside {min}..={max}")]
    Radius { value: f32, min: f32, max: f32 },
    #[error("scale {value} outside {min}..={max}")]
    Scale { value: f32, min: f32, max: f32 },
    #[error("{name} color channel {value} outside 0..=1")]
    Color { name: &'static str, value: f32 },
    #[error("smoother speed {0} must be in (0, 1]")]
    SmootherSpeed(f32),
    #[error("smoother snap {0} must be positive")]
    SmootherSnap(f32),
}
