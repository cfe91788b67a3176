// Shared tuning constants for the field, contouring and smoothing stages.

// Layout
pub const PITCH_CLASSES: usize = 12;
pub const FIFTH_STEP: f32 = 7.0; // semitones per step around the circle of fifths

// Parameter defaults and slider ranges
pub const DEFAULT_RADIUS: f32 = 0.8; // control-point distance from the origin
pub const RADIUS_RANGE: (f32, f32) = (0.1, 1.0);
pub const DEFAULT_SCALE: f32 = 0.1; // chroma -> field weight multiplier
pub const SCALE_RANGE: (f32, f32) = (0.01, 0.5);
pub const DEFAULT_RESOLUTION: u32 = 128; // horizontal lattice samples
pub const RESOLUTION_RANGE: (u32, u32) = (16, 512);
pub const RESOLUTION_STEP: u32 = 16;

// Default palette
pub const DEFAULT_BORDER_COLOR: [f32; 3] = [0.10, 0.20, 0.60]; // deep blue rim
pub const DEFAULT_CENTER_COLOR: [f32; 3] = [1.00, 0.85, 0.40]; // warm core
pub const DEFAULT_BACKGROUND_COLOR: [f32; 3] = [0.02, 0.02, 0.04];

// Field
pub const ISO_OFFSET: f32 = 1.0; // subtracted so that the metaball interior is > 0
pub const DISTANCE_EPSILON: f32 = 1e-6; // floor on squared distance to a control point

// Shading
pub const SMOOTH_GAMMA: f32 = 0.25; // intensity exponent for the border -> center blend
pub const VERTEX_ALPHA: f32 = 1.0;

// Vertex stream
pub const FLOATS_PER_VERTEX: usize = 6; // x, y, r, g, b, a
pub const BUFFER_INITIAL_CAPACITY: usize = 256;

// Smoothing
pub const SMOOTH_THRESHOLD: f32 = 0.8; // raw bands at or below this fall to the floor value
pub const SMOOTH_SNAP: f32 = 0.001; // distance at which the display value jumps to target
