//! Regular grid of field samples over the normalized [-1, 1]² render square.
//!
//! Samples are stored row-major (`x + width * y`). Grid index `i` maps to
//! `2 * i / (width - 1) - 1`, so the first and last columns sit exactly on
//! the square's edges.

#[derive(Clone, Debug, Default)]
pub struct Lattice {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

/// Grid dimensions for a window and horizontal resolution, or `None` when the
/// window has no area. Both sides are at least 2 so there is always one cell.
pub fn lattice_dims(window_w: u32, window_h: u32, resolution: u32) -> Option<(usize, usize)> {
    if window_w == 0 || window_h == 0 {
        return None;
    }
    let width = resolution.max(2) as u64;
    let height = width * window_h as u64 / window_w as u64;
    Some((width as usize, height.max(2) as usize))
}

/// Maps index `i` of an `n`-sample axis onto [-1, 1].
#[inline]
pub fn grid_coord(i: usize, n: usize) -> f32 {
    2.0 * (i as f32 / (n - 1) as f32) - 1.0
}

impl Lattice {
    pub fn new(window_w: u32, window_h: u32, resolution: u32) -> Self {
        let mut lattice = Self::default();
        lattice.resize(window_w, window_h, resolution);
        lattice
    }

    /// Builds a lattice from explicit samples (row-major).
    ///
    /// Returns `None` unless both sides are at least 2 and `values` holds
    /// exactly `width * height` samples.
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Option<Self> {
        if width < 2 || height < 2 || values.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            values,
        })
    }

    /// Resizes for a window and resolution. Returns `true` when the
    /// dimensions changed; unchanged arguments leave the storage untouched.
    /// A zero-area window is ignored.
    pub fn resize(&mut self, window_w: u32, window_h: u32, resolution: u32) -> bool {
        let Some((width, height)) = lattice_dims(window_w, window_h, resolution) else {
            log::warn!("[lattice] ignoring resize to empty window {window_w}x{window_h}");
            return false;
        };
        if width == self.width && height == self.height {
            return false;
        }
        log::debug!(
            "[lattice] {}x{} -> {}x{} (window {}x{}, resolution {})",
            self.width,
            self.height,
            width,
            height,
            window_w,
            window_h,
            resolution
        );
        self.width = width;
        self.height = height;
        self.values.clear();
        self.values.resize(width * height, 0.0);
        true
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True once the lattice has at least one cell.
    pub fn is_ready(&self) -> bool {
        self.width >= 2 && self.height >= 2
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x + self.width * y
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let i = self.index(x, y);
        self.values[i] = value;
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    #[inline]
    pub fn x_coord(&self, i: usize) -> f32 {
        grid_coord(i, self.width)
    }

    #[inline]
    pub fn y_coord(&self, j: usize) -> f32 {
        grid_coord(j, self.height)
    }

    /// Per-axis stretch that makes distances isotropic on a non-square grid:
    /// the shorter side spans [-1, 1], the longer one proportionally more.
    pub fn aspect_scale(&self) -> (f32, f32) {
        let min = self.width.min(self.height).max(1) as f32;
        (self.width as f32 / min, self.height as f32 / min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_follows_window_aspect() {
        assert_eq!(lattice_dims(800, 600, 128), Some((128, 96)));
        assert_eq!(lattice_dims(600, 800, 128), Some((128, 170)));
        assert_eq!(lattice_dims(1920, 1080, 100), Some((100, 56)));
    }

    #[test]
    fn dims_never_drop_below_one_cell() {
        assert_eq!(lattice_dims(4000, 10, 16), Some((16, 2)));
        assert_eq!(lattice_dims(100, 100, 0), Some((2, 2)));
        assert_eq!(lattice_dims(0, 100, 64), None);
        assert_eq!(lattice_dims(100, 0, 64), None);
    }

    #[test]
    fn resize_reports_changes_only() {
        let mut l = Lattice::new(800, 600, 64);
        assert_eq!((l.width(), l.height()), (64, 48));
        assert_eq!(l.values().len(), 64 * 48);
        assert!(!l.resize(800, 600, 64));
        assert!(l.resize(800, 800, 64));
        assert_eq!(l.values().len(), 64 * 64);
        assert!(!l.resize(0, 0, 64));
        assert_eq!((l.width(), l.height()), (64, 64));
    }

    #[test]
    fn coords_span_the_render_square() {
        let l = Lattice::new(100, 100, 5);
        assert_eq!(l.x_coord(0), -1.0);
        assert_eq!(l.x_coord(4), 1.0);
        assert_eq!(l.x_coord(2), 0.0);
        assert_eq!(l.y_coord(0), -1.0);
        assert_eq!(l.y_coord(4), 1.0);
    }

    #[test]
    fn storage_is_row_major() {
        let mut l = Lattice::from_values(3, 2, vec![0.0; 6]).unwrap();
        l.set(2, 1, 7.0);
        assert_eq!(l.values()[5], 7.0);
        assert_eq!(l.get(2, 1), 7.0);
    }

    #[test]
    fn from_values_rejects_bad_shapes() {
        assert!(Lattice::from_values(1, 4, vec![0.0; 4]).is_none());
        assert!(Lattice::from_values(2, 2, vec![0.0; 3]).is_none());
    }

    #[test]
    fn aspect_scale_stretches_long_axis() {
        let l = Lattice::new(200, 100, 64);
        let (sx, sy) = l.aspect_scale();
        assert!((sx - 2.0).abs() < 1e-6);
        assert_eq!(sy, 1.0);
    }
}
