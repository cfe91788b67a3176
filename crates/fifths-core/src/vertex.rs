use crate::constants::VERTEX_ALPHA;

/// One entry of the interleaved triangle stream uploaded to the renderer.
///
/// Layout matches the float stream exactly: `x, y, r, g, b, a` (24 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 2], rgb: [f32; 3]) -> Self {
        Self {
            position,
            color: [rgb[0], rgb[1], rgb[2], VERTEX_ALPHA],
        }
    }
}
