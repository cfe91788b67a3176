//! Marching-squares triangulation of the positive region of the lattice.
//!
//! Each cell is classified by the signs of its four corners:
//!
//! ```text
//!   C01 ---- Top ---- C11        bit 0: C00 (x,   y  ) > 0
//!    |                  |        bit 1: C10 (x+1, y  ) > 0
//!   Left              Right      bit 2: C01 (x,   y+1) > 0
//!    |                  |        bit 3: C11 (x+1, y+1) > 0
//!   C00 --- Bottom --- C10
//! ```
//!
//! and the resulting mask selects a fixed list of triangles from [`CASES`].
//! Edge points are linearly interpolated to the zero crossing; adjacent cells
//! compute a shared edge from the same two samples in the same order, so the
//! mesh has no cracks.
//!
//! Both saddles (`0b0110` and `0b1001`) join their two inside corners into one
//! hexagon of four triangles, so blobs meeting diagonally stay connected.
//! Every other mask `m` and its complement `15 - m` tile the cell exactly.

use crate::buffer::DynamicBuffer;
use crate::lattice::Lattice;
use crate::shading::Shading;
use crate::vertex::Vertex;

/// A triangle vertex: a cell corner or the zero crossing on a cell edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    C00,
    C10,
    C01,
    C11,
    /// C00–C10
    Bottom,
    /// C10–C11
    Right,
    /// C01–C11
    Top,
    /// C00–C01
    Left,
}

impl Node {
    pub fn is_corner(self) -> bool {
        matches!(self, Node::C00 | Node::C10 | Node::C01 | Node::C11)
    }
}

pub type Triangle = [Node; 3];

use Node::*;

/// Triangles per mask, in emission order and winding.
pub const CASES: [&[Triangle]; 16] = [
    // 0b0000
    &[],
    // 0b0001
    &[[Bottom, Left, C00]],
    // 0b0010
    &[[Bottom, Right, C10]],
    // 0b0011
    &[[C00, C10, Left], [C10, Left, Right]],
    // 0b0100
    &[[Left, Top, C01]],
    // 0b0101
    &[[C00, Bottom, C01], [Bottom, C01, Top]],
    // 0b0110: joined hexagon
    &[
        [Bottom, Left, C10],
        [Left, C10, C01],
        [C01, C10, Right],
        [C01, Right, Top],
    ],
    // 0b0111
    &[[C00, C10, C01], [C01, Top, C10], [Top, C10, Right]],
    // 0b1000
    &[[Top, Right, C11]],
    // 0b1001: joined hexagon
    &[
        [C00, Bottom, Right],
        [C00, Right, C11],
        [C00, C11, Left],
        [Left, C11, Top],
    ],
    // 0b1010
    &[[Bottom, C10, Top], [C10, Top, C11]],
    // 0b1011
    &[[C00, C10, C11], [C00, Left, C11], [Left, C11, Top]],
    // 0b1100
    &[[Left, C01, Right], [C01, Right, C11]],
    // 0b1101
    &[[C00, C01, C11], [C00, Bottom, C11], [Bottom, Right, C11]],
    // 0b1110
    &[[C10, C11, C01], [Bottom, C10, C01], [Bottom, C01, Left]],
    // 0b1111
    &[[C00, C10, C01], [C10, C01, C11]],
];

/// Position of the zero crossing between `a` (value `fa`) and `b` (value `fb`).
///
/// Falls back to the midpoint if the crossing is not finite and never leaves
/// the segment.
#[inline]
pub fn interp(a: f32, b: f32, fa: f32, fb: f32) -> f32 {
    let p = a + fa * (b - a) / (fa - fb);
    if p.is_finite() {
        p.clamp(a.min(b), a.max(b))
    } else {
        0.5 * (a + b)
    }
}

/// One lattice cell: its bounds and corner samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub v00: f32,
    pub v10: f32,
    pub v01: f32,
    pub v11: f32,
}

impl Cell {
    pub fn from_lattice(lattice: &Lattice, x: usize, y: usize) -> Self {
        Self {
            x0: lattice.x_coord(x),
            y0: lattice.y_coord(y),
            x1: lattice.x_coord(x + 1),
            y1: lattice.y_coord(y + 1),
            v00: lattice.get(x, y),
            v10: lattice.get(x + 1, y),
            v01: lattice.get(x, y + 1),
            v11: lattice.get(x + 1, y + 1),
        }
    }

    pub fn mask(&self) -> usize {
        (self.v00 > 0.0) as usize
            | ((self.v10 > 0.0) as usize) << 1
            | ((self.v01 > 0.0) as usize) << 2
            | ((self.v11 > 0.0) as usize) << 3
    }

    /// Position of a node and the intensity it carries (corner value clamped
    /// to [0, 1], zero on edges).
    pub fn resolve(&self, node: Node) -> ([f32; 2], f32) {
        let (position, value) = match node {
            C00 => ([self.x0, self.y0], self.v00),
            C10 => ([self.x1, self.y0], self.v10),
            C01 => ([self.x0, self.y1], self.v01),
            C11 => ([self.x1, self.y1], self.v11),
            Bottom => ([interp(self.x0, self.x1, self.v00, self.v10), self.y0], 0.0),
            Right => ([self.x1, interp(self.y0, self.y1, self.v10, self.v11)], 0.0),
            Top => ([interp(self.x0, self.x1, self.v01, self.v11), self.y1], 0.0),
            Left => ([self.x0, interp(self.y0, self.y1, self.v00, self.v01)], 0.0),
        };
        let intensity = if node.is_corner() && !value.is_nan() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
        (position, intensity)
    }

    pub fn triangles(&self) -> &'static [Triangle] {
        CASES[self.mask()]
    }

    /// Appends this cell's triangles to `out` and returns how many were added.
    pub fn emit(&self, shading: &Shading, out: &mut DynamicBuffer) -> usize {
        let tris = self.triangles();
        for tri in tris {
            for &node in tri {
                let (position, intensity) = self.resolve(node);
                out.push_vertex(Vertex::new(position, shading.color(intensity)));
            }
        }
        tris.len()
    }
}

/// Clears `out` and fills it with the triangulated positive region of
/// `lattice`. Returns the triangle count.
pub fn march(lattice: &Lattice, shading: &Shading, out: &mut DynamicBuffer) -> usize {
    out.clear();
    if !lattice.is_ready() {
        return 0;
    }
    let mut triangles = 0;
    for y in 0..lattice.height() - 1 {
        for x in 0..lattice.width() - 1 {
            triangles += Cell::from_lattice(lattice, x, y).emit(shading, out);
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::Node::*;
    use super::*;

    fn unit_cell(v: [f32; 4]) -> Cell {
        Cell {
            x0: 0.0,
            y0: 0.0,
            x1: 1.0,
            y1: 1.0,
            v00: v[0],
            v10: v[1],
            v01: v[2],
            v11: v[3],
        }
    }

    #[test]
    fn mask_bits_follow_corner_order() {
        assert_eq!(unit_cell([1.0, -1.0, -1.0, -1.0]).mask(), 0b0001);
        assert_eq!(unit_cell([-1.0, 1.0, -1.0, -1.0]).mask(), 0b0010);
        assert_eq!(unit_cell([-1.0, -1.0, 1.0, -1.0]).mask(), 0b0100);
        assert_eq!(unit_cell([-1.0, -1.0, -1.0, 1.0]).mask(), 0b1000);
        // zero counts as outside
        assert_eq!(unit_cell([0.0, 0.0, 0.0, 0.0]).mask(), 0);
    }

    #[test]
    fn every_triangle_uses_only_active_edges() {
        // An edge node is only meaningful where its endpoints differ in sign.
        for (mask, tris) in CASES.iter().enumerate() {
            let on = |bit: usize| mask & (1 << bit) != 0;
            for tri in tris.iter() {
                for &n in tri {
                    let ok = match n {
                        Bottom => on(0) != on(1),
                        Right => on(1) != on(3),
                        Top => on(2) != on(3),
                        Left => on(0) != on(2),
                        C00 => on(0),
                        C10 => on(1),
                        C01 => on(2),
                        C11 => on(3),
                    };
                    assert!(ok, "mask {mask:#06b} uses {n:?}");
                }
            }
        }
    }

    #[test]
    fn interp_finds_zero_crossing() {
        assert!((interp(0.0, 1.0, 1.0, -1.0) - 0.5).abs() < 1e-6);
        assert!((interp(0.0, 1.0, 3.0, -1.0) - 0.75).abs() < 1e-6);
        assert!((interp(-1.0, 1.0, -1.0, 3.0) - -0.5).abs() < 1e-6);
    }

    #[test]
    fn interp_guards_degenerate_denominator() {
        assert_eq!(interp(0.0, 1.0, 2.0, 2.0), 0.5);
        assert_eq!(interp(0.0, 1.0, f32::INFINITY, -1.0), 0.5);
        let p = interp(0.0, 1.0, 1e-30, -1e-38);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn corner_intensity_is_clamped() {
        let c = unit_cell([5.0, 0.25, -1.0, f32::NAN]);
        assert_eq!(c.resolve(C00).1, 1.0);
        assert_eq!(c.resolve(C10).1, 0.25);
        assert_eq!(c.resolve(C01).1, 0.0);
        assert_eq!(c.resolve(C11).1, 0.0);
        assert_eq!(c.resolve(Bottom).1, 0.0);
    }

    #[test]
    fn only_corners_carry_intensity() {
        let c = unit_cell([0.6, 0.6, 0.6, 0.6]);
        for node in [C00, C10, C01, C11, Bottom, Right, Top, Left] {
            let expected = if node.is_corner() { 0.6 } else { 0.0 };
            assert_eq!(c.resolve(node).1, expected, "{node:?}");
        }
        assert_eq!(
            [C00, C10, C01, C11, Bottom].map(Node::is_corner),
            [true, true, true, true, false]
        );
    }

    #[test]
    fn march_on_empty_lattice_emits_nothing() {
        let mut out = DynamicBuffer::new();
        out.append(1.0);
        let n = march(&Lattice::default(), &Shading::default(), &mut out);
        assert_eq!(n, 0);
        assert!(out.is_empty());
    }
}
