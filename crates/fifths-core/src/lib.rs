pub mod buffer;
pub mod chroma;
pub mod constants;
pub mod error;
pub mod field;
pub mod lattice;
pub mod marching;
pub mod params;
pub mod shading;
pub mod vertex;
pub mod visualizer;

pub use buffer::*;
pub use chroma::*;
pub use constants::*;
pub use error::*;
pub use field::*;
pub use lattice::*;
pub use marching::{march, Cell, Node, Triangle, CASES};
pub use params::*;
pub use shading::*;
pub use vertex::*;
pub use visualizer::*;

// Shader bundled as a string constant
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
