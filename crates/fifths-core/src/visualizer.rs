//! Per-frame driver tying the stages together.
//!
//! A `Visualizer` owns all mutable state (smoothed chroma, lattice, vertex
//! stream) so several can run side by side. `frame` runs the whole pipeline
//! synchronously: smooth, resize if needed, evaluate, contour.

use crate::buffer::DynamicBuffer;
use crate::chroma::{Chroma, ChromaSmoother};
use crate::error::ParamsError;
use crate::field::FieldEvaluator;
use crate::lattice::Lattice;
use crate::marching::march;
use crate::params::Params;
use crate::vertex::Vertex;

pub struct Visualizer {
    params: Params,
    smoother: ChromaSmoother,
    evaluator: FieldEvaluator,
    lattice: Lattice,
    buffer: DynamicBuffer,
    window: (u32, u32),
    resize_pending: bool,
    triangles: usize,
}

impl Visualizer {
    pub fn new(params: Params, window: (u32, u32)) -> Result<Self, ParamsError> {
        params.validate()?;
        let lattice = Lattice::new(window.0, window.1, params.resolution);
        log::info!(
            "[visualizer] lattice {}x{} for window {}x{}",
            lattice.width(),
            lattice.height(),
            window.0,
            window.1
        );
        Ok(Self {
            smoother: ChromaSmoother::new(params.smoother),
            evaluator: FieldEvaluator::new(),
            lattice,
            buffer: DynamicBuffer::new(),
            window,
            resize_pending: false,
            triangles: 0,
            params,
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Replaces the parameters. A new resolution takes effect at the start
    /// of the next frame; invalid parameters are refused and the current
    /// ones kept.
    pub fn set_params(&mut self, params: Params) -> Result<(), ParamsError> {
        if let Err(e) = params.validate() {
            log::warn!("[visualizer] rejected params: {e}");
            return Err(e);
        }
        if params.resolution != self.params.resolution {
            self.resize_pending = true;
        }
        self.smoother.preset = params.smoother;
        self.params = params;
        Ok(())
    }

    /// Runs one frame and returns the interleaved `x, y, r, g, b, a` stream.
    pub fn frame(&mut self, raw: &Chroma, window: (u32, u32)) -> &[f32] {
        self.smoother.update(raw);

        if window != self.window || self.resize_pending {
            self.window = window;
            self.resize_pending = false;
            self.lattice.resize(window.0, window.1, self.params.resolution);
        }

        if window.0 == 0 || window.1 == 0 || !self.lattice.is_ready() {
            self.buffer.clear();
            self.triangles = 0;
            return self.buffer.as_slice();
        }

        self.evaluator.evaluate(
            &mut self.lattice,
            self.smoother.display(),
            self.params.radius,
            self.params.scale,
        );
        self.triangles = march(&self.lattice, &self.params.shading(), &mut self.buffer);
        self.buffer.as_slice()
    }

    pub fn vertices(&self) -> &[Vertex] {
        self.buffer.vertices()
    }

    pub fn buffer(&self) -> &DynamicBuffer {
        &self.buffer
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles
    }

    pub fn display_chroma(&self) -> &Chroma {
        self.smoother.display()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
}
