//! Growable float stream backing the per-frame triangle list.
//!
//! Capacity follows a fixed schedule: nothing is allocated until the first
//! append, then 256 floats, doubling whenever the stream is full. The
//! schedule is tracked explicitly rather than left to `Vec`'s growth policy
//! so that the reserved size is predictable for the GPU upload path.

use crate::constants::{BUFFER_INITIAL_CAPACITY, FLOATS_PER_VERTEX};
use crate::vertex::Vertex;

#[derive(Clone, Debug, Default)]
pub struct DynamicBuffer {
    data: Vec<f32>,
    capacity: usize,
}

impl DynamicBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of floats currently stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reserved size in floats. Zero until the first append.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Whole vertices stored so far, viewed without copying.
    pub fn vertices(&self) -> &[Vertex] {
        let whole = self.data.len() / FLOATS_PER_VERTEX * FLOATS_PER_VERTEX;
        bytemuck::cast_slice(&self.data[..whole])
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / FLOATS_PER_VERTEX
    }

    /// Resets the length to zero; the reservation is kept.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn append(&mut self, value: f32) {
        self.grow_to_fit(self.data.len() + 1);
        self.data.push(value);
    }

    /// Appends every value in `values`; growth happens before any value is written.
    pub fn append_many(&mut self, values: &[f32]) {
        self.grow_to_fit(self.data.len() + values.len());
        self.data.extend_from_slice(values);
    }

    pub fn push_vertex(&mut self, vertex: Vertex) {
        self.append_many(bytemuck::cast_slice(std::slice::from_ref(&vertex)));
    }

    /// Releases the storage and returns to the never-allocated state.
    pub fn free(&mut self) {
        self.data = Vec::new();
        self.capacity = 0;
    }

    fn grow_to_fit(&mut self, required: usize) {
        if required <= self.capacity {
            return;
        }
        let mut next = if self.capacity == 0 {
            BUFFER_INITIAL_CAPACITY
        } else {
            self.capacity
        };
        while next < required {
            next *= 2;
        }
        self.data.reserve_exact(next - self.data.len());
        log::debug!("[buffer] grow {} -> {} floats", self.capacity, next);
        self.capacity = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_buffer_owns_nothing() {
        let b = DynamicBuffer::new();
        assert_eq!(b.len(), 0);
        assert_eq!(b.capacity(), 0);
        assert!(b.vertices().is_empty());
    }

    #[test]
    fn first_append_reserves_initial_capacity() {
        let mut b = DynamicBuffer::new();
        b.append(1.0);
        assert_eq!(b.capacity(), BUFFER_INITIAL_CAPACITY);
        assert_eq!(b.as_slice(), &[1.0]);
    }

    #[test]
    fn capacity_doubles_when_full() {
        let mut b = DynamicBuffer::new();
        for i in 0..BUFFER_INITIAL_CAPACITY {
            b.append(i as f32);
        }
        assert_eq!(b.capacity(), BUFFER_INITIAL_CAPACITY);
        b.append(-1.0);
        assert_eq!(b.capacity(), 2 * BUFFER_INITIAL_CAPACITY);
        assert_eq!(b.len(), BUFFER_INITIAL_CAPACITY + 1);
    }

    #[test]
    fn append_many_may_skip_doublings() {
        let mut b = DynamicBuffer::new();
        let values = vec![0.5; 1000];
        b.append_many(&values);
        assert_eq!(b.capacity(), 1024);
        assert_eq!(b.len(), 1000);
    }

    #[test]
    fn clear_keeps_capacity_and_free_drops_it() {
        let mut b = DynamicBuffer::new();
        b.append_many(&[1.0; 300]);
        b.clear();
        assert_eq!(b.len(), 0);
        assert_eq!(b.capacity(), 512);
        b.free();
        assert_eq!(b.capacity(), 0);
        b.append(2.0);
        assert_eq!(b.capacity(), BUFFER_INITIAL_CAPACITY);
    }

    #[test]
    fn pushed_vertex_is_six_interleaved_floats() {
        let mut b = DynamicBuffer::new();
        b.push_vertex(Vertex::new([0.25, -0.5], [0.1, 0.2, 0.3]));
        assert_eq!(b.as_slice(), &[0.25, -0.5, 0.1, 0.2, 0.3, 1.0]);
        assert_eq!(b.vertex_count(), 1);
        assert_eq!(b.vertices()[0].position, [0.25, -0.5]);
    }

    #[test]
    fn partial_vertex_is_not_exposed() {
        let mut b = DynamicBuffer::new();
        b.append_many(&[0.0; FLOATS_PER_VERTEX + 2]);
        assert_eq!(b.vertices().len(), 1);
    }
}
