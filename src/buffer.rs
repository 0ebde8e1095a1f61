//! Fixed-capacity attribute buffers.
//!
//! An [`AttribBuffer`] owns a contiguous scalar array sized exactly at
//! construction, tagged with the number of components per element (3 for
//! positions and normals, 2 for texcoords, 4 for colors). A write cursor
//! supports sequential appends during generation and can be repositioned
//! to replay a write pass; every append is capacity-checked.

use crate::error::MeshError;

/// A fixed-capacity scalar buffer with component-count metadata.
///
/// Storage never grows: `new` allocates `num_components * num_elements`
/// zero-initialized scalars and [`push`](Self::push) /
/// [`push_slice`](Self::push_slice) fill them in order. Overrunning the
/// allocation is an error, not a wrap-around.
#[derive(Debug, Clone)]
pub struct AttribBuffer<T> {
    data: Vec<T>,
    num_components: usize,
    cursor: usize,
}

impl<T: Copy + Default> AttribBuffer<T> {
    /// Allocate a buffer for `num_elements` elements of `num_components`
    /// scalars each.
    pub fn new(num_components: usize, num_elements: usize) -> Self {
        Self {
            data: vec![T::default(); num_components * num_elements],
            num_components,
            cursor: 0,
        }
    }

    /// Append one scalar at the cursor.
    pub fn push(&mut self, value: T) -> Result<(), MeshError> {
        if self.cursor >= self.data.len() {
            return Err(MeshError::CapacityExceeded {
                capacity: self.data.len(),
                attempted: self.cursor + 1,
            });
        }
        self.data[self.cursor] = value;
        self.cursor += 1;
        Ok(())
    }

    /// Append a flattened group of scalars at the cursor.
    pub fn push_slice(&mut self, values: &[T]) -> Result<(), MeshError> {
        let end = self.cursor + values.len();
        if end > self.data.len() {
            return Err(MeshError::CapacityExceeded {
                capacity: self.data.len(),
                attempted: end,
            });
        }
        self.data[self.cursor..end].copy_from_slice(values);
        self.cursor = end;
        Ok(())
    }

    /// Move the cursor back to the start for a rewrite pass. Contents are
    /// kept.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to an arbitrary scalar offset. An out-of-range
    /// offset surfaces as a capacity error on the next push.
    pub fn reset_to(&mut self, index: usize) {
        self.cursor = index;
    }

    /// Current cursor position, in scalars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Scalars per element.
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Number of elements the buffer holds.
    pub fn num_elements(&self) -> usize {
        if self.num_components == 0 {
            0
        } else {
            self.data.len() / self.num_components
        }
    }

    /// Total scalar capacity.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer has zero capacity.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View of the whole allocation, unwritten slots included.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable view of the whole allocation.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: bytemuck::Pod> AttribBuffer<T> {
    /// Raw byte view, for handing the buffer to an upload layer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}
