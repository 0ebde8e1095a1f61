//! Buffer sets: named attribute buffers plus an optional index buffer.
//!
//! A [`MeshBuffers`] value is one mesh ready for upload: a map from
//! attribute name to a role-tagged buffer, and a u16 triangle-list index
//! buffer when the mesh shares vertices. Index data lives in its own
//! field, outside the attribute map, so geometric transforms can never
//! touch it by accident.

use std::collections::BTreeMap;

use crate::buffer::AttribBuffer;
use crate::error::MeshError;

/// Transform role of an attribute, fixed at insertion time.
///
/// Reorientation dispatches on this tag; an attribute's name is purely
/// descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeRole {
    /// Transformed as a point (translation applies).
    Position,
    /// Transformed as a direction (translation ignored). Tangents and
    /// binormals belong here.
    Direction,
    /// Transformed by the transpose of the matrix inverse.
    Normal,
    /// Never touched by geometric transforms (texcoords, colors).
    Opaque,
}

/// Scalar payload of an attribute.
#[derive(Debug, Clone)]
pub enum AttributeData {
    /// 32-bit float data (positions, normals, texcoords).
    Float32(AttribBuffer<f32>),
    /// 8-bit unsigned data (byte colors).
    Uint8(AttribBuffer<u8>),
}

impl AttributeData {
    /// Scalars per element.
    pub fn num_components(&self) -> usize {
        match self {
            Self::Float32(buffer) => buffer.num_components(),
            Self::Uint8(buffer) => buffer.num_components(),
        }
    }

    /// Number of elements.
    pub fn num_elements(&self) -> usize {
        match self {
            Self::Float32(buffer) => buffer.num_elements(),
            Self::Uint8(buffer) => buffer.num_elements(),
        }
    }

    /// The f32 buffer, if this is float data.
    pub fn as_float32(&self) -> Option<&AttribBuffer<f32>> {
        match self {
            Self::Float32(buffer) => Some(buffer),
            Self::Uint8(_) => None,
        }
    }

    /// Mutable f32 buffer, if this is float data.
    pub fn as_float32_mut(&mut self) -> Option<&mut AttribBuffer<f32>> {
        match self {
            Self::Float32(buffer) => Some(buffer),
            Self::Uint8(_) => None,
        }
    }

    /// The u8 buffer, if this is byte data.
    pub fn as_uint8(&self) -> Option<&AttribBuffer<u8>> {
        match self {
            Self::Uint8(buffer) => Some(buffer),
            Self::Float32(_) => None,
        }
    }
}

impl From<AttribBuffer<f32>> for AttributeData {
    fn from(buffer: AttribBuffer<f32>) -> Self {
        Self::Float32(buffer)
    }
}

impl From<AttribBuffer<u8>> for AttributeData {
    fn from(buffer: AttribBuffer<u8>) -> Self {
        Self::Uint8(buffer)
    }
}

/// One named attribute: a role tag and its data.
#[derive(Debug, Clone)]
pub struct MeshAttribute {
    /// Transform role, fixed at insertion.
    pub role: AttributeRole,
    /// Scalar payload.
    pub data: AttributeData,
}

/// A buffer set: named vertex attributes plus an optional index buffer.
///
/// Attributes are kept in name order so iteration is deterministic. The
/// index buffer, when present, holds u16 triangle-list indices with 3
/// components per element.
#[derive(Clone, Default)]
pub struct MeshBuffers {
    attributes: BTreeMap<String, MeshAttribute>,
    indices: Option<AttribBuffer<u16>>,
    label: Option<String>,
}

impl MeshBuffers {
    /// Conventional name for the position attribute.
    pub const POSITION: &'static str = "position";
    /// Conventional name for the normal attribute.
    pub const NORMAL: &'static str = "normal";
    /// Conventional name for the texture-coordinate attribute.
    pub const TEXCOORD: &'static str = "texcoord";
    /// Conventional name for the color attribute.
    pub const COLOR: &'static str = "color";

    /// Create an empty buffer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        role: AttributeRole,
        data: impl Into<AttributeData>,
    ) -> Self {
        self.insert_attribute(name, role, data);
        self
    }

    /// Set the index buffer.
    pub fn with_indices(mut self, indices: AttribBuffer<u16>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Insert or replace an attribute.
    pub fn insert_attribute(
        &mut self,
        name: impl Into<String>,
        role: AttributeRole,
        data: impl Into<AttributeData>,
    ) {
        self.attributes.insert(
            name.into(),
            MeshAttribute {
                role,
                data: data.into(),
            },
        );
    }

    /// Get an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&MeshAttribute> {
        self.attributes.get(name)
    }

    /// Get a mutable attribute by name.
    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut MeshAttribute> {
        self.attributes.get_mut(name)
    }

    /// Iterate attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &MeshAttribute)> {
        self.attributes.iter().map(|(name, a)| (name.as_str(), a))
    }

    /// Iterate attributes mutably, in name order.
    pub fn attributes_mut(&mut self) -> impl Iterator<Item = (&str, &mut MeshAttribute)> {
        self.attributes
            .iter_mut()
            .map(|(name, a)| (name.as_str(), a))
    }

    /// Number of attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// The index buffer, if the mesh is indexed.
    pub fn indices(&self) -> Option<&AttribBuffer<u16>> {
        self.indices.as_ref()
    }

    /// Whether the mesh shares vertices through an index buffer.
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Total index values (3 per triangle), 0 when unindexed.
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, |b| b.len())
    }

    /// Shared element count of the vertex attributes, or `None` for an
    /// empty set.
    pub fn vertex_count(&self) -> Option<usize> {
        self.attributes.values().next().map(|a| a.data.num_elements())
    }

    /// The debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Check the structural invariants: all attributes share one element
    /// count, the index buffer is 3-component, and every index value is
    /// in range.
    pub fn validate(&self) -> Result<(), MeshError> {
        let mut shared: Option<(&str, usize)> = None;
        for (name, attribute) in self.attributes() {
            let num_elements = attribute.data.num_elements();
            match shared {
                None => shared = Some((name, num_elements)),
                Some((first, expected)) if num_elements != expected => {
                    return Err(MeshError::InvalidBufferSet(format!(
                        "attribute `{name}` has {num_elements} elements, `{first}` has {expected}"
                    )));
                }
                Some(_) => {}
            }
        }
        if let Some(indices) = &self.indices {
            if indices.num_components() != 3 {
                return Err(MeshError::InvalidBufferSet(format!(
                    "index buffer has {} components per element, expected 3",
                    indices.num_components()
                )));
            }
            if let Some((_, vertex_count)) = shared {
                for &index in indices.as_slice() {
                    if index as usize >= vertex_count {
                        return Err(MeshError::InvalidBufferSet(format!(
                            "index {index} out of range for {vertex_count} vertices"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for MeshBuffers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshBuffers")
            .field("label", &self.label)
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .field("vertex_count", &self.vertex_count())
            .field("index_count", &self.index_count())
            .finish()
    }
}
