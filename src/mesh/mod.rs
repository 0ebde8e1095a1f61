//! CPU-side mesh buffers, generators and transforms.
//!
//! This module provides:
//!
//! - [`MeshBuffers`] - a named set of role-tagged attribute buffers plus
//!   an optional triangle-list index buffer
//! - [`generators`] - plane, sphere, cube, truncated cone and cylinder
//! - [`letter_f`] - a fixed hand-authored test mesh
//! - [`transforms`] - deindexing, normal flattening, reorientation and
//!   random vertex colors

mod data;
pub mod generators;
pub mod letter_f;
pub mod transforms;

pub use data::{AttributeData, AttributeRole, MeshAttribute, MeshBuffers};
