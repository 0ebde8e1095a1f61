//! # meshgen
//!
//! CPU-side procedural mesh generation: shape parameters in, attribute
//! buffers (positions, normals, texcoords, optional colors) and a
//! triangle-list index buffer out, plus transforms for deindexing,
//! normal flattening, rigid reorientation and random vertex coloring.
//!
//! The crate never touches a rendering context; buffers expose slice and
//! byte views for whatever upload layer sits on top.

pub mod buffer;
pub mod error;
pub mod math;
pub mod mesh;
pub mod rle;

pub use error::MeshError;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
