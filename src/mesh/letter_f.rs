//! A fixed, hand-authored block-letter "F" mesh.
//!
//! The F is built from 16 quads (96 vertices, 6 per quad) with literal
//! position and texcoord tables. Normals and colors are constant per
//! quad, so they are stored as run-length-encoded tables and expanded at
//! build time; the color table is padded with a constant 255 alpha. The
//! mesh is unindexed: its index buffer is the identity sequence.
//!
//! The authored coordinates grow downward from the top-left corner of
//! the letter; the finished buffers are recentered around the origin and
//! flipped upright by a fixed transform.

use std::f32::consts::PI;

use crate::buffer::AttribBuffer;
use crate::error::MeshError;
use crate::math::{mat4_from_rotation_x, mat4_from_translation, Vec3};
use crate::mesh::data::{AttributeRole, MeshBuffers};
use crate::mesh::transforms::reorient_vertices;
use crate::rle::expand_rle;

#[rustfmt::skip]
const POSITIONS: [f32; 288] = [
    // left column front
      0.0,   0.0,  0.0,
      0.0, 150.0,  0.0,
     30.0,   0.0,  0.0,
      0.0, 150.0,  0.0,
     30.0, 150.0,  0.0,
     30.0,   0.0,  0.0,

    // top rung front
     30.0,   0.0,  0.0,
     30.0,  30.0,  0.0,
    100.0,   0.0,  0.0,
     30.0,  30.0,  0.0,
    100.0,  30.0,  0.0,
    100.0,   0.0,  0.0,

    // middle rung front
     30.0,  60.0,  0.0,
     30.0,  90.0,  0.0,
     67.0,  60.0,  0.0,
     30.0,  90.0,  0.0,
     67.0,  90.0,  0.0,
     67.0,  60.0,  0.0,

    // left column back
      0.0,   0.0, 30.0,
     30.0,   0.0, 30.0,
      0.0, 150.0, 30.0,
      0.0, 150.0, 30.0,
     30.0,   0.0, 30.0,
     30.0, 150.0, 30.0,

    // top rung back
     30.0,   0.0, 30.0,
    100.0,   0.0, 30.0,
     30.0,  30.0, 30.0,
     30.0,  30.0, 30.0,
    100.0,   0.0, 30.0,
    100.0,  30.0, 30.0,

    // middle rung back
     30.0,  60.0, 30.0,
     67.0,  60.0, 30.0,
     30.0,  90.0, 30.0,
     30.0,  90.0, 30.0,
     67.0,  60.0, 30.0,
     67.0,  90.0, 30.0,

    // top
      0.0,   0.0,  0.0,
    100.0,   0.0,  0.0,
    100.0,   0.0, 30.0,
      0.0,   0.0,  0.0,
    100.0,   0.0, 30.0,
      0.0,   0.0, 30.0,

    // top rung right
    100.0,   0.0,  0.0,
    100.0,  30.0,  0.0,
    100.0,  30.0, 30.0,
    100.0,   0.0,  0.0,
    100.0,  30.0, 30.0,
    100.0,   0.0, 30.0,

    // under top rung
     30.0,  30.0,  0.0,
     30.0,  30.0, 30.0,
    100.0,  30.0, 30.0,
     30.0,  30.0,  0.0,
    100.0,  30.0, 30.0,
    100.0,  30.0,  0.0,

    // between top rung and middle
     30.0,  30.0,  0.0,
     30.0,  60.0, 30.0,
     30.0,  30.0, 30.0,
     30.0,  30.0,  0.0,
     30.0,  60.0,  0.0,
     30.0,  60.0, 30.0,

    // top of middle rung
     30.0,  60.0,  0.0,
     67.0,  60.0, 30.0,
     30.0,  60.0, 30.0,
     30.0,  60.0,  0.0,
     67.0,  60.0,  0.0,
     67.0,  60.0, 30.0,

    // right of middle rung
     67.0,  60.0,  0.0,
     67.0,  90.0, 30.0,
     67.0,  60.0, 30.0,
     67.0,  60.0,  0.0,
     67.0,  90.0,  0.0,
     67.0,  90.0, 30.0,

    // bottom of middle rung
     30.0,  90.0,  0.0,
     30.0,  90.0, 30.0,
     67.0,  90.0, 30.0,
     30.0,  90.0,  0.0,
     67.0,  90.0, 30.0,
     67.0,  90.0,  0.0,

    // right of bottom
     30.0,  90.0,  0.0,
     30.0, 150.0, 30.0,
     30.0,  90.0, 30.0,
     30.0,  90.0,  0.0,
     30.0, 150.0,  0.0,
     30.0, 150.0, 30.0,

    // bottom
      0.0, 150.0,  0.0,
      0.0, 150.0, 30.0,
     30.0, 150.0, 30.0,
      0.0, 150.0,  0.0,
     30.0, 150.0, 30.0,
     30.0, 150.0,  0.0,

    // left side
      0.0,   0.0,  0.0,
      0.0,   0.0, 30.0,
      0.0, 150.0, 30.0,
      0.0,   0.0,  0.0,
      0.0, 150.0, 30.0,
      0.0, 150.0,  0.0,
];

#[rustfmt::skip]
const TEXCOORDS: [f32; 192] = [
    // left column front
    0.22, 0.19,
    0.22, 0.79,
    0.34, 0.19,
    0.22, 0.79,
    0.34, 0.79,
    0.34, 0.19,

    // top rung front
    0.34, 0.19,
    0.34, 0.31,
    0.62, 0.19,
    0.34, 0.31,
    0.62, 0.31,
    0.62, 0.19,

    // middle rung front
    0.34, 0.43,
    0.34, 0.55,
    0.49, 0.43,
    0.34, 0.55,
    0.49, 0.55,
    0.49, 0.43,

    // left column back
    0.0, 0.0,
    1.0, 0.0,
    0.0, 1.0,
    0.0, 1.0,
    1.0, 0.0,
    1.0, 1.0,

    // top rung back
    0.0, 0.0,
    1.0, 0.0,
    0.0, 1.0,
    0.0, 1.0,
    1.0, 0.0,
    1.0, 1.0,

    // middle rung back
    0.0, 0.0,
    1.0, 0.0,
    0.0, 1.0,
    0.0, 1.0,
    1.0, 0.0,
    1.0, 1.0,

    // top
    0.0, 0.0,
    1.0, 0.0,
    1.0, 1.0,
    0.0, 0.0,
    1.0, 1.0,
    0.0, 1.0,

    // top rung right
    0.0, 0.0,
    1.0, 0.0,
    1.0, 1.0,
    0.0, 0.0,
    1.0, 1.0,
    0.0, 1.0,

    // under top rung
    0.0, 0.0,
    0.0, 1.0,
    1.0, 1.0,
    0.0, 0.0,
    1.0, 1.0,
    1.0, 0.0,

    // between top rung and middle
    0.0, 0.0,
    1.0, 1.0,
    0.0, 1.0,
    0.0, 0.0,
    1.0, 0.0,
    1.0, 1.0,

    // top of middle rung
    0.0, 0.0,
    1.0, 1.0,
    0.0, 1.0,
    0.0, 0.0,
    1.0, 0.0,
    1.0, 1.0,

    // right of middle rung
    0.0, 0.0,
    1.0, 1.0,
    0.0, 1.0,
    0.0, 0.0,
    1.0, 0.0,
    1.0, 1.0,

    // bottom of middle rung
    0.0, 0.0,
    0.0, 1.0,
    1.0, 1.0,
    0.0, 0.0,
    1.0, 1.0,
    1.0, 0.0,

    // right of bottom
    0.0, 0.0,
    1.0, 1.0,
    0.0, 1.0,
    0.0, 0.0,
    1.0, 0.0,
    1.0, 1.0,

    // bottom
    0.0, 0.0,
    0.0, 1.0,
    1.0, 1.0,
    0.0, 0.0,
    1.0, 1.0,
    1.0, 0.0,

    // left side
    0.0, 0.0,
    0.0, 1.0,
    1.0, 1.0,
    0.0, 0.0,
    1.0, 1.0,
    1.0, 0.0,
];

// One run per authored region: the three front quads share a normal, as
// do the three back quads; the remaining ten quads are one run each.
#[rustfmt::skip]
const NORMAL_RUNS: [(u32, [f32; 3]); 12] = [
    (18, [ 0.0,  0.0,  1.0]),
    (18, [ 0.0,  0.0, -1.0]),
    ( 6, [ 0.0,  1.0,  0.0]),
    ( 6, [ 1.0,  0.0,  0.0]),
    ( 6, [ 0.0, -1.0,  0.0]),
    ( 6, [ 1.0,  0.0,  0.0]),
    ( 6, [ 0.0,  1.0,  0.0]),
    ( 6, [ 1.0,  0.0,  0.0]),
    ( 6, [ 0.0, -1.0,  0.0]),
    ( 6, [ 1.0,  0.0,  0.0]),
    ( 6, [ 0.0, -1.0,  0.0]),
    ( 6, [-1.0,  0.0,  0.0]),
];

#[rustfmt::skip]
const COLOR_RUNS: [(u32, [u8; 3]); 12] = [
    (18, [200,  70, 120]),
    (18, [ 80,  70, 200]),
    ( 6, [ 70, 200, 210]),
    ( 6, [200, 200,  70]),
    ( 6, [210, 100,  70]),
    ( 6, [210, 160,  70]),
    ( 6, [ 70, 180, 210]),
    ( 6, [100,  70, 210]),
    ( 6, [ 76, 210, 100]),
    ( 6, [140, 210,  80]),
    ( 6, [ 90, 130, 110]),
    ( 6, [160, 160, 220]),
];

/// Generate the block-letter "F" mesh.
///
/// Returns `position`, `normal`, `texcoord` and `color` attributes plus
/// an identity index buffer (one index per vertex, in order).
pub fn generate_letter_f() -> Result<MeshBuffers, MeshError> {
    let num_vertices = POSITIONS.len() / 3;

    let mut positions = AttribBuffer::<f32>::new(3, num_vertices);
    positions.push_slice(&POSITIONS)?;

    let mut texcoords = AttribBuffer::<f32>::new(2, num_vertices);
    texcoords.push_slice(&TEXCOORDS)?;

    let mut normals = AttribBuffer::<f32>::new(3, num_vertices);
    normals.push_slice(&expand_rle(&NORMAL_RUNS, &[]))?;

    let mut colors = AttribBuffer::<u8>::new(4, num_vertices);
    colors.push_slice(&expand_rle(&COLOR_RUNS, &[255]))?;

    let mut indices = AttribBuffer::<u16>::new(3, num_vertices / 3);
    for i in 0..num_vertices {
        indices.push(i as u16)?;
    }

    let mut set = MeshBuffers::new()
        .with_attribute(MeshBuffers::POSITION, AttributeRole::Position, positions)
        .with_attribute(MeshBuffers::NORMAL, AttributeRole::Normal, normals)
        .with_attribute(MeshBuffers::TEXCOORD, AttributeRole::Opaque, texcoords)
        .with_attribute(MeshBuffers::COLOR, AttributeRole::Opaque, colors)
        .with_indices(indices)
        .with_label("letter_f");

    // Recenter around the origin and flip the authored y-down data
    // upright.
    let matrix =
        mat4_from_rotation_x(PI) * mat4_from_translation(Vec3::new(-50.0, -75.0, -15.0));
    reorient_vertices(&mut set, &matrix);

    Ok(set)
}
