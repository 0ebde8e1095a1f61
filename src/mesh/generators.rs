//! Mesh generators for common shapes.
//!
//! Every generator is a pure function of its shape parameters: it sizes
//! its buffers exactly up front, fills them in one pass and returns a
//! [`MeshBuffers`] with `position`, `normal` and `texcoord` attributes
//! plus a u16 triangle-list index buffer. Parameter validation happens
//! before any allocation.

use std::f32::consts::PI;

use crate::buffer::AttribBuffer;
use crate::error::MeshError;
use crate::math::Mat4;
use crate::mesh::data::{AttributeRole, MeshBuffers};
use crate::mesh::transforms::reorient_vertices;

/// Generate an XZ-plane grid centered at the origin, normals up.
///
/// UV coordinates run 0..1 along each axis. Non-positive dimensions are
/// legal and produce degenerate geometry; a subdivision count of 0 is
/// clamped to 1.
pub fn generate_plane(
    width: f32,
    depth: f32,
    subdivisions_width: u32,
    subdivisions_depth: u32,
) -> Result<MeshBuffers, MeshError> {
    generate_plane_transformed(
        width,
        depth,
        subdivisions_width,
        subdivisions_depth,
        &Mat4::identity(),
    )
}

/// [`generate_plane`], with the finished buffers reoriented by `matrix`.
pub fn generate_plane_transformed(
    width: f32,
    depth: f32,
    subdivisions_width: u32,
    subdivisions_depth: u32,
    matrix: &Mat4,
) -> Result<MeshBuffers, MeshError> {
    let subdivisions_width = clamp_subdivisions("subdivisions_width", subdivisions_width);
    let subdivisions_depth = clamp_subdivisions("subdivisions_depth", subdivisions_depth);

    let num_vertices = ((subdivisions_width + 1) * (subdivisions_depth + 1)) as usize;
    let mut positions = AttribBuffer::<f32>::new(3, num_vertices);
    let mut normals = AttribBuffer::<f32>::new(3, num_vertices);
    let mut texcoords = AttribBuffer::<f32>::new(2, num_vertices);

    for z in 0..=subdivisions_depth {
        for x in 0..=subdivisions_width {
            let u = x as f32 / subdivisions_width as f32;
            let v = z as f32 / subdivisions_depth as f32;
            positions.push_slice(&[width * u - width * 0.5, 0.0, depth * v - depth * 0.5])?;
            normals.push_slice(&[0.0, 1.0, 0.0])?;
            texcoords.push_slice(&[u, v])?;
        }
    }

    let num_verts_across = subdivisions_width + 1;
    let num_triangles = (subdivisions_width * subdivisions_depth * 2) as usize;
    let mut indices = AttribBuffer::<u16>::new(3, num_triangles);
    for z in 0..subdivisions_depth {
        for x in 0..subdivisions_width {
            indices.push_slice(&[
                (z * num_verts_across + x) as u16,
                ((z + 1) * num_verts_across + x) as u16,
                (z * num_verts_across + x + 1) as u16,
            ])?;
            indices.push_slice(&[
                ((z + 1) * num_verts_across + x) as u16,
                ((z + 1) * num_verts_across + x + 1) as u16,
                (z * num_verts_across + x + 1) as u16,
            ])?;
        }
    }

    let mut set = MeshBuffers::new()
        .with_attribute(MeshBuffers::POSITION, AttributeRole::Position, positions)
        .with_attribute(MeshBuffers::NORMAL, AttributeRole::Normal, normals)
        .with_attribute(MeshBuffers::TEXCOORD, AttributeRole::Opaque, texcoords)
        .with_indices(indices)
        .with_label("plane");
    reorient_vertices(&mut set, matrix);
    Ok(set)
}

fn clamp_subdivisions(name: &str, value: u32) -> u32 {
    if value == 0 {
        log::warn!("generate_plane: {name} is 0, using 1");
        1
    } else {
        value
    }
}

/// Generate a UV sphere over the full latitude/longitude ranges.
///
/// `subdivisions_axis` is the segment count around the equator,
/// `subdivisions_height` the ring count pole to pole; both must be at
/// least 1.
pub fn generate_sphere(
    radius: f32,
    subdivisions_axis: u32,
    subdivisions_height: u32,
) -> Result<MeshBuffers, MeshError> {
    generate_sphere_section(
        radius,
        subdivisions_axis,
        subdivisions_height,
        0.0,
        PI,
        0.0,
        2.0 * PI,
    )
}

/// Generate a section of a UV sphere bounded by latitude and longitude.
///
/// Latitudes are in radians from 0 (top pole) to π, longitudes from 0 to
/// 2π. Positions lie on the parametrization
/// `radius * (cosθ sinφ, cosφ, sinθ sinφ)` with the unit direction as
/// normal and UV `(1-u, v)` over the subdivision grid.
pub fn generate_sphere_section(
    radius: f32,
    subdivisions_axis: u32,
    subdivisions_height: u32,
    start_latitude: f32,
    end_latitude: f32,
    start_longitude: f32,
    end_longitude: f32,
) -> Result<MeshBuffers, MeshError> {
    if subdivisions_axis < 1 {
        return Err(MeshError::InvalidParameter {
            name: "subdivisions_axis",
            message: "must be 1 or greater",
        });
    }
    if subdivisions_height < 1 {
        return Err(MeshError::InvalidParameter {
            name: "subdivisions_height",
            message: "must be 1 or greater",
        });
    }

    let lat_range = end_latitude - start_latitude;
    let long_range = end_longitude - start_longitude;

    let num_vertices = ((subdivisions_axis + 1) * (subdivisions_height + 1)) as usize;
    let mut positions = AttribBuffer::<f32>::new(3, num_vertices);
    let mut normals = AttribBuffer::<f32>::new(3, num_vertices);
    let mut texcoords = AttribBuffer::<f32>::new(2, num_vertices);

    for y in 0..=subdivisions_height {
        for x in 0..=subdivisions_axis {
            let u = x as f32 / subdivisions_axis as f32;
            let v = y as f32 / subdivisions_height as f32;
            let theta = long_range * u + start_longitude;
            let phi = lat_range * v + start_latitude;
            let sin_theta = theta.sin();
            let cos_theta = theta.cos();
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();
            let ux = cos_theta * sin_phi;
            let uy = cos_phi;
            let uz = sin_theta * sin_phi;
            positions.push_slice(&[radius * ux, radius * uy, radius * uz])?;
            normals.push_slice(&[ux, uy, uz])?;
            texcoords.push_slice(&[1.0 - u, v])?;
        }
    }

    let num_verts_around = subdivisions_axis + 1;
    let num_triangles = (subdivisions_axis * subdivisions_height * 2) as usize;
    let mut indices = AttribBuffer::<u16>::new(3, num_triangles);
    for x in 0..subdivisions_axis {
        for y in 0..subdivisions_height {
            indices.push_slice(&[
                (y * num_verts_around + x) as u16,
                (y * num_verts_around + x + 1) as u16,
                ((y + 1) * num_verts_around + x) as u16,
            ])?;
            indices.push_slice(&[
                ((y + 1) * num_verts_around + x) as u16,
                (y * num_verts_around + x + 1) as u16,
                ((y + 1) * num_verts_around + x + 1) as u16,
            ])?;
        }
    }

    Ok(MeshBuffers::new()
        .with_attribute(MeshBuffers::POSITION, AttributeRole::Position, positions)
        .with_attribute(MeshBuffers::NORMAL, AttributeRole::Normal, normals)
        .with_attribute(MeshBuffers::TEXCOORD, AttributeRole::Opaque, texcoords)
        .with_indices(indices)
        .with_label("sphere"))
}

// Face-to-corner tables for the cube. Corner numbering is fixed by
// CORNER_OFFSETS; the face order pairs each row with FACE_NORMALS.
const CUBE_FACE_INDICES: [[usize; 4]; 6] = [
    [3, 7, 5, 1],
    [6, 2, 0, 4],
    [6, 7, 3, 2],
    [0, 1, 5, 4],
    [7, 6, 4, 5],
    [2, 3, 1, 0],
];

#[rustfmt::skip]
const CORNER_OFFSETS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0],
    [-1.0,  1.0, -1.0],
    [ 1.0,  1.0, -1.0],
    [-1.0, -1.0,  1.0],
    [ 1.0, -1.0,  1.0],
    [-1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0],
];

#[rustfmt::skip]
const FACE_NORMALS: [[f32; 3]; 6] = [
    [ 1.0,  0.0,  0.0],
    [-1.0,  0.0,  0.0],
    [ 0.0,  1.0,  0.0],
    [ 0.0, -1.0,  0.0],
    [ 0.0,  0.0,  1.0],
    [ 0.0,  0.0, -1.0],
];

const FACE_UVS: [[f32; 2]; 4] = [[1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// Generate an axis-aligned cube centered at the origin.
///
/// Each face owns its 4 vertices (normals and UVs differ per face), so
/// the mesh has 24 vertices and 12 triangles.
pub fn generate_cube(size: f32) -> Result<MeshBuffers, MeshError> {
    let k = size / 2.0;
    let num_vertices = 6 * 4;
    let mut positions = AttribBuffer::<f32>::new(3, num_vertices);
    let mut normals = AttribBuffer::<f32>::new(3, num_vertices);
    let mut texcoords = AttribBuffer::<f32>::new(2, num_vertices);
    let mut indices = AttribBuffer::<u16>::new(3, 6 * 2);

    for (face, corners) in CUBE_FACE_INDICES.iter().enumerate() {
        for &corner in corners.iter() {
            let offset = CORNER_OFFSETS[corner];
            positions.push_slice(&[k * offset[0], k * offset[1], k * offset[2]])?;
            normals.push_slice(&FACE_NORMALS[face])?;
        }
        for uv in FACE_UVS.iter() {
            texcoords.push_slice(uv)?;
        }
        let offset = (4 * face) as u16;
        indices.push_slice(&[offset, offset + 1, offset + 2])?;
        indices.push_slice(&[offset, offset + 2, offset + 3])?;
    }

    Ok(MeshBuffers::new()
        .with_attribute(MeshBuffers::POSITION, AttributeRole::Position, positions)
        .with_attribute(MeshBuffers::NORMAL, AttributeRole::Normal, normals)
        .with_attribute(MeshBuffers::TEXCOORD, AttributeRole::Opaque, texcoords)
        .with_indices(indices)
        .with_label("cube"))
}

/// Generate a truncated cone around the Y axis, centered at the origin.
///
/// Ring radius interpolates linearly from `bottom_radius` to
/// `top_radius`; side normals follow the constant surface slant. Each
/// enabled cap adds two extra rings (a rim ring and a zero-radius center
/// ring, both with the vertical cap normal) so one triangulation loop
/// covers caps and body alike. `radial_subdivisions` must be at least 3
/// and `vertical_subdivisions` at least 1.
///
/// A cone is a truncated cone with `top_radius` 0; a cylinder has equal
/// radii.
pub fn generate_truncated_cone(
    bottom_radius: f32,
    top_radius: f32,
    height: f32,
    radial_subdivisions: u32,
    vertical_subdivisions: u32,
    top_cap: bool,
    bottom_cap: bool,
) -> Result<MeshBuffers, MeshError> {
    if radial_subdivisions < 3 {
        return Err(MeshError::InvalidParameter {
            name: "radial_subdivisions",
            message: "must be 3 or greater",
        });
    }
    if vertical_subdivisions < 1 {
        return Err(MeshError::InvalidParameter {
            name: "vertical_subdivisions",
            message: "must be 1 or greater",
        });
    }

    let top_extra: u32 = if top_cap { 2 } else { 0 };
    let bottom_extra: u32 = if bottom_cap { 2 } else { 0 };
    let extra = top_extra + bottom_extra;
    let verts_around_edge = radial_subdivisions + 1;
    let num_vertices =
        (verts_around_edge * (vertical_subdivisions + 1 + extra)) as usize;
    let mut positions = AttribBuffer::<f32>::new(3, num_vertices);
    let mut normals = AttribBuffer::<f32>::new(3, num_vertices);
    let mut texcoords = AttribBuffer::<f32>::new(2, num_vertices);

    // The slant of the cone is constant across its surface.
    let slant = (bottom_radius - top_radius).atan2(height);
    let cos_slant = slant.cos();
    let sin_slant = slant.sin();

    let vertical = vertical_subdivisions as i32;
    let start: i32 = if bottom_cap { -2 } else { 0 };
    let end: i32 = vertical + if top_cap { 2 } else { 0 };

    for ring in start..=end {
        let mut v = ring as f32 / vertical as f32;
        let mut y = height * v;
        let ring_radius;
        if ring < 0 {
            y = 0.0;
            v = 1.0;
            ring_radius = bottom_radius;
        } else if ring > vertical {
            y = height;
            v = 1.0;
            ring_radius = top_radius;
        } else {
            ring_radius =
                bottom_radius + (top_radius - bottom_radius) * (ring as f32 / vertical as f32);
        }
        let ring_radius = if ring == -2 || ring == vertical + 2 {
            v = 0.0;
            0.0
        } else {
            ring_radius
        };
        let y = y - height / 2.0;

        for i in 0..verts_around_edge {
            let sin = (i as f32 * PI * 2.0 / radial_subdivisions as f32).sin();
            let cos = (i as f32 * PI * 2.0 / radial_subdivisions as f32).cos();
            positions.push_slice(&[sin * ring_radius, y, cos * ring_radius])?;
            if ring < 0 {
                normals.push_slice(&[0.0, -1.0, 0.0])?;
            } else if ring > vertical {
                normals.push_slice(&[0.0, 1.0, 0.0])?;
            } else if ring_radius == 0.0 {
                normals.push_slice(&[0.0, 0.0, 0.0])?;
            } else {
                normals.push_slice(&[sin * cos_slant, sin_slant, cos * cos_slant])?;
            }
            texcoords.push_slice(&[i as f32 / radial_subdivisions as f32, 1.0 - v])?;
        }
    }

    let num_bands = vertical_subdivisions + extra;
    let mut indices =
        AttribBuffer::<u16>::new(3, (radial_subdivisions * num_bands * 2) as usize);
    for band in 0..num_bands {
        for i in 0..radial_subdivisions {
            indices.push_slice(&[
                (verts_around_edge * band + i) as u16,
                (verts_around_edge * band + i + 1) as u16,
                (verts_around_edge * (band + 1) + i + 1) as u16,
            ])?;
            indices.push_slice(&[
                (verts_around_edge * band + i) as u16,
                (verts_around_edge * (band + 1) + i + 1) as u16,
                (verts_around_edge * (band + 1) + i) as u16,
            ])?;
        }
    }

    Ok(MeshBuffers::new()
        .with_attribute(MeshBuffers::POSITION, AttributeRole::Position, positions)
        .with_attribute(MeshBuffers::NORMAL, AttributeRole::Normal, normals)
        .with_attribute(MeshBuffers::TEXCOORD, AttributeRole::Opaque, texcoords)
        .with_indices(indices)
        .with_label("truncated_cone"))
}

/// Generate a cylinder: a truncated cone with equal radii.
pub fn generate_cylinder(
    radius: f32,
    height: f32,
    radial_subdivisions: u32,
    vertical_subdivisions: u32,
    top_cap: bool,
    bottom_cap: bool,
) -> Result<MeshBuffers, MeshError> {
    generate_truncated_cone(
        radius,
        radius,
        height,
        radial_subdivisions,
        vertical_subdivisions,
        top_cap,
        bottom_cap,
    )
}
