//! Buffer-set transforms: deindexing, normal flattening, reorientation
//! and random vertex coloring.
//!
//! Reorientation dispatches on each attribute's [`AttributeRole`] tag, so
//! index data and opaque attributes (texcoords, colors) are never touched.

use crate::buffer::AttribBuffer;
use crate::error::MeshError;
use crate::math::{transform_direction, transform_point, Mat4, Vec3};
use crate::mesh::data::{AttributeData, AttributeRole, MeshBuffers};

/// Expand an indexed buffer set into one where every triangle owns its
/// own vertices.
///
/// Each attribute gets a new buffer of the same component count and
/// scalar type, sized to the index count; source elements are copied in
/// index order. The result carries no index buffer. Errors when the set
/// is not indexed.
pub fn deindex_vertices(set: &MeshBuffers) -> Result<MeshBuffers, MeshError> {
    let indices = set
        .indices()
        .ok_or(MeshError::MissingIndices("deindex_vertices"))?;
    let index_values = indices.as_slice();

    let mut out = MeshBuffers::new();
    for (name, attribute) in set.attributes() {
        let data = match &attribute.data {
            AttributeData::Float32(buffer) => {
                AttributeData::Float32(expand_to_unindexed(buffer, index_values)?)
            }
            AttributeData::Uint8(buffer) => {
                AttributeData::Uint8(expand_to_unindexed(buffer, index_values)?)
            }
        };
        out.insert_attribute(name, attribute.role, data);
    }
    if let Some(label) = set.label() {
        out = out.with_label(label);
    }
    Ok(out)
}

fn expand_to_unindexed<T: Copy + Default>(
    source: &AttribBuffer<T>,
    indices: &[u16],
) -> Result<AttribBuffer<T>, MeshError> {
    let num_components = source.num_components();
    let source_data = source.as_slice();
    let mut out = AttribBuffer::new(num_components, indices.len());
    for &index in indices {
        let offset = index as usize * num_components;
        let element = source_data
            .get(offset..offset + num_components)
            .ok_or_else(|| {
                MeshError::InvalidBufferSet(format!(
                    "index {index} out of range for {} elements",
                    source.num_elements()
                ))
            })?;
        out.push_slice(element)?;
    }
    Ok(out)
}

/// Replace per-vertex normals with per-triangle face normals, in place.
///
/// Only accepts unindexed sets: with shared vertices a triangle cannot
/// own its normals. Every `Normal`-role buffer is processed in groups of
/// 3 vertices; the group's normals are summed, the sum normalized, and
/// the result written back to all three slots.
pub fn flatten_normals(set: &mut MeshBuffers) -> Result<(), MeshError> {
    if set.is_indexed() {
        return Err(MeshError::IndexedNotSupported("flatten_normals"));
    }

    let mut flattened = false;
    for (_, attribute) in set.attributes_mut() {
        if attribute.role != AttributeRole::Normal {
            continue;
        }
        let Some(buffer) = attribute.data.as_float32_mut() else {
            continue;
        };
        for triangle in buffer.as_mut_slice().chunks_exact_mut(9) {
            let nx = triangle[0] + triangle[3] + triangle[6];
            let ny = triangle[1] + triangle[4] + triangle[7];
            let nz = triangle[2] + triangle[5] + triangle[8];
            let length = (nx * nx + ny * ny + nz * nz).sqrt();
            if length == 0.0 {
                continue;
            }
            for vertex in triangle.chunks_exact_mut(3) {
                vertex[0] = nx / length;
                vertex[1] = ny / length;
                vertex[2] = nz / length;
            }
        }
        flattened = true;
    }

    if flattened {
        Ok(())
    } else {
        Err(MeshError::MissingAttribute("normal"))
    }
}

fn apply_to_vec3_array(array: &mut [f32], mut f: impl FnMut(Vec3) -> Vec3) {
    for chunk in array.chunks_exact_mut(3) {
        let v = f(Vec3::new(chunk[0], chunk[1], chunk[2]));
        chunk[0] = v.x;
        chunk[1] = v.y;
        chunk[2] = v.z;
    }
}

/// Transform every 3-component group of `array` as a point.
pub fn reorient_positions(array: &mut [f32], matrix: &Mat4) {
    apply_to_vec3_array(array, |v| transform_point(matrix, v));
}

/// Transform every 3-component group of `array` as a direction.
pub fn reorient_directions(array: &mut [f32], matrix: &Mat4) {
    apply_to_vec3_array(array, |v| transform_direction(matrix, v));
}

/// Transform every 3-component group of `array` as a normal, using the
/// transpose of the matrix inverse (correct under non-uniform scale).
///
/// The corrected matrix is computed once per call. A singular matrix
/// leaves the array unchanged.
pub fn reorient_normals(array: &mut [f32], matrix: &Mat4) {
    let Some(inverse) = matrix.try_inverse() else {
        log::warn!("reorient_normals: matrix is singular, normals left unchanged");
        return;
    };
    let normal_matrix = inverse.transpose();
    apply_to_vec3_array(array, |v| transform_direction(&normal_matrix, v));
}

/// Reorient a whole buffer set by one matrix, dispatching on each
/// attribute's role: `Position` as points, `Direction` as directions,
/// `Normal` with the inverse-transpose correction. `Opaque` attributes
/// and the index buffer are untouched.
pub fn reorient_vertices(set: &mut MeshBuffers, matrix: &Mat4) {
    for (_, attribute) in set.attributes_mut() {
        let role = attribute.role;
        let Some(buffer) = attribute.data.as_float32_mut() else {
            continue;
        };
        match role {
            AttributeRole::Position => reorient_positions(buffer.as_mut_slice(), matrix),
            AttributeRole::Direction => reorient_directions(buffer.as_mut_slice(), matrix),
            AttributeRole::Normal => reorient_normals(buffer.as_mut_slice(), matrix),
            AttributeRole::Opaque => {}
        }
    }
}

/// Options for [`make_random_vertex_colors`].
#[derive(Debug, Clone)]
pub struct RandomColorOptions {
    /// For unindexed sets, how many consecutive vertices share one color.
    /// 3 colors each triangle uniformly.
    pub verts_per_color: usize,
}

impl Default for RandomColorOptions {
    fn default() -> Self {
        Self { verts_per_color: 3 }
    }
}

/// Add (or replace) a random 4-component byte color attribute.
///
/// Indexed sets get one independently sampled color per vertex element;
/// unindexed sets get one color per group of
/// [`verts_per_color`](RandomColorOptions::verts_per_color) vertices,
/// shared across the group. RGB channels are uniform random, alpha 255.
pub fn make_random_vertex_colors(
    set: &mut MeshBuffers,
    options: &RandomColorOptions,
) -> Result<(), MeshError> {
    make_random_vertex_colors_with(set, options, |_, channel| {
        if channel < 3 {
            rand::random::<u8>()
        } else {
            255
        }
    })
}

/// [`make_random_vertex_colors`] with an injected sampler.
///
/// The sampler receives the group index (vertex index for indexed sets)
/// and the channel number (0=R, 1=G, 2=B, 3=A) and returns the byte
/// value for that channel.
pub fn make_random_vertex_colors_with<F>(
    set: &mut MeshBuffers,
    options: &RandomColorOptions,
    mut sampler: F,
) -> Result<(), MeshError>
where
    F: FnMut(usize, usize) -> u8,
{
    let num_elements = set
        .vertex_count()
        .ok_or(MeshError::MissingAttribute("position"))?;
    let mut colors = AttribBuffer::<u8>::new(4, num_elements);

    if set.is_indexed() {
        for vertex in 0..num_elements {
            colors.push_slice(&[
                sampler(vertex, 0),
                sampler(vertex, 1),
                sampler(vertex, 2),
                sampler(vertex, 3),
            ])?;
        }
    } else {
        let verts_per_color = options.verts_per_color.max(1);
        let mut remaining = num_elements;
        let mut group = 0;
        while remaining > 0 {
            let color = [
                sampler(group, 0),
                sampler(group, 1),
                sampler(group, 2),
                sampler(group, 3),
            ];
            for _ in 0..verts_per_color.min(remaining) {
                colors.push_slice(&color)?;
            }
            remaining = remaining.saturating_sub(verts_per_color);
            group += 1;
        }
    }

    set.insert_attribute(MeshBuffers::COLOR, AttributeRole::Opaque, colors);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{mat4_from_rotation_y, mat4_from_translation};
    use std::f32::consts::FRAC_PI_2;

    fn indexed_quad() -> MeshBuffers {
        // Two triangles sharing the diagonal of a unit quad in XZ.
        let mut positions = AttribBuffer::<f32>::new(3, 4);
        positions
            .push_slice(&[
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                1.0, 0.0, 1.0, //
                0.0, 0.0, 1.0,
            ])
            .unwrap();
        let mut normals = AttribBuffer::<f32>::new(3, 4);
        for _ in 0..4 {
            normals.push_slice(&[0.0, 1.0, 0.0]).unwrap();
        }
        let mut texcoords = AttribBuffer::<f32>::new(2, 4);
        texcoords
            .push_slice(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0])
            .unwrap();
        let mut indices = AttribBuffer::<u16>::new(3, 2);
        indices.push_slice(&[0, 1, 2, 0, 2, 3]).unwrap();
        MeshBuffers::new()
            .with_attribute(MeshBuffers::POSITION, AttributeRole::Position, positions)
            .with_attribute(MeshBuffers::NORMAL, AttributeRole::Normal, normals)
            .with_attribute(MeshBuffers::TEXCOORD, AttributeRole::Opaque, texcoords)
            .with_indices(indices)
    }

    #[test]
    fn deindex_copies_elements_in_index_order() {
        let set = indexed_quad();
        let expanded = deindex_vertices(&set).unwrap();

        assert!(!expanded.is_indexed());
        assert_eq!(expanded.vertex_count(), Some(6));

        let positions = expanded
            .attribute(MeshBuffers::POSITION)
            .unwrap()
            .data
            .as_float32()
            .unwrap()
            .as_slice();
        // Index order was 0,1,2,0,2,3: the source vertex of every output
        // vertex is recoverable, reconstructing the original index list.
        let source_positions: [[f32; 3]; 4] = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ];
        let recovered: Vec<u16> = positions
            .chunks_exact(3)
            .map(|p| {
                source_positions
                    .iter()
                    .position(|s| s[0] == p[0] && s[1] == p[1] && s[2] == p[2])
                    .unwrap() as u16
            })
            .collect();
        assert_eq!(recovered, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn deindex_without_indices_errors() {
        let expanded = deindex_vertices(&indexed_quad()).unwrap();
        assert!(matches!(
            deindex_vertices(&expanded),
            Err(MeshError::MissingIndices(_))
        ));
    }

    #[test]
    fn flatten_normals_rejects_indexed_input() {
        let mut set = indexed_quad();
        assert!(matches!(
            flatten_normals(&mut set),
            Err(MeshError::IndexedNotSupported(_))
        ));
    }

    #[test]
    fn flatten_normals_makes_unit_per_triangle_normals() {
        let set = indexed_quad();
        let mut expanded = deindex_vertices(&set).unwrap();

        // Perturb the normals so flattening has something to average.
        {
            let normals = expanded
                .attribute_mut(MeshBuffers::NORMAL)
                .unwrap()
                .data
                .as_float32_mut()
                .unwrap();
            normals.as_mut_slice()[0] = 0.5;
        }

        flatten_normals(&mut expanded).unwrap();

        let normals = expanded
            .attribute(MeshBuffers::NORMAL)
            .unwrap()
            .data
            .as_float32()
            .unwrap()
            .as_slice();
        for triangle in normals.chunks_exact(9) {
            let first = &triangle[0..3];
            assert_eq!(first, &triangle[3..6]);
            assert_eq!(first, &triangle[6..9]);
            let length =
                (first[0] * first[0] + first[1] * first[1] + first[2] * first[2]).sqrt();
            assert!((length - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn flatten_normals_without_normals_errors() {
        let mut positions = AttribBuffer::<f32>::new(3, 3);
        positions
            .push_slice(&[0.0; 9])
            .unwrap();
        let mut set = MeshBuffers::new().with_attribute(
            MeshBuffers::POSITION,
            AttributeRole::Position,
            positions,
        );
        assert!(matches!(
            flatten_normals(&mut set),
            Err(MeshError::MissingAttribute("normal"))
        ));
    }

    #[test]
    fn reorient_positions_identity_is_noop() {
        let mut array = [1.0, 2.0, 3.0, -4.0, 5.0, -6.0];
        let expected = array;
        reorient_positions(&mut array, &Mat4::identity());
        for (a, e) in array.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-6);
        }
    }

    #[test]
    fn reorient_positions_translates() {
        let mut array = [1.0, 2.0, 3.0, -4.0, 5.0, -6.0];
        let m = mat4_from_translation(Vec3::new(10.0, 20.0, 30.0));
        reorient_positions(&mut array, &m);
        assert_eq!(array, [11.0, 22.0, 33.0, 6.0, 25.0, 24.0]);
    }

    #[test]
    fn reorient_positions_rotation_preserves_length() {
        let mut array = [3.0, 0.0, 4.0];
        let m = mat4_from_rotation_y(FRAC_PI_2);
        reorient_positions(&mut array, &m);
        let length = (array[0] * array[0] + array[1] * array[1] + array[2] * array[2]).sqrt();
        assert!((length - 5.0).abs() < 1e-5);
    }

    #[test]
    fn reorient_directions_ignore_translation() {
        let mut array = [1.0, 0.0, 0.0];
        let m = mat4_from_translation(Vec3::new(10.0, 20.0, 30.0));
        reorient_directions(&mut array, &m);
        assert_eq!(array, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn reorient_normals_corrects_for_nonuniform_scale() {
        // A surface stretched 2x along X keeps its +Y normals vertical,
        // but a 45-degree plane normal must tilt: the inverse-transpose
        // handles both.
        let mut array = [0.0, 1.0, 0.0];
        let m = Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 1.0, 1.0));
        reorient_normals(&mut array, &m);
        assert!((array[0] - 0.0).abs() < 1e-6);
        assert!((array[1] - 1.0).abs() < 1e-6);

        let inv_sqrt2 = 1.0 / 2.0f32.sqrt();
        let mut slanted = [inv_sqrt2, inv_sqrt2, 0.0];
        reorient_normals(&mut slanted, &m);
        // x component shrinks by the scale factor before normalization.
        assert!(slanted[0] < slanted[1]);
    }

    #[test]
    fn reorient_vertices_dispatches_by_role() {
        let set = indexed_quad();
        let mut expanded = deindex_vertices(&set).unwrap();
        let texcoords_before: Vec<f32> = expanded
            .attribute(MeshBuffers::TEXCOORD)
            .unwrap()
            .data
            .as_float32()
            .unwrap()
            .as_slice()
            .to_vec();

        let m = mat4_from_translation(Vec3::new(0.0, 7.0, 0.0));
        reorient_vertices(&mut expanded, &m);

        let positions = expanded
            .attribute(MeshBuffers::POSITION)
            .unwrap()
            .data
            .as_float32()
            .unwrap()
            .as_slice();
        for position in positions.chunks_exact(3) {
            assert_eq!(position[1], 7.0);
        }

        // Normals are translation-invariant; the quad's stay vertical.
        let normals = expanded
            .attribute(MeshBuffers::NORMAL)
            .unwrap()
            .data
            .as_float32()
            .unwrap()
            .as_slice();
        assert!((normals[1] - 1.0).abs() < 1e-6);
        assert!(normals[0].abs() < 1e-6 && normals[2].abs() < 1e-6);

        // Opaque attributes are untouched.
        let texcoords = expanded
            .attribute(MeshBuffers::TEXCOORD)
            .unwrap()
            .data
            .as_float32()
            .unwrap()
            .as_slice();
        assert_eq!(texcoords, texcoords_before.as_slice());
    }

    #[test]
    fn reorient_vertices_transforms_direction_roles() {
        let mut tangents = AttribBuffer::<f32>::new(3, 2);
        tangents
            .push_slice(&[1.0, 0.0, 0.0, 0.0, 0.0, 1.0])
            .unwrap();
        let mut set = MeshBuffers::new().with_attribute(
            "tangent",
            AttributeRole::Direction,
            tangents,
        );

        // Rotation moves directions; translation would not.
        let m = mat4_from_translation(Vec3::new(3.0, 4.0, 5.0)) * mat4_from_rotation_y(FRAC_PI_2);
        reorient_vertices(&mut set, &m);

        let tangents = set
            .attribute("tangent")
            .unwrap()
            .data
            .as_float32()
            .unwrap()
            .as_slice();
        assert!((tangents[2] - (-1.0)).abs() < 1e-6);
        assert!((tangents[3] - 1.0).abs() < 1e-6);
        // The translation part left no trace.
        assert!(tangents[0].abs() < 1e-6 && tangents[1].abs() < 1e-6);
    }

    #[test]
    fn random_colors_indexed_one_per_vertex() {
        let mut set = indexed_quad();
        make_random_vertex_colors(&mut set, &RandomColorOptions::default()).unwrap();

        let color = set.attribute(MeshBuffers::COLOR).unwrap();
        assert_eq!(color.role, AttributeRole::Opaque);
        let buffer = color.data.as_uint8().unwrap();
        assert_eq!(buffer.num_elements(), 4);
        assert_eq!(buffer.num_components(), 4);
        for rgba in buffer.as_slice().chunks_exact(4) {
            assert_eq!(rgba[3], 255);
        }
    }

    #[test]
    fn random_colors_unindexed_shares_per_group() {
        let set = indexed_quad();
        let mut expanded = deindex_vertices(&set).unwrap();
        let mut sampled_groups = Vec::new();
        make_random_vertex_colors_with(
            &mut expanded,
            &RandomColorOptions { verts_per_color: 3 },
            |group, channel| {
                if channel == 0 {
                    sampled_groups.push(group);
                }
                (group * 10 + channel) as u8
            },
        )
        .unwrap();

        // 6 vertices, 3 per color: two groups sampled once each.
        assert_eq!(sampled_groups, vec![0, 1]);
        let buffer = expanded
            .attribute(MeshBuffers::COLOR)
            .unwrap()
            .data
            .as_uint8()
            .unwrap();
        let colors = buffer.as_slice();
        assert_eq!(&colors[0..4], &colors[4..8]);
        assert_eq!(&colors[0..4], &colors[8..12]);
        assert_eq!(&colors[12..16], &colors[16..20]);
        assert_ne!(&colors[0..4], &colors[12..16]);
    }

    #[test]
    fn random_colors_on_empty_set_errors() {
        let mut set = MeshBuffers::new();
        assert!(matches!(
            make_random_vertex_colors(&mut set, &RandomColorOptions::default()),
            Err(MeshError::MissingAttribute(_))
        ));
    }
}
