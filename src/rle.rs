//! Run-length expansion for compact attribute tables.
//!
//! Hand-authored meshes store constant-valued stretches of an attribute
//! (normals, colors) as `(count, value)` runs instead of per-vertex data.
//! [`expand_rle`] decodes those runs into the flat per-vertex sequence a
//! buffer push expects.

/// Expand `(count, [v; N])` runs into a flat scalar sequence.
///
/// For each run, the value tuple followed by the `padding` scalars is
/// appended `count` times, in input order. `padding` is how a 3-component
/// table yields 4-component output (a constant alpha, for instance).
pub fn expand_rle<T: Copy, const N: usize>(runs: &[(u32, [T; N])], padding: &[T]) -> Vec<T> {
    let total: usize = runs.iter().map(|(count, _)| *count as usize).sum();
    let mut out = Vec::with_capacity(total * (N + padding.len()));
    for (count, values) in runs {
        for _ in 0..*count {
            out.extend_from_slice(values);
            out.extend_from_slice(padding);
        }
    }
    out
}
