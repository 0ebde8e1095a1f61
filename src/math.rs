//! Math type aliases and helper functions.
//!
//! Everything here is a thin layer over [`nalgebra`], which provides the
//! 4x4 matrix and 3-vector operations the mesh transforms rely on.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Build a translation-only 4x4 matrix.
pub fn mat4_from_translation(t: Vec3) -> Mat4 {
    Mat4::new_translation(&t)
}

/// Build a rotation matrix around the X axis.
pub fn mat4_from_rotation_x(angle: f32) -> Mat4 {
    nalgebra::Rotation3::from_axis_angle(&nalgebra::Vector3::x_axis(), angle).to_homogeneous()
}

/// Build a rotation matrix around the Y axis.
pub fn mat4_from_rotation_y(angle: f32) -> Mat4 {
    nalgebra::Rotation3::from_axis_angle(&nalgebra::Vector3::y_axis(), angle).to_homogeneous()
}

/// Transform a point by a 4x4 matrix (translation applies).
pub fn transform_point(m: &Mat4, v: Vec3) -> Vec3 {
    m.transform_point(&nalgebra::Point3::from(v)).coords
}

/// Transform a direction by a 4x4 matrix (translation is ignored).
pub fn transform_direction(m: &Mat4, v: Vec3) -> Vec3 {
    m.transform_vector(&v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn translation_matrix() {
        let m = mat4_from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(1, 3)], 2.0);
        assert_eq!(m[(2, 3)], 3.0);
    }

    #[test]
    fn point_transform_applies_translation() {
        let m = mat4_from_translation(Vec3::new(5.0, 0.0, 0.0));
        let p = transform_point(&m, Vec3::new(1.0, 2.0, 3.0));
        assert!((p - Vec3::new(6.0, 2.0, 3.0)).norm() < 1e-6);
    }

    #[test]
    fn direction_transform_ignores_translation() {
        let m = mat4_from_translation(Vec3::new(5.0, 0.0, 0.0));
        let d = transform_direction(&m, Vec3::new(1.0, 2.0, 3.0));
        assert!((d - Vec3::new(1.0, 2.0, 3.0)).norm() < 1e-6);
    }

    #[test]
    fn rotation_x_90() {
        let m = mat4_from_rotation_x(FRAC_PI_2);
        let v = transform_direction(&m, Vec3::new(0.0, 1.0, 0.0));
        assert!((v.x - 0.0).abs() < 1e-5);
        assert!((v.z - 1.0).abs() < 1e-5);
    }
}
