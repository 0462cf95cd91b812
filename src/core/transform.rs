//! In general, transformations make it possible to work in the most
//! convenient coordinate space.
//!
//! ## 4 x 4 Matrices
//!
//! The **Matrix4x4** structure provides a low-level representation of
//! 4 x 4 matrices. It is an integral part of the **Transform** class.
//!
//! ## Transformations
//!
//! A **Transform** stores a matrix together with its inverse, so
//! shapes can move rays into their object space and results back into
//! world space without ever inverting a matrix at intersection time.
//! When a new **Transform** is created, it defaults to the *identity
//! transformation*.
//!
//! ## Rounding Error
//!
//! Applying a transform to a point rounds every coordinate. The
//! **_with_error** variants return a conservative bound on that
//! rounding error; shapes keep it with their hit points so secondary
//! rays can be offset far enough not to re-intersect the surface.

// std
use std::ops::Mul;
// others
use strum::IntoEnumIterator;
// pbrt
use crate::core::geometry::{bnd3_union_pnt3f, nrm_faceforward_nrm, vec3_dot_vec3f};
use crate::core::geometry::{Bounds3f, Normal3f, Point3f, Ray, Vector3f, XYZEnum};
use crate::core::interaction::SurfaceInteraction;
use crate::core::pbrt::Float;
use crate::core::pbrt::{gamma, radians};

// see transform.h

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4x4 {
    pub m: [[Float; 4]; 4],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Matrix4x4 {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }
}

impl Matrix4x4 {
    pub fn transpose(m: &Matrix4x4) -> Matrix4x4 {
        let mut r: Matrix4x4 = Matrix4x4::default();
        for i in 0..4 {
            for j in 0..4 {
                r.m[i][j] = m.m[j][i];
            }
        }
        r
    }
}

/// The product of two matrices.
pub fn mtx_mul(m1: &Matrix4x4, m2: &Matrix4x4) -> Matrix4x4 {
    let mut r: Matrix4x4 = Matrix4x4::default();
    for i in 0..4 {
        for j in 0..4 {
            r.m[i][j] = m1.m[i][0] * m2.m[0][j]
                + m1.m[i][1] * m2.m[1][j]
                + m1.m[i][2] * m2.m[2][j]
                + m1.m[i][3] * m2.m[3][j];
        }
    }
    r
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Transform {
    pub m: Matrix4x4,
    pub m_inv: Matrix4x4,
}

impl Transform {
    pub fn inverse(t: &Transform) -> Transform {
        Transform {
            m: t.m_inv,
            m_inv: t.m,
        }
    }
    /// A transform changes the handedness of a coordinate system if the
    /// determinant of its upper-left 3x3 submatrix is negative.
    pub fn swaps_handedness(&self) -> bool {
        let m = &self.m.m;
        let det: Float = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
        det < 0.0 as Float
    }
    pub fn translate(delta: &Vector3f) -> Transform {
        let mut m: Matrix4x4 = Matrix4x4::default();
        let mut m_inv: Matrix4x4 = Matrix4x4::default();
        m.m[0][3] = delta.x;
        m.m[1][3] = delta.y;
        m.m[2][3] = delta.z;
        m_inv.m[0][3] = -delta.x;
        m_inv.m[1][3] = -delta.y;
        m_inv.m[2][3] = -delta.z;
        Transform { m, m_inv }
    }
    pub fn scale(x: Float, y: Float, z: Float) -> Transform {
        let mut m: Matrix4x4 = Matrix4x4::default();
        let mut m_inv: Matrix4x4 = Matrix4x4::default();
        m.m[0][0] = x;
        m.m[1][1] = y;
        m.m[2][2] = z;
        m_inv.m[0][0] = 1.0 as Float / x;
        m_inv.m[1][1] = 1.0 as Float / y;
        m_inv.m[2][2] = 1.0 as Float / z;
        Transform { m, m_inv }
    }
    /// Rotation by *theta* degrees around the given coordinate axis.
    /// The inverse of a rotation is its transpose.
    fn rotate_axis(theta: Float, a: usize, b: usize) -> Transform {
        let (sin_theta, cos_theta) = radians(theta).sin_cos();
        let mut m: Matrix4x4 = Matrix4x4::default();
        m.m[a][a] = cos_theta;
        m.m[a][b] = -sin_theta;
        m.m[b][a] = sin_theta;
        m.m[b][b] = cos_theta;
        Transform {
            m,
            m_inv: Matrix4x4::transpose(&m),
        }
    }
    pub fn rotate_x(theta: Float) -> Transform {
        Transform::rotate_axis(theta, 1, 2)
    }
    pub fn rotate_y(theta: Float) -> Transform {
        Transform::rotate_axis(theta, 2, 0)
    }
    pub fn rotate_z(theta: Float) -> Transform {
        Transform::rotate_axis(theta, 0, 1)
    }
    /// Applies the affine part of the matrix to (x, y, z, 1) and
    /// returns the homogeneous result.
    fn apply_to_point(&self, p: &Point3f) -> [Float; 4] {
        let mut r: [Float; 4] = [0.0; 4];
        for (i, row) in self.m.m.iter().enumerate() {
            r[i] = row[0] * p.x + row[1] * p.y + row[2] * p.z + row[3];
        }
        r
    }
    fn divide_by_w(r: [Float; 4]) -> Point3f {
        let wp: Float = r[3];
        assert!(wp != 0.0, "wp = {:?} != 0.0", wp);
        if wp == 1.0 as Float {
            Point3f {
                x: r[0],
                y: r[1],
                z: r[2],
            }
        } else {
            let inv: Float = 1.0 as Float / wp;
            Point3f {
                x: inv * r[0],
                y: inv * r[1],
                z: inv * r[2],
            }
        }
    }
    /// Sum of the absolute values of the terms contributing to each
    /// transformed coordinate.
    fn abs_sum(&self, p: &Point3f) -> Vector3f {
        let m = &self.m.m;
        let mut sum: Vector3f = Vector3f::default();
        for (i, axis) in XYZEnum::iter().enumerate() {
            sum[axis] = (m[i][0] * p.x).abs()
                + (m[i][1] * p.y).abs()
                + (m[i][2] * p.z).abs()
                + m[i][3].abs();
        }
        sum
    }
    pub fn transform_point(&self, p: &Point3f) -> Point3f {
        Transform::divide_by_w(self.apply_to_point(p))
    }
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        let m = &self.m.m;
        Vector3f {
            x: m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            y: m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            z: m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        }
    }
    /// Normals transform with the transpose of the inverse matrix.
    pub fn transform_normal(&self, n: &Normal3f) -> Normal3f {
        let mi = &self.m_inv.m;
        Normal3f {
            x: mi[0][0] * n.x + mi[1][0] * n.y + mi[2][0] * n.z,
            y: mi[0][1] * n.x + mi[1][1] * n.y + mi[2][1] * n.z,
            z: mi[0][2] * n.x + mi[1][2] * n.y + mi[2][2] * n.z,
        }
    }
    pub fn transform_bounds(&self, b: &Bounds3f) -> Bounds3f {
        let mut ret: Bounds3f = Bounds3f::default();
        for corner in 0..8_u8 {
            ret = bnd3_union_pnt3f(&ret, &self.transform_point(&b.corner(corner)));
        }
        ret
    }
    pub fn transform_point_with_error(&self, p: &Point3f, p_error: &mut Vector3f) -> Point3f {
        let r: [Float; 4] = self.apply_to_point(p);
        *p_error = self.abs_sum(p) * gamma(3_i32);
        Transform::divide_by_w(r)
    }
    /// Transforms a point that already carries an error bound
    /// *pt_error*; the result accounts for both the incoming error and
    /// the rounding of this transformation.
    pub fn transform_point_with_abs_error(
        &self,
        pt: &Point3f,
        pt_error: &Vector3f,
        abs_error: &mut Vector3f,
    ) -> Point3f {
        let m = &self.m.m;
        let r: [Float; 4] = self.apply_to_point(pt);
        let sum: Vector3f = self.abs_sum(pt);
        for (i, axis) in XYZEnum::iter().enumerate() {
            abs_error[axis] = (gamma(3_i32) + 1.0 as Float)
                * (m[i][0].abs() * pt_error.x
                    + m[i][1].abs() * pt_error.y
                    + m[i][2].abs() * pt_error.z)
                + gamma(3_i32) * sum[axis];
        }
        Transform::divide_by_w(r)
    }
    pub fn transform_vector_with_error(&self, v: &Vector3f, abs_error: &mut Vector3f) -> Vector3f {
        let m = &self.m.m;
        for (i, axis) in XYZEnum::iter().enumerate() {
            abs_error[axis] =
                gamma(3_i32) * ((m[i][0] * v.x).abs() + (m[i][1] * v.y).abs() + (m[i][2] * v.z).abs());
        }
        self.transform_vector(v)
    }
    /// Transforms the ray and reports error bounds for its origin and
    /// direction. The origin is advanced to the edge of its error box
    /// along the direction; *t_max* is kept as is.
    pub fn transform_ray_with_error(
        &self,
        r: &Ray,
        o_error: &mut Vector3f,
        d_error: &mut Vector3f,
    ) -> Ray {
        let mut o: Point3f = self.transform_point_with_error(&r.o, o_error);
        let d: Vector3f = self.transform_vector_with_error(&r.d, d_error);
        let length_squared: Float = d.length_squared();
        if length_squared > 0.0 as Float {
            let dt: Float = vec3_dot_vec3f(&d.abs(), o_error) / length_squared;
            o += d * dt;
        }
        Ray {
            o,
            d,
            t_max: r.t_max.clone(),
            time: r.time,
        }
    }
    pub fn transform_surface_interaction(&self, si: &mut SurfaceInteraction) {
        let mut p_error: Vector3f = Vector3f::default();
        let p: Point3f =
            self.transform_point_with_abs_error(&si.common.p, &si.common.p_error, &mut p_error);
        si.common.p = p;
        si.common.p_error = p_error;
        si.common.n = self.transform_normal(&si.common.n).normalize();
        si.common.wo = self.transform_vector(&si.common.wo).normalize();
        si.dpdu = self.transform_vector(&si.dpdu);
        si.dpdv = self.transform_vector(&si.dpdv);
        si.dndu = self.transform_normal(&si.dndu);
        si.dndv = self.transform_normal(&si.dndv);
        si.shading.n = self.transform_normal(&si.shading.n).normalize();
        si.shading.dpdu = self.transform_vector(&si.shading.dpdu);
        si.shading.dpdv = self.transform_vector(&si.shading.dpdv);
        si.shading.dndu = self.transform_normal(&si.shading.dndu);
        si.shading.dndv = self.transform_normal(&si.shading.dndv);
        si.shading.n = nrm_faceforward_nrm(&si.shading.n, &si.common.n);
    }
}

impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            m: mtx_mul(&self.m, &rhs.m),
            m_inv: mtx_mul(&rhs.m_inv, &self.m_inv),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Float, b: Float) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn translate_moves_points_not_vectors() {
        let t = Transform::translate(&Vector3f {
            x: 1.0,
            y: 2.0,
            z: 3.0,
        });
        let p = t.transform_point(&Point3f::default());
        assert_eq!(p, Point3f { x: 1.0, y: 2.0, z: 3.0 });
        let v = Vector3f {
            x: 0.0,
            y: 0.0,
            z: 1.0,
        };
        assert_eq!(t.transform_vector(&v), v);
        let back = Transform::inverse(&t).transform_point(&p);
        assert_eq!(back, Point3f::default());
    }

    #[test]
    fn rotation_and_inverse_compose_to_identity() {
        let r = Transform::rotate_y(37.0);
        let id = r * Transform::inverse(&r);
        for i in 0..4 {
            for j in 0..4 {
                let expected: Float = if i == j { 1.0 } else { 0.0 };
                assert!(approx(id.m.m[i][j], expected));
            }
        }
        let x = XYZEnum::X.unit_vector();
        let rz = Transform::rotate_z(90.0).transform_vector(&x);
        assert!(approx(rz.x, 0.0) && approx(rz.y, 1.0));
    }

    #[test]
    fn negative_scale_swaps_handedness() {
        assert!(Transform::scale(-1.0, 1.0, 1.0).swaps_handedness());
        assert!(!Transform::scale(2.0, 2.0, 2.0).swaps_handedness());
    }

    #[test]
    fn normals_stay_perpendicular_under_nonuniform_scale() {
        let t = Transform::scale(4.0, 1.0, 1.0);
        let v = Vector3f {
            x: 1.0,
            y: 1.0,
            z: 0.0,
        };
        let n = Normal3f {
            x: 1.0,
            y: -1.0,
            z: 0.0,
        };
        let tv = t.transform_vector(&v);
        let tn = t.transform_normal(&n);
        assert!(approx(tv.x * tn.x + tv.y * tn.y + tv.z * tn.z, 0.0));
    }

    #[test]
    fn point_error_bound_is_conservative() {
        let t = Transform::translate(&Vector3f {
            x: 0.1,
            y: 0.2,
            z: 0.3,
        }) * Transform::rotate_x(30.0);
        let p = Point3f {
            x: 1.5,
            y: -2.25,
            z: 3.125,
        };
        let mut err = Vector3f::default();
        let tp = t.transform_point_with_error(&p, &mut err);
        // recompute in double precision
        let m = &t.m.m;
        let exact_y: f64 = m[1][0] as f64 * p.x as f64
            + m[1][1] as f64 * p.y as f64
            + m[1][2] as f64 * p.z as f64
            + m[1][3] as f64;
        assert!((tp.y as f64 - exact_y).abs() <= err.y as f64);
        assert!(err.x > 0.0 && err.y > 0.0 && err.z > 0.0);
    }

    #[test]
    fn bounds_transform_contains_all_corners() {
        let b = Bounds3f::new(
            Point3f {
                x: -1.0,
                y: -1.0,
                z: -1.0,
            },
            Point3f { x: 1.0, y: 1.0, z: 1.0 },
        );
        let wb = Transform::rotate_z(45.0).transform_bounds(&b);
        assert!(approx(wb.p_max.x, (2.0 as Float).sqrt()));
        assert!(approx(wb.p_min.z, -1.0));
    }
}
