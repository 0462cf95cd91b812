//! Almost all nontrivial graphics programs are built on a foundation
//! of geometric classes. These classes represent mathematical
//! constructs like points, vectors, and rays.
//!
//! # Points, Vectors and Normals
//!
//! A **point** is a zero-dimensional location, a **vector** a
//! direction, and a **normal** a direction perpendicular to a surface.
//! All three use x, y, z coordinates but behave differently under
//! transformations, so they are kept as distinct types.
//!
//! ```rust
//! use rs_pbrt_quad::core::geometry::{Point3f, Vector3f};
//!
//! let origin = Point3f { x: 0.0, y: 0.0, z: 0.0 };
//! let up = Vector3f { x: 0.0, y: 1.0, z: 0.0 };
//! let p: Point3f = origin + up * 2.0;
//! assert_eq!(p.y, 2.0);
//! ```
//!
//! # Rays
//!
//! A **ray** is a semi-infinite line specified by its origin and
//! direction. The parametric range of the ray is limited by *t_max*,
//! which is kept in a `Cell` so a caller can shorten the ray after a
//! closer hit was found without needing mutable access.
//!
//! ```rust
//! use rs_pbrt_quad::core::geometry::{Point3f, Ray, Vector3f};
//! use std::cell::Cell;
//!
//! let ray = Ray {
//!     o: Point3f { x: 0.0, y: 0.0, z: 5.0 },
//!     d: Vector3f { x: 0.0, y: 0.0, z: -1.0 },
//!     t_max: Cell::new(std::f32::INFINITY),
//!     time: 0.0,
//! };
//! assert_eq!(ray.position(5.0).z, 0.0);
//! ```
//!
//! # Bounding Boxes
//!
//! **Bounds3f** represents an axis-aligned box, used by acceleration
//! structures to cull shapes.

// std
use std::cell::Cell;
use std::ops;
use std::ops::{Index, IndexMut};
// others
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
// pbrt
use crate::core::pbrt::Float;
use crate::core::pbrt::{next_float_down, next_float_up};

// see geometry.h

#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum XYZEnum {
    X = 0,
    Y = 1,
    Z = 2,
}

impl XYZEnum {
    /// Unit vector along the axis.
    pub fn unit_vector(self) -> Vector3f {
        let mut v: Vector3f = Vector3f::default();
        v[self] = 1.0;
        v
    }
    /// Unit normal along the axis.
    pub fn unit_normal(self) -> Normal3f {
        Normal3f::from(self.unit_vector())
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point2f {
    pub x: Float,
    pub y: Float,
}

impl_op_ex!(+|a: &Point2f, b: &Point2f| -> Point2f {
    Point2f {
        x: a.x + b.x,
        y: a.y + b.y,
    }
});

impl_op_ex!(*|a: &Point2f, b: Float| -> Point2f {
    Point2f {
        x: a.x * b,
        y: a.y * b,
    }
});

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Vector3f {
    pub fn abs(&self) -> Vector3f {
        Vector3f {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
    /// Compute a new vector pointing in the same direction but with unit
    /// length.
    pub fn normalize(&self) -> Vector3f {
        *self / self.length()
    }
}

impl Index<XYZEnum> for Vector3f {
    type Output = Float;
    fn index(&self, index: XYZEnum) -> &Float {
        match index {
            XYZEnum::X => &self.x,
            XYZEnum::Y => &self.y,
            XYZEnum::Z => &self.z,
        }
    }
}

impl IndexMut<XYZEnum> for Vector3f {
    fn index_mut(&mut self, index: XYZEnum) -> &mut Float {
        match index {
            XYZEnum::X => &mut self.x,
            XYZEnum::Y => &mut self.y,
            XYZEnum::Z => &mut self.z,
        }
    }
}

impl From<Point3f> for Vector3f {
    fn from(p: Point3f) -> Self {
        Vector3f {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<Normal3f> for Vector3f {
    fn from(n: Normal3f) -> Self {
        Vector3f {
            x: n.x,
            y: n.y,
            z: n.z,
        }
    }
}

impl_op!(-|a: Vector3f| -> Vector3f {
    Vector3f {
        x: -a.x,
        y: -a.y,
        z: -a.z,
    }
});

impl_op_ex!(+|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(-|a: &Vector3f, b: &Vector3f| -> Vector3f {
    Vector3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(*|a: &Vector3f, b: Float| -> Vector3f {
    Vector3f {
        x: a.x * b,
        y: a.y * b,
        z: a.z * b,
    }
});

impl_op_ex!(/|a: &Vector3f, b: Float| -> Vector3f {
    assert_ne!(b, 0.0 as Float);
    let inv: Float = 1.0 as Float / b;
    Vector3f {
        x: a.x * inv,
        y: a.y * inv,
        z: a.z * inv,
    }
});

impl_op!(+= |a: &mut Vector3f, b: Vector3f| {
    a.x += b.x;
    a.y += b.y;
    a.z += b.z;
});

impl_op!(*= |a: &mut Vector3f, b: Float| {
    a.x *= b;
    a.y *= b;
    a.z *= b;
});

/// Product of the Euclidean magnitudes of the two vectors and the
/// cosine of the angle between them.
pub fn vec3_dot_vec3f(v1: &Vector3f, v2: &Vector3f) -> Float {
    v1.x * v2.x + v1.y * v2.y + v1.z * v2.z
}

pub fn vec3_dot_nrmf(v1: &Vector3f, n2: &Normal3f) -> Float {
    v1.x * n2.x + v1.y * n2.y + v1.z * n2.z
}

/// Given two vectors in 3D, the cross product is a vector that is
/// perpendicular to both of them.
pub fn vec3_cross_vec3(v1: &Vector3f, v2: &Vector3f) -> Vector3f {
    // use double precision to avoid catastrophic cancellation
    let v1x: f64 = v1.x as f64;
    let v1y: f64 = v1.y as f64;
    let v1z: f64 = v1.z as f64;
    let v2x: f64 = v2.x as f64;
    let v2y: f64 = v2.y as f64;
    let v2z: f64 = v2.z as f64;
    Vector3f {
        x: ((v1y * v2z) - (v1z * v2y)) as Float,
        y: ((v1z * v2x) - (v1x * v2z)) as Float,
        z: ((v1x * v2y) - (v1y * v2x)) as Float,
    }
}

pub fn vec3_max_componentf(v: &Vector3f) -> Float {
    v.x.max(v.y.max(v.z))
}

/// Index of the component with the largest value.
pub fn vec3_max_dimensionf(v: &Vector3f) -> XYZEnum {
    if v.x > v.y {
        if v.x > v.z {
            XYZEnum::X
        } else {
            XYZEnum::Z
        }
    } else if v.y > v.z {
        XYZEnum::Y
    } else {
        XYZEnum::Z
    }
}

/// Permute the coordinate values according to the povided axes.
pub fn vec3_permutef(v: &Vector3f, x: XYZEnum, y: XYZEnum, z: XYZEnum) -> Vector3f {
    Vector3f {
        x: v[x],
        y: v[y],
        z: v[z],
    }
}

/// Construct a local coordinate system given only a single 3D vector.
pub fn vec3_coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2: Vector3f = if v1.x.abs() > v1.y.abs() {
        Vector3f {
            x: -v1.z,
            y: 0.0,
            z: v1.x,
        } / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f {
            x: 0.0,
            y: v1.z,
            z: -v1.y,
        } / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3: Vector3f = vec3_cross_vec3(v1, &v2);
    (v2, v3)
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Point3f {
    pub fn abs(&self) -> Point3f {
        Point3f {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }
}

impl Index<XYZEnum> for Point3f {
    type Output = Float;
    fn index(&self, index: XYZEnum) -> &Float {
        match index {
            XYZEnum::X => &self.x,
            XYZEnum::Y => &self.y,
            XYZEnum::Z => &self.z,
        }
    }
}

impl IndexMut<XYZEnum> for Point3f {
    fn index_mut(&mut self, index: XYZEnum) -> &mut Float {
        match index {
            XYZEnum::X => &mut self.x,
            XYZEnum::Y => &mut self.y,
            XYZEnum::Z => &mut self.z,
        }
    }
}

impl_op_ex!(+|a: &Point3f, b: &Point3f| -> Point3f {
    Point3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(+|a: &Point3f, b: &Vector3f| -> Point3f {
    Point3f {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
});

impl_op_ex!(-|a: &Point3f, b: &Point3f| -> Vector3f {
    Vector3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(-|a: &Point3f, b: &Vector3f| -> Point3f {
    Point3f {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
});

impl_op_ex!(*|a: &Point3f, b: Float| -> Point3f {
    Point3f {
        x: a.x * b,
        y: a.y * b,
        z: a.z * b,
    }
});

impl_op!(+= |a: &mut Point3f, b: Vector3f| {
    a.x += b.x;
    a.y += b.y;
    a.z += b.z;
});

pub fn pnt3_permutef(p: &Point3f, x: XYZEnum, y: XYZEnum, z: XYZEnum) -> Point3f {
    Point3f {
        x: p[x],
        y: p[y],
        z: p[z],
    }
}

pub fn pnt3_distance_squaredf(p1: &Point3f, p2: &Point3f) -> Float {
    (p1 - p2).length_squared()
}

/// When tracing spawned rays leaving the intersection point p, we
/// offset their origins enough to ensure that they are past the
/// boundary of the error box and thus won't incorrectly re-intersect
/// the surface.
pub fn pnt3_offset_ray_origin(
    p: &Point3f,
    p_error: &Vector3f,
    n: &Normal3f,
    w: &Vector3f,
) -> Point3f {
    let d: Float = nrm_dot_vec3f(&nrm_absf(n), p_error);
    let mut offset: Vector3f = Vector3f::from(*n) * d;
    if vec3_dot_nrmf(w, n) < 0.0 as Float {
        offset = -offset;
    }
    let mut po: Point3f = *p + offset;
    // round offset point _po_ away from _p_
    for i in XYZEnum::iter() {
        if offset[i] > 0.0 as Float {
            po[i] = next_float_up(po[i]);
        } else if offset[i] < 0.0 as Float {
            po[i] = next_float_down(po[i]);
        }
    }
    po
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Normal3f {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

impl Normal3f {
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }
    pub fn normalize(&self) -> Normal3f {
        *self / self.length()
    }
}

impl Index<XYZEnum> for Normal3f {
    type Output = Float;
    fn index(&self, index: XYZEnum) -> &Float {
        match index {
            XYZEnum::X => &self.x,
            XYZEnum::Y => &self.y,
            XYZEnum::Z => &self.z,
        }
    }
}

impl From<Vector3f> for Normal3f {
    fn from(v: Vector3f) -> Self {
        Normal3f {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl_op!(-|a: Normal3f| -> Normal3f {
    Normal3f {
        x: -a.x,
        y: -a.y,
        z: -a.z,
    }
});

impl_op_ex!(*|a: &Normal3f, b: Float| -> Normal3f {
    Normal3f {
        x: a.x * b,
        y: a.y * b,
        z: a.z * b,
    }
});

impl_op_ex!(/|a: &Normal3f, b: Float| -> Normal3f {
    assert_ne!(b, 0.0 as Float);
    let inv: Float = 1.0 as Float / b;
    Normal3f {
        x: a.x * inv,
        y: a.y * inv,
        z: a.z * inv,
    }
});

impl_op!(*= |a: &mut Normal3f, b: Float| {
    a.x *= b;
    a.y *= b;
    a.z *= b;
});

pub fn nrm_dot_vec3f(n1: &Normal3f, v2: &Vector3f) -> Float {
    n1.x * v2.x + n1.y * v2.y + n1.z * v2.z
}

pub fn nrm_dot_nrmf(n1: &Normal3f, n2: &Normal3f) -> Float {
    n1.x * n2.x + n1.y * n2.y + n1.z * n2.z
}

pub fn nrm_abs_dot_vec3f(n1: &Normal3f, v2: &Vector3f) -> Float {
    nrm_dot_vec3f(n1, v2).abs()
}

pub fn nrm_absf(n: &Normal3f) -> Normal3f {
    Normal3f {
        x: n.x.abs(),
        y: n.y.abs(),
        z: n.z.abs(),
    }
}

/// Flip a surface normal so that it lies in the same hemisphere as a
/// given normal.
pub fn nrm_faceforward_nrm(n: &Normal3f, n2: &Normal3f) -> Normal3f {
    if nrm_dot_nrmf(n, n2) < 0.0 as Float {
        -(*n)
    } else {
        *n
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds3f {
    pub p_min: Point3f,
    pub p_max: Point3f,
}

// an empty box: any union with a point yields that point
impl Default for Bounds3f {
    fn default() -> Bounds3f {
        let min_num: Float = std::f32::MIN;
        let max_num: Float = std::f32::MAX;
        Bounds3f {
            p_min: Point3f {
                x: max_num,
                y: max_num,
                z: max_num,
            },
            p_max: Point3f {
                x: min_num,
                y: min_num,
                z: min_num,
            },
        }
    }
}

impl Bounds3f {
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        let p_min: Point3f = Point3f {
            x: p1.x.min(p2.x),
            y: p1.y.min(p2.y),
            z: p1.z.min(p2.z),
        };
        let p_max: Point3f = Point3f {
            x: p1.x.max(p2.x),
            y: p1.y.max(p2.y),
            z: p1.z.max(p2.z),
        };
        Bounds3f { p_min, p_max }
    }
    /// One of the eight corners; bit 0 selects x, bit 1 y, bit 2 z.
    pub fn corner(&self, corner: u8) -> Point3f {
        assert!(corner < 8_u8);
        Point3f {
            x: if corner & 1 == 0 {
                self.p_min.x
            } else {
                self.p_max.x
            },
            y: if corner & 2 == 0 {
                self.p_min.y
            } else {
                self.p_max.y
            },
            z: if corner & 4 == 0 {
                self.p_min.z
            } else {
                self.p_max.z
            },
        }
    }
}

/// Given a bounding box and a point, the **bnd3_union_pnt3f()**
/// function returns a new bounding box that encompasses that point as
/// well as the original box.
pub fn bnd3_union_pnt3f(b: &Bounds3f, p: &Point3f) -> Bounds3f {
    Bounds3f {
        p_min: Point3f {
            x: b.p_min.x.min(p.x),
            y: b.p_min.y.min(p.y),
            z: b.p_min.z.min(p.z),
        },
        p_max: Point3f {
            x: b.p_max.x.max(p.x),
            y: b.p_max.y.max(p.y),
            z: b.p_max.z.max(p.z),
        },
    }
}

#[derive(Debug, Default, Clone)]
pub struct Ray {
    /// origin
    pub o: Point3f,
    /// direction
    pub d: Vector3f,
    /// limits the ray to a segment along its infinite extent
    pub t_max: Cell<Float>,
    /// used for animations
    pub time: Float,
}

impl Ray {
    /// An unbounded ray starting at time zero.
    pub fn new(o: Point3f, d: Vector3f) -> Self {
        Ray {
            o,
            d,
            t_max: Cell::new(std::f32::INFINITY),
            time: 0.0 as Float,
        }
    }
    // Point3f operator()(Float t) const { return o + d * t; }
    pub fn position(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product_is_right_handed() {
        let x = XYZEnum::X.unit_vector();
        let y = XYZEnum::Y.unit_vector();
        assert_eq!(vec3_cross_vec3(&x, &y), XYZEnum::Z.unit_vector());
    }

    #[test]
    fn bounds_union_and_corners() {
        let b = Bounds3f::new(
            Point3f { x: 1.0, y: 2.0, z: 3.0 },
            Point3f {
                x: -1.0,
                y: -2.0,
                z: -3.0,
            },
        );
        assert_eq!(b.corner(0), b.p_min);
        assert_eq!(b.corner(7), b.p_max);
        let grown = bnd3_union_pnt3f(&b, &Point3f { x: 5.0, y: 0.0, z: 0.0 });
        assert_eq!(grown.p_max.x, 5.0);
        let empty = Bounds3f::default();
        assert_eq!(bnd3_union_pnt3f(&empty, &b.p_min).p_max, b.p_min);
    }

    #[test]
    fn offset_ray_origin_moves_past_error_box() {
        let p = Point3f::default();
        let p_error = Vector3f {
            x: 0.0,
            y: 0.0,
            z: 1e-3,
        };
        let n = XYZEnum::Z.unit_normal();
        let up = XYZEnum::Z.unit_vector();
        assert!(pnt3_offset_ray_origin(&p, &p_error, &n, &up).z > 1e-3);
        assert!(pnt3_offset_ray_origin(&p, &p_error, &n, &-up).z < -1e-3);
    }

    #[test]
    fn coordinate_system_is_orthonormal() {
        let v = Vector3f {
            x: 0.3,
            y: -0.5,
            z: 0.8,
        }
        .normalize();
        let (v2, v3) = vec3_coordinate_system(&v);
        assert!(vec3_dot_vec3f(&v, &v2).abs() < 1e-5);
        assert!(vec3_dot_vec3f(&v, &v3).abs() < 1e-5);
        assert!(vec3_dot_vec3f(&v2, &v3).abs() < 1e-5);
        assert!((v2.length() - 1.0).abs() < 1e-5);
    }
}
