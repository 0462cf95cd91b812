//! The geometry of a particular point on a surface is represented by
//! a **SurfaceInteraction**. Having this abstraction lets most of the
//! system work with points on surfaces without needing to consider
//! the particular type of geometric shape the points lie on; the
//! **SurfaceInteraction** abstraction supplies enough information
//! about the surface point to allow the shading and geometric
//! operations in the rest of the renderer to be implemented
//! generically.

// std
use std::cell::Cell;
// pbrt
use crate::core::geometry::{pnt3_offset_ray_origin, vec3_cross_vec3};
use crate::core::geometry::{Normal3f, Point2f, Point3f, Ray, Vector3f};
use crate::core::pbrt::Float;
use crate::core::pbrt::SHADOW_EPSILON;

// see interaction.h

#[derive(Debug, Default, Copy, Clone)]
pub struct InteractionCommon {
    // Interaction Public Data
    pub p: Point3f,
    pub time: Float,
    pub p_error: Vector3f,
    pub wo: Vector3f,
    pub n: Normal3f,
}

impl InteractionCommon {
    /// A ray leaving the interaction in direction *d*, with its origin
    /// offset past the error box of *p*.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        let o: Point3f = pnt3_offset_ray_origin(&self.p, &self.p_error, &self.n, d);
        Ray {
            o,
            d: *d,
            t_max: Cell::new(std::f32::INFINITY),
            time: self.time,
        }
    }
    /// A shadow ray towards another interaction; it stops just short
    /// of the target.
    pub fn spawn_ray_to(&self, it: &InteractionCommon) -> Ray {
        let origin: Point3f =
            pnt3_offset_ray_origin(&self.p, &self.p_error, &self.n, &(it.p - self.p));
        let target: Point3f = pnt3_offset_ray_origin(&it.p, &it.p_error, &it.n, &(origin - it.p));
        Ray {
            o: origin,
            d: target - origin,
            t_max: Cell::new(1.0 - SHADOW_EPSILON),
            time: self.time,
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct Shading {
    pub n: Normal3f,
    pub dpdu: Vector3f,
    pub dpdv: Vector3f,
    pub dndu: Normal3f,
    pub dndv: Normal3f,
}

#[derive(Debug, Default, Copy, Clone)]
pub struct SurfaceInteraction {
    pub common: InteractionCommon,
    // SurfaceInteraction Public Data
    pub uv: Point2f,
    pub dpdu: Vector3f,
    pub dpdv: Vector3f,
    pub dndu: Normal3f,
    pub dndv: Normal3f,
    pub shading: Shading,
}

impl SurfaceInteraction {
    /// The geometric normal is derived from the partial derivatives
    /// and flipped when *flip_normal* is set (reverse orientation
    /// exclusive-or a handedness-swapping transform).
    pub fn new(
        p: &Point3f,
        p_error: &Vector3f,
        uv: Point2f,
        wo: &Vector3f,
        dpdu: &Vector3f,
        dpdv: &Vector3f,
        dndu: &Normal3f,
        dndv: &Normal3f,
        time: Float,
        flip_normal: bool,
    ) -> Self {
        let mut n: Normal3f = Normal3f::from(vec3_cross_vec3(dpdu, dpdv).normalize());
        if flip_normal {
            n *= -1.0 as Float;
        }
        // initialize shading geometry from true geometry
        let shading: Shading = Shading {
            n,
            dpdu: *dpdu,
            dpdv: *dpdv,
            dndu: *dndu,
            dndv: *dndv,
        };
        SurfaceInteraction {
            common: InteractionCommon {
                p: *p,
                time,
                p_error: *p_error,
                wo: wo.normalize(),
                n,
            },
            uv,
            dpdu: *dpdu,
            dpdv: *dpdv,
            dndu: *dndu,
            dndv: *dndv,
            shading,
        }
    }
    /// Overrides the geometric and shading normal, for shapes whose
    /// orientation is fixed independently of their parameterization.
    pub fn set_normal(&mut self, n: &Normal3f) {
        let n: Normal3f = n.normalize();
        self.common.n = n;
        self.shading.n = n;
    }
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        self.common.spawn_ray(d)
    }
}
