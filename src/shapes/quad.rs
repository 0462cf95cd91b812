//! Axis-aligned quads.
//!
//! A quad lies in the plane where its normal axis is zero and spans
//! *l1* along its u axis and *l2* along its v axis, centered at the
//! object-space origin:
//!
//! | axis | normal | u axis | v axis | uv written as |
//! |------|--------|--------|--------|---------------|
//! | X    | x      | y      | z      | (v, u)        |
//! | Y    | y      | x      | z      | (u, v)        |
//! | Z    | z      | y      | x      | (v, u)        |
//!
//! The X and Z quads store the remapped coordinates (and the matching
//! partial derivatives) in swapped order. Texture coordinates of
//! existing scenes depend on it.

// std
use std::sync::Arc;
// pbrt
use crate::core::geometry::{Bounds3f, Normal3f, Point2f, Point3f, Ray, Vector3f, XYZEnum};
use crate::core::interaction::{InteractionCommon, SurfaceInteraction};
use crate::core::paramset::ParamSet;
use crate::core::pbrt::Float;
use crate::core::shape::Shape;
use crate::core::texture::{FloatTexture, FloatTextureMap};
use crate::core::transform::Transform;
use crate::shapes::create_alpha_mask;

// see quad.h

/// The coordinate axis a quad is perpendicular to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuadAxis {
    X,
    Y,
    Z,
}

impl QuadAxis {
    pub fn normal_axis(self) -> XYZEnum {
        match self {
            QuadAxis::X => XYZEnum::X,
            QuadAxis::Y => XYZEnum::Y,
            QuadAxis::Z => XYZEnum::Z,
        }
    }
    /// Object-space axis spanned by *l1* and parameterized by u.
    pub fn u_axis(self) -> XYZEnum {
        match self {
            QuadAxis::X => XYZEnum::Y,
            QuadAxis::Y => XYZEnum::X,
            QuadAxis::Z => XYZEnum::Y,
        }
    }
    /// Object-space axis spanned by *l2* and parameterized by v.
    pub fn v_axis(self) -> XYZEnum {
        match self {
            QuadAxis::X => XYZEnum::Z,
            QuadAxis::Y => XYZEnum::Z,
            QuadAxis::Z => XYZEnum::X,
        }
    }
    /// Whether (u, v) end up in the interaction as (v, u).
    pub fn swaps_uv(self) -> bool {
        match self {
            QuadAxis::X | QuadAxis::Z => true,
            QuadAxis::Y => false,
        }
    }
}

/// Object-space result of a successful plane test.
struct QuadHit {
    t: Float,
    p: Point3f,
    wo: Vector3f,
    time: Float,
}

#[derive(Clone)]
pub struct Quad {
    pub axis: QuadAxis,
    pub l1: Float,
    pub l2: Float,
    pub dir: Float,
    pub u0: Float,
    pub v0: Float,
    pub u1: Float,
    pub v1: Float,
    pub du: Float,
    pub dv: Float,
    pub alpha_mask: Option<FloatTexture>,
    // inherited from class Shape (see shape.h)
    pub object_to_world: Transform,
    pub world_to_object: Transform,
    pub reverse_orientation: bool,
    pub transform_swaps_handedness: bool,
}

impl Quad {
    pub fn new(
        axis: QuadAxis,
        object_to_world: Transform,
        world_to_object: Transform,
        reverse_orientation: bool,
        l1: Float,
        l2: Float,
        dir: Float,
        u0: Float,
        v0: Float,
        u1: Float,
        v1: Float,
        alpha_mask: Option<FloatTexture>,
    ) -> Self {
        Quad {
            axis,
            l1,
            l2,
            dir,
            u0,
            v0,
            u1,
            v1,
            du: u1 - u0,
            dv: v1 - v0,
            alpha_mask,
            // Shape
            object_to_world,
            world_to_object,
            reverse_orientation,
            transform_swaps_handedness: object_to_world.swaps_handedness(),
        }
    }
    fn in_range(&self, u_coord: Float, v_coord: Float) -> bool {
        -self.l1 / 2.0 <= u_coord
            && u_coord <= self.l1 / 2.0
            && -self.l2 / 2.0 <= v_coord
            && v_coord <= self.l2 / 2.0
    }
    /// The plane axis scaled by the sign of *dir*, flipped for reverse
    /// orientation.
    fn object_normal(&self) -> Normal3f {
        let mut n: Normal3f = self.axis.normal_axis().unit_normal();
        if self.dir < 0.0 as Float {
            n *= -1.0 as Float;
        }
        if self.reverse_orientation {
            n *= -1.0 as Float;
        }
        n
    }
    fn hit_in_object_space(&self, r: &Ray) -> Option<QuadHit> {
        // transform _Ray_ to object space
        let mut o_err: Vector3f = Vector3f::default();
        let mut d_err: Vector3f = Vector3f::default();
        let ray: Ray = self
            .world_to_object
            .transform_ray_with_error(r, &mut o_err, &mut d_err);
        let axis: XYZEnum = self.axis.normal_axis();
        // reject intersections for rays parallel to the quad's plane
        if ray.d[axis] == 0.0 as Float {
            return None;
        }
        let t_shape_hit: Float = -ray.o[axis] / ray.d[axis];
        if t_shape_hit <= 0.0 as Float || t_shape_hit >= ray.t_max.get() {
            return None;
        }
        let mut p_hit: Point3f = ray.position(t_shape_hit);
        // refine quad intersection point
        p_hit[axis] = 0.0 as Float;
        if !self.in_range(p_hit[self.axis.u_axis()], p_hit[self.axis.v_axis()]) {
            return None;
        }
        Some(QuadHit {
            t: t_shape_hit,
            p: p_hit,
            wo: -ray.d,
            time: ray.time,
        })
    }
    /// Differential geometry at an object-space hit.
    fn object_interaction(&self, hit: &QuadHit) -> SurfaceInteraction {
        let u_axis: XYZEnum = self.axis.u_axis();
        let v_axis: XYZEnum = self.axis.v_axis();
        // find parametric representation of quad hit
        let u: Float = self.du * (hit.p[u_axis] / self.l1 + 0.5) + self.u0;
        let v: Float = self.dv * (hit.p[v_axis] / self.l2 + 0.5) + self.v0;
        let dpdu: Vector3f = u_axis.unit_vector() * (self.l1 / self.du);
        let dpdv: Vector3f = v_axis.unit_vector() * (self.l2 / self.dv);
        let (uv_hit, dpdu, dpdv) = if self.axis.swaps_uv() {
            (Point2f { x: v, y: u }, dpdv, dpdu)
        } else {
            (Point2f { x: u, y: v }, dpdu, dpdv)
        };
        // the quad is flat
        let dndu: Normal3f = Normal3f::default();
        let dndv: Normal3f = Normal3f::default();
        // the hit point was projected onto the plane exactly
        let p_error: Vector3f = Vector3f::default();
        let mut isect: SurfaceInteraction = SurfaceInteraction::new(
            &hit.p, &p_error, uv_hit, &hit.wo, &dpdu, &dpdv, &dndu, &dndv, hit.time, false,
        );
        isect.set_normal(&self.object_normal());
        isect
    }
    fn cut_away(&self, isect: &SurfaceInteraction) -> bool {
        match &self.alpha_mask {
            Some(alpha_mask) => alpha_mask.evaluate(isect) == 0.0 as Float,
            None => false,
        }
    }
}

impl Shape for Quad {
    fn object_bound(&self) -> Bounds3f {
        // a cube keeps the box from collapsing along the normal axis
        let rad: Float = self.l1.max(self.l2) / 2.0;
        Bounds3f {
            p_min: Point3f {
                x: -rad,
                y: -rad,
                z: -rad,
            },
            p_max: Point3f {
                x: rad,
                y: rad,
                z: rad,
            },
        }
    }
    fn world_bound(&self) -> Bounds3f {
        self.object_to_world.transform_bounds(&self.object_bound())
    }
    /// Full intersection: the world-space interaction and the ray
    /// parameter of the hit.
    fn intersect(&self, r: &Ray, test_alpha_texture: bool) -> Option<(SurfaceInteraction, Float)> {
        let hit: QuadHit = self.hit_in_object_space(r)?;
        let mut isect: SurfaceInteraction = self.object_interaction(&hit);
        if test_alpha_texture && self.cut_away(&isect) {
            return None;
        }
        self.object_to_world.transform_surface_interaction(&mut isect);
        Some((isect, hit.t))
    }
    /// Only answers whether the ray hits; used for shadow rays.
    fn intersect_p(&self, r: &Ray, test_alpha_texture: bool) -> bool {
        match self.hit_in_object_space(r) {
            Some(hit) => {
                if test_alpha_texture && self.alpha_mask.is_some() {
                    !self.cut_away(&self.object_interaction(&hit))
                } else {
                    true
                }
            }
            None => false,
        }
    }
    fn get_reverse_orientation(&self) -> bool {
        self.reverse_orientation
    }
    fn get_transform_swaps_handedness(&self) -> bool {
        self.transform_swaps_handedness
    }
    /// Object-space area.
    fn area(&self) -> Float {
        self.l1 * self.l2
    }
    /// Uniformly samples a point on the quad. The sample *u* is given
    /// in the remapped [u0, u1] x [v0, v1] domain.
    fn sample(&self, u: &Point2f, pdf: &mut Float) -> InteractionCommon {
        let mut p_obj: Point3f = Point3f::default();
        p_obj[self.axis.u_axis()] = ((u.x - self.u0) / self.du - 0.5) * self.l1;
        p_obj[self.axis.v_axis()] = ((u.y - self.v0) / self.dv - 0.5) * self.l2;
        let mut n_obj: Normal3f = self.axis.normal_axis().unit_normal();
        if self.dir < 0.0 as Float {
            n_obj *= -1.0 as Float;
        }
        let mut it: InteractionCommon = InteractionCommon::default();
        it.n = self.object_to_world.transform_normal(&n_obj).normalize();
        if self.reverse_orientation {
            it.n *= -1.0 as Float;
        }
        let pt_error: Vector3f = Vector3f::default();
        it.p = self
            .object_to_world
            .transform_point_with_abs_error(&p_obj, &pt_error, &mut it.p_error);
        *pdf = 1.0 as Float / self.area();
        it
    }
}

/// Creates a quad perpendicular to *axis* from the parameters `l1`,
/// `l2`, `u0`, `v0`, `u1`, `v1`, `dir` and `alpha`.
pub fn create_quad_shape(
    axis: QuadAxis,
    object_to_world: &Transform,
    world_to_object: &Transform,
    reverse_orientation: bool,
    params: &ParamSet,
    float_textures: &FloatTextureMap,
) -> Arc<Quad> {
    let l1: Float = params.find_one_float("l1", 1.0);
    let l2: Float = params.find_one_float("l2", 1.0);
    let u0: Float = params.find_one_float("u0", 0.0);
    let v0: Float = params.find_one_float("v0", 0.0);
    let u1: Float = params.find_one_float("u1", 1.0);
    let v1: Float = params.find_one_float("v1", 1.0);
    let dir: Float = params.find_one_float("dir", 1.0);
    let alpha_mask: Option<FloatTexture> = create_alpha_mask(params, float_textures);
    Arc::new(Quad::new(
        axis,
        *object_to_world,
        *world_to_object,
        reverse_orientation,
        l1,
        l2,
        dir,
        u0,
        v0,
        u1,
        v1,
        alpha_mask,
    ))
}
