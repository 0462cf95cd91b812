//! Careful abstraction of geometric shapes in a ray tracer is a key
//! component of a clean system design, and shapes are the ideal
//! candidate for a common interface. All geometric primitives
//! implement the **Shape** trait, and the rest of the renderer can use
//! it without needing any details about the underlying shape.

// pbrt
use crate::core::geometry::{nrm_abs_dot_vec3f, pnt3_distance_squaredf};
use crate::core::geometry::{Bounds3f, Point2f, Ray, Vector3f};
use crate::core::interaction::{InteractionCommon, SurfaceInteraction};
use crate::core::pbrt::Float;

// see shape.h

pub trait Shape {
    fn object_bound(&self) -> Bounds3f;
    fn world_bound(&self) -> Bounds3f;
    /// The closest hit along the ray segment (0, t_max) and its ray
    /// parameter. With *test_alpha_texture* set, hits where the alpha
    /// mask evaluates to zero are ignored.
    fn intersect(&self, r: &Ray, test_alpha_texture: bool) -> Option<(SurfaceInteraction, Float)>;
    fn intersect_p(&self, r: &Ray, test_alpha_texture: bool) -> bool;
    fn get_reverse_orientation(&self) -> bool;
    fn get_transform_swaps_handedness(&self) -> bool;
    fn area(&self) -> Float;
    /// Samples a point on the surface with respect to area; the
    /// density is returned in *pdf*.
    fn sample(&self, u: &Point2f, pdf: &mut Float) -> InteractionCommon;
    fn pdf(&self, _iref: &InteractionCommon) -> Float {
        1.0 as Float / self.area()
    }
    /// Like **sample**, but the density is expressed with respect to
    /// solid angle as seen from *iref*.
    fn sample_with_ref_point(
        &self,
        iref: &InteractionCommon,
        u: &Point2f,
        pdf: &mut Float,
    ) -> InteractionCommon {
        let intr: InteractionCommon = self.sample(u, pdf);
        let mut wi: Vector3f = intr.p - iref.p;
        if wi.length_squared() == 0.0 as Float {
            *pdf = 0.0 as Float;
        } else {
            wi = wi.normalize();
            // convert from area measure to solid angle measure
            *pdf *= pnt3_distance_squaredf(&iref.p, &intr.p) / nrm_abs_dot_vec3f(&intr.n, &-wi);
            if (*pdf).is_infinite() {
                *pdf = 0.0 as Float;
            }
        }
        intr
    }
    /// Solid angle density of sampling direction *wi* from *iref*.
    fn pdf_with_ref_point(&self, iref: &InteractionCommon, wi: &Vector3f) -> Float {
        // intersect sample ray with area light geometry
        let ray: Ray = iref.spawn_ray(wi);
        // alpha textures are ignored here; a fully cut away shape can
        // still act as an invisible emitter
        if let Some((isect_light, _t_hit)) = self.intersect(&ray, false) {
            // convert light sample weight to solid angle measure
            let mut pdf: Float = pnt3_distance_squaredf(&iref.p, &isect_light.common.p)
                / (nrm_abs_dot_vec3f(&isect_light.common.n, &-(*wi)) * self.area());
            if pdf.is_infinite() {
                pdf = 0.0 as Float;
            }
            pdf
        } else {
            0.0 as Float
        }
    }
}
