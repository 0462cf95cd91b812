//! Triangle meshes. Vertex positions are transformed to world space
//! once, when the mesh is created, so individual triangles intersect
//! rays without any per-ray transformation.

// std
use std::sync::Arc;
// others
use log::debug;
// pbrt
use crate::core::error::{Result, ShapeError};
use crate::core::geometry::{
    bnd3_union_pnt3f, pnt3_permutef, vec3_coordinate_system, vec3_cross_vec3, vec3_max_componentf,
    vec3_max_dimensionf, vec3_permutef,
};
use crate::core::geometry::{Bounds3f, Normal3f, Point2f, Point3f, Ray, Vector3f, XYZEnum};
use crate::core::interaction::{InteractionCommon, SurfaceInteraction};
use crate::core::pbrt::{gamma, Float};
use crate::core::sampling::uniform_sample_triangle;
use crate::core::shape::Shape;
use crate::core::texture::FloatTexture;
use crate::core::transform::Transform;

// see triangle.h

pub struct TriangleMesh {
    /// the total number of triangles in the mesh
    pub n_triangles: usize,
    /// three vertex indices per triangle
    pub vertex_indices: Vec<usize>,
    /// the total number of vertices in the mesh
    pub n_vertices: usize,
    /// world space vertex positions
    pub p: Vec<Point3f>,
    /// optional per-vertex texture coordinates (can be empty)
    pub uv: Vec<Point2f>,
    pub alpha_mask: Option<FloatTexture>,
    // inherited from class Shape (see shape.h)
    pub object_to_world: Transform,
    pub world_to_object: Transform,
    pub reverse_orientation: bool,
    pub transform_swaps_handedness: bool,
}

impl TriangleMesh {
    /// Checks the indices and texture coordinates against the vertex
    /// count and moves the vertices into world space.
    pub fn new(
        object_to_world: Transform,
        world_to_object: Transform,
        reverse_orientation: bool,
        vertex_indices: Vec<usize>,
        p: Vec<Point3f>,
        uv: Vec<Point2f>,
        alpha_mask: Option<FloatTexture>,
    ) -> Result<Self> {
        if vertex_indices.len() % 3 != 0 {
            return Err(ShapeError::IndexCountNotMultipleOfThree(vertex_indices.len()));
        }
        let n_vertices: usize = p.len();
        if let Some(index) = vertex_indices.iter().find(|&&index| index >= n_vertices) {
            return Err(ShapeError::VertexIndexOutOfRange {
                index: *index,
                n_vertices,
            });
        }
        if !uv.is_empty() && uv.len() != n_vertices {
            return Err(ShapeError::UvCountMismatch {
                found: uv.len(),
                n_vertices,
            });
        }
        // transform mesh vertices to world space
        let p_ws: Vec<Point3f> = p
            .iter()
            .map(|pt| object_to_world.transform_point(pt))
            .collect();
        Ok(TriangleMesh {
            n_triangles: vertex_indices.len() / 3,
            vertex_indices,
            n_vertices,
            p: p_ws,
            uv,
            alpha_mask,
            // Shape
            object_to_world,
            world_to_object,
            reverse_orientation,
            transform_swaps_handedness: object_to_world.swaps_handedness(),
        })
    }
}

/// Barycentrics and ray parameter of a triangle hit.
struct TriangleHit {
    b0: Float,
    b1: Float,
    b2: Float,
    t: Float,
}

/// The axis following *axis* in x, y, z order.
fn next_axis(axis: XYZEnum) -> XYZEnum {
    match axis {
        XYZEnum::X => XYZEnum::Y,
        XYZEnum::Y => XYZEnum::Z,
        XYZEnum::Z => XYZEnum::X,
    }
}

#[derive(Clone)]
pub struct Triangle {
    pub mesh: Arc<TriangleMesh>,
    pub id: usize,
}

impl Triangle {
    pub fn new(mesh: Arc<TriangleMesh>, tri_number: usize) -> Self {
        Triangle {
            mesh,
            id: tri_number,
        }
    }
    pub fn get_vertices(&self) -> [Point3f; 3] {
        let v: &[usize] = &self.mesh.vertex_indices[self.id * 3..self.id * 3 + 3];
        [self.mesh.p[v[0]], self.mesh.p[v[1]], self.mesh.p[v[2]]]
    }
    pub fn get_uvs(&self) -> [Point2f; 3] {
        if self.mesh.uv.is_empty() {
            [
                Point2f { x: 0.0, y: 0.0 },
                Point2f { x: 1.0, y: 0.0 },
                Point2f { x: 1.0, y: 1.0 },
            ]
        } else {
            let v: &[usize] = &self.mesh.vertex_indices[self.id * 3..self.id * 3 + 3];
            [self.mesh.uv[v[0]], self.mesh.uv[v[1]], self.mesh.uv[v[2]]]
        }
    }
    /// Watertight ray-triangle test: the ray is transformed to a space
    /// where it starts at the origin and points along +z, and the
    /// vertices are classified with edge functions.
    fn hit(&self, ray: &Ray) -> Option<TriangleHit> {
        let [p0, p1, p2] = self.get_vertices();
        // translate vertices based on ray origin
        let o: Vector3f = Vector3f::from(ray.o);
        let mut p0t: Point3f = p0 - o;
        let mut p1t: Point3f = p1 - o;
        let mut p2t: Point3f = p2 - o;
        // permute components of triangle vertices and ray direction
        let kz: XYZEnum = vec3_max_dimensionf(&ray.d.abs());
        let kx: XYZEnum = next_axis(kz);
        let ky: XYZEnum = next_axis(kx);
        let d: Vector3f = vec3_permutef(&ray.d, kx, ky, kz);
        p0t = pnt3_permutef(&p0t, kx, ky, kz);
        p1t = pnt3_permutef(&p1t, kx, ky, kz);
        p2t = pnt3_permutef(&p2t, kx, ky, kz);
        if d.z == 0.0 as Float {
            // degenerate direction
            return None;
        }
        // apply shear transformation to translated vertex positions
        let sx: Float = -d.x / d.z;
        let sy: Float = -d.y / d.z;
        let sz: Float = 1.0 as Float / d.z;
        p0t.x += sx * p0t.z;
        p0t.y += sy * p0t.z;
        p1t.x += sx * p1t.z;
        p1t.y += sy * p1t.z;
        p2t.x += sx * p2t.z;
        p2t.y += sy * p2t.z;
        // compute edge function coefficients _e0_, _e1_, and _e2_
        let mut e0: Float = p1t.x * p2t.y - p1t.y * p2t.x;
        let mut e1: Float = p2t.x * p0t.y - p2t.y * p0t.x;
        let mut e2: Float = p0t.x * p1t.y - p0t.y * p1t.x;
        // fall back to double precision test at triangle edges
        if e0 == 0.0 || e1 == 0.0 || e2 == 0.0 {
            e0 = (p1t.x as f64 * p2t.y as f64 - p1t.y as f64 * p2t.x as f64) as Float;
            e1 = (p2t.x as f64 * p0t.y as f64 - p2t.y as f64 * p0t.x as f64) as Float;
            e2 = (p0t.x as f64 * p1t.y as f64 - p0t.y as f64 * p1t.x as f64) as Float;
        }
        // perform triangle edge and determinant tests
        if (e0 < 0.0 || e1 < 0.0 || e2 < 0.0) && (e0 > 0.0 || e1 > 0.0 || e2 > 0.0) {
            return None;
        }
        let det: Float = e0 + e1 + e2;
        if det == 0.0 {
            return None;
        }
        // compute scaled hit distance to triangle and test against ray $t$ range
        p0t.z *= sz;
        p1t.z *= sz;
        p2t.z *= sz;
        let t_scaled: Float = e0 * p0t.z + e1 * p1t.z + e2 * p2t.z;
        let t_max: Float = ray.t_max.get();
        if det < 0.0 && (t_scaled >= 0.0 || t_scaled < t_max * det) {
            return None;
        } else if det > 0.0 && (t_scaled <= 0.0 || t_scaled > t_max * det) {
            return None;
        }
        // compute barycentric coordinates and $t$ value for triangle intersection
        let inv_det: Float = 1.0 / det;
        let b0: Float = e0 * inv_det;
        let b1: Float = e1 * inv_det;
        let b2: Float = e2 * inv_det;
        let t: Float = t_scaled * inv_det;
        // ensure that computed triangle $t$ is conservatively greater than zero
        let max_zt: Float = vec3_max_componentf(
            &Vector3f {
                x: p0t.z,
                y: p1t.z,
                z: p2t.z,
            }
            .abs(),
        );
        let delta_z: Float = gamma(3) * max_zt;
        let max_xt: Float = vec3_max_componentf(
            &Vector3f {
                x: p0t.x,
                y: p1t.x,
                z: p2t.x,
            }
            .abs(),
        );
        let max_yt: Float = vec3_max_componentf(
            &Vector3f {
                x: p0t.y,
                y: p1t.y,
                z: p2t.y,
            }
            .abs(),
        );
        let delta_x: Float = gamma(5) * (max_xt + max_zt);
        let delta_y: Float = gamma(5) * (max_yt + max_zt);
        let delta_e: Float = 2.0 * (gamma(2) * max_xt * max_yt + delta_y * max_xt + delta_x * max_yt);
        let max_e: Float = vec3_max_componentf(
            &Vector3f {
                x: e0,
                y: e1,
                z: e2,
            }
            .abs(),
        );
        let delta_t: Float =
            3.0 * (gamma(3) * max_e * max_zt + delta_e * max_zt + delta_z * max_e) * inv_det.abs();
        if t <= delta_t {
            return None;
        }
        Some(TriangleHit { b0, b1, b2, t })
    }
    fn interaction(&self, ray: &Ray, hit: &TriangleHit) -> SurfaceInteraction {
        let [p0, p1, p2] = self.get_vertices();
        let uv: [Point2f; 3] = self.get_uvs();
        // compute deltas for triangle partial derivatives
        let duv02: Point2f = Point2f {
            x: uv[0].x - uv[2].x,
            y: uv[0].y - uv[2].y,
        };
        let duv12: Point2f = Point2f {
            x: uv[1].x - uv[2].x,
            y: uv[1].y - uv[2].y,
        };
        let dp02: Vector3f = p0 - p2;
        let dp12: Vector3f = p1 - p2;
        let determinant: Float = duv02.x * duv12.y - duv02.y * duv12.x;
        let degenerate_uv: bool = determinant.abs() < 1e-8 as Float;
        let mut dpdu: Vector3f = Vector3f::default();
        let mut dpdv: Vector3f = Vector3f::default();
        if !degenerate_uv {
            let invdet: Float = 1.0 / determinant;
            dpdu = (dp02 * duv12.y - dp12 * duv02.y) * invdet;
            dpdv = (dp02 * -duv12.x + dp12 * duv02.x) * invdet;
        }
        if degenerate_uv || vec3_cross_vec3(&dpdu, &dpdv).length_squared() == 0.0 {
            // handle zero determinant for triangle partial derivative matrix
            let ng: Vector3f = vec3_cross_vec3(&(p2 - p0), &(p1 - p0));
            let (s, t) = vec3_coordinate_system(&ng.normalize());
            dpdu = s;
            dpdv = t;
        }
        // compute error bounds for triangle intersection
        let p_abs_sum: Point3f = (p0 * hit.b0).abs() + (p1 * hit.b1).abs() + (p2 * hit.b2).abs();
        let p_error: Vector3f = Vector3f::from(p_abs_sum) * gamma(7);
        // interpolate $(u,v)$ parametric coordinates and hit point
        let p_hit: Point3f = p0 * hit.b0 + p1 * hit.b1 + p2 * hit.b2;
        let uv_hit: Point2f = uv[0] * hit.b0 + uv[1] * hit.b1 + uv[2] * hit.b2;
        let dndu: Normal3f = Normal3f::default();
        let dndv: Normal3f = Normal3f::default();
        let wo: Vector3f = -ray.d;
        let flip: bool = self.mesh.reverse_orientation ^ self.mesh.transform_swaps_handedness;
        let mut isect: SurfaceInteraction = SurfaceInteraction::new(
            &p_hit, &p_error, uv_hit, &wo, &dpdu, &dpdv, &dndu, &dndv, ray.time, flip,
        );
        // override surface normal in _isect_ for triangle
        let mut surface_normal: Normal3f = Normal3f::from(vec3_cross_vec3(&dp02, &dp12));
        if flip {
            surface_normal *= -1.0 as Float;
        }
        isect.set_normal(&surface_normal);
        isect
    }
    fn cut_away(&self, isect: &SurfaceInteraction) -> bool {
        match &self.mesh.alpha_mask {
            Some(alpha_mask) => alpha_mask.evaluate(isect) == 0.0 as Float,
            None => false,
        }
    }
}

impl Shape for Triangle {
    fn object_bound(&self) -> Bounds3f {
        let [p0, p1, p2] = self.get_vertices();
        let w2o: &Transform = &self.mesh.world_to_object;
        bnd3_union_pnt3f(
            &Bounds3f::new(w2o.transform_point(&p0), w2o.transform_point(&p1)),
            &w2o.transform_point(&p2),
        )
    }
    fn world_bound(&self) -> Bounds3f {
        let [p0, p1, p2] = self.get_vertices();
        bnd3_union_pnt3f(&Bounds3f::new(p0, p1), &p2)
    }
    fn intersect(&self, ray: &Ray, test_alpha_texture: bool) -> Option<(SurfaceInteraction, Float)> {
        let hit: TriangleHit = self.hit(ray)?;
        let isect: SurfaceInteraction = self.interaction(ray, &hit);
        if test_alpha_texture && self.cut_away(&isect) {
            return None;
        }
        Some((isect, hit.t))
    }
    fn intersect_p(&self, ray: &Ray, test_alpha_texture: bool) -> bool {
        match self.hit(ray) {
            Some(hit) => {
                if test_alpha_texture && self.mesh.alpha_mask.is_some() {
                    !self.cut_away(&self.interaction(ray, &hit))
                } else {
                    true
                }
            }
            None => false,
        }
    }
    fn get_reverse_orientation(&self) -> bool {
        self.mesh.reverse_orientation
    }
    fn get_transform_swaps_handedness(&self) -> bool {
        self.mesh.transform_swaps_handedness
    }
    fn area(&self) -> Float {
        let [p0, p1, p2] = self.get_vertices();
        0.5 as Float * vec3_cross_vec3(&(p1 - p0), &(p2 - p0)).length()
    }
    fn sample(&self, u: &Point2f, pdf: &mut Float) -> InteractionCommon {
        let b: Point2f = uniform_sample_triangle(u);
        let b2: Float = 1.0 as Float - b.x - b.y;
        let [p0, p1, p2] = self.get_vertices();
        let mut it: InteractionCommon = InteractionCommon::default();
        it.p = p0 * b.x + p1 * b.y + p2 * b2;
        // compute surface normal for sampled point on triangle
        it.n = Normal3f::from(vec3_cross_vec3(&(p1 - p0), &(p2 - p0))).normalize();
        if self.mesh.reverse_orientation ^ self.mesh.transform_swaps_handedness {
            it.n *= -1.0 as Float;
        }
        // compute error bounds for sampled point on triangle
        let p_abs_sum: Point3f = (p0 * b.x).abs() + (p1 * b.y).abs() + (p2 * b2).abs();
        it.p_error = Vector3f::from(p_abs_sum) * gamma(6);
        *pdf = 1.0 as Float / self.area();
        it
    }
}

/// Builds one **Triangle** per index triple, all sharing a single
/// world-space **TriangleMesh**.
pub fn create_triangle_mesh(
    object_to_world: &Transform,
    world_to_object: &Transform,
    reverse_orientation: bool,
    vertex_indices: Vec<usize>,
    p: Vec<Point3f>,
    uv: Vec<Point2f>,
    alpha_mask: Option<FloatTexture>,
) -> Result<Vec<Arc<Triangle>>> {
    let mesh: Arc<TriangleMesh> = Arc::new(TriangleMesh::new(
        *object_to_world,
        *world_to_object,
        reverse_orientation,
        vertex_indices,
        p,
        uv,
        alpha_mask,
    )?);
    debug!(
        "Triangle mesh with {} triangles and {} vertices",
        mesh.n_triangles, mesh.n_vertices
    );
    Ok((0..mesh.n_triangles)
        .map(|i| Arc::new(Triangle::new(mesh.clone(), i)))
        .collect())
}
