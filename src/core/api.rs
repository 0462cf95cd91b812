//! Entry point for scene description front ends: a named shape plus
//! its parameters becomes a list of shapes ready for an accelerator.

// std
use std::sync::Arc;
// others
use log::warn;
// pbrt
use crate::core::error::{Result, ShapeError};
use crate::core::geometry::{Point2f, Point3f};
use crate::core::paramset::ParamSet;
use crate::core::pbrt::Float;
use crate::core::shape::Shape;
use crate::core::texture::FloatTextureMap;
use crate::core::transform::Transform;
use crate::shapes::create_alpha_mask;
use crate::shapes::heightfield::create_heightfield;
use crate::shapes::quad::{create_quad_shape, QuadAxis};
use crate::shapes::triangle::{create_triangle_mesh, Triangle};

// see api.cpp

/// Texture coordinates given either as 2D points or as a flat float
/// array, under the name `uv` or its older spelling `st`.
fn find_uvs(params: &ParamSet) -> Vec<Point2f> {
    for name in &["uv", "st"] {
        let uvs: Vec<Point2f> = params.find_point2f(name);
        if !uvs.is_empty() {
            return uvs;
        }
        let floats: Vec<Float> = params.find_float(name);
        if !floats.is_empty() {
            if floats.len() % 2 != 0 {
                warn!(
                    "Odd number of values given for \"{}\", ignoring the last one",
                    name
                );
            }
            return floats
                .chunks_exact(2)
                .map(|c| Point2f { x: c[0], y: c[1] })
                .collect();
        }
    }
    Vec::new()
}

fn create_triangle_mesh_shape(
    object_to_world: &Transform,
    world_to_object: &Transform,
    reverse_orientation: bool,
    params: &ParamSet,
    float_textures: &FloatTextureMap,
) -> Result<Vec<Arc<Triangle>>> {
    let p: Vec<Point3f> = params.find_point3f("P");
    if p.is_empty() {
        return Err(ShapeError::MissingParameter("P"));
    }
    let indices: Vec<i32> = params.find_int("indices");
    let vertex_indices: Vec<usize> = if indices.is_empty() {
        if p.len() == 3 {
            // a single triangle needs no indices
            vec![0, 1, 2]
        } else {
            return Err(ShapeError::MissingParameter("indices"));
        }
    } else {
        let mut vertex_indices: Vec<usize> = Vec::with_capacity(indices.len());
        for index in indices {
            if index < 0 {
                return Err(ShapeError::NegativeVertexIndex(index));
            }
            vertex_indices.push(index as usize);
        }
        vertex_indices
    };
    let uv: Vec<Point2f> = find_uvs(params);
    create_triangle_mesh(
        object_to_world,
        world_to_object,
        reverse_orientation,
        vertex_indices,
        p,
        uv,
        create_alpha_mask(params, float_textures),
    )
}

fn into_shapes(triangles: Vec<Arc<Triangle>>) -> Vec<Arc<dyn Shape + Send + Sync>> {
    triangles
        .into_iter()
        .map(|triangle| triangle as Arc<dyn Shape + Send + Sync>)
        .collect()
}

/// Creates the shapes called *name*: `quadx`, `quady`, `quadz`,
/// `heightfield` or `trianglemesh`. Parameters nobody looked at are
/// reported afterwards.
pub fn make_shapes(
    name: &str,
    object_to_world: &Transform,
    world_to_object: &Transform,
    reverse_orientation: bool,
    params: &ParamSet,
    float_textures: &FloatTextureMap,
) -> Result<Vec<Arc<dyn Shape + Send + Sync>>> {
    let quad_axis: Option<QuadAxis> = match name {
        "quadx" => Some(QuadAxis::X),
        "quady" => Some(QuadAxis::Y),
        "quadz" => Some(QuadAxis::Z),
        _ => None,
    };
    let shapes: Vec<Arc<dyn Shape + Send + Sync>> = if let Some(axis) = quad_axis {
        vec![create_quad_shape(
            axis,
            object_to_world,
            world_to_object,
            reverse_orientation,
            params,
            float_textures,
        ) as Arc<dyn Shape + Send + Sync>]
    } else {
        match name {
            "heightfield" => into_shapes(create_heightfield(
                object_to_world,
                world_to_object,
                reverse_orientation,
                params,
            )?),
            "trianglemesh" => into_shapes(create_triangle_mesh_shape(
                object_to_world,
                world_to_object,
                reverse_orientation,
                params,
                float_textures,
            )?),
            _ => {
                warn!("Shape \"{}\" unknown.", name);
                return Err(ShapeError::UnknownShape(String::from(name)));
            }
        }
    };
    params.report_unused();
    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Ray, Vector3f};

    #[test]
    fn dispatches_quads_by_name() {
        let id = Transform::default();
        for (name, d) in &[
            (
                "quadx",
                Vector3f {
                    x: -1.0,
                    y: 0.0,
                    z: 0.0,
                },
            ),
            (
                "quady",
                Vector3f {
                    x: 0.0,
                    y: -1.0,
                    z: 0.0,
                },
            ),
            (
                "quadz",
                Vector3f {
                    x: 0.0,
                    y: 0.0,
                    z: -1.0,
                },
            ),
        ] {
            let shapes = make_shapes(name, &id, &id, false, &ParamSet::default(), &FloatTextureMap::new())
                .expect("known shape");
            assert_eq!(shapes.len(), 1);
            let ray = Ray::new(Point3f::default() + (*d * -5.0), *d);
            assert!(shapes[0].intersect_p(&ray, true), "{}", name);
            assert_eq!(shapes[0].area(), 1.0);
        }
    }

    #[test]
    fn single_triangle_needs_no_indices() {
        let mut ps = ParamSet::default();
        ps.add_point3fs("P", vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        ps.add_floats("st", vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        let id = Transform::default();
        let shapes =
            make_shapes("trianglemesh", &id, &id, false, &ps, &FloatTextureMap::new()).expect("mesh");
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].area(), 0.5);
    }

    #[test]
    fn malformed_meshes_are_rejected() {
        let id = Transform::default();
        let textures = FloatTextureMap::new();
        let mut ps = ParamSet::default();
        assert_eq!(
            make_shapes("trianglemesh", &id, &id, false, &ps, &textures).err(),
            Some(ShapeError::MissingParameter("P"))
        );
        ps.add_point3fs("P", vec![0.0; 12]);
        assert_eq!(
            make_shapes("trianglemesh", &id, &id, false, &ps, &textures).err(),
            Some(ShapeError::MissingParameter("indices"))
        );
        ps.add_ints("indices", vec![0, -1, 2]);
        assert_eq!(
            make_shapes("trianglemesh", &id, &id, false, &ps, &textures).err(),
            Some(ShapeError::NegativeVertexIndex(-1))
        );
        ps.add_ints("indices", vec![0, 1, 2, 2, 1, 3]);
        ps.add_point2fs("uv", vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            make_shapes("trianglemesh", &id, &id, false, &ps, &textures).err(),
            Some(ShapeError::UvCountMismatch {
                found: 3,
                n_vertices: 4
            })
        );
    }

    #[test]
    fn unknown_names_are_errors() {
        let id = Transform::default();
        let result = make_shapes("sphere", &id, &id, false, &ParamSet::default(), &FloatTextureMap::new());
        assert_eq!(result.err(), Some(ShapeError::UnknownShape(String::from("sphere"))));
    }
}
