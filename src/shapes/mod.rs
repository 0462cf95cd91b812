//! Careful abstraction of geometric shapes in a ray tracer is a key
//! component of a clean system design. All geometric primitives
//! offer the same capabilities (bounds, area, intersection, area
//! sampling) through the **Shape** enum, and the rest of the renderer
//! can use them without needing any details about the underlying
//! shape.
//!
//! - Quad (axis-aligned, normal along X, Y, or Z)
//! - Heightfield (tessellated into triangles)
//! - Triangle
//!
//! ## Quads
//!
//! A quad is a rectangle lying in one of the three coordinate planes
//! of its object space, centered at the origin. Like the disk it has
//! a particularly straightforward intersection routine: a single
//! division finds where the ray meets the plane.
//!
//! ## Heightfields
//!
//! A heightfield is a regular grid of height samples over the unit
//! square. It is never intersected directly; instead it is converted
//! once into a triangle mesh.
//!
//! ## Triangle Meshes
//!
//! A mesh stores an array of vertex positions where each individual
//! triangle just stores three offsets into this array for its three
//! vertices.

// others
use log::error;
// pbrt
use crate::core::paramset::ParamSet;
use crate::core::pbrt::Float;
use crate::core::texture::{FloatTexture, FloatTextureMap};
use crate::textures::constant::ConstantTexture;

pub mod heightfield;
pub mod quad;
pub mod triangle;

/// Resolves the *alpha* parameter of a shape: a named float texture,
/// or a constant zero texture for a literal alpha of 0. An unknown
/// texture name is reported and ignored.
pub fn create_alpha_mask(params: &ParamSet, float_textures: &FloatTextureMap) -> Option<FloatTexture> {
    let alpha_tex_name: String = params.find_texture("alpha");
    if !alpha_tex_name.is_empty() {
        match float_textures.get(&alpha_tex_name) {
            Some(alpha_tex) => Some(alpha_tex.clone()),
            None => {
                error!(
                    "Couldn't find float texture \"{}\" for \"alpha\" parameter",
                    alpha_tex_name
                );
                None
            }
        }
    } else if params.find_one_float("alpha", 1.0 as Float) == 0.0 as Float {
        Some(std::sync::Arc::new(ConstantTexture::new(0.0 as Float)))
    } else {
        None
    }
}
