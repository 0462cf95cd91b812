//! **Texture** is a trait parameterized by the return type of its
//! evaluation function. Shapes only need **Float** textures: an alpha
//! mask evaluated at a candidate hit decides whether the surface is
//! cut away there.

// std
use std::collections::HashMap;
use std::sync::Arc;
// pbrt
use crate::core::interaction::SurfaceInteraction;
use crate::core::pbrt::Float;

// see texture.h

pub trait Texture<T> {
    fn evaluate(&self, si: &SurfaceInteraction) -> T;
}

/// A float texture that can be shared between shapes and threads.
pub type FloatTexture = Arc<dyn Texture<Float> + Send + Sync>;

/// Named float textures declared in a scene, used to resolve texture
/// references in shape parameters.
pub type FloatTextureMap = HashMap<String, FloatTexture>;
