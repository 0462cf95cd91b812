//! Textures used by the shapes of this crate, and the key under which
//! image textures are shared.
//!
//! - ConstantTexture
//! - TexInfo (cache key for image textures)

pub mod constant;
pub mod texinfo;
