//! The building blocks the shapes are made of: floating-point error
//! helpers, geometric primitives, transformations, interactions,
//! textures and the named parameter store used to configure shapes.

pub mod api;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod mipmap;
pub mod paramset;
pub mod pbrt;
pub mod sampling;
pub mod shape;
pub mod texture;
pub mod transform;
