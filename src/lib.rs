//! # rs_pbrt_quad
//!
//! Geometric shapes for a [PBRT][book] style renderer:
//!
//! 1. [axis-aligned quads][quad] (normal along X, Y, or Z) with ray
//!    intersection, differential geometry and uniform area sampling
//! 2. a [heightfield][heightfield] tessellator turning a regular grid
//!    of heights into a triangle mesh
//! 3. a [texture key][texinfo] used to share image textures loaded
//!    with identical settings
//!
//! Acceleration structures, materials, lights and integrators live
//! elsewhere; everything here is a pure function of immutable shape
//! state and can be called from many threads at once.
//!
//! [book]: http://www.pbrt.org
//! [quad]: shapes/quad/index.html
//! [heightfield]: shapes/heightfield/index.html
//! [texinfo]: textures/texinfo/index.html

#[macro_use]
extern crate impl_ops;

pub mod core;
pub mod shapes;
pub mod textures;
