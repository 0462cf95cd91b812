//! Sampling routines mapping uniform samples in [0,1)^2 to points on
//! simple domains.

// pbrt
use crate::core::geometry::Point2f;
use crate::core::pbrt::Float;

/// Uniformly distributed barycentric coordinates for a triangle.
pub fn uniform_sample_triangle(u: &Point2f) -> Point2f {
    let su0: Float = u.x.sqrt();
    Point2f {
        x: 1.0 as Float - su0,
        y: u.y * su0,
    }
}
