//! Heightfields are never intersected directly. A regular grid of
//! height samples over the unit square is tessellated once into a
//! triangle mesh, two triangles per grid cell.

// std
use std::sync::Arc;
// others
use log::debug;
// pbrt
use crate::core::error::{Result, ShapeError};
use crate::core::geometry::{Point2f, Point3f};
use crate::core::paramset::ParamSet;
use crate::core::pbrt::Float;
use crate::core::transform::Transform;
use crate::shapes::triangle::{create_triangle_mesh, Triangle};

// see heightfield.h

/// Object-space tessellation of a heightfield grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightfieldMesh {
    pub nx: usize,
    pub nz: usize,
    pub vertex_indices: Vec<usize>,
    pub p: Vec<Point3f>,
    pub uv: Vec<Point2f>,
}

impl HeightfieldMesh {
    pub fn n_vertices(&self) -> usize {
        self.p.len()
    }
    pub fn n_triangles(&self) -> usize {
        self.vertex_indices.len() / 3
    }
}

/// Tessellates *nx* by *nz* height samples (stored row by row, x
/// varying fastest). The grid spans [0,1] in x and z, and the texture
/// coordinates follow x and z.
pub fn heightfield_mesh(nx: i32, nz: i32, heights: &[Float]) -> Result<HeightfieldMesh> {
    if nx < 2 || nz < 2 {
        return Err(ShapeError::InvalidGridSize { nu: nx, nv: nz });
    }
    let nx: usize = nx as usize;
    let nz: usize = nz as usize;
    let n_vertices: usize = nx * nz;
    if heights.len() != n_vertices {
        return Err(ShapeError::HeightCountMismatch {
            expected: n_vertices,
            found: heights.len(),
        });
    }
    // compute heightfield vertex positions
    let mut p: Vec<Point3f> = Vec::with_capacity(n_vertices);
    let mut uv: Vec<Point2f> = Vec::with_capacity(n_vertices);
    for z in 0..nz {
        for x in 0..nx {
            let s: Float = x as Float / (nx - 1) as Float;
            let t: Float = z as Float / (nz - 1) as Float;
            p.push(Point3f {
                x: s,
                y: heights[z * nx + x],
                z: t,
            });
            uv.push(Point2f { x: s, y: t });
        }
    }
    // fill in heightfield vertex offset array
    let vert = |x: usize, z: usize| -> usize { x + z * nx };
    let mut vertex_indices: Vec<usize> = Vec::with_capacity(6 * (nx - 1) * (nz - 1));
    for z in 0..nz - 1 {
        for x in 0..nx - 1 {
            vertex_indices.extend_from_slice(&[vert(x, z), vert(x + 1, z + 1), vert(x + 1, z)]);
            vertex_indices.extend_from_slice(&[vert(x, z), vert(x, z + 1), vert(x + 1, z + 1)]);
        }
    }
    Ok(HeightfieldMesh {
        nx,
        nz,
        vertex_indices,
        p,
        uv,
    })
}

/// Reads `nu`, `nv` and `Py` and hands the tessellation over to the
/// triangle mesh.
pub fn create_heightfield(
    object_to_world: &Transform,
    world_to_object: &Transform,
    reverse_orientation: bool,
    params: &ParamSet,
) -> Result<Vec<Arc<Triangle>>> {
    let nx: i32 = params.find_one_int("nu", -1);
    let nz: i32 = params.find_one_int("nv", -1);
    let heights: Vec<Float> = params.find_float("Py");
    if heights.is_empty() {
        return Err(ShapeError::MissingParameter("Py"));
    }
    let mesh: HeightfieldMesh = heightfield_mesh(nx, nz, &heights)?;
    debug!(
        "Heightfield {}x{}: {} vertices, {} triangles",
        mesh.nx,
        mesh.nz,
        mesh.n_vertices(),
        mesh.n_triangles()
    );
    create_triangle_mesh(
        object_to_world,
        world_to_object,
        reverse_orientation,
        mesh.vertex_indices,
        mesh.p,
        mesh.uv,
        None,
    )
}
