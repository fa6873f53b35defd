//! # Voronoi Cells
//!
//! Cell of each site inside an axis-aligned bounding region, found by
//! cutting the region with the bisector planes of nearer and nearer
//! neighbours until no further neighbour can reach the cell.
//!
//! ## Algorithm
//!
//! 1. Build six bounding planes from the AABB of the bounding vertices.
//! 2. For each site, move those planes into the site's local frame.
//! 3. Walk the other sites by increasing distance, adding one bisector at a
//!    time and dropping planes that no longer touch the polytope.
//! 4. Stop once a neighbour is further than twice the cell's circumradius.

use crate::assembly::{convex_hull, intersect_halfspaces, Polytope};
use crate::error::{KernelError, KernelResult};
use crate::math::{Plane, Vector3};
use crate::mesh::Mesh;
use config::constants::{KernelConfig, DEFAULT_EPSILON};
use serde::{Deserialize, Serialize};

/// Corners of one site's cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoronoiCell {
    pub site: Vector3,
    /// Corners relative to `site`.
    pub vertices: Vec<Vector3>,
}

impl VoronoiCell {
    /// Corners in world space.
    pub fn world_vertices(&self) -> Vec<Vector3> {
        self.vertices.iter().map(|&v| v + self.site).collect()
    }

    /// Convex hull of the corners, in the cell's local frame.
    pub fn to_mesh(&self, epsilon: f64) -> KernelResult<Mesh> {
        convex_hull(&self.vertices, epsilon)
    }
}

/// Tuning for [`voronoi_cells_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoronoiOptions {
    /// Distance each bisector is pulled toward its site, leaving a gap of
    /// twice this between neighbouring cells.
    pub margin: f64,
    /// Sites closer than this are one site.
    pub epsilon: f64,
}

impl Default for VoronoiOptions {
    fn default() -> Self {
        Self {
            margin: 0.0,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl From<&KernelConfig> for VoronoiOptions {
    fn from(config: &KernelConfig) -> Self {
        Self {
            epsilon: config.epsilon,
            ..Self::default()
        }
    }
}

/// Voronoi cells of `sites` inside the bounds of `bounds`, without margin.
pub fn voronoi_cells(bounds: &[Vector3], sites: &[Vector3]) -> KernelResult<Vec<VoronoiCell>> {
    voronoi_cells_with(bounds, sites, &VoronoiOptions::default())
}

/// Voronoi cells of `sites` inside the bounds of `bounds`.
///
/// The bounding planes take `-|max|` and `-|min|` as offsets, so a box that
/// straddles the origin grows to the larger extent on each axis. Duplicate
/// sites keep their first occurrence. Sites whose cell comes out empty are
/// left out of the result.
///
/// # Errors
///
/// `InvalidArgument` for empty bounds, a non-finite point or a negative
/// margin.
///
/// # Example
///
/// ```rust
/// use meshgen_kernel::construct::voronoi_cells;
/// use glam::DVec3;
///
/// let bounds = [DVec3::splat(-1.0), DVec3::splat(1.0)];
/// let sites = [DVec3::new(-0.5, 0.0, 0.0), DVec3::new(0.5, 0.0, 0.0)];
/// let cells = voronoi_cells(&bounds, &sites).unwrap();
/// assert_eq!(cells.len(), 2);
/// assert_eq!(cells[0].vertices.len(), 8);
/// ```
pub fn voronoi_cells_with(
    bounds: &[Vector3],
    sites: &[Vector3],
    options: &VoronoiOptions,
) -> KernelResult<Vec<VoronoiCell>> {
    let bounding = bounding_planes(bounds)?;
    if !options.margin.is_finite() || options.margin < 0.0 {
        return Err(KernelError::invalid_argument(format!(
            "margin must be >= 0, got {}",
            options.margin
        )));
    }
    if let Some(bad) = sites.iter().find(|s| !s.is_finite()) {
        return Err(KernelError::invalid_argument(format!(
            "site {bad} is not finite"
        )));
    }

    let sites = unique_sites(sites, options.epsilon);
    let mut cells = Vec::with_capacity(sites.len());
    for (index, &site) in sites.iter().enumerate() {
        match cell_of(index, &sites, &bounding, options.margin) {
            Some(polytope) => {
                log::debug!(
                    "voronoi site {index} at {site}: {} corners",
                    polytope.vertices.len()
                );
                cells.push(VoronoiCell {
                    site,
                    vertices: polytope.vertices,
                });
            }
            None => log::warn!("voronoi site {index} at {site} has an empty cell, skipped"),
        }
    }
    Ok(cells)
}

/// Six world-space planes around the AABB of `points`.
fn bounding_planes(points: &[Vector3]) -> KernelResult<[Plane; 6]> {
    let Some(&first) = points.first() else {
        return Err(KernelError::invalid_argument(
            "voronoi bounds need at least one vertex",
        ));
    };
    if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
        return Err(KernelError::invalid_argument(format!(
            "bounding vertex {bad} is not finite"
        )));
    }
    let (min, max) = points
        .iter()
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
    let (min, max) = (min.abs(), max.abs());
    Ok([
        Plane::new(Vector3::X, -max.x),
        Plane::new(Vector3::Y, -max.y),
        Plane::new(Vector3::Z, -max.z),
        Plane::new(-Vector3::X, -min.x),
        Plane::new(-Vector3::Y, -min.y),
        Plane::new(-Vector3::Z, -min.z),
    ])
}

fn unique_sites(sites: &[Vector3], epsilon: f64) -> Vec<Vector3> {
    let mut unique: Vec<Vector3> = Vec::with_capacity(sites.len());
    for &site in sites {
        if unique.iter().all(|u| u.distance(site) >= epsilon) {
            unique.push(site);
        } else {
            log::trace!("dropping duplicate voronoi site {site}");
        }
    }
    unique
}

/// Local polytope of `sites[index]`, or `None` if it is empty.
fn cell_of(index: usize, sites: &[Vector3], bounding: &[Plane; 6], margin: f64) -> Option<Polytope> {
    let site = sites[index];
    let mut planes: Vec<Plane> = bounding.iter().map(|p| p.translated_to_local(site)).collect();
    let mut polytope = intersect_halfspaces(&planes);
    if polytope.is_empty() {
        return None;
    }

    let mut neighbours: Vec<(f64, usize)> = sites
        .iter()
        .enumerate()
        .filter(|&(other, _)| other != index)
        .map(|(other, &r)| (r.distance_squared(site), other))
        .collect();
    neighbours.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    for (distance_squared, other) in neighbours {
        let reach = 2.0 * polytope.circumradius();
        if distance_squared.sqrt() > reach {
            log::trace!("site {index}: neighbour {other} beyond {reach}, stopping");
            break;
        }
        planes.push(Plane::bisector(site, sites[other]).offset_inward(margin));
        polytope = intersect_halfspaces(&planes);
        if polytope.is_empty() {
            return None;
        }
        let before = planes.len();
        planes = polytope.active.iter().map(|&i| planes[i]).collect();
        log::trace!(
            "site {index}: cut by {other}, kept {} of {before} planes",
            planes.len()
        );
    }
    Some(polytope)
}
