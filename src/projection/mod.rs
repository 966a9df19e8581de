//! Plan-view projection and map reference helpers

pub mod coordinate;
pub mod gauss_kruger;
#[cfg(feature = "georef")]
pub mod transformer;

pub use coordinate::Coordinate;
pub use gauss_kruger::GaussKrugerZone;
#[cfg(feature = "georef")]
pub use transformer::Transformer;

use crate::trajectory::Trajectory;

/// Horizontal projection of a trajectory
///
/// Holds one vertex per trajectory point, in the same order, with the
/// vertical component dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalTrace {
    vertices: Vec<Coordinate>,
}

impl HorizontalTrace {
    pub fn from_trajectory(trajectory: &Trajectory) -> Self {
        let vertices = trajectory
            .points()
            .iter()
            .map(|p| Coordinate::new(p.position.x, p.position.y))
            .collect();
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True when the trace is a single vertex rather than a line
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 2
    }

    /// Sum of plan-view segment lengths
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
            .sum()
    }
}
