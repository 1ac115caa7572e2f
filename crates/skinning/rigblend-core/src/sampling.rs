//! Per-vertex sample gathering from the host mesh.
//!
//! The blend operates on a snapshot: every selected vertex's object-space
//! position and UV coordinates are read once up front, then the scan and the
//! blend pass work on the snapshot alone. Positions are immutable for the
//! lifetime of one invocation.

use serde::{Deserialize, Serialize};

use crate::error::BlendError;
use crate::host::MeshQuery;
use crate::ids::VertexId;
use crate::space::{distance2, distance3, BlendSpace};

/// One selected vertex with both coordinate sets resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexSample {
    pub id: VertexId,
    pub position: [f64; 3],
    pub uv: [f64; 2],
}

impl VertexSample {
    /// Distance to another sample in the given measurement space.
    #[inline]
    pub fn distance_to(&self, other: &VertexSample, space: BlendSpace) -> f64 {
        match space {
            BlendSpace::Object => distance3(self.position, other.position),
            BlendSpace::Uv => distance2(self.uv, other.uv),
        }
    }
}

/// Resolve an ordered selection into samples. Selection order is preserved;
/// it decides nothing about the blend but keeps rows aligned with the host's
/// weight buffer layout.
pub fn gather_samples(
    mesh: &dyn MeshQuery,
    selection: &[VertexId],
) -> Result<Vec<VertexSample>, BlendError> {
    let mut samples = Vec::with_capacity(selection.len());
    for &id in selection {
        samples.push(VertexSample {
            id,
            position: mesh.position(id)?,
            uv: mesh.uv(id)?,
        });
    }
    Ok(samples)
}
