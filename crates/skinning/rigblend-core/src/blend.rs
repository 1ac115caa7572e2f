//! The blend pass: redistribute every row as a convex mix of the endpoint
//! rows, then renormalize.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::BlendError;
use crate::extremes::ExtremePair;
use crate::ids::VertexId;
use crate::sampling::VertexSample;
use crate::space::{BlendFalloff, BlendSpace};
use crate::weights::WeightBuffer;

/// Everything one applied blend produced, kept immutable so the command can
/// replay it for redo and swap it for undo without recomputation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendResult {
    /// Selection the buffers are aligned with, in gather order.
    pub vertices: Vec<VertexId>,
    /// Influence indices covered by each row, in stride order.
    pub influences: Vec<u32>,
    /// The committed post-blend buffer.
    pub weights: WeightBuffer,
    /// The pre-blend buffer, restored verbatim on undo.
    pub undo_weights: WeightBuffer,
    pub extremes: ExtremePair,
    pub space: BlendSpace,
    pub falloff: BlendFalloff,
}

/// Blend every row of `weights` between the extreme pair's rows.
///
/// Endpoints are overwritten too; their normalized distances evaluate to 0
/// and 1, so already-normalized endpoint rows reproduce themselves. The
/// quadratic curve divides both terms by `max_distance²`; renormalization
/// cancels the shared factor row-wise, so it never shows in committed rows.
pub fn blend_weights(
    set: &[VertexSample],
    weights: &WeightBuffer,
    extremes: &ExtremePair,
    falloff: BlendFalloff,
    space: BlendSpace,
    cfg: &Config,
) -> Result<WeightBuffer, BlendError> {
    if extremes.max_distance <= cfg.distance_epsilon {
        return Err(BlendError::DegenerateGeometry {
            vertex_count: set.len(),
        });
    }

    // Endpoint rows are snapshotted before any row is rewritten.
    let row_min = weights.row(extremes.min_index).to_vec();
    let row_max = weights.row(extremes.max_index).to_vec();
    let inv_max_sq = 1.0 / (extremes.max_distance * extremes.max_distance);

    let mut out = weights.clone();
    for v in 0..set.len() {
        let d = extremes.normalized_distance(set, v, space);
        let row = out.row_mut(v);
        for (j, w) in row.iter_mut().enumerate() {
            *w = match falloff {
                BlendFalloff::Linear => row_min[j] * (1.0 - d) + row_max[j] * d,
                BlendFalloff::Quadratic => {
                    row_min[j] * (1.0 - d) * (1.0 - d) * inv_max_sq
                        + row_max[j] * d * d * inv_max_sq
                }
            };
        }
        if !out.normalize_row(v, cfg.weight_epsilon) {
            return Err(BlendError::DegenerateWeights { vertex: set[v].id });
        }
    }
    Ok(out)
}
