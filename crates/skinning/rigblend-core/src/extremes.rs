//! Farthest-pair scan over the selection.

use serde::{Deserialize, Serialize};

use crate::sampling::VertexSample;
use crate::space::BlendSpace;

/// The two most-distant vertices of a selection, by index into the gathered
/// sample set. `min_index` is the anchor every normalized distance is measured
/// from; since positions are immutable per invocation, the anchor coordinates
/// are read back through the set rather than copied here.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtremePair {
    pub min_index: usize,
    pub max_index: usize,
    pub max_distance: f64,
}

impl ExtremePair {
    /// Normalized distance of sample `v` from the anchor endpoint.
    /// 0 at the anchor, 1 at the far endpoint; off-axis vertices can land
    /// outside [0,1] and are deliberately not clamped.
    #[inline]
    pub fn normalized_distance(
        &self,
        set: &[VertexSample],
        v: usize,
        space: BlendSpace,
    ) -> f64 {
        set[self.min_index].distance_to(&set[v], space) / self.max_distance
    }
}

/// Exhaustive O(n²) scan over unordered pairs {i, j}, i < j, ascending i then
/// j, keeping a pair only on strictly greater distance. Ties therefore resolve
/// to the first pair encountered. Returns None for sets of fewer than two
/// samples; `max_distance` is 0.0 exactly when every position coincides.
pub fn compute_extreme_pair(set: &[VertexSample], space: BlendSpace) -> Option<ExtremePair> {
    if set.len() < 2 {
        return None;
    }
    let mut best = ExtremePair {
        min_index: 0,
        max_index: 1,
        max_distance: set[0].distance_to(&set[1], space),
    };
    for i in 0..set.len() {
        for j in (i + 1)..set.len() {
            let d = set[i].distance_to(&set[j], space);
            if d > best.max_distance {
                best = ExtremePair {
                    min_index: i,
                    max_index: j,
                    max_distance: d,
                };
            }
        }
    }
    Some(best)
}
