//! The blend command: gather, scan, blend, commit, undo/redo.
//!
//! One `BlendCommand` is one logical invocation. The host adapter constructs
//! it, calls [`execute`](BlendCommand::execute) with the host, and keeps it
//! alive for as long as its undo entry is; the computed buffers live in an
//! immutable [`BlendResult`] so undo and redo replay cached data instead of
//! recomputing.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::args::BlendArgs;
use crate::blend::{blend_weights, BlendResult};
use crate::config::Config;
use crate::error::BlendError;
use crate::extremes::compute_extreme_pair;
use crate::host::{SkinDeformer, SkinHost};
use crate::ids::VertexId;
use crate::sampling::{gather_samples, VertexSample};
use crate::weights::WeightBuffer;

/// Fewer vertices than this and the command has nothing to blend between.
pub const MIN_SELECTION: usize = 3;

/// Why an invocation ended without touching the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Fewer than [`MIN_SELECTION`] vertices were selected.
    InsufficientSelection { selected: usize },
    /// The selection's mesh carries no skin deformer.
    NoDeformer,
}

/// Summary of one applied blend, for host UIs and logs.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendReport {
    pub vertex_count: usize,
    pub influence_count: usize,
    pub anchor_vertex: VertexId,
    pub far_vertex: VertexId,
    pub max_distance: f64,
    pub args: BlendArgs,
}

/// What `execute` did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ExecuteOutcome {
    /// Weights were computed and committed.
    Applied(BlendReport),
    /// A previous result was committed again without recomputation.
    Reapplied,
    /// Nothing happened; silent success.
    Skipped(SkipReason),
}

/// Service object exposing `execute` / `undo` / `redo`.
///
/// States: Idle (no cached result) and Computed. `execute` moves Idle to
/// Computed; in Computed it resubmits the cached buffer rather than
/// recomputing, and `undo`/`redo` swap which cached buffer the host holds.
#[derive(Debug, Default)]
pub struct BlendCommand {
    cfg: Config,
    cached: Option<BlendResult>,
}

impl BlendCommand {
    pub fn new(cfg: Config) -> Self {
        Self { cfg, cached: None }
    }

    /// The last applied result, if this command is in the Computed state.
    pub fn result(&self) -> Option<&BlendResult> {
        self.cached.as_ref()
    }

    /// Drop the cached result, returning to Idle. The undo record is
    /// discarded with it.
    pub fn reset(&mut self) {
        self.cached = None;
    }

    /// Run the blend against the host's current selection.
    pub fn execute(
        &mut self,
        host: &mut dyn SkinHost,
        args: &BlendArgs,
    ) -> Result<ExecuteOutcome, BlendError> {
        if let Some(result) = &self.cached {
            let deformer = find_deformer_or_gone(host)?;
            deformer.set_weights(
                &result.vertices,
                &result.influences,
                result.weights.as_slice(),
                false,
            )?;
            return Ok(ExecuteOutcome::Reapplied);
        }

        let selection = host.mesh().selected_vertices();
        if selection.len() < MIN_SELECTION {
            debug!(
                "blend skipped: {} of {} required vertices selected",
                selection.len(),
                MIN_SELECTION
            );
            return Ok(ExecuteOutcome::Skipped(SkipReason::InsufficientSelection {
                selected: selection.len(),
            }));
        }
        let samples = gather_samples(host.mesh(), &selection)?;

        let Some(deformer) = host.find_deformer()? else {
            debug!("blend skipped: selection mesh has no skin deformer");
            return Ok(ExecuteOutcome::Skipped(SkipReason::NoDeformer));
        };

        // Envelope off while we read and compute, back on before the commit,
        // whether or not the computation succeeded.
        deformer.set_envelope_enabled(false)?;
        let influence_count = deformer.influence_count();
        let computed = deformer
            .weights(&selection)
            .and_then(|raw| compute_blend(&samples, raw, influence_count, args, &self.cfg));
        deformer.set_envelope_enabled(true)?;
        let (blended, extremes) = computed?;

        let influences: Vec<u32> = (0..influence_count as u32).collect();
        let previous = deformer.set_weights(&selection, &influences, blended.as_slice(), false)?;
        let undo_weights = WeightBuffer::from_flat(previous, influence_count, selection.len())?;

        let report = BlendReport {
            vertex_count: selection.len(),
            influence_count,
            anchor_vertex: samples[extremes.min_index].id,
            far_vertex: samples[extremes.max_index].id,
            max_distance: extremes.max_distance,
            args: *args,
        };
        debug!(
            "blended {} vertices x {} influences over distance {}",
            report.vertex_count, report.influence_count, report.max_distance
        );
        self.cached = Some(BlendResult {
            vertices: selection,
            influences,
            weights: blended,
            undo_weights,
            extremes,
            space: args.space(),
            falloff: args.falloff(),
        });
        Ok(ExecuteOutcome::Applied(report))
    }

    /// Restore the pre-blend buffer. The cached result survives so `redo`
    /// or `execute` can replay it.
    pub fn undo(&mut self, host: &mut dyn SkinHost) -> Result<(), BlendError> {
        let result = self.cached.as_ref().ok_or(BlendError::NothingApplied)?;
        let deformer = find_deformer_or_gone(host)?;
        deformer.set_weights(
            &result.vertices,
            &result.influences,
            result.undo_weights.as_slice(),
            false,
        )?;
        Ok(())
    }

    /// Re-commit the post-blend buffer. Idempotent; never recomputes.
    pub fn redo(&mut self, host: &mut dyn SkinHost) -> Result<(), BlendError> {
        let result = self.cached.as_ref().ok_or(BlendError::NothingApplied)?;
        let deformer = find_deformer_or_gone(host)?;
        deformer.set_weights(
            &result.vertices,
            &result.influences,
            result.weights.as_slice(),
            false,
        )?;
        Ok(())
    }
}

/// A cached result implies the deformer existed; it vanishing between calls
/// is a host-state failure, not a silent skip.
fn find_deformer_or_gone(
    host: &mut dyn SkinHost,
) -> Result<&mut dyn SkinDeformer, BlendError> {
    host.find_deformer()?.ok_or_else(|| BlendError::Host {
        reason: "skin deformer no longer available".to_string(),
    })
}

fn compute_blend(
    samples: &[VertexSample],
    raw: Vec<f64>,
    influence_count: usize,
    args: &BlendArgs,
    cfg: &Config,
) -> Result<(WeightBuffer, crate::extremes::ExtremePair), BlendError> {
    let weights = WeightBuffer::from_flat(raw, influence_count, samples.len())?;
    let extremes =
        compute_extreme_pair(samples, args.space()).ok_or(BlendError::DegenerateGeometry {
            vertex_count: samples.len(),
        })?;
    let blended = blend_weights(
        samples,
        &weights,
        &extremes,
        args.falloff(),
        args.space(),
        cfg,
    )?;
    Ok((blended, extremes))
}
