//! Host application traits.
//!
//! The embedding application implements these and passes itself into
//! [`crate::command::BlendCommand`]. The core never registers itself with the
//! host; it is a plain service object the adapter owns.

use crate::error::BlendError;
use crate::ids::VertexId;

/// Read access to the mesh that owns the selection.
pub trait MeshQuery {
    /// Currently selected vertices, in selection order, deduplicated.
    fn selected_vertices(&self) -> Vec<VertexId>;

    /// Object-space position of a vertex.
    fn position(&self, vertex: VertexId) -> Result<[f64; 3], BlendError>;

    /// Surface-parameterization coordinates of a vertex.
    fn uv(&self, vertex: VertexId) -> Result<[f64; 2], BlendError>;
}

/// The skin deformer bound to the selection's mesh.
///
/// Weight buffers are flat, row-per-vertex with stride
/// [`influence_count`](SkinDeformer::influence_count), in the vertex order the
/// caller passes. `set_weights` commits one batched replacement and returns
/// the buffer it replaced, which is what undo later restores.
pub trait SkinDeformer {
    fn influence_count(&self) -> usize;

    fn weights(&mut self, vertices: &[VertexId]) -> Result<Vec<f64>, BlendError>;

    fn set_weights(
        &mut self,
        vertices: &[VertexId],
        influences: &[u32],
        weights: &[f64],
        normalize: bool,
    ) -> Result<Vec<f64>, BlendError>;

    /// Toggle the deformer's envelope. Disabled while the command reads and
    /// computes, so the host does not re-evaluate the skin per intermediate
    /// state; re-enabled before the final commit.
    fn set_envelope_enabled(&mut self, enabled: bool) -> Result<(), BlendError>;
}

/// One invocation's view of the host: the mesh under the selection and the
/// deformer bound to it, if any.
pub trait SkinHost {
    fn mesh(&self) -> &dyn MeshQuery;

    /// Locate the skin deformer for the selection's mesh. `None` means the
    /// mesh is not skinned, which the command treats as a silent skip.
    fn find_deformer(&mut self) -> Result<Option<&mut dyn SkinDeformer>, BlendError>;
}
