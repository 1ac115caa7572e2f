//! Identifiers for core entities.

use serde::{Deserialize, Serialize};

/// Host mesh vertex identifier. Opaque to the core; the host assigns them and
/// the core only carries them between selection, lookup, and commit calls.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vtx[{}]", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_ordering() {
        assert_eq!(VertexId(7).to_string(), "vtx[7]");
        assert!(VertexId(1) < VertexId(2));
    }
}
