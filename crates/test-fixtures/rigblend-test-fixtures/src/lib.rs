//! In-memory host implementations and JSON mesh fixtures for rigblend tests.
//!
//! `FixtureHost` implements the core host traits over a plain vertex table
//! and records every deformer call, so tests can assert batching, envelope
//! ordering, and the no-mutation guarantees of the skip paths.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use rigblend_core::{BlendError, MeshQuery, SkinDeformer, SkinHost, VertexId};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    meshes: HashMap<String, String>,
}

/// On-disk mesh fixture: a skinned vertex table with a selection.
#[derive(Debug, Clone, Deserialize)]
pub struct MeshFixture {
    pub influence_count: usize,
    pub selection: Vec<u32>,
    pub positions: Vec<[f64; 3]>,
    pub uvs: Vec<[f64; 2]>,
    pub weights: Vec<f64>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

pub mod meshes {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.meshes.keys().cloned().collect()
    }

    pub fn load(name: &str) -> Result<MeshFixture> {
        let rel = MANIFEST
            .meshes
            .get(name)
            .ok_or_else(|| anyhow!("unknown mesh fixture '{name}'"))?;
        let path = fixtures_root().join(rel);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture at {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse mesh fixture {rel}"))
    }
}

/// Recorded deformer traffic.
#[derive(Debug, Default, Clone)]
pub struct CallLog {
    /// Number of batched weight reads.
    pub weight_reads: usize,
    /// Number of batched weight commits.
    pub weight_writes: usize,
    /// Envelope states in the order they were requested.
    pub envelope_events: Vec<bool>,
}

#[derive(Debug, Clone)]
pub struct FixtureMesh {
    pub selection: Vec<VertexId>,
    pub positions: Vec<[f64; 3]>,
    pub uvs: Vec<[f64; 2]>,
}

impl MeshQuery for FixtureMesh {
    fn selected_vertices(&self) -> Vec<VertexId> {
        self.selection.clone()
    }

    fn position(&self, vertex: VertexId) -> Result<[f64; 3], BlendError> {
        self.positions
            .get(vertex.0 as usize)
            .copied()
            .ok_or(BlendError::VertexNotFound { vertex })
    }

    fn uv(&self, vertex: VertexId) -> Result<[f64; 2], BlendError> {
        self.uvs
            .get(vertex.0 as usize)
            .copied()
            .ok_or(BlendError::VertexNotFound { vertex })
    }
}

/// Whole-mesh weight table, one row per vertex id.
#[derive(Debug, Clone)]
pub struct FixtureDeformer {
    pub influence_count: usize,
    pub weights: Vec<f64>,
    pub envelope_enabled: bool,
    pub calls: CallLog,
}

impl FixtureDeformer {
    fn row(&self, vertex: VertexId) -> Result<&[f64], BlendError> {
        let start = vertex.0 as usize * self.influence_count;
        let end = start + self.influence_count;
        self.weights
            .get(start..end)
            .ok_or(BlendError::VertexNotFound { vertex })
    }

    /// Current row for a vertex, for test assertions.
    pub fn vertex_weights(&self, vertex: VertexId) -> Vec<f64> {
        self.row(vertex).expect("fixture vertex exists").to_vec()
    }
}

impl SkinDeformer for FixtureDeformer {
    fn influence_count(&self) -> usize {
        self.influence_count
    }

    fn weights(&mut self, vertices: &[VertexId]) -> Result<Vec<f64>, BlendError> {
        self.calls.weight_reads += 1;
        let mut out = Vec::with_capacity(vertices.len() * self.influence_count);
        for &v in vertices {
            out.extend_from_slice(self.row(v)?);
        }
        Ok(out)
    }

    fn set_weights(
        &mut self,
        vertices: &[VertexId],
        influences: &[u32],
        weights: &[f64],
        normalize: bool,
    ) -> Result<Vec<f64>, BlendError> {
        let expected = vertices.len() * influences.len();
        if weights.len() != expected {
            return Err(BlendError::WeightCountMismatch {
                expected,
                actual: weights.len(),
            });
        }
        self.calls.weight_writes += 1;

        let mut previous = Vec::with_capacity(expected);
        for &v in vertices {
            previous.extend_from_slice(self.row(v)?);
        }
        for (r, &v) in vertices.iter().enumerate() {
            let mut row: Vec<f64> = Vec::with_capacity(influences.len());
            row.extend_from_slice(&weights[r * influences.len()..(r + 1) * influences.len()]);
            if normalize {
                let sum: f64 = row.iter().sum();
                if sum != 0.0 {
                    for w in &mut row {
                        *w /= sum;
                    }
                }
            }
            let start = v.0 as usize * self.influence_count;
            for (j, &idx) in influences.iter().enumerate() {
                self.weights[start + idx as usize] = row[j];
            }
        }
        Ok(previous)
    }

    fn set_envelope_enabled(&mut self, enabled: bool) -> Result<(), BlendError> {
        self.envelope_enabled = enabled;
        self.calls.envelope_events.push(enabled);
        Ok(())
    }
}

/// Mesh plus optional deformer; the test double for one command invocation.
#[derive(Debug, Clone)]
pub struct FixtureHost {
    pub mesh: FixtureMesh,
    pub deformer: Option<FixtureDeformer>,
}

impl SkinHost for FixtureHost {
    fn mesh(&self) -> &dyn MeshQuery {
        &self.mesh
    }

    fn find_deformer(&mut self) -> Result<Option<&mut dyn SkinDeformer>, BlendError> {
        Ok(self
            .deformer
            .as_mut()
            .map(|d| d as &mut dyn SkinDeformer))
    }
}

impl FixtureHost {
    /// Build a host from a named JSON fixture in the manifest.
    pub fn from_named(name: &str) -> Result<Self> {
        Ok(Self::from_fixture(meshes::load(name)?))
    }

    pub fn from_fixture(fixture: MeshFixture) -> Self {
        FixtureHost {
            mesh: FixtureMesh {
                selection: fixture.selection.into_iter().map(VertexId).collect(),
                positions: fixture.positions,
                uvs: fixture.uvs,
            },
            deformer: Some(FixtureDeformer {
                influence_count: fixture.influence_count,
                weights: fixture.weights,
                envelope_enabled: true,
                calls: CallLog::default(),
            }),
        }
    }

    /// Deformer accessor for assertions; panics if the host is unskinned.
    pub fn deformer(&self) -> &FixtureDeformer {
        self.deformer.as_ref().expect("host has a deformer")
    }
}

/// `n` vertices spaced 1.0 apart along +X, UVs spread over [0,1]x{0.5}.
/// First vertex fully on influence 0, last fully on influence 1, middles
/// split evenly across all influences.
pub fn line_host(n: usize, influence_count: usize) -> FixtureHost {
    assert!(n >= 2 && influence_count >= 2);
    let mut positions = Vec::with_capacity(n);
    let mut uvs = Vec::with_capacity(n);
    let mut weights = Vec::with_capacity(n * influence_count);
    for i in 0..n {
        positions.push([i as f64, 0.0, 0.0]);
        uvs.push([i as f64 / (n - 1) as f64, 0.5]);
        let mut row = vec![0.0; influence_count];
        if i == 0 {
            row[0] = 1.0;
        } else if i == n - 1 {
            row[1] = 1.0;
        } else {
            row.fill(1.0 / influence_count as f64);
        }
        weights.extend_from_slice(&row);
    }
    FixtureHost::from_fixture(MeshFixture {
        influence_count,
        selection: (0..n as u32).collect(),
        positions,
        uvs,
        weights,
    })
}

/// The three-vertex collinear scenario: A(0,0,0) with weights [1,0],
/// B(1,0,0), C(2,0,0) with weights [0,1].
pub fn collinear_abc_host() -> FixtureHost {
    FixtureHost::from_fixture(MeshFixture {
        influence_count: 2,
        selection: vec![0, 1, 2],
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
        uvs: vec![[0.0, 0.0], [0.5, 0.0], [1.0, 0.0]],
        weights: vec![1.0, 0.0, 1.0, 0.0, 0.0, 1.0],
    })
}

/// Every vertex at the origin; trips the degenerate-geometry guard.
pub fn coincident_host(n: usize) -> FixtureHost {
    FixtureHost::from_fixture(MeshFixture {
        influence_count: 2,
        selection: (0..n as u32).collect(),
        positions: vec![[0.0, 0.0, 0.0]; n],
        uvs: vec![[0.0, 0.0]; n],
        weights: [1.0, 0.0].repeat(n),
    })
}

/// A selection on a mesh with no skin deformer.
pub fn unskinned_host(n: usize) -> FixtureHost {
    let mut host = line_host(n.max(3), 2);
    host.deformer = None;
    host.mesh.selection.truncate(n);
    host
}
