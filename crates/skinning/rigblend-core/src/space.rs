//! Measurement spaces and falloff curves.
//!
//! Both choices used to be runtime-selected closures in the command layer;
//! they are plain enums here so host adapters can serialize them and the
//! blend pass can match on them without captured state.

use serde::{Deserialize, Serialize};

/// Where vertex-to-vertex distances are measured.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum BlendSpace {
    /// Euclidean distance over 3D object-space positions.
    #[default]
    Object,
    /// Euclidean distance over 2D surface-parameterization coordinates.
    Uv,
}

/// How endpoint weights are mixed over normalized distance.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum BlendFalloff {
    #[default]
    Linear,
    Quadratic,
}

#[inline]
pub fn distance3(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[inline]
pub fn distance2(a: [f64; 2], b: [f64; 2]) -> f64 {
    let du = a[0] - b[0];
    let dv = a[1] - b[1];
    (du * du + dv * dv).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        assert_eq!(distance3([0.0, 0.0, 0.0], [3.0, 4.0, 0.0]), 5.0);
        assert_eq!(distance2([1.0, 1.0], [1.0, 3.0]), 2.0);
    }

    #[test]
    fn enum_serde_roundtrip() {
        let s = serde_json::to_string(&BlendSpace::Uv).unwrap();
        assert_eq!(serde_json::from_str::<BlendSpace>(&s).unwrap(), BlendSpace::Uv);
        let f = serde_json::to_string(&BlendFalloff::Quadratic).unwrap();
        assert_eq!(
            serde_json::from_str::<BlendFalloff>(&f).unwrap(),
            BlendFalloff::Quadratic
        );
    }
}
