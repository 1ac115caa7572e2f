//! Command argument surface.
//!
//! The host command forwards its raw flag tokens; adapters that already have
//! structured options can build [`BlendArgs`] directly or deserialize it.

use serde::{Deserialize, Serialize};

use crate::error::BlendError;
use crate::space::{BlendFalloff, BlendSpace};

pub const BLEND_COMMAND: &str = "blendWeightsByDistance";

pub const UV_SPACE_FLAG: &str = "-uv";
pub const UV_SPACE_LONG_FLAG: &str = "-uvspace";
pub const QUADRATIC_FLAG: &str = "-qb";
pub const QUADRATIC_LONG_FLAG: &str = "-quadraticblend";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlendArgs {
    #[serde(default)]
    pub uv_space: bool,
    #[serde(default)]
    pub quadratic_blend: bool,
}

impl BlendArgs {
    /// Parse `[-uv|-uvspace <bool>] [-qb|-quadraticblend <bool>]`.
    /// Both flags default to false when absent.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, BlendError> {
        let mut args = BlendArgs::default();
        let mut it = tokens.iter();
        while let Some(tok) = it.next() {
            let flag = tok.as_ref();
            let target = match flag {
                UV_SPACE_FLAG | UV_SPACE_LONG_FLAG => &mut args.uv_space,
                QUADRATIC_FLAG | QUADRATIC_LONG_FLAG => &mut args.quadratic_blend,
                _ => {
                    return Err(BlendError::UnknownFlag {
                        flag: flag.to_string(),
                    })
                }
            };
            let value = it.next().ok_or_else(|| BlendError::MissingFlagValue {
                flag: flag.to_string(),
            })?;
            *target = parse_bool(flag, value.as_ref())?;
        }
        Ok(args)
    }

    #[inline]
    pub fn space(&self) -> BlendSpace {
        if self.uv_space {
            BlendSpace::Uv
        } else {
            BlendSpace::Object
        }
    }

    #[inline]
    pub fn falloff(&self) -> BlendFalloff {
        if self.quadratic_blend {
            BlendFalloff::Quadratic
        } else {
            BlendFalloff::Linear
        }
    }
}

fn parse_bool(flag: &str, value: &str) -> Result<bool, BlendError> {
    match value {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(BlendError::InvalidFlagValue {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}
