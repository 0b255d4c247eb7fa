//! Sine clipped to the identity near zero.

use super::{Decode, EncodeFields, Evaluable};
use crate::encode::WritePort;
use crate::port::{ReadError, ReadPort};

/// Inputs strictly below this return themselves; from it upward, `sin(x)`.
pub const CLIP_THRESHOLD: f64 = 0.1;

/// Record layout: no fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClippedSine;

impl Evaluable for ClippedSine {
    fn evaluate(&self, x: f64) -> f64 {
        if x < CLIP_THRESHOLD {
            x
        } else {
            x.sin()
        }
    }
}

impl Decode for ClippedSine {
    fn decode(_port: &mut dyn ReadPort) -> Result<Self, ReadError> {
        Ok(ClippedSine)
    }
}

impl EncodeFields for ClippedSine {
    fn encode_fields(&self, _out: &mut dyn WritePort) {}
}
