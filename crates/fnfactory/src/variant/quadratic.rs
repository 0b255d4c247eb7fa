//! Quadratic polynomial `a·x² + b·x + c`.

use super::{Decode, EncodeFields, Evaluable};
use crate::encode::WritePort;
use crate::port::{ReadError, ReadPort, ReadPortExt};

/// Record layout: three `f64` fields, in order `a`, `b`, `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

impl Evaluable for Quadratic {
    fn evaluate(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }
}

impl Decode for Quadratic {
    fn decode(port: &mut dyn ReadPort) -> Result<Self, ReadError> {
        let a: f64 = port.read()?;
        let b: f64 = port.read()?;
        let c: f64 = port.read()?;
        Ok(Self::new(a, b, c))
    }
}

impl EncodeFields for Quadratic {
    fn encode_fields(&self, out: &mut dyn WritePort) {
        out.write_f64(self.a);
        out.write_f64(self.b);
        out.write_f64(self.c);
    }
}
