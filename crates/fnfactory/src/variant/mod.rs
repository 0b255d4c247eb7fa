//! Evaluable variants and the tags that identify them on the wire.

mod clipped_sine;
mod quadratic;

use std::fmt;

use serde::Serialize;

use crate::encode::WritePort;
use crate::port::{ReadError, ReadPort};

pub use clipped_sine::{ClippedSine, CLIP_THRESHOLD};
pub use quadratic::Quadratic;

/// Record type identifier, persisted in the stream ahead of each record.
///
/// On the wire a tag is a 32-bit signed integer; every non-negative value is
/// a tag, registered or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(u32);

impl Tag {
    /// Largest tag the wire can carry.
    pub const MAX: Tag = Tag(i32::MAX as u32);

    /// # Panics
    ///
    /// If `value` exceeds [`Tag::MAX`]. In a `const` this fails to compile.
    pub const fn new(value: u32) -> Self {
        assert!(value <= Tag::MAX.0, "tag does not fit in an i32");
        Tag(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Wire representation.
    pub fn wire(self) -> i32 {
        // Bounded by Tag::MAX.
        self.0 as i32
    }
}

impl TryFrom<i32> for Tag {
    type Error = ReadError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        u32::try_from(raw)
            .map(Tag)
            .map_err(|_| ReadError::malformed("tag", raw.to_string()))
    }
}

impl From<u16> for Tag {
    fn from(value: u16) -> Self {
        Tag(u32::from(value))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The capability every constructed object exposes.
pub trait Evaluable {
    /// Pure function of the variant's fields and `x`.
    fn evaluate(&self, x: f64) -> f64;
}

/// Construction from a reader port.
///
/// Implementations consume exactly their own fields, in a fixed order.
pub trait Decode: Sized {
    fn decode(port: &mut dyn ReadPort) -> Result<Self, ReadError>;
}

/// Writes a variant's fields (not its tag) in the order [`Decode`] reads them.
pub trait EncodeFields {
    fn encode_fields(&self, out: &mut dyn WritePort);
}

/// A variant defined outside this crate.
///
/// Blanket-implemented; register one with
/// [`VariantRegistry::register_custom`](crate::VariantRegistry::register_custom).
pub trait CustomVariant: Evaluable + EncodeFields + fmt::Debug + Send + Sync {}

impl<T: Evaluable + EncodeFields + fmt::Debug + Send + Sync> CustomVariant for T {}

/// One decoded record.
#[derive(Debug)]
pub enum Variant {
    Quadratic(Quadratic),
    ClippedSine(ClippedSine),
    Custom {
        tag: Tag,
        value: Box<dyn CustomVariant>,
    },
}

impl Variant {
    pub fn custom(tag: Tag, value: impl CustomVariant + 'static) -> Self {
        Variant::Custom {
            tag,
            value: Box::new(value),
        }
    }

    /// Tag this variant is written under.
    pub fn tag(&self) -> Tag {
        match self {
            Variant::Quadratic(_) => Tag::QUADRATIC,
            Variant::ClippedSine(_) => Tag::CLIPPED_SINE,
            Variant::Custom { tag, .. } => *tag,
        }
    }

    /// Short name for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Variant::Quadratic(_) => "quadratic",
            Variant::ClippedSine(_) => "clipped-sine",
            Variant::Custom { .. } => "custom",
        }
    }
}

impl Evaluable for Variant {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            Variant::Quadratic(q) => q.evaluate(x),
            Variant::ClippedSine(s) => s.evaluate(x),
            Variant::Custom { value, .. } => value.evaluate(x),
        }
    }
}

impl EncodeFields for Variant {
    fn encode_fields(&self, out: &mut dyn WritePort) {
        match self {
            Variant::Quadratic(q) => q.encode_fields(out),
            Variant::ClippedSine(s) => s.encode_fields(out),
            Variant::Custom { value, .. } => value.encode_fields(out),
        }
    }
}

impl From<Quadratic> for Variant {
    fn from(q: Quadratic) -> Self {
        Variant::Quadratic(q)
    }
}

impl From<ClippedSine> for Variant {
    fn from(s: ClippedSine) -> Self {
        Variant::ClippedSine(s)
    }
}
