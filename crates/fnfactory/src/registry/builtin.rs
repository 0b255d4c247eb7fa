//! The builtin `{Tag, Constructor}` table.

use super::VariantRegistry;
use crate::port::{ReadError, ReadPort};
use crate::variant::{ClippedSine, Decode, Quadratic, Tag, Variant};

impl Tag {
    pub const QUADRATIC: Tag = Tag::new(1);
    pub const CLIPPED_SINE: Tag = Tag::new(2);
}

/// Plain-function constructor, as stored in [`BUILTIN_VARIANTS`].
pub type ConstructorFn = fn(&mut dyn ReadPort) -> Result<Variant, ReadError>;

/// Every builtin variant with the tag it is read under.
pub const BUILTIN_VARIANTS: &[(Tag, ConstructorFn)] = &[
    (Tag::QUADRATIC, decode_into::<Quadratic>),
    (Tag::CLIPPED_SINE, decode_into::<ClippedSine>),
];

pub(super) fn decode_into<T: Decode + Into<Variant>>(
    port: &mut dyn ReadPort,
) -> Result<Variant, ReadError> {
    T::decode(port).map(Into::into)
}

/// Installs [`BUILTIN_VARIANTS`] into `registry`, replacing any constructor
/// already registered under those tags.
pub fn register_builtin_variants(registry: &mut VariantRegistry) {
    for &(tag, ctor) in BUILTIN_VARIANTS {
        registry.register(tag, ctor);
    }
}
