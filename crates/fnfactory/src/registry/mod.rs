//! Tag-to-constructor registry.
//!
//! The registry replaces a compile-time `match` on the tag with a runtime
//! dispatch table: adding a record type is one [`VariantRegistry::register`]
//! call and never touches the decoder.
//!
//! Registration takes `&mut self` and construction `&self`, so once a
//! registry is shared with decoders (by reference, possibly across threads)
//! it cannot change until every decoder has let go of it.

mod builtin;
mod error;

use std::fmt;
use std::sync::Arc;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use crate::port::{ReadError, ReadPort};
use crate::variant::{CustomVariant, Decode, Tag, Variant};

pub use builtin::{register_builtin_variants, ConstructorFn, BUILTIN_VARIANTS};
pub use error::FactoryError;

/// A registered constructor.
pub type Constructor =
    Arc<dyn Fn(&mut dyn ReadPort) -> Result<Variant, ReadError> + Send + Sync>;

/// Mapping from [`Tag`] to the constructor that reads that record type.
#[derive(Clone, Default)]
pub struct VariantRegistry {
    constructors: IndexMap<Tag, Constructor>,
}

impl fmt::Debug for VariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}

impl VariantRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the builtin variants.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtin_variants(&mut registry);
        registry
    }

    /// Installs `ctor` under `tag`; the last registration for a tag wins.
    ///
    /// Returns the constructor that was replaced, if any.
    pub fn register<F>(&mut self, tag: Tag, ctor: F) -> Option<Constructor>
    where
        F: Fn(&mut dyn ReadPort) -> Result<Variant, ReadError> + Send + Sync + 'static,
    {
        let replaced = self.constructors.insert(tag, Arc::new(ctor));
        if replaced.is_some() {
            debug!(%tag, "replaced registered constructor");
        }
        replaced
    }

    /// Like [`register`](Self::register), but refuses to replace.
    pub fn try_register<F>(&mut self, tag: Tag, ctor: F) -> Result<(), FactoryError>
    where
        F: Fn(&mut dyn ReadPort) -> Result<Variant, ReadError> + Send + Sync + 'static,
    {
        match self.constructors.entry(tag) {
            Entry::Occupied(_) => Err(FactoryError::DuplicateTag(tag)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(ctor));
                Ok(())
            }
        }
    }

    /// Registers a type that decodes itself and converts into a [`Variant`].
    pub fn register_decoder<T>(&mut self, tag: Tag) -> Option<Constructor>
    where
        T: Decode + Into<Variant> + 'static,
    {
        self.register(tag, builtin::decode_into::<T>)
    }

    /// Registers a [`CustomVariant`] under `tag`.
    pub fn register_custom<T>(&mut self, tag: Tag) -> Option<Constructor>
    where
        T: Decode + CustomVariant + 'static,
    {
        self.register(tag, move |port: &mut dyn ReadPort| {
            T::decode(port).map(|value| Variant::custom(tag, value))
        })
    }

    /// Builds the variant for `tag`, reading its fields from `reader`.
    ///
    /// An unknown tag fails before anything is read.
    pub fn construct(&self, tag: Tag, reader: &mut dyn ReadPort) -> Result<Variant, FactoryError> {
        let ctor = self
            .constructors
            .get(&tag)
            .ok_or(FactoryError::UnknownTag(tag))?;
        ctor(reader).map_err(|source| FactoryError::ConstructionFailed { tag, source })
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.constructors.contains_key(&tag)
    }

    /// Registered tags, in first-registration order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.constructors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
