//! Factory error type.

use thiserror::Error;

use crate::port::ReadError;
use crate::variant::Tag;

/// Failure to turn one record into a [`Variant`](crate::Variant).
#[derive(Debug, Error)]
pub enum FactoryError {
    /// The stream names a tag with no registered constructor.
    #[error("unknown tag {0}")]
    UnknownTag(Tag),
    /// A constructor's own field reads failed partway through its record.
    #[error("constructing tag {tag} failed: {source}")]
    ConstructionFailed {
        tag: Tag,
        #[source]
        source: ReadError,
    },
    /// The record tag itself could not be read.
    #[error("failed to read record tag: {0}")]
    TagRead(#[source] ReadError),
    /// [`VariantRegistry::try_register`](super::VariantRegistry::try_register)
    /// found the tag already taken.
    #[error("tag {0} is already registered")]
    DuplicateTag(Tag),
}
