//! Tagged-record decoding into evaluable variants.
//!
//! A record stream is a sequence of integer tags, each followed by the fields
//! of the variant it names. A [`VariantRegistry`] maps tags to constructors;
//! the [`RecordDecoder`] reads a tag, lets the matching constructor read the
//! rest of the record through a [`ReadPort`], and collects the results.
//! Which transport sits behind the port (text tokens, binary buffer) is
//! invisible to both.
//!
//! # Example
//!
//! ```
//! use fnfactory::{decode_all, evaluate_all, register_builtin_variants, TextReader, VariantRegistry};
//!
//! let mut registry = VariantRegistry::new();
//! register_builtin_variants(&mut registry);
//!
//! let variants = decode_all(&registry, TextReader::new("1 2.0 -1.0 0.5\n2\n".as_bytes())).unwrap();
//! let values = evaluate_all(&variants, 1.0);
//! assert_eq!(values[0], 1.5);
//! assert!((values[1] - 0.841_470_984_8).abs() < 1e-9);
//! ```

pub mod command;
pub mod config;
pub mod decoder;
pub mod driver;
pub mod encode;
pub mod logging;
pub mod port;
pub mod registry;
pub mod variant;

pub use command::{ConvertOptions, EvalOptions, Outcome};
pub use config::{ConfigError, DriverConfig, StreamFormat};
pub use decoder::{decode_all, DecodeError, RecordDecoder};
pub use driver::{evaluate_all, run, with_port, Evaluation, Report};
pub use encode::{encode_all, encode_record, BinaryWriter, TextWriter, WritePort};
pub use port::{BinaryReader, ReadError, ReadPort, ReadPortExt, TextReader};
pub use registry::{
    register_builtin_variants, Constructor, FactoryError, VariantRegistry, BUILTIN_VARIANTS,
};
pub use variant::{
    ClippedSine, CustomVariant, Decode, EncodeFields, Evaluable, Quadratic, Tag, Variant,
};
