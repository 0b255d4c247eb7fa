//! Record stream decoding over text and binary transports.

use fnfactory::{
    decode_all, encode_all, evaluate_all, BinaryReader, BinaryWriter, ClippedSine, Evaluable,
    FactoryError, Quadratic, ReadError, ReadPort, Tag, TextReader, TextWriter, Variant,
    VariantRegistry,
};

fn builtins() -> VariantRegistry {
    VariantRegistry::with_builtins()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} vs {expected:?}");
    }
}

// ---------------------------------------------------------------------------
// Text transport
// ---------------------------------------------------------------------------

#[test]
fn reference_stream_decodes_in_order() {
    let registry = builtins();
    let variants = decode_all(&registry, TextReader::new("1 2.0 -1.0 0.5\n2\n".as_bytes())).unwrap();
    assert_eq!(variants.len(), 2);
    assert!(matches!(
        variants[0],
        Variant::Quadratic(Quadratic { a, b, c }) if a == 2.0 && b == -1.0 && c == 0.5
    ));
    assert!(matches!(variants[1], Variant::ClippedSine(ClippedSine)));
}

#[test]
fn single_line_stream_evaluates_at_one() {
    let registry = builtins();
    let variants = decode_all(&registry, TextReader::new("1 2.0 -1.0 0.5 2".as_bytes())).unwrap();
    assert_close(&evaluate_all(&variants, 1.0), &[1.5, 0.841_470_984_8]);
}

#[test]
fn empty_stream_is_empty_collection() {
    let registry = builtins();
    assert!(decode_all(&registry, TextReader::new(&b""[..])).unwrap().is_empty());
}

#[test]
fn field_token_reinterpreted_as_tag() {
    // Clipped-sine has no fields, so `99` is the next record's tag.
    let registry = builtins();
    let err = decode_all(&registry, TextReader::new("2 99".as_bytes())).unwrap_err();
    assert!(matches!(err.error, FactoryError::UnknownTag(t) if t == Tag::new(99)));
    assert_eq!(err.decoded.len(), 1);
    assert!(matches!(err.decoded[0], Variant::ClippedSine(_)));
}

#[test]
fn truncated_record_keeps_earlier_records() {
    let registry = builtins();
    let err = decode_all(&registry, TextReader::new("2 1 1.0 2.0".as_bytes())).unwrap_err();
    assert_eq!(err.decoded.len(), 1);
    match err.error {
        FactoryError::ConstructionFailed { tag, source } => {
            assert_eq!(tag, Tag::QUADRATIC);
            assert!(source.is_exhausted());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn malformed_field_aborts_without_resync() {
    let registry = builtins();
    let err = decode_all(&registry, TextReader::new("1 1.0 oops 3.0 2 2".as_bytes())).unwrap_err();
    assert!(err.decoded.is_empty());
    assert!(matches!(
        err.error,
        FactoryError::ConstructionFailed {
            source: ReadError::Malformed { expected: "f64", .. },
            ..
        }
    ));
}

#[test]
fn unknown_tag_leaves_reader_untouched() {
    let registry = builtins();
    let mut port = TextReader::new("1.0 2.0 3.0".as_bytes());
    for tag in [0u32, 3, 99, 70_000, Tag::MAX.get()] {
        let err = registry.construct(Tag::new(tag), &mut port).unwrap_err();
        assert!(matches!(err, FactoryError::UnknownTag(t) if t.get() == tag));
        assert_eq!(port.position(), 0);
    }
    assert_eq!(port.read_f64().unwrap(), 1.0);
}

#[test]
fn builtin_formulas_at_sample_points() {
    let registry = builtins();
    let mut port = TextReader::new("3.0 -2.0 1.0".as_bytes());
    let quadratic = registry.construct(Tag::QUADRATIC, &mut port).unwrap();
    for x in [-1.0, 0.0, 2.0, 0.5] {
        assert_eq!(quadratic.evaluate(x), 3.0 * x * x - 2.0 * x + 1.0);
    }

    let sine = registry.construct(Tag::CLIPPED_SINE, &mut port).unwrap();
    assert_eq!(port.position(), 3);
    for x in [-5.0, 0.0, 0.05] {
        assert_eq!(sine.evaluate(x), x);
    }
    for x in [0.1, 1.0, 4.0] {
        assert_eq!(sine.evaluate(x), x.sin());
    }
}

// ---------------------------------------------------------------------------
// Binary transport
// ---------------------------------------------------------------------------

#[test]
fn binary_stream_decodes_like_text() {
    let mut w = BinaryWriter::new();
    encode_all(
        &[
            Variant::from(Quadratic::new(2.0, -1.0, 0.5)),
            Variant::from(ClippedSine),
        ],
        &mut w,
    );
    let data = w.flush();
    assert_eq!(data.len(), 4 + 24 + 4);

    let registry = builtins();
    let variants = decode_all(&registry, BinaryReader::new(&data)).unwrap();
    assert_close(&evaluate_all(&variants, 1.0), &[1.5, 1.0f64.sin()]);
}

#[test]
fn binary_truncated_field_is_malformed() {
    let mut w = BinaryWriter::new();
    encode_all(&[Variant::from(Quadratic::new(1.0, 2.0, 3.0))], &mut w);
    let mut data = w.flush();
    data.truncate(data.len() - 3);

    let registry = builtins();
    let err = decode_all(&registry, BinaryReader::new(&data)).unwrap_err();
    assert!(matches!(
        err.error,
        FactoryError::ConstructionFailed {
            source: ReadError::Malformed { expected: "f64", .. },
            ..
        }
    ));
}

#[test]
fn binary_partial_tag_is_a_tag_error() {
    let data = [0u8, 0, 0, 2, 0, 0];
    let registry = builtins();
    let err = decode_all(&registry, BinaryReader::new(&data)).unwrap_err();
    assert_eq!(err.decoded.len(), 1);
    assert!(matches!(
        err.error,
        FactoryError::TagRead(ReadError::Malformed { expected: "i32", .. })
    ));
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[test]
fn text_encoding_decodes_back_to_same_values() {
    let registry = builtins();
    let original = decode_all(
        &registry,
        TextReader::new("1 0.25 -3 1e-3 2 2 1 1 1 1".as_bytes()),
    )
    .unwrap();

    let mut w = TextWriter::new();
    encode_all(&original, &mut w);
    let text = w.into_string();
    assert_eq!(text.lines().count(), 4);

    let decoded = decode_all(&registry, TextReader::new(text.as_bytes())).unwrap();
    for x in [-1.0, 0.1, 2.5] {
        assert_eq!(evaluate_all(&decoded, x), evaluate_all(&original, x));
    }
}
