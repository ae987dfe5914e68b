//! Integration-level tests exercising the public API end to end, in the
//! style of `ion-hash-tests.rs`'s table-driven test vectors (see
//! `examples/other_examples/02fdaed6_..._ion_hash_tests.rs.rs`), but using
//! this crate's own `IdentityHashFunctionProvider` instead of a real Ion
//! test-vector file (reading `.ion` test data is out of scope here).

use ion_hash::provider::IdentityHashFunctionProvider;
use ion_hash::{hash_value, AnnotatedValue, IonType, SymbolToken, Value};
use rstest::rstest;

fn int(n: u8) -> AnnotatedValue {
    AnnotatedValue::new(Value::Scalar {
        ion_type: IonType::Int,
        bytes: vec![0x21, n],
    })
}

#[rstest]
#[case(vec![int(1)], vec![0x0B, 0xB0, 0x0B, 0x20, 0x01, 0x0E, 0x0E])]
#[case(vec![], vec![0x0B, 0xB0, 0x0E])]
#[case(vec![int(1), int(1)], vec![0x0B, 0xB0, 0x0B, 0x20, 0x01, 0x0E, 0x0B, 0x20, 0x01, 0x0E, 0x0E])]
fn list_scenarios(#[case] elements: Vec<AnnotatedValue>, #[case] expected: Vec<u8>) {
    let value = AnnotatedValue::new(Value::Sequence {
        ion_type: IonType::List,
        elements,
    });
    let digest = hash_value(&value, IdentityHashFunctionProvider).unwrap();
    assert_eq!(digest, expected);
}

#[rstest]
#[case(IonType::List)]
#[case(IonType::Sexp)]
fn non_identity_permutation_of_a_sequence_changes_the_digest(#[case] ion_type: IonType) {
    let build = |order: [u8; 3]| {
        let value = AnnotatedValue::new(Value::Sequence {
            ion_type,
            elements: order.iter().map(|&n| int(n)).collect(),
        });
        hash_value(&value, IdentityHashFunctionProvider).unwrap()
    };

    assert_ne!(build([1, 2, 3]), build([3, 2, 1]));
    assert_ne!(build([1, 2, 3]), build([2, 1, 3]));
}

#[test]
fn struct_permutation_never_changes_the_digest() {
    let build = |order: Vec<&str>| {
        let fields: Vec<(SymbolToken, AnnotatedValue)> = order
            .into_iter()
            .enumerate()
            .map(|(i, name)| (SymbolToken::Text(name.to_string()), int(i as u8)))
            .collect();
        let value = AnnotatedValue::new(Value::Struct { fields });
        hash_value(&value, IdentityHashFunctionProvider).unwrap()
    };

    let names = vec!["alpha", "bravo", "charlie", "delta"];
    let base = build(names.clone());

    let mut rotated = names.clone();
    rotated.rotate_left(1);
    assert_eq!(build(rotated), base);

    let reversed: Vec<&str> = names.iter().rev().copied().collect();
    assert_eq!(build(reversed), base);
}

#[test]
fn nested_struct_inside_list_shares_the_list_accumulator() {
    // A struct nested directly inside a list shares the list's
    // accumulator for its own opening/closing framing bytes (per spec
    // §4.5, the accumulator choice depends on the *parent's* kind, not
    // the new frame's), while still isolating and sorting its own fields
    // internally.
    let fields = vec![
        (SymbolToken::Text("z".to_string()), int(9)),
        (SymbolToken::Text("a".to_string()), int(1)),
    ];
    let nested_struct = AnnotatedValue::new(Value::Struct { fields });
    let value = AnnotatedValue::new(Value::Sequence {
        ion_type: IonType::List,
        elements: vec![nested_struct],
    });

    let digest = hash_value(&value, IdentityHashFunctionProvider).unwrap();
    assert_eq!(digest[0], 0x0B);
    assert_eq!(digest[1], 0xB0); // list TQ
    assert_eq!(digest[2], 0x0B);
    assert_eq!(digest[3], 0xD0); // struct TQ, directly following the list's open marker
    assert_eq!(*digest.last().unwrap(), 0x0E);
}

#[test]
fn naughty_string_field_names_do_not_panic_and_are_order_independent() {
    // A sample from "big list of naughty strings" style inputs (see
    // `tests/test_big_list_of_naughty_strings.py` in original_source/):
    // field names containing characters that collide with the sentinel
    // bytes' Unicode codepoints, emoji, and empty text.
    let naughty: Vec<&str> = vec![
        "",
        "\u{0B}\u{0E}\u{0C}",
        "𝐀𝐁𝐂",
        "\u{0}",
        "drop table users;",
    ];

    for name in naughty {
        let fields = vec![(SymbolToken::Text(name.to_string()), int(1))];
        let value = AnnotatedValue::new(Value::Struct { fields });
        let digest = hash_value(&value, IdentityHashFunctionProvider).unwrap();
        assert!(!digest.is_empty());
    }
}
