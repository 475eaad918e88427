/// Property-based roundtrip tests.
///
/// Generates random trees from the public constructors and checks that
/// `parse(serialize(tree)) == tree`. String payloads and member names never
/// contain `"`, since neither side escapes it; everything else, including
/// control characters and non-ASCII text, is fair game.
///
/// Also checks that the parser agrees with `serde_json` on the strict-JSON
/// subset both accept, and that it never panics on arbitrary bytes.
use proptest::prelude::*;
use sandbox_json::{parse, serialize, NumberFormat, SerializeOptions, Value};

// ============================================================================
// Strategies
// ============================================================================

/// Text without a double quote.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 _.:,{}\\[\\]-]{0,20}",
        Just(String::new()),
        Just("caf\u{e9}".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
        Just("tab\there".to_string()),
        Just("back\\slash".to_string()),
        Just("true".to_string()),
        Just("42".to_string()),
    ]
}

fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000i64).prop_map(|n| n as f64),
        any::<f64>().prop_filter("JSON numbers are finite", |f| f.is_finite()),
    ]
}

fn arb_scalar() -> impl Strategy<Value = Value<'static>> {
    prop_oneof![
        Just(Value::null()),
        any::<bool>().prop_map(Value::bool),
        arb_number().prop_map(Value::number),
        arb_text().prop_map(Value::from),
    ]
}

fn arb_tree() -> impl Strategy<Value = Value<'static>> {
    arb_scalar().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::array_from),
            prop::collection::vec((arb_text(), inner), 0..6).prop_map(|pairs| {
                let mut object = Value::object();
                for (name, member) in pairs {
                    object
                        .add_member_owned(name, member)
                        .expect("object accepts members");
                }
                object
            }),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_tree_roundtrip(tree in arb_tree()) {
        let text = serialize(&tree);
        let back = parse(&text).expect("serialized tree must parse");
        prop_assert_eq!(back, tree);
    }

    #[test]
    fn prop_serialize_is_stable(tree in arb_tree()) {
        let once = serialize(&tree);
        let twice = serialize(&parse(&once).expect("parse"));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_number_shortest_is_exact(n in arb_number()) {
        let text = serialize(&Value::number(n));
        let back = parse(&text).expect("number must parse");
        prop_assert_eq!(back.as_f64(), Some(n));
    }

    #[test]
    fn prop_printf_numbers_parse_within_precision(n in arb_number()) {
        let options = SerializeOptions::default().with_number_format(NumberFormat::Printf);
        let text = sandbox_json::serialize_with_options(&Value::number(n), &options);
        let back = parse(&text).expect("%g output must parse").as_f64().expect("number");
        let tolerance = n.abs() * 1e-5;
        prop_assert!((back - n).abs() <= tolerance, "{} -> {} -> {}", n, text, back);
    }

    #[test]
    fn prop_agrees_with_serde_json_on_strict_json(tree in arb_tree()) {
        // serde_json output escapes control characters and backslashes, which
        // this parser would keep verbatim; restrict to trees it writes plainly.
        let strict = serde_json::to_string(&tree).expect("serde_json serializes Value");
        if strict.contains('\\') {
            return Ok(());
        }
        let ours = parse(&strict).expect("parse serde_json output");
        prop_assert_eq!(ours.to_serde_json(), tree.to_serde_json());
    }

    #[test]
    fn prop_parse_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = parse(&bytes);
    }

    #[test]
    fn prop_truncated_documents_fail(tree in arb_tree(), cut in 0usize..1000) {
        if !tree.is_container() {
            return Ok(());
        }
        let text = serialize(&tree);
        let cut = cut % text.len();
        if !text.is_char_boundary(cut) {
            return Ok(());
        }
        // Any strict prefix of a container document is missing its closer.
        prop_assert!(parse(&text[..cut]).is_err());
    }
}
