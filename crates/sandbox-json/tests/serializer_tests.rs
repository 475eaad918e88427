/// Serializer contract tests.
///
/// Output is compact (no whitespace, no trailing newline), strings are
/// written verbatim, and numbers follow the selected `NumberFormat`.
use sandbox_json::{
    parse, serialize, serialize_into, serialize_with_options, NumberFormat, SerializeOptions,
    Value,
};

fn printf(n: f64) -> String {
    let options = SerializeOptions::default().with_number_format(NumberFormat::Printf);
    serialize_with_options(&Value::number(n), &options)
}

fn shortest(n: f64) -> String {
    serialize(&Value::number(n))
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn serialize_literals() {
    assert_eq!(serialize(&Value::null()), "null");
    assert_eq!(serialize(&Value::bool(true)), "true");
    assert_eq!(serialize(&Value::bool(false)), "false");
}

#[test]
fn serialize_string_is_quoted_verbatim() {
    assert_eq!(serialize(&Value::string("hello")), r#""hello""#);
    assert_eq!(serialize(&Value::string("")), r#""""#);
}

#[test]
fn serialize_string_does_not_escape() {
    // Embedded quotes, backslashes and control bytes pass through untouched.
    assert_eq!(serialize(&Value::string("a\"b")), "\"a\"b\"");
    assert_eq!(serialize(&Value::string(r"c:\dir")), r#""c:\dir""#);
    assert_eq!(serialize(&Value::string("x\ny")), "\"x\ny\"");
}

// ============================================================================
// Numbers: shortest round-trip (default)
// ============================================================================

#[test]
fn shortest_integers_have_no_fraction() {
    assert_eq!(shortest(0.0), "0");
    assert_eq!(shortest(42.0), "42");
    assert_eq!(shortest(-7.0), "-7");
}

#[test]
fn shortest_fractions() {
    assert_eq!(shortest(3.14), "3.14");
    assert_eq!(shortest(-0.5), "-0.5");
    assert_eq!(shortest(0.1 + 0.2), "0.30000000000000004");
}

#[test]
fn shortest_keeps_large_integers_exact() {
    assert_eq!(shortest(9007199254740991.0), "9007199254740991");
    assert_eq!(shortest(1234567.0), "1234567");
    assert_eq!(shortest(1e15), "1000000000000000");
}

#[test]
fn shortest_uses_exponent_for_extreme_magnitudes() {
    assert_eq!(shortest(1e16), "1e16");
    assert_eq!(shortest(1e300), "1e300");
    assert_eq!(shortest(-6.02214076e23), "-6.02214076e23");
    assert_eq!(shortest(5e-324), "5e-324");
    assert_eq!(shortest(2.5e-8), "2.5e-8");
    assert_eq!(shortest(0.00001), "0.00001");
}

#[test]
fn shortest_non_finite_becomes_null() {
    assert_eq!(shortest(f64::NAN), "null");
    assert_eq!(shortest(f64::INFINITY), "null");
    assert_eq!(shortest(f64::NEG_INFINITY), "null");
}

#[test]
fn shortest_round_trips_through_parser() {
    for n in [1.0 / 3.0, 2.5e-8, 6.02214076e23, -123.456, 1e-300] {
        let text = shortest(n);
        assert_eq!(parse(&text).unwrap().as_f64(), Some(n), "text {text}");
    }
}

// ============================================================================
// Numbers: printf %g compatibility
// ============================================================================

#[test]
fn printf_small_integers() {
    assert_eq!(printf(0.0), "0");
    assert_eq!(printf(1.0), "1");
    assert_eq!(printf(-42.0), "-42");
    assert_eq!(printf(100000.0), "100000");
    assert_eq!(printf(999999.0), "999999");
}

#[test]
fn printf_switches_to_exponent_at_one_million() {
    assert_eq!(printf(1000000.0), "1e+06");
    assert_eq!(printf(1234567.0), "1.23457e+06");
    assert_eq!(printf(999999.5), "1e+06");
    assert_eq!(printf(1e100), "1e+100");
    assert_eq!(printf(-2.5e10), "-2.5e+10");
}

#[test]
fn printf_rounds_to_six_significant_digits() {
    assert_eq!(printf(3.14159265), "3.14159");
    assert_eq!(printf(123.456), "123.456");
    assert_eq!(printf(0.1 + 0.2), "0.3");
    assert_eq!(printf(2.5), "2.5");
}

#[test]
fn printf_small_magnitudes() {
    assert_eq!(printf(0.0001), "0.0001");
    assert_eq!(printf(0.00001), "1e-05");
    assert_eq!(printf(0.000123456789), "0.000123457");
    assert_eq!(printf(1.5e-7), "1.5e-07");
}

#[test]
fn printf_special_values() {
    assert_eq!(printf(f64::INFINITY), "inf");
    assert_eq!(printf(f64::NEG_INFINITY), "-inf");
    assert_eq!(printf(f64::NAN), "nan");
    assert_eq!(printf(-0.0), "-0");
}

#[test]
fn printf_negative_non_finite_reads_back() {
    let options = SerializeOptions::default().with_number_format(NumberFormat::Printf);
    let value = Value::array_from(vec![Value::number(f64::NEG_INFINITY), Value::number(-f64::NAN)]);
    let text = serialize_with_options(&value, &options);
    assert_eq!(text, "[-inf,-nan]");

    let back = parse(&text).unwrap();
    assert_eq!(back.get_index(0).and_then(|v| v.as_f64()), Some(f64::NEG_INFINITY));
    let nan = back.get_index(1).and_then(|v| v.as_f64()).unwrap();
    assert!(nan.is_nan() && nan.is_sign_negative());
}

#[test]
fn printf_format_applies_inside_containers() {
    let value = parse("[1234567,0.5]").unwrap();
    let options = SerializeOptions::default().with_number_format(NumberFormat::Printf);
    assert_eq!(serialize_with_options(&value, &options), "[1.23457e+06,0.5]");
    assert_eq!(serialize(&value), "[1234567,0.5]");
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn serialize_empty_containers() {
    assert_eq!(serialize(&Value::array()), "[]");
    assert_eq!(serialize(&Value::object()), "{}");
}

#[test]
fn serialize_array_is_compact() {
    let array = Value::array_from(vec![1.into(), 2.into(), 3.into()]);
    assert_eq!(serialize(&array), "[1,2,3]");
}

#[test]
fn serialize_object_in_member_order() {
    let mut object = Value::object();
    object.add_member("z", Value::number(1.0)).unwrap();
    object.add_member("a", Value::bool(false)).unwrap();
    object.add_member("m", Value::null()).unwrap();
    assert_eq!(serialize(&object), r#"{"z":1,"a":false,"m":null}"#);
}

#[test]
fn serialize_unnamed_object_member_uses_empty_name() {
    let mut object = Value::object();
    object.append(Value::number(1.0)).unwrap();
    assert_eq!(serialize(&object), r#"{"":1}"#);
}

#[test]
fn serialize_array_ignores_member_names() {
    let mut named = Value::string("v");
    named.set_name("ignored".to_string());
    let array = Value::array_from(vec![named]);
    assert_eq!(serialize(&array), r#"["v"]"#);
}

#[test]
fn serialize_nested_result_envelope() {
    let mut error = Value::object();
    error.add_member("message", "Failed to parse call message".into()).unwrap();
    error.add_member("type", "ParseError".into()).unwrap();
    let mut data = Value::object();
    data.add_member("error", error).unwrap();
    let mut result = Value::object();
    result.add_member("ver", "1.0".into()).unwrap();
    result.add_member("type", "result".into()).unwrap();
    result.add_member("status", "fail".into()).unwrap();
    result.add_member("data", data).unwrap();

    assert_eq!(
        serialize(&result),
        r#"{"ver":"1.0","type":"result","status":"fail","data":{"error":{"message":"Failed to parse call message","type":"ParseError"}}}"#
    );
}

#[test]
fn serialize_has_no_trailing_newline() {
    let out = serialize(&parse(r#"{"a":[1,{"b":null}]}"#).unwrap());
    assert!(!out.ends_with('\n'));
    assert!(!out.contains(' '));
}

#[test]
fn serialize_into_appends_to_existing_buffer() {
    let mut out = String::from("__START__");
    serialize_into(&Value::array(), &SerializeOptions::default(), &mut out);
    serialize_into(&Value::bool(true), &SerializeOptions::default(), &mut out);
    assert_eq!(out, "__START__[]true");
}

#[test]
fn display_matches_serialize() {
    let value = parse(r#"{"k":[true,"s",2.5]}"#).unwrap();
    assert_eq!(value.to_string(), serialize(&value));
    assert_eq!(format!("{value}"), r#"{"k":[true,"s",2.5]}"#);
}

#[test]
fn serialize_large_array_output_is_complete() {
    let items: Vec<Value> = (0..10_000).map(Value::from).collect();
    let out = serialize(&Value::array_from(items));
    assert!(out.starts_with("[0,1,2,"));
    assert!(out.ends_with(",9998,9999]"));
    assert_eq!(out.matches(',').count(), 9_999);
}
