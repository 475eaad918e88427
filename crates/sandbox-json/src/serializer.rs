//! Compact JSON serializer.
//!
//! Writes a [`Value`] tree with no inserted whitespace and no trailing newline.
//! Strings are emitted verbatim between quotes, mirroring the parser's
//! non-escaping read path: text containing `"` will not survive a round trip.
//!
//! Output goes into a `String`, whose capacity doubles as it fills, so the
//! total work stays linear in the output size.

use crate::options::{NumberFormat, SerializeOptions};
use crate::value::{Kind, Value};
use std::fmt::{self, Write as _};
use tracing::trace;

/// Starting capacity of the output buffer; matches the wrappers' 1 KiB.
const INITIAL_CAPACITY: usize = 1024;

/// Magnitudes written in plain decimal by [`NumberFormat::Shortest`].
const SHORTEST_FIXED_MIN: f64 = 1e-5;
const SHORTEST_FIXED_MAX: f64 = 1e16;

/// Significant digits used by [`NumberFormat::Printf`].
const PRINTF_PRECISION: i32 = 6;

/// Serialize `value` compactly with default options.
///
/// # Example
/// ```
/// use sandbox_json::{serialize, Value};
/// let mut result = Value::object();
/// result.add_member("status", Value::string("ok")).unwrap();
/// result.add_member("data", Value::array_from(vec![Value::number(1.0), Value::null()])).unwrap();
/// assert_eq!(serialize(&result), r#"{"status":"ok","data":[1,null]}"#);
/// ```
pub fn serialize(value: &Value<'_>) -> String {
    serialize_with_options(value, &SerializeOptions::default())
}

/// Serialize `value` compactly with explicit options.
pub fn serialize_with_options(value: &Value<'_>, options: &SerializeOptions) -> String {
    let mut out = String::with_capacity(INITIAL_CAPACITY);
    serialize_into(value, options, &mut out);
    trace!(bytes = out.len(), "serialized JSON value");
    out
}

/// Append the compact form of `value` to a caller-owned buffer.
pub fn serialize_into(value: &Value<'_>, options: &SerializeOptions, out: &mut String) {
    let written = write_value(value, options.number_format, out);
    debug_assert!(written.is_ok(), "formatting into a String cannot fail");
}

fn write_value(value: &Value<'_>, numbers: NumberFormat, out: &mut String) -> fmt::Result {
    match value.kind() {
        Kind::Null => out.push_str("null"),
        Kind::True => out.push_str("true"),
        Kind::False => out.push_str("false"),
        Kind::Number => write_number(value.as_f64().unwrap_or_default(), numbers, out)?,
        Kind::String => write_string(value.as_str().unwrap_or_default(), out),
        Kind::Array => {
            out.push('[');
            for (i, item) in value.children().iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, numbers, out)?;
            }
            out.push(']');
        }
        Kind::Object => {
            out.push('{');
            for (i, (name, member)) in value.members().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(name, out);
                out.push(':');
                write_value(member, numbers, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

/// Quote `text` as-is. No escaping is applied.
fn write_string(text: &str, out: &mut String) {
    out.push('"');
    out.push_str(text);
    out.push('"');
}

fn write_number(n: f64, format: NumberFormat, out: &mut String) -> fmt::Result {
    match format {
        NumberFormat::Shortest => write_shortest(n, out),
        NumberFormat::Printf => write_printf_g(n, out),
    }
}

/// Shortest round-trippable decimal. Magnitudes outside `1e-5 .. 1e16` switch
/// to exponent form (`1e300`, `5e-324`) so the digit count stays bounded.
fn write_shortest(n: f64, out: &mut String) -> fmt::Result {
    if !n.is_finite() {
        out.push_str("null");
        return Ok(());
    }
    let magnitude = n.abs();
    if magnitude != 0.0 && !(SHORTEST_FIXED_MIN..SHORTEST_FIXED_MAX).contains(&magnitude) {
        write!(out, "{n:e}")
    } else {
        write!(out, "{n}")
    }
}

/// Reproduce C's `%g` at the default precision.
///
/// The value is first rounded to six significant digits in exponent form;
/// the exponent of that rounded value picks fixed or exponent notation, and
/// trailing fractional zeros are stripped in both.
fn write_printf_g(n: f64, out: &mut String) -> fmt::Result {
    if n.is_nan() {
        out.push_str(if n.is_sign_negative() { "-nan" } else { "nan" });
        return Ok(());
    }
    if n.is_infinite() {
        out.push_str(if n < 0.0 { "-inf" } else { "inf" });
        return Ok(());
    }
    if n == 0.0 {
        out.push_str(if n.is_sign_negative() { "-0" } else { "0" });
        return Ok(());
    }

    let digits = (PRINTF_PRECISION - 1) as usize;
    let scientific = format!("{n:.digits$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        out.push_str(&scientific);
        return Ok(());
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRINTF_PRECISION {
        out.push_str(trim_fraction_zeros(mantissa));
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        write!(out, "{:02}", exponent.unsigned_abs())
    } else {
        let decimals = (PRINTF_PRECISION - 1 - exponent) as usize;
        let fixed = format!("{n:.decimals$}");
        out.push_str(trim_fraction_zeros(&fixed));
        Ok(())
    }
}

fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

impl fmt::Display for Value<'_> {
    /// Compact JSON with default options.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}
