//! Recursive-descent JSON parser.
//!
//! Reads one complete value from an in-memory buffer. The grammar is the
//! permissive one the sandbox wrappers have always spoken:
//!
//! - Any byte `<= 0x20` counts as whitespace.
//! - Strings end at the next literal `"`. Escapes are **not** decoded, so
//!   `"a\"b"` is the two-byte string `a\` followed by unparsed bytes.
//! - Numbers are the longest `strtod` prefix at the cursor: decimal, hex
//!   (`0x1.8p3`), and after a `-` also `inf`, `infinity` and `nan`.
//! - Bytes after the first complete value are ignored.
//!
//! # Key design decisions
//!
//! - **No partial trees**: every node under construction is owned by a stack
//!   frame of the descent, so an error unwinding through `?` drops all of them.
//! - **Key reparenting**: an object key is parsed as a string value, then its
//!   buffer is moved into the member's name and the empty shell is discarded.
//! - **Depth limit**: nesting is capped by [`ParseOptions::max_depth`] so hostile
//!   input cannot exhaust the stack.

use crate::error::{JsonError, ParseReason, Result};
use crate::options::ParseOptions;
use crate::value::Value;
use tracing::{debug, trace};

/// Parse `input` with default options.
///
/// # Example
/// ```
/// let call = sandbox_json::parse(r#"{"id":"c1","params":[1,2]}"#).unwrap();
/// assert_eq!(call.get("id").and_then(|v| v.as_str()), Some("c1"));
/// assert_eq!(call.lookup("params.1").and_then(|v| v.as_f64()), Some(2.0));
/// ```
pub fn parse(input: impl AsRef<[u8]>) -> Result<Value<'static>> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse `input` with explicit options.
pub fn parse_with_options(input: impl AsRef<[u8]>, options: &ParseOptions) -> Result<Value<'static>> {
    let input = input.as_ref();
    let mut parser = Parser::new(input, options);
    match parser.parse_value() {
        Ok(value) => {
            trace!(
                consumed = parser.pos,
                total = input.len(),
                kind = %value.kind(),
                "parsed JSON value"
            );
            Ok(value)
        }
        Err(err) => {
            debug!(error = %err, "rejected JSON input");
            Err(err)
        }
    }
}

struct Parser<'i> {
    input: &'i [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'i> Parser<'i> {
    fn new(input: &'i [u8], options: &ParseOptions) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn error(&self, reason: ParseReason) -> JsonError {
        self.error_at(self.pos, reason)
    }

    fn error_at(&self, offset: usize, reason: ParseReason) -> JsonError {
        JsonError::Parse { offset, reason }
    }

    /// Error for the byte under the cursor, or end of input if there is none.
    fn unexpected(&self) -> JsonError {
        match self.peek() {
            Some(byte) => self.error(ParseReason::UnexpectedByte(byte)),
            None => self.error(ParseReason::UnexpectedEnd),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if byte > b' ' {
                break;
            }
            self.pos += 1;
        }
    }

    /// Skip whitespace, then parse one value of any kind.
    fn parse_value(&mut self) -> Result<Value<'static>> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'n') => self.parse_literal(b"null", Value::null()),
            Some(b'f') => self.parse_literal(b"false", Value::bool(false)),
            Some(b't') => self.parse_literal(b"true", Value::bool(true)),
            Some(b'"') => self.parse_string(),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            _ => Err(self.unexpected()),
        }
    }

    /// Match a keyword exactly. A short buffer that agrees so far is a
    /// truncation; the first disagreeing byte is reported otherwise.
    fn parse_literal(&mut self, literal: &[u8], value: Value<'static>) -> Result<Value<'static>> {
        let rest = &self.input[self.pos..];
        if rest.starts_with(literal) {
            self.pos += literal.len();
            return Ok(value);
        }
        match rest.iter().zip(literal).position(|(have, want)| have != want) {
            Some(i) => Err(self.error_at(self.pos + i, ParseReason::UnexpectedByte(rest[i]))),
            None => Err(self.error_at(self.input.len(), ParseReason::UnexpectedEnd)),
        }
    }

    /// String value: raw bytes up to the next `"`, no escape processing.
    fn parse_string(&mut self) -> Result<Value<'static>> {
        let start = self.pos + 1;
        let len = self.input[start..]
            .iter()
            .position(|&b| b == b'"')
            .ok_or_else(|| self.error_at(self.input.len(), ParseReason::UnterminatedString))?;
        let text = std::str::from_utf8(&self.input[start..start + len])
            .map_err(|e| self.error_at(start + e.valid_up_to(), ParseReason::InvalidUtf8))?;
        self.pos = start + len + 1;
        Ok(Value::from(text.to_owned()))
    }

    /// Longest `strtod` prefix. Hex and non-finite spellings are tried first;
    /// otherwise the decimal form `-? d* (. d*)? ([eE] [+-]? d+)?` with at
    /// least one mantissa digit. An exponent marker without digits is left
    /// unconsumed, the way `strtod` treats `1e`.
    fn parse_number(&mut self) -> Result<Value<'static>> {
        let start = self.pos;
        let bytes = self.input;
        let mut end = start;

        let negative = bytes.get(end) == Some(&b'-');
        if negative {
            end += 1;
        }
        let rest = &bytes[end..];
        if let Some((magnitude, len)) = scan_non_finite(rest).or_else(|| scan_hex(rest)) {
            self.pos = end + len;
            return Ok(Value::number(if negative { -magnitude } else { magnitude }));
        }
        let int_digits = count_digits(&bytes[end..]);
        end += int_digits;

        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = count_digits(&bytes[end + 1..]);
            if int_digits + frac_digits > 0 {
                end += 1 + frac_digits;
            }
        }
        if int_digits + frac_digits == 0 {
            return Err(self.error_at(start, ParseReason::InvalidNumber));
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_digits = count_digits(&bytes[exp..]);
            if exp_digits > 0 {
                end = exp + exp_digits;
            }
        }

        let number = std::str::from_utf8(&bytes[start..end])
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .ok_or_else(|| self.error_at(start, ParseReason::InvalidNumber))?;
        self.pos = end;
        Ok(Value::number(number))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(ParseReason::TooDeep(self.max_depth)));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_array(&mut self) -> Result<Value<'static>> {
        self.enter()?;
        self.pos += 1; // '['
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.leave();
            return Ok(Value::array_from(items));
        }

        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        self.leave();
        Ok(Value::array_from(items))
    }

    fn parse_object(&mut self) -> Result<Value<'static>> {
        self.enter()?;
        self.pos += 1; // '{'
        let mut members = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.leave();
            return Ok(Value::object_from(members));
        }

        loop {
            members.push(self.parse_member()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }

        self.leave();
        Ok(Value::object_from(members))
    }

    /// One `"key": value` pair. The key's buffer becomes the member name.
    fn parse_member(&mut self) -> Result<Value<'static>> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'"') => {}
            Some(_) => return Err(self.error(ParseReason::ExpectedKey)),
            None => return Err(self.error(ParseReason::UnexpectedEnd)),
        }
        let key = self.parse_string()?;

        self.skip_whitespace();
        match self.peek() {
            Some(b':') => self.pos += 1,
            Some(_) => return Err(self.error(ParseReason::ExpectedColon)),
            None => return Err(self.error(ParseReason::UnexpectedEnd)),
        }

        let mut member = self.parse_value()?;
        if let Some(name) = key.into_text() {
            member.set_name(name.into_owned());
        }
        Ok(member)
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn count_hex_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_hexdigit()).count()
}

fn starts_with_ignore_case(bytes: &[u8], word: &[u8]) -> bool {
    bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
}

/// `inf`, `infinity` or `nan` (optionally `nan(chars)`), any case.
/// Returns the unsigned value and the bytes consumed.
fn scan_non_finite(bytes: &[u8]) -> Option<(f64, usize)> {
    if starts_with_ignore_case(bytes, b"infinity") {
        return Some((f64::INFINITY, 8));
    }
    if starts_with_ignore_case(bytes, b"inf") {
        return Some((f64::INFINITY, 3));
    }
    if !starts_with_ignore_case(bytes, b"nan") {
        return None;
    }
    let payload = &bytes[3..];
    if payload.first() == Some(&b'(') {
        let chars = payload[1..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        if payload.get(1 + chars) == Some(&b')') {
            return Some((f64::NAN, 3 + chars + 2));
        }
    }
    Some((f64::NAN, 3))
}

/// Hex float `0x h* (. h*)? ([pP] [+-]? d+)?` with at least one hex digit.
/// `0x` with no digits is not matched, leaving `0` to the decimal scanner.
fn scan_hex(bytes: &[u8]) -> Option<(f64, usize)> {
    if !starts_with_ignore_case(bytes, b"0x") {
        return None;
    }
    // Up to 15 hex digits fit in the mantissa without loss; later digits only
    // shift the binary exponent.
    const MANTISSA_LIMIT: u64 = 1 << 60;
    let mut mantissa: u64 = 0;
    let mut exp2: i64 = 0;
    let mut end = 2;

    let int_digits = count_hex_digits(&bytes[end..]);
    for &b in &bytes[end..end + int_digits] {
        if mantissa < MANTISSA_LIMIT {
            mantissa = mantissa * 16 + hex_value(b);
        } else {
            exp2 += 4;
        }
    }
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_hex_digits(&bytes[end + 1..]);
        for &b in &bytes[end + 1..end + 1 + frac_digits] {
            if mantissa < MANTISSA_LIMIT {
                mantissa = mantissa * 16 + hex_value(b);
                exp2 -= 4;
            }
        }
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'p' | b'P')) {
        let mut exp = end + 1;
        let sign = match bytes.get(exp) {
            Some(b'-') => {
                exp += 1;
                -1
            }
            Some(b'+') => {
                exp += 1;
                1
            }
            _ => 1,
        };
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            let power = bytes[exp..exp + exp_digits]
                .iter()
                .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(100_000));
            exp2 += sign * power;
            end = exp + exp_digits;
        }
    }

    Some((scale_by_power_of_two(mantissa as f64, exp2), end))
}

fn hex_value(b: u8) -> u64 {
    match b {
        b'0'..=b'9' => u64::from(b - b'0'),
        b'a'..=b'f' => u64::from(b - b'a' + 10),
        b'A'..=b'F' => u64::from(b - b'A' + 10),
        _ => 0,
    }
}

/// `x * 2^exp` in steps small enough that no intermediate factor over- or
/// underflows on its own.
fn scale_by_power_of_two(mut x: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    while exp > STEP && x.is_finite() && x != 0.0 {
        x *= 2f64.powi(STEP as i32);
        exp -= STEP;
    }
    while exp < -STEP && x != 0.0 {
        x *= 2f64.powi(-STEP as i32);
        exp += STEP;
    }
    x * 2f64.powi(exp.clamp(-STEP, STEP) as i32)
}
