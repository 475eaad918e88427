//! # sandbox-json
//!
//! Minimal JSON value library for the call/result exchange between a sandbox
//! host and the code it runs. The host sends a JSON call (parameters, maybe a
//! call id) over a byte stream; the child replies with a JSON result. This
//! crate is the data layer in between: a value tree, a parser and a compact
//! serializer. Transport framing lives elsewhere.
//!
//! ## Quick start
//!
//! ```rust
//! use sandbox_json::{parse, serialize, Value};
//!
//! let call = parse(r#"{"id":"42","params":{"a":1,"b":2}}"#).unwrap();
//! let params = call.get("params").unwrap();
//! let sum = params.get("a").unwrap().as_f64().unwrap() + params.get("b").unwrap().as_f64().unwrap();
//!
//! let mut result = Value::object();
//! result.add_member("id", Value::string(call.get("id").unwrap().as_str().unwrap())).unwrap();
//! result.add_member("status", Value::string("ok")).unwrap();
//! result.add_member("data", Value::number(sum)).unwrap();
//! assert_eq!(serialize(&result), r#"{"id":"42","status":"ok","data":3}"#);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value` tree: constructors, lookup, mutation, ownership modifiers
//! - [`parser`] — bytes → `Value` (permissive, non-escaping)
//! - [`serializer`] — `Value` → compact text
//! - [`options`] — `ParseOptions` / `SerializeOptions`
//! - [`error`] — `JsonError` and `ParseReason`
//! - [`interop`] — `serde::Serialize` and `serde_json::Value` conversions

pub mod error;
pub mod interop;
pub mod options;
pub mod parser;
pub mod serializer;
pub mod value;

pub use error::{JsonError, ParseReason, Result};
pub use options::{NumberFormat, ParseOptions, SerializeOptions};
pub use parser::{parse, parse_with_options};
pub use serializer::{serialize, serialize_into, serialize_with_options};
pub use value::{Kind, Value};
