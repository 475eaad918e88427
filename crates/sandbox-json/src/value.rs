//! The JSON value tree.
//!
//! A [`Value`] is one node: a scalar, an array, or an object. Object members are
//! ordinary values that carry a `name`. Children are kept in insertion order and
//! every node exclusively owns its subtree, so dropping the root releases the
//! whole tree exactly once.
//!
//! Two ownership modifiers let a tree point at data owned elsewhere:
//!
//! - a *reference* node borrows its text or children ([`Value::string_ref`],
//!   [`Value::array_ref`], [`Value::object_ref`]);
//! - a *constant-name* member borrows its name ([`Value::add_member_const`]).
//!
//! Borrowed payloads are never released by the node. Mutating one detaches it
//! into an owned copy first. A `Value<'static>` (what the parser returns) owns
//! everything.

use crate::error::{JsonError, Result};
use std::borrow::Cow;
use std::fmt;

/// The kind tag of a [`Value`]. Determines which payload is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    True,
    False,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Lowercase name used in error messages and statistics.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::True => "true",
            Kind::False => "false",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Child list of an array or object: owned, or borrowed from another tree.
#[derive(Debug, Clone)]
enum Children<'a> {
    Owned(Vec<Value<'a>>),
    Borrowed(&'a [Value<'a>]),
}

impl<'a> Children<'a> {
    fn as_slice(&self) -> &[Value<'a>] {
        match self {
            Children::Owned(items) => items,
            Children::Borrowed(items) => items,
        }
    }

    /// Detach a borrowed list into an owned copy and hand out the vector.
    fn to_mut(&mut self) -> &mut Vec<Value<'a>> {
        if let Children::Borrowed(items) = *self {
            *self = Children::Owned(items.to_vec());
        }
        match self {
            Children::Owned(items) => items,
            Children::Borrowed(_) => unreachable!("borrowed children were just detached"),
        }
    }

    fn is_borrowed(&self) -> bool {
        matches!(self, Children::Borrowed(_))
    }
}

impl PartialEq for Children<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Body<'a> {
    Null,
    True,
    False,
    Number(f64),
    String(Cow<'a, str>),
    Array(Children<'a>),
    Object(Children<'a>),
}

/// A single node of a JSON tree.
///
/// Equality compares kind, payload, member name and children in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Value<'a> {
    name: Option<Cow<'a, str>>,
    body: Body<'a>,
}

impl<'a> Value<'a> {
    fn with_body(body: Body<'a>) -> Self {
        Self { name: None, body }
    }

    // ------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------

    /// A fresh `null`.
    pub fn null() -> Self {
        Self::with_body(Body::Null)
    }

    /// A fresh `true` or `false`.
    pub fn bool(b: bool) -> Self {
        Self::with_body(if b { Body::True } else { Body::False })
    }

    /// A fresh number.
    pub fn number(n: f64) -> Self {
        Self::with_body(Body::Number(n))
    }

    /// A fresh string holding a copy of `text`.
    pub fn string(text: &str) -> Self {
        Self::with_body(Body::String(Cow::Owned(text.to_owned())))
    }

    /// A string node that borrows `text` instead of copying it.
    pub fn string_ref(text: &'a str) -> Self {
        Self::with_body(Body::String(Cow::Borrowed(text)))
    }

    /// An empty array.
    pub fn array() -> Self {
        Self::with_body(Body::Array(Children::Owned(Vec::new())))
    }

    /// An array that takes ownership of `items` in order.
    pub fn array_from(items: Vec<Value<'a>>) -> Self {
        Self::with_body(Body::Array(Children::Owned(items)))
    }

    /// An array node whose children are borrowed from elsewhere.
    pub fn array_ref(items: &'a [Value<'a>]) -> Self {
        Self::with_body(Body::Array(Children::Borrowed(items)))
    }

    /// An empty object.
    pub fn object() -> Self {
        Self::with_body(Body::Object(Children::Owned(Vec::new())))
    }

    /// An object that takes ownership of `members` in order. Members are
    /// expected to carry names; an unnamed member serializes with an empty key.
    pub fn object_from(members: Vec<Value<'a>>) -> Self {
        Self::with_body(Body::Object(Children::Owned(members)))
    }

    /// An object node whose members are borrowed from elsewhere.
    pub fn object_ref(members: &'a [Value<'a>]) -> Self {
        Self::with_body(Body::Object(Children::Borrowed(members)))
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn kind(&self) -> Kind {
        match self.body {
            Body::Null => Kind::Null,
            Body::True => Kind::True,
            Body::False => Kind::False,
            Body::Number(_) => Kind::Number,
            Body::String(_) => Kind::String,
            Body::Array(_) => Kind::Array,
            Body::Object(_) => Kind::Object,
        }
    }

    /// Kind name for messages: `"null"`, `"number"`, `"object"`, ...
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.body, Body::Null)
    }

    /// True for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self.body, Body::Array(_) | Body::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.body {
            Body::True => Some(true),
            Body::False => Some(false),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.body {
            Body::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Integer view of a number, truncated toward zero.
    ///
    /// Lossy: fractions are dropped, values beyond the `i64` range saturate
    /// and NaN reads as 0. Use [`Value::as_f64`] when exactness matters.
    pub fn as_int(&self) -> Option<i64> {
        self.as_f64().map(|n| n as i64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.body {
            Body::String(text) => Some(text),
            _ => None,
        }
    }

    /// Mutable access to a string payload. A borrowed payload is copied first.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.body {
            Body::String(text) => Some(text.to_mut()),
            _ => None,
        }
    }

    /// Consume a string node and return its buffer without copying.
    /// The node's name, if any, is dropped with the shell.
    pub fn into_text(self) -> Option<Cow<'a, str>> {
        match self.body {
            Body::String(text) => Some(text),
            _ => None,
        }
    }

    /// The member name, when this value sits inside an object.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Give this value an owned member name.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(Cow::Owned(name));
    }

    /// Give this value a borrowed (constant) member name.
    pub fn set_const_name(&mut self, name: &'a str) {
        self.name = Some(Cow::Borrowed(name));
    }

    pub fn take_name(&mut self) -> Option<Cow<'a, str>> {
        self.name.take()
    }

    /// True when the text or children are borrowed rather than owned.
    pub fn is_reference(&self) -> bool {
        match &self.body {
            Body::String(text) => matches!(text, Cow::Borrowed(_)),
            Body::Array(children) | Body::Object(children) => children.is_borrowed(),
            _ => false,
        }
    }

    /// True when the member name is borrowed rather than owned.
    pub fn has_const_name(&self) -> bool {
        matches!(self.name, Some(Cow::Borrowed(_)))
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Children of an array or object in order; empty for scalars.
    pub fn children(&self) -> &[Value<'a>] {
        match &self.body {
            Body::Array(children) | Body::Object(children) => children.as_slice(),
            _ => &[],
        }
    }

    /// Number of children (0 for scalars).
    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// `(name, value)` pairs of an object in order. Unnamed members yield `""`.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Value<'a>)> {
        let members: &[Value<'a>] = match &self.body {
            Body::Object(children) => children.as_slice(),
            _ => &[],
        };
        members
            .iter()
            .map(|member| (member.name().unwrap_or(""), member))
    }

    fn children_mut(&mut self, expected: &'static str) -> Result<&mut Vec<Value<'a>>> {
        let found = self.kind();
        match &mut self.body {
            Body::Array(children) | Body::Object(children) => Ok(children.to_mut()),
            _ => Err(JsonError::WrongKind { expected, found }),
        }
    }

    /// Move `item` to the end of this container's children.
    ///
    /// Works on arrays and objects; scalars fail with [`JsonError::WrongKind`].
    pub fn append(&mut self, item: Value<'a>) -> Result<()> {
        self.children_mut("array or object")?.push(item);
        Ok(())
    }

    /// Copy `name` into `item` and append it to this object.
    pub fn add_member(&mut self, name: &str, item: Value<'a>) -> Result<()> {
        self.add_member_owned(name.to_owned(), item)
    }

    /// Append `item` under a name whose buffer is moved in, not copied.
    pub fn add_member_owned(&mut self, name: String, mut item: Value<'a>) -> Result<()> {
        let members = self.object_members_mut()?;
        item.set_name(name);
        members.push(item);
        Ok(())
    }

    /// Append `item` under a borrowed name; the member never releases it.
    pub fn add_member_const(&mut self, name: &'a str, mut item: Value<'a>) -> Result<()> {
        let members = self.object_members_mut()?;
        item.set_const_name(name);
        members.push(item);
        Ok(())
    }

    fn object_members_mut(&mut self) -> Result<&mut Vec<Value<'a>>> {
        let found = self.kind();
        match &mut self.body {
            Body::Object(children) => Ok(children.to_mut()),
            _ => Err(JsonError::WrongKind {
                expected: "object",
                found,
            }),
        }
    }

    /// Zero-based child lookup. Out of range, or a scalar, yields `None`.
    pub fn get_index(&self, index: usize) -> Option<&Value<'a>> {
        self.children().get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Value<'a>> {
        match &mut self.body {
            Body::Array(children) | Body::Object(children) => children.to_mut().get_mut(index),
            _ => None,
        }
    }

    /// First member of an object whose name equals `name` byte for byte.
    pub fn get(&self, name: &str) -> Option<&Value<'a>> {
        match &self.body {
            Body::Object(children) => children
                .as_slice()
                .iter()
                .find(|member| member.name() == Some(name)),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value<'a>> {
        match &mut self.body {
            Body::Object(children) => children
                .to_mut()
                .iter_mut()
                .find(|member| member.name() == Some(name)),
            _ => None,
        }
    }

    /// Follow a dotted path such as `params.items.0`.
    ///
    /// Inside an array a segment is read as an index; inside an object it is
    /// a member name, even when it looks numeric. An empty path is `self`.
    pub fn lookup(&self, path: &str) -> Option<&Value<'a>> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |current, segment| match current.kind() {
            Kind::Array => current.get_index(segment.parse().ok()?),
            Kind::Object => current.get(segment),
            _ => None,
        })
    }

    /// Copy every borrowed payload and name so the tree owns all of its data.
    pub fn into_owned(self) -> Value<'static> {
        let name = self.name.map(|name| Cow::Owned(name.into_owned()));
        let body = match self.body {
            Body::Null => Body::Null,
            Body::True => Body::True,
            Body::False => Body::False,
            Body::Number(n) => Body::Number(n),
            Body::String(text) => Body::String(Cow::Owned(text.into_owned())),
            Body::Array(children) => Body::Array(Children::Owned(owned_children(children))),
            Body::Object(children) => Body::Object(Children::Owned(owned_children(children))),
        };
        Value { name, body }
    }
}

fn owned_children(children: Children<'_>) -> Vec<Value<'static>> {
    match children {
        Children::Owned(items) => items.into_iter().map(Value::into_owned).collect(),
        Children::Borrowed(items) => items.iter().cloned().map(Value::into_owned).collect(),
    }
}

impl Default for Value<'_> {
    fn default() -> Self {
        Value::null()
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<i32> for Value<'_> {
    fn from(n: i32) -> Self {
        Value::number(f64::from(n))
    }
}

impl From<&str> for Value<'_> {
    fn from(text: &str) -> Self {
        Value::string(text)
    }
}

impl From<String> for Value<'_> {
    fn from(text: String) -> Self {
        Value::with_body(Body::String(Cow::Owned(text)))
    }
}

impl<'a> From<Vec<Value<'a>>> for Value<'a> {
    fn from(items: Vec<Value<'a>>) -> Self {
        Value::array_from(items)
    }
}
