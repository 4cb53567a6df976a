//! Field accumulation: last-write-wins, append-to-list and nested records.

use gmlwfs_types::{Attributes, FieldKind, Value};

/// An attribute accessor registered in a reader table.
///
/// `name: None` stores the value under the node's own local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: Option<&'static str>,
    pub kind: FieldKind,
}

impl Field {
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name: Some(name),
            kind: FieldKind::Scalar,
        }
    }

    pub const fn list(name: &'static str) -> Self {
        Self {
            name: Some(name),
            kind: FieldKind::List,
        }
    }

    pub const fn record(name: &'static str) -> Self {
        Self {
            name: Some(name),
            kind: FieldKind::Record,
        }
    }

    /// Accessor keyed by the node's local name.
    pub const fn local(kind: FieldKind) -> Self {
        Self { name: None, kind }
    }
}

/// Overwrites `name`.
pub fn set(attributes: &mut Attributes, name: &str, value: Value) {
    attributes.insert(name.to_string(), value);
}

/// Appends to the list under `name`, creating it on first use. A scalar
/// already stored under the name becomes the first list entry.
pub fn append(attributes: &mut Attributes, name: &str, value: Value) {
    match attributes.get_mut(name) {
        Some(Value::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Value::List(Vec::new()));
            *existing = Value::List(vec![first, value]);
        }
        None => {
            attributes.insert(name.to_string(), Value::List(vec![value]));
        }
    }
}

/// Stores `value` according to the field classification.
pub fn accumulate(attributes: &mut Attributes, name: &str, value: Value, kind: FieldKind) {
    match kind {
        FieldKind::Scalar | FieldKind::Record => set(attributes, name, value),
        FieldKind::List | FieldKind::RecordList => append(attributes, name, value),
    }
}

/// Leading-integer parse: optional sign and digits after leading whitespace,
/// anything after the digits ignored. `None` when no digits are present or the
/// value does not fit.
pub fn parse_int(text: Option<&str>) -> Option<i64> {
    let text = text?.trim_start();
    let sign = usize::from(matches!(text.as_bytes().first(), Some(b'-' | b'+')));
    let digits = &text[sign..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // sign and digits parse together so i64::MIN fits
    text[..sign + end].parse::<i64>().ok()
}
