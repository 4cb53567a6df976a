use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Decoded attributes in document order.
pub type Attributes = IndexMap<String, Value>;

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Vec<Value>),
    Record(Attributes),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Attributes> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Field of a record value, if this is a record.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|record| record.get(name))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Attributes> for Value {
    fn from(record: Attributes) -> Self {
        Value::Record(record)
    }
}

/// How a field accumulates values during one read traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Last write wins.
    #[default]
    Scalar,
    /// One entry appended per occurrence, in document order.
    List,
    /// Built in a fresh sub-context and attached as a nested object.
    Record,
    /// Built in a fresh sub-context and appended to a list.
    RecordList,
}

impl FieldKind {
    pub fn is_record(self) -> bool {
        matches!(self, FieldKind::Record | FieldKind::RecordList)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from("x"), Value::Text("x".into()));
        assert_eq!(
            Value::from(vec!["y", "z"]),
            Value::List(vec![Value::Text("y".into()), Value::Text("z".into())])
        );
    }

    #[test]
    fn test_record_field_access() {
        let mut record = Attributes::new();
        record.insert("name".into(), "height".into());
        let value = Value::Record(record);
        assert_eq!(value.get("name").and_then(Value::as_text), Some("height"));
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::from("x").get("name"), None);
    }

    #[test]
    fn test_field_kind_from_json() {
        let kind: FieldKind = serde_json::from_str("\"recordList\"").unwrap();
        assert_eq!(kind, FieldKind::RecordList);
        assert!(kind.is_record());
        assert!(!FieldKind::List.is_record());
    }
}
