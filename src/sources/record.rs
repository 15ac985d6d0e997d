use serde_json::Value;

use crate::error::Error;

/// A single source record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Get the `field` string value.
    ///
    /// Returns `None` if the record is not an object, if the field is missing or if it is not a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field)?.as_str()
    }

    /// Like [Record::text], failing with [Error::MalformedRecord].
    pub fn try_text(&self, field: &str) -> Result<&str, Error> {
        self.text(field).ok_or_else(|| {
            Error::MalformedRecord(format!("no string field `{field}` in {}", self.0))
        })
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Record {
    fn from(v: Value) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text() {
        let r = Record::new(json!({"text": "hello", "id": 3}));
        assert_eq!(r.text("text"), Some("hello"));
        assert_eq!(r.text("content"), None);
        assert_eq!(r.text("id"), None);
    }

    #[test]
    fn malformed() {
        let r = Record::new(json!({"text": null}));
        assert!(matches!(r.try_text("text"), Err(Error::MalformedRecord(_))));
    }

    #[test]
    fn not_an_object() {
        assert_eq!(Record::new(json!(["text"])).text("text"), None);
        assert_eq!(Record::new(json!("text")).text("text"), None);
    }
}
