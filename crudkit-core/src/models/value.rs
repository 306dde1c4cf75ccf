//! Scalar values, rows and payloads

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::{Identifier, ValidationError};

/// A single column value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Convert a JSON value; arrays and objects have no scalar form.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Text(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Int(n) => Value::from(n),
            // NaN and infinities have no JSON form
            Scalar::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::Text(s) => Value::String(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A result row: column names in select order with their values.
///
/// Serializes as a JSON object whose keys keep the select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Scalar)>,
}

impl Row {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: Scalar) {
        self.columns.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in select order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Scalar> {
        self.columns.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn into_json(self) -> Value {
        Value::Object(
            self.columns
                .into_iter()
                .map(|(name, value)| (name, Value::from(value)))
                .collect(),
        )
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, Scalar)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Column values for an insert.
///
/// Backed by a sorted map so the generated column list is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, Scalar>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten any serializable value into a payload.
    ///
    /// The value must serialize to a JSON object whose fields are all
    /// scalars; `None` fields skipped by serde simply don't appear.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, ValidationError> {
        let json = serde_json::to_value(value).map_err(|e| ValidationError::Serialize {
            reason: e.to_string(),
        })?;

        let Value::Object(fields) = json else {
            return Err(ValidationError::NotAnObject);
        };

        fields
            .into_iter()
            .map(|(column, value)| match Scalar::from_json(value) {
                Some(scalar) => Ok((column, scalar)),
                None => Err(ValidationError::NotScalar { column }),
            })
            .collect()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Scalar>) -> &mut Self {
        self.0.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(column, value)| (column.as_str(), value))
    }

    /// Validate the column names, returning them with their values in order.
    ///
    /// An empty payload is valid: every column takes its default.
    pub(crate) fn check(&self) -> Result<(Vec<Identifier>, Vec<Scalar>), ValidationError> {
        let mut columns = Vec::with_capacity(self.0.len());
        let mut values = Vec::with_capacity(self.0.len());
        for (column, value) in &self.0 {
            columns.push(Identifier::new("column", column)?);
            values.push(value.clone());
        }
        Ok((columns, values))
    }
}

impl FromIterator<(String, Scalar)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Identifier of an inserted row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Text(String),
}

impl Id {
    pub(crate) fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Int(n) => Some(Self::Int(n)),
            Scalar::Text(s) => Some(Self::Text(s)),
            Scalar::Float(f) => Some(Self::Text(f.to_string())),
            Scalar::Bool(_) | Scalar::Null => None,
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// Result of a successful create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    pub id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_from_json() {
        assert_eq!(Scalar::from_json(json!(null)), Some(Scalar::Null));
        assert_eq!(Scalar::from_json(json!(3)), Some(Scalar::Int(3)));
        assert_eq!(Scalar::from_json(json!(1.5)), Some(Scalar::Float(1.5)));
        assert_eq!(Scalar::from_json(json!("x")), Some(Scalar::Text("x".into())));
        assert_eq!(Scalar::from_json(json!([1])), None);
        assert_eq!(Scalar::from_json(json!({"a": 1})), None);
    }

    #[test]
    fn row_serializes_in_select_order() {
        let row: Row = [
            ("sportId".to_string(), Scalar::Int(1)),
            ("category".to_string(), Scalar::Text("FootBall".into())),
        ]
        .into_iter()
        .collect();

        let text = serde_json::to_string(&row).unwrap();
        assert_eq!(text, r#"{"sportId":1,"category":"FootBall"}"#);
        assert_eq!(row.columns().collect::<Vec<_>>(), ["sportId", "category"]);
    }

    #[test]
    fn payload_from_struct_skips_none() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SportCreate {
            #[serde(skip_serializing_if = "Option::is_none")]
            sport_id: Option<i64>,
            category: String,
        }

        let payload = Payload::from_serialize(&SportCreate {
            sport_id: None,
            category: "Foot".into(),
        })
        .unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("category"), Some(&Scalar::Text("Foot".into())));

        let payload = Payload::from_serialize(&SportCreate {
            sport_id: Some(1),
            category: "Foot".into(),
        })
        .unwrap();
        assert_eq!(payload.get("sportId"), Some(&Scalar::Int(1)));
    }

    #[test]
    fn payload_rejects_nested_and_non_objects() {
        assert_eq!(
            Payload::from_serialize(&json!({"tags": ["a"]})),
            Err(ValidationError::NotScalar {
                column: "tags".into()
            })
        );
        assert_eq!(
            Payload::from_serialize(&json!([1, 2])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn payload_check_orders_columns() {
        let mut payload = Payload::new();
        payload.insert("zeta", 1).insert("alpha", "a");
        let (columns, values) = payload.check().unwrap();
        let names: Vec<_> = columns.iter().map(Identifier::as_str).collect();
        assert_eq!(names, ["alpha", "zeta"]);
        assert_eq!(values, [Scalar::Text("a".into()), Scalar::Int(1)]);
    }

    #[test]
    fn payload_check_accepts_empty_rejects_bad_columns() {
        let (columns, values) = Payload::new().check().unwrap();
        assert!(columns.is_empty());
        assert!(values.is_empty());

        let mut payload = Payload::new();
        payload.insert("name) VALUES (1); --", 1);
        assert!(payload.check().is_err());
    }

    #[test]
    fn id_serializes_untagged() {
        let created = Created { id: Id::Int(1) };
        assert_eq!(serde_json::to_value(&created).unwrap(), json!({"id": 1}));

        let created = Created {
            id: Id::Text("abc".into()),
        };
        assert_eq!(serde_json::to_value(&created).unwrap(), json!({"id": "abc"}));
    }
}
