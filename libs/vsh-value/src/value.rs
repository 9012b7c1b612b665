use crate::Record;

/// A typed value flowing through a pipeline.
///
/// `Null` only ever exists as a transient JSON-decode intermediate: by the
/// time a value reaches a `Record`, a JSON `null` field has already been
/// dropped from the enclosing record rather than stored as `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Record(Record),
    Null,
}

impl Value {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
            || matches!(self, Value::String(s) if parse_number(s).is_some())
    }

    /// Best-effort numeric coercion, used by `sort`, `where`, and `sum`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => parse_number(s),
            _ => None,
        }
    }

    /// The string rendering used by templates, `grep`, `where`, and `sort`'s
    /// non-numeric fallback. `Bool` renders exactly as `"True"`/`"False"`;
    /// `List`/`Record` render as compact JSON.
    pub fn render(&self) -> String {
        match self {
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            Value::List(_) | Value::Record(_) => self.to_json().to_string(),
        }
    }

    /// Decode a `serde_json::Value` into a `Value`. A bare top-level `null`
    /// becomes `Value::Null`; `null` nested inside an object is handled by
    /// the caller (`Record`'s object conversion), which omits the key
    /// entirely rather than storing `Value::Null`.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    if let Some(i) = n.as_i64() {
                        Value::Int(i)
                    } else {
                        Value::Float(n.as_f64().unwrap_or(0.0))
                    }
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let mut record = Record::new();
                for (k, v) in map {
                    if v.is_null() {
                        continue;
                    }
                    record.insert(k, Value::from_json(v));
                }
                Value::Record(record)
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Record(record) => {
                let mut map = serde_json::Map::new();
                for (k, v) in record.iter() {
                    map.insert(k.clone(), v.to_json());
                }
                serde_json::Value::Object(map)
            }
            Value::Null => serde_json::Value::Null,
        }
    }
}

/// Encode a whole record as a compact JSON object, skipping absent keys
/// (there are none by construction, but this keeps the encoder total).
pub fn record_to_json(record: &Record) -> serde_json::Value {
    Value::Record(record.clone()).to_json()
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() && f.abs() < 1e15 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_int_vs_float() {
        assert_eq!(Value::from_json(serde_json::json!(42)), Value::Int(42));
        assert_eq!(Value::from_json(serde_json::json!(4.2)), Value::Float(4.2));
        assert_eq!(Value::from_json(serde_json::json!(1e3)), Value::Float(1000.0));
    }

    #[test]
    fn json_null_drops_object_key() {
        let decoded = Value::from_json(serde_json::json!({"a": 1, "b": null}));
        match decoded {
            Value::Record(r) => {
                assert_eq!(r.get("a"), Some(&Value::Int(1)));
                assert_eq!(r.get("b"), None);
                assert_eq!(r.len(), 1);
            }
            _ => panic!("expected record"),
        }
    }

    #[test]
    fn bare_top_level_null_is_sentinel() {
        assert_eq!(Value::from_json(serde_json::Value::Null), Value::Null);
    }

    #[test]
    fn render_bool_matches_python_style_capitalisation() {
        assert_eq!(Value::Bool(true).render(), "True");
        assert_eq!(Value::Bool(false).render(), "False");
    }

    #[test]
    fn render_list_is_compact_json() {
        let v = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(v.render(), "[1,2]");
    }

    #[test]
    fn numeric_string_is_numeric() {
        assert!(Value::String("3.5".into()).is_numeric());
        assert!(!Value::String("abc".into()).is_numeric());
    }

    #[test]
    fn round_trip_through_json() {
        let original = Value::Record(
            Record::new()
                .with("name", Value::String("Jane".into()))
                .with("age", Value::Int(30))
                .with("tags", Value::List(vec![Value::String("a".into())])),
        );
        let json = original.to_json();
        let back = Value::from_json(json);
        assert_eq!(original, back);
    }
}
