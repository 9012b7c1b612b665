use indexmap::IndexMap;

use crate::Value;

/// An ordered, string-keyed mapping of field name to [`Value`].
///
/// Insertion order is preserved on iteration; a key never appears twice —
/// inserting an existing key overwrites its value in place.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: IndexMap::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Builder-style insert, for constructing records inline.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Resolve a dotted path (`a.b.c`) against this record. Each
    /// intermediate segment must resolve to a nested `Record`; otherwise
    /// (or if any segment is absent) the path is missing.
    pub fn resolve_path(&self, path: &[String]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.fields.get(first)?;
        for segment in rest {
            current = match current {
                Value::Record(r) => r.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// The ordered key list, used to decide whether a stream is
    /// homogeneous enough to render as a table.
    pub fn key_order(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

/// Two records are equal iff their key sets and per-key values are equal,
/// regardless of insertion order.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        if self.fields.len() != other.fields.len() {
            return false;
        }
        self.fields.iter().all(|(k, v)| other.fields.get(k) == Some(v))
    }
}

impl Eq for Record {}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
