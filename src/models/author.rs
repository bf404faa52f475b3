//! Author entries as they appear in PubMed esummary documents.

use serde::Deserialize;
use serde_json::Value;

/// One element of a summary document's `authors` array.
///
/// The esummary payload is loosely shaped: an entry is normally an object with
/// `name` and (rarely) `affiliation` keys, but nothing stops the service from
/// emitting strings, nulls or nested arrays. Anything that is not an object is
/// kept as [`AuthorEntry::Unrecognized`] so that classification can skip it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum AuthorEntry {
    /// An object entry. Fields that are absent or not JSON strings are `None`.
    Record {
        name: Option<String>,
        affiliation: Option<String>,
    },
    /// Any non-object entry.
    Unrecognized,
}

impl AuthorEntry {
    /// Create a record entry with both fields present
    pub fn new(name: impl Into<String>, affiliation: impl Into<String>) -> Self {
        AuthorEntry::Record {
            name: Some(name.into()),
            affiliation: Some(affiliation.into()),
        }
    }

    /// Author name, if this is a record with a string name
    pub fn name(&self) -> Option<&str> {
        match self {
            AuthorEntry::Record { name, .. } => name.as_deref(),
            AuthorEntry::Unrecognized => None,
        }
    }

    /// Affiliation text, if this is a record with a string affiliation
    pub fn affiliation(&self) -> Option<&str> {
        match self {
            AuthorEntry::Record { affiliation, .. } => affiliation.as_deref(),
            AuthorEntry::Unrecognized => None,
        }
    }

    /// Parse an `authors` value into entries. Non-array values yield no entries.
    pub fn list_from_value(value: Option<&Value>) -> Vec<AuthorEntry> {
        match value {
            Some(Value::Array(items)) => items.iter().map(AuthorEntry::from).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<&Value> for AuthorEntry {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(map) => AuthorEntry::Record {
                name: map.get("name").and_then(Value::as_str).map(str::to_string),
                affiliation: map
                    .get("affiliation")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            _ => AuthorEntry::Unrecognized,
        }
    }
}

impl From<Value> for AuthorEntry {
    fn from(value: Value) -> Self {
        AuthorEntry::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_with_both_fields() {
        let entry = AuthorEntry::from(&json!({"name": "A", "affiliation": "Acme Pharma Inc"}));
        assert_eq!(entry, AuthorEntry::new("A", "Acme Pharma Inc"));
        assert_eq!(entry.name(), Some("A"));
        assert_eq!(entry.affiliation(), Some("Acme Pharma Inc"));
    }

    #[test]
    fn test_object_without_affiliation() {
        let entry = AuthorEntry::from(&json!({"name": "C", "authtype": "Author"}));
        assert_eq!(entry.name(), Some("C"));
        assert_eq!(entry.affiliation(), None);
    }

    #[test]
    fn test_non_string_affiliation_is_none() {
        let entry = AuthorEntry::from(&json!({"name": "D", "affiliation": ["x", "y"]}));
        assert_eq!(entry.affiliation(), None);
    }

    #[test]
    fn test_non_object_shapes_are_unrecognized() {
        for value in [json!("Smith J"), json!(42), json!(null), json!(["a"]), json!(true)] {
            assert_eq!(AuthorEntry::from(&value), AuthorEntry::Unrecognized);
        }
    }

    #[test]
    fn test_list_from_value() {
        let authors = json!([{"name": "A"}, "bare", {"name": "B", "affiliation": "Lab"}]);
        let entries = AuthorEntry::list_from_value(Some(&authors));
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1], AuthorEntry::Unrecognized);

        assert!(AuthorEntry::list_from_value(None).is_empty());
        assert!(AuthorEntry::list_from_value(Some(&json!("oops"))).is_empty());
    }

    #[test]
    fn test_deserialize_via_serde() {
        let entries: Vec<AuthorEntry> =
            serde_json::from_str(r#"[{"name":"A","affiliation":"Biotech Co"}, 7]"#).unwrap();
        assert_eq!(
            entries,
            vec![AuthorEntry::new("A", "Biotech Co"), AuthorEntry::Unrecognized]
        );
    }
}
