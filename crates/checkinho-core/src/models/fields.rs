//! Extracted field values, one map per document.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::document::{DocumentSubtype, DocumentType};

/// A single extracted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Plain string value.
    Text(String),
    /// Split or repeated value.
    List(Vec<String>),
}

impl FieldValue {
    /// The string value, if this is not a list.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// The value as a list; plain text becomes a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::Text(s) => vec![s.clone()],
            Self::List(items) => items.clone(),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Field name to value mapping, kept in extraction order.
///
/// `None` records that the field was searched for and not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldsMap {
    entries: Vec<(String, Option<FieldValue>)>,
}

impl FieldsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing an earlier value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<FieldValue>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Set a field to a plain string.
    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name, Some(FieldValue::Text(value.into())));
    }

    /// Value of a field, `None` when absent or not found.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// String value of a field; lists yield `None`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Whether the field was recorded at all (even as not found).
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Values of the numbered fields `<prefix>1`, `<prefix>2`, ... in order.
    ///
    /// Stops at the first missing index.
    pub fn numbered(&self, prefix: &str) -> Vec<&str> {
        (1..)
            .map(|i| format!("{prefix}{i}"))
            .map_while(|name| {
                if self.contains(&name) {
                    Some(self.text(&name))
                } else {
                    None
                }
            })
            .flatten()
            .collect()
    }

    /// Number of recorded fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields that were actually found.
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_ref()))
    }
}

impl Serialize for FieldsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for FieldsMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(v) => write!(f, "{name:?}: {v}")?,
                None => write!(f, "{name:?}: None")?,
            }
        }
        f.write_str("}")
    }
}

/// Fields extracted from one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFields {
    /// Role of the source document.
    pub document_type: DocumentType,

    /// Source identifier of the document.
    pub source: String,

    /// Detected layout variant (OS and SICAF only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<DocumentSubtype>,

    /// Extracted fields.
    pub fields: FieldsMap,
}

impl DocumentFields {
    pub fn new(document_type: DocumentType, source: impl Into<String>) -> Self {
        Self {
            document_type,
            source: source.into(),
            subtype: None,
            fields: FieldsMap::new(),
        }
    }

    pub fn with_subtype(mut self, subtype: DocumentSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    /// Shortcut for [`FieldsMap::text`].
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.text(name)
    }

    /// File name component of the source identifier.
    pub fn file_name(&self) -> &str {
        self.source
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = FieldsMap::new();
        map.insert_text("A", "1");
        map.insert("B", None);
        map.insert_text("A", "2");

        assert_eq!(map.len(), 2);
        assert_eq!(map.text("A"), Some("2"));
        assert_eq!(map.get("B"), None);
        assert!(map.contains("B"));
        assert_eq!(map.found_count(), 1);
    }

    #[test]
    fn test_numbered_fields() {
        let mut map = FieldsMap::new();
        map.insert_text("PECA1", "FILME 30s");
        map.insert_text("PECA2", "SPOT 15s");
        map.insert_text("FORMATO1", "30\"");
        map.insert_text("PECA4", "orphan");

        assert_eq!(map.numbered("PECA"), vec!["FILME 30s", "SPOT 15s"]);
        assert_eq!(map.numbered("FORMATO"), vec!["30\""]);
        assert!(map.numbered("MISSING").is_empty());
    }

    #[test]
    fn test_serialize_as_object() {
        let mut map = FieldsMap::new();
        map.insert_text("OS N°", "1234");
        map.insert("CAMPANHA", None);
        map.insert("AT DE PRODUCAO", Some(FieldValue::List(vec!["001".into(), "002".into()])));

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"OS N°":"1234","CAMPANHA":null,"AT DE PRODUCAO":["001","002"]}"#
        );
    }

    #[test]
    fn test_display_transcription() {
        let mut map = FieldsMap::new();
        map.insert_text("CNPJ", "12.345.678/0001-90");
        map.insert("Município", None);
        assert_eq!(map.to_string(), r#"{"CNPJ": "12.345.678/0001-90", "Município": None}"#);
    }
}
