//! YAML frontmatter extraction.
//!
//! The metadata block itself is split off by the Markdown parser; this
//! module turns its text into an ordered string-to-string mapping.

use serde_yaml::Value;

use crate::error::RenderError;

/// Ordered key-value metadata from a document's frontmatter block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block had no representable entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Frontmatter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse the text of a frontmatter block.
///
/// Returns `Ok(None)` when the document had no block.
pub fn extract_frontmatter(block: Option<&str>) -> Result<Option<Frontmatter>, RenderError> {
    let Some(block) = block else {
        return Ok(None);
    };
    if block.trim().is_empty() {
        return Ok(Some(Frontmatter::default()));
    }

    let mapping = match serde_yaml::from_str::<Value>(block)? {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(Some(Frontmatter::default())),
        other => {
            return Err(RenderError::FrontmatterShape {
                kind: kind_of(&other),
            });
        }
    };

    let mut entries = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let Some(key) = scalar_to_string(&key) else {
            tracing::debug!(kind = kind_of(&key), "Skipping frontmatter entry with non-scalar key");
            continue;
        };
        match scalar_to_string(&value) {
            Some(value) => entries.push((key, value)),
            None => {
                tracing::debug!(%key, kind = kind_of(&value), "Skipping non-scalar frontmatter value");
            }
        }
    }
    Ok(Some(Frontmatter { entries }))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_block() {
        assert_eq!(extract_frontmatter(None).unwrap(), None);
    }

    #[test]
    fn test_simple_mapping() {
        let matter = extract_frontmatter(Some("key: value\n")).unwrap().unwrap();
        assert_eq!(matter, [("key", "value")].into_iter().collect::<Frontmatter>());
    }

    #[test]
    fn test_scalars_stringified() {
        let matter = extract_frontmatter(Some(
            "title: \"Hello\"\ndraft: true\norder: 3\nratio: 1.5\nempty: ~\n",
        ))
        .unwrap()
        .unwrap();

        assert_eq!(
            matter.iter().collect::<Vec<_>>(),
            vec![
                ("title", "Hello"),
                ("draft", "true"),
                ("order", "3"),
                ("ratio", "1.5"),
                ("empty", ""),
            ]
        );
    }

    #[test]
    fn test_key_order_follows_source() {
        let matter = extract_frontmatter(Some("z: 1\na: 2\nm: 3\n")).unwrap().unwrap();
        let keys: Vec<_> = matter.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_nested_values_skipped() {
        let matter = extract_frontmatter(Some("title: T\ntags:\n  - a\n  - b\nmeta:\n  x: 1\n"))
            .unwrap()
            .unwrap();
        assert_eq!(matter.len(), 1);
        assert_eq!(matter.get("title"), Some("T"));
        assert_eq!(matter.get("tags"), None);
    }

    #[test]
    fn test_block_scalar() {
        let matter = extract_frontmatter(Some("description: |\n  line one\n  line two\n"))
            .unwrap()
            .unwrap();
        assert_eq!(matter.get("description"), Some("line one\nline two\n"));
    }

    #[test]
    fn test_empty_block() {
        let matter = extract_frontmatter(Some("")).unwrap().unwrap();
        assert!(matter.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let err = extract_frontmatter(Some("key: [unclosed\n")).unwrap_err();
        assert!(matches!(err, RenderError::Frontmatter(_)));
    }

    #[test]
    fn test_non_mapping_is_error() {
        let err = extract_frontmatter(Some("- a\n- b\n")).unwrap_err();
        assert!(matches!(
            err,
            RenderError::FrontmatterShape { kind: "sequence" }
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializes_as_ordered_map() {
        let matter: Frontmatter = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&matter).unwrap(),
            r#"{"b":"2","a":"1"}"#
        );
    }
}
