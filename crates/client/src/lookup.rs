//! Reference-data normalization.
//!
//! The lookup and picker endpoints answer with whatever field names their
//! source tables use (`name` / `ad` / `adi` / `text` / `label`, `id` /
//! `value`). Everything is flattened into [`LookupOption`] here; the
//! variant names never leave this module.

use serde_json::Value;

/// One dropdown entry in canonical shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOption {
    pub id: String,
    pub label: String,
}

const ID_KEYS: &[&str] = &["id", "value"];
const LABEL_KEYS: &[&str] = &["name", "ad", "adi", "text", "label"];

fn string_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_of(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .find_map(string_of)
}

impl LookupOption {
    /// Normalize one raw record. Records with neither an id nor a label are
    /// dropped. A bare string entry (the license-names endpoint returns
    /// those) becomes both id and label.
    pub fn from_value(item: &Value) -> Option<Self> {
        if let Some(text) = string_of(item) {
            return Some(Self {
                id: text.clone(),
                label: text,
            });
        }
        let id = first_of(item, ID_KEYS);
        let label = first_of(item, LABEL_KEYS);
        match (id, label) {
            (Some(id), Some(label)) => Some(Self { id, label }),
            (Some(id), None) => Some(Self {
                label: id.clone(),
                id,
            }),
            (None, Some(label)) => Some(Self {
                id: label.clone(),
                label,
            }),
            (None, None) => None,
        }
    }

    /// Normalize a response body that is either a bare array or wrapped in
    /// `{items: [...]}`.
    pub fn list_from(value: &Value) -> Vec<Self> {
        let items = match value {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => match map.get("items") {
                Some(Value::Array(items)) => items.as_slice(),
                _ => &[],
            },
            _ => &[],
        };
        items.iter().filter_map(Self::from_value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn variant_label_fields_normalize() {
        for key in ["name", "ad", "adi", "text", "label"] {
            let item = json!({ "id": 3, key: "Fabrika A" });
            let option = LookupOption::from_value(&item).unwrap();
            assert_eq!(option.id, "3");
            assert_eq!(option.label, "Fabrika A");
        }
    }

    #[test]
    fn bare_strings_and_missing_fields() {
        let option = LookupOption::from_value(&json!("Office 365")).unwrap();
        assert_eq!(option.id, "Office 365");
        assert_eq!(option.label, "Office 365");

        let id_only = LookupOption::from_value(&json!({"value": "X1"})).unwrap();
        assert_eq!(id_only.label, "X1");

        assert!(LookupOption::from_value(&json!({"other": true})).is_none());
    }

    #[test]
    fn list_unwraps_items_wrapper() {
        let wrapped = json!({ "items": [ {"id": 1, "text": "a"} ] });
        assert_eq!(LookupOption::list_from(&wrapped).len(), 1);
        let bare = json!([ {"id": 1, "ad": "b"} ]);
        assert_eq!(LookupOption::list_from(&bare).len(), 1);
        assert!(LookupOption::list_from(&json!(null)).is_empty());
    }
}
