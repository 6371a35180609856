//! Canonical stock line identity.
//!
//! Stock rows arrive from several source entities with varying field names.
//! Everything that treats two rows as "the same stock line" goes through
//! [`StockKey`]: a trimmed, category-resolved tuple whose serialized form is
//! stable regardless of the raw record's field order.

use serde::{Deserialize, Serialize};

/// Category of asset a stock line represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    #[serde(rename = "envanter")]
    Inventory,
    #[serde(rename = "lisans")]
    License,
    #[serde(rename = "yazici")]
    Printer,
}

impl ItemKind {
    /// Token used on the wire and inside encoded keys.
    pub fn wire_token(&self) -> &'static str {
        match self {
            ItemKind::Inventory => "envanter",
            ItemKind::License => "lisans",
            ItemKind::Printer => "yazici",
        }
    }

    /// Human-facing label for the cross-category system room table.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Inventory => "Envanter",
            ItemKind::License => "Lisans",
            ItemKind::Printer => "Yazıcı",
        }
    }
}

/// Aliases the backend has historically used for license-shaped rows.
const LICENSE_ALIASES: &[&str] = &["lisans", "lisanslar", "license", "software", "yazilim"];
const PRINTER_ALIASES: &[&str] = &["yazici", "printer"];

/// Source types can carry a `module:kind` prefix; the kind is the last
/// `:`-delimited segment.
fn base_segment(value: &str) -> &str {
    value.rsplit(':').next().unwrap_or(value)
}

fn matches_aliases(value: &str, aliases: &[&str]) -> bool {
    if value.is_empty() {
        return false;
    }
    if aliases.contains(&value) {
        return true;
    }
    let last = base_segment(value);
    if aliases.contains(&last) {
        return true;
    }
    aliases.iter().any(|alias| value.contains(alias))
}

/// Resolve the category of a raw record from its `item_type` and
/// `source_type` fields. Defaults to [`ItemKind::Inventory`].
pub fn detect_kind(item_type: Option<&str>, source_type: Option<&str>) -> ItemKind {
    let mut candidates: Vec<String> = Vec::with_capacity(3);
    let primary = item_type
        .filter(|v| !v.trim().is_empty())
        .or(source_type)
        .unwrap_or("");
    let base = base_segment(primary.trim()).trim().to_lowercase();
    if !base.is_empty() {
        candidates.push(base);
    }
    for raw in [item_type, source_type].into_iter().flatten() {
        let value = raw.trim().to_lowercase();
        if !value.is_empty() {
            candidates.push(value);
        }
    }

    if candidates.iter().any(|v| matches_aliases(v, LICENSE_ALIASES)) {
        return ItemKind::License;
    }
    if candidates.iter().any(|v| matches_aliases(v, PRINTER_ALIASES)) {
        return ItemKind::Printer;
    }
    ItemKind::Inventory
}

/// Trim a raw optional string; blank becomes `None`.
pub(crate) fn clean(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Identity of a fungible stock line.
///
/// Two keys are equal iff every field is equal after normalization; the
/// serialized JSON form (fixed field order) doubles as the wire item for
/// system-room membership calls and as a map/selection-set key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockKey {
    pub item_type: ItemKind,
    /// For license lines this holds the license name.
    pub donanim_tipi: String,
    pub marka: Option<String>,
    pub model: Option<String>,
    pub ifs_no: Option<String>,
}

impl StockKey {
    /// Build a canonical key from raw row fields.
    ///
    /// Pure: the same inputs always yield the same key and the same encoded
    /// string, regardless of where the raw record came from.
    pub fn normalize(
        item_type: Option<&str>,
        source_type: Option<&str>,
        hardware_type: Option<&str>,
        brand: Option<&str>,
        model: Option<&str>,
        external_ref: Option<&str>,
    ) -> Self {
        Self {
            item_type: detect_kind(item_type, source_type),
            donanim_tipi: clean(hardware_type).unwrap_or_default(),
            marka: clean(brand),
            model: clean(model),
            ifs_no: clean(external_ref),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.item_type
    }

    pub fn hardware_type(&self) -> &str {
        &self.donanim_tipi
    }

    /// Stable string form used as a selection-set key.
    pub fn encoded(&self) -> String {
        // Struct field order is fixed, so serde_json output is deterministic.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse an encoded key back; re-normalizes string fields so a decoded
    /// key is always canonical.
    pub fn decode(encoded: &str) -> Option<Self> {
        let raw: StockKey = serde_json::from_str(encoded).ok()?;
        Some(Self {
            item_type: raw.item_type,
            donanim_tipi: raw.donanim_tipi.trim().to_string(),
            marka: clean(raw.marka.as_deref()),
            model: clean(raw.model.as_deref()),
            ifs_no: clean(raw.ifs_no.as_deref()),
        })
    }

    /// The `stock_id` the assignment endpoint expects: a pipe-join of
    /// hardware type, brand, model and external reference, empty segments
    /// included.
    pub fn stock_id(&self) -> String {
        [
            self.donanim_tipi.as_str(),
            self.marka.as_deref().unwrap_or(""),
            self.model.as_deref().unwrap_or(""),
            self.ifs_no.as_deref().unwrap_or(""),
        ]
        .join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn detects_license_from_suffixed_source_type() {
        assert_eq!(detect_kind(None, Some("trash:lisans")), ItemKind::License);
        assert_eq!(detect_kind(Some("software"), None), ItemKind::License);
        assert_eq!(detect_kind(Some("Lisanslar"), None), ItemKind::License);
    }

    #[test]
    fn detects_printer_and_defaults_to_inventory() {
        assert_eq!(detect_kind(Some("yazici"), None), ItemKind::Printer);
        assert_eq!(detect_kind(None, Some("modul:printer")), ItemKind::Printer);
        assert_eq!(detect_kind(Some("donanim"), None), ItemKind::Inventory);
        assert_eq!(detect_kind(None, None), ItemKind::Inventory);
    }

    #[test]
    fn normalization_trims_and_blanks_to_none() {
        let key = StockKey::normalize(
            Some("ENVANTER"),
            None,
            Some("  Laptop "),
            Some("  "),
            Some("5420"),
            None,
        );
        assert_eq!(key.donanim_tipi, "Laptop");
        assert_eq!(key.marka, None);
        assert_eq!(key.model.as_deref(), Some("5420"));
        assert_eq!(key.item_type, ItemKind::Inventory);
    }

    #[test]
    fn encoded_key_round_trips() {
        let key = StockKey::normalize(
            Some("lisans"),
            None,
            Some("Office 365"),
            None,
            None,
            Some("IFS-7"),
        );
        let decoded = StockKey::decode(&key.encoded()).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn stock_id_keeps_empty_segments() {
        let key = StockKey::normalize(None, None, Some("Laptop"), None, Some("5420"), None);
        assert_eq!(key.stock_id(), "Laptop||5420|");
    }

    proptest! {
        // Normalization is idempotent: feeding a canonical key's own fields
        // back in yields the same key and the same encoded string.
        #[test]
        fn normalize_is_idempotent(
            hw in "[ a-zA-Z0-9-]{0,12}",
            brand in proptest::option::of("[ a-zA-Z0-9]{0,8}"),
            model in proptest::option::of("[ a-zA-Z0-9]{0,8}"),
            ifs in proptest::option::of("[ A-Z0-9-]{0,8}"),
            kind in prop_oneof!["envanter", "lisans", "yazici"],
        ) {
            let first = StockKey::normalize(
                Some(kind.as_str()),
                None,
                Some(hw.as_str()),
                brand.as_deref(),
                model.as_deref(),
                ifs.as_deref(),
            );
            let second = StockKey::normalize(
                Some(first.item_type.wire_token()),
                None,
                Some(&first.donanim_tipi),
                first.marka.as_deref(),
                first.model.as_deref(),
                first.ifs_no.as_deref(),
            );
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.encoded(), second.encoded());
        }
    }
}
