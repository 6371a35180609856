//! Fault overlay: per-key "currently broken" state merged onto stock rows.
//!
//! The fault registry indexes on a composite entity key, not the generic
//! [`StockKey`](crate::key::StockKey): a fault can be opened against one
//! specific source record even when the stock key collapses several source
//! records into one line.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::key::StockKey;
use crate::row::StockRow;

/// One fault registry record, as served by `GET /faults/list`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FaultRecord {
    #[serde(default)]
    pub entity_key: Option<String>,
    #[serde(default)]
    pub device_no: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Kept as text; the backend mixes RFC 3339 and naive `isoformat()`
    /// timestamps. Use [`FaultRecord::created_timestamp`] for a parsed value.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Free-form annotations recorded with the fault (e.g. the stock key
    /// fields it was opened from).
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

impl FaultRecord {
    pub fn created_timestamp(&self) -> Option<DateTime<Utc>> {
        crate::row::parse_timestamp(self.created_at.as_deref())
    }
}

/// Derived fault status of a single stock row.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FaultState {
    /// No open fault for this key.
    Clear,
    /// An open fault exists; the row action menu flips to "Reactivate".
    Open(FaultRecord),
    /// The fault registry could not be reached; quantities still render.
    #[default]
    Unknown,
}

impl FaultState {
    pub fn is_open(&self) -> bool {
        matches!(self, FaultState::Open(_))
    }
}

/// Cached open-fault list for the stock entity.
#[derive(Debug, Clone, Default)]
pub struct FaultOverlay {
    records: Option<Vec<FaultRecord>>,
}

impl FaultOverlay {
    /// Registry fetch failed; every lookup answers [`FaultState::Unknown`].
    pub fn unavailable() -> Self {
        Self { records: None }
    }

    pub fn loaded(records: Vec<FaultRecord>) -> Self {
        Self {
            records: Some(records),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.records.is_some()
    }

    /// Case-insensitive exact match against the cached open-fault list.
    pub fn get_open_fault(&self, entity_key: &str) -> Option<&FaultRecord> {
        let records = self.records.as_ref()?;
        let wanted = entity_key.trim().to_lowercase();
        records.iter().find(|rec| {
            rec.entity_key
                .as_deref()
                .is_some_and(|key| key.trim().to_lowercase() == wanted)
        })
    }

    pub fn has_open_fault(&self, entity_key: &str) -> bool {
        self.get_open_fault(entity_key).is_some()
    }

    pub fn state_for(&self, entity_key: &str) -> FaultState {
        if self.records.is_none() {
            return FaultState::Unknown;
        }
        match self.get_open_fault(entity_key) {
            Some(record) => FaultState::Open(record.clone()),
            None => FaultState::Clear,
        }
    }
}

/// Composite key the fault registry indexes stock rows on.
///
/// Pipe-join of the trimmed, non-empty identity and back-reference fields;
/// falls back to `stock:<hardware_type>`, then the literal `stock`.
pub fn fault_key(row: &StockRow) -> String {
    let (source_kind, source_id) = match &row.source {
        Some(source) => (source.kind.as_str(), source.id.as_str()),
        None => ("", ""),
    };
    let fields = [
        row.key.donanim_tipi.as_str(),
        row.key.marka.as_deref().unwrap_or(""),
        row.key.model.as_deref().unwrap_or(""),
        row.key.ifs_no.as_deref().unwrap_or(""),
        source_kind,
        source_id,
    ];
    let parts: Vec<&str> = fields
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    if !parts.is_empty() {
        return parts.join("|");
    }
    let hardware = row.key.donanim_tipi.trim();
    if hardware.is_empty() {
        "stock".to_string()
    } else {
        format!("stock:{hardware}")
    }
}

/// Human title used on fault mark/repair dialogs: "hw - brand - model",
/// falling back to the external reference, then a generic label.
pub fn fault_label(row: &StockRow) -> String {
    let parts: Vec<&str> = [
        row.key.donanim_tipi.as_str(),
        row.key.marka.as_deref().unwrap_or(""),
        row.key.model.as_deref().unwrap_or(""),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect();
    if !parts.is_empty() {
        return parts.join(" - ");
    }
    match row.key.ifs_no.as_deref() {
        Some(ifs) => ifs.to_string(),
        None => "Stok Kaydı".to_string(),
    }
}

/// Annotations attached to a mark-fault request so history readers can
/// reconstruct which stock line the fault belonged to.
pub fn fault_meta(key: &StockKey) -> Map<String, Value> {
    let mut meta = Map::new();
    meta.insert("donanim_tipi".into(), Value::from(key.donanim_tipi.clone()));
    meta.insert(
        "marka".into(),
        Value::from(key.marka.clone().unwrap_or_default()),
    );
    meta.insert(
        "model".into(),
        Value::from(key.model.clone().unwrap_or_default()),
    );
    meta.insert(
        "ifs_no".into(),
        Value::from(key.ifs_no.clone().unwrap_or_default()),
    );
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::RawStockRow;

    fn row(hw: &str, brand: Option<&str>, ifs: Option<&str>) -> StockRow {
        StockRow::from_raw(&RawStockRow {
            donanim_tipi: Some(hw.into()),
            marka: brand.map(Into::into),
            ifs_no: ifs.map(Into::into),
            ..Default::default()
        })
    }

    fn open_fault(key: &str) -> FaultRecord {
        FaultRecord {
            entity_key: Some(key.to_string()),
            status: Some("arızalı".into()),
            ..Default::default()
        }
    }

    #[test]
    fn fault_key_joins_non_empty_fields() {
        let row = row("Laptop", Some("Dell"), Some("IFS-100"));
        assert_eq!(fault_key(&row), "Laptop|Dell|IFS-100");
    }

    #[test]
    fn fault_key_falls_back_for_sparse_rows() {
        assert_eq!(fault_key(&row("Laptop", None, None)), "Laptop");
        let empty = row("", None, None);
        assert_eq!(fault_key(&empty), "stock");
    }

    #[test]
    fn fault_key_is_stable_across_refetches() {
        // The same logical row, rebuilt from a fresh raw record, yields the
        // same key so open-fault lookups survive refreshes.
        let first = row("Laptop", Some("Dell"), Some("IFS-100"));
        let second = row(" Laptop ", Some(" Dell "), Some("IFS-100"));
        assert_eq!(fault_key(&first), fault_key(&second));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let overlay = FaultOverlay::loaded(vec![open_fault("laptop|dell|ifs-100")]);
        assert!(overlay.has_open_fault("Laptop|Dell|IFS-100"));
        assert!(!overlay.has_open_fault("Laptop|HP"));
    }

    #[test]
    fn unavailable_overlay_degrades_to_unknown() {
        let overlay = FaultOverlay::unavailable();
        assert_eq!(overlay.state_for("anything"), FaultState::Unknown);
        assert!(!overlay.has_open_fault("anything"));
    }

    #[test]
    fn fault_label_prefers_identity_fields() {
        assert_eq!(
            fault_label(&row("Laptop", Some("Dell"), None)),
            "Laptop - Dell"
        );
        assert_eq!(fault_label(&row("", None, Some("IFS-9"))), "IFS-9");
        assert_eq!(fault_label(&row("", None, None)), "Stok Kaydı");
    }
}
