//! Stock row view-models.
//!
//! [`RawStockRow`] is the wire shape of `GET /api/stock/status` records;
//! [`StockRow`] is the canonical view-model the board renders. Rows are
//! rebuilt from scratch on every refresh and never patched in place.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::fault::FaultState;
use crate::key::{clean, StockKey};

/// Wire record as the backend ships it. Every field is optional; quantity
/// and identifier aliases are resolved during conversion, not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStockRow {
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub donanim_tipi: Option<String>,
    #[serde(default)]
    pub marka: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub ifs_no: Option<String>,
    #[serde(default)]
    pub net_miktar: Option<i64>,
    #[serde(default)]
    pub net: Option<i64>,
    #[serde(default)]
    pub mevcut_miktar: Option<i64>,
    /// Timestamp kept as text; tolerant parsing happens in `StockRow`.
    #[serde(default)]
    pub son_islem_ts: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    /// The backend emits this as either a number or a string.
    #[serde(default)]
    pub source_id: Option<Value>,
    #[serde(default)]
    pub system_room: bool,
    #[serde(default)]
    pub system_room_assigned_by: Option<String>,
    #[serde(default)]
    pub system_room_assigned_at: Option<String>,
    #[serde(default)]
    pub assignment_hint: Option<String>,
    #[serde(default)]
    pub lisans_anahtari: Option<String>,
    #[serde(default)]
    pub mail_adresi: Option<String>,
}

/// Back-reference to the entity record whose removal created this line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    /// Raw source type, e.g. `trash:envanter`. Kept verbatim for the
    /// source-detail lookup.
    pub kind: String,
    pub id: String,
}

/// One rendered stock line. Created transiently on every board refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub key: StockKey,
    pub net_quantity: u32,
    pub last_operation_at: Option<DateTime<Utc>>,
    pub source: Option<SourceRef>,
    pub system_room: bool,
    pub system_room_assigned_by: Option<String>,
    pub system_room_assigned_at: Option<DateTime<Utc>>,
    pub fault: FaultState,
    /// Explicit target hint for the assignment dialog, when the backend
    /// supplies one.
    pub assignment_hint: Option<String>,
    pub license_key: Option<String>,
    pub mail: Option<String>,
}

pub(crate) fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            // The backend also emits naive `isoformat()` timestamps.
            chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => clean(Some(s)),
        _ => None,
    }
}

impl StockRow {
    pub fn from_raw(raw: &RawStockRow) -> Self {
        let key = StockKey::normalize(
            raw.item_type.as_deref(),
            raw.source_type.as_deref(),
            raw.donanim_tipi.as_deref(),
            raw.marka.as_deref(),
            raw.model.as_deref(),
            raw.ifs_no.as_deref(),
        );
        let source = match (
            clean(raw.source_type.as_deref()),
            raw.source_id.as_ref().and_then(value_to_id),
        ) {
            (Some(kind), Some(id)) => Some(SourceRef { kind, id }),
            _ => None,
        };
        Self {
            key,
            net_quantity: raw.available_quantity(),
            last_operation_at: parse_timestamp(raw.son_islem_ts.as_deref()),
            source,
            system_room: raw.system_room,
            system_room_assigned_by: clean(raw.system_room_assigned_by.as_deref()),
            system_room_assigned_at: parse_timestamp(raw.system_room_assigned_at.as_deref()),
            fault: FaultState::Unknown,
            assignment_hint: clean(raw.assignment_hint.as_deref()),
            license_key: clean(raw.lisans_anahtari.as_deref()),
            mail: clean(raw.mail_adresi.as_deref()),
        }
    }
}

impl RawStockRow {
    /// Units on hand, resolving the quantity aliases in precedence order
    /// and clamping negatives to zero.
    pub fn available_quantity(&self) -> u32 {
        let qty = self
            .mevcut_miktar
            .or(self.net_miktar)
            .or(self.net)
            .unwrap_or(0);
        qty.max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::ItemKind;

    #[test]
    fn quantity_alias_precedence_and_clamp() {
        let raw = RawStockRow {
            net_miktar: Some(4),
            mevcut_miktar: Some(7),
            ..Default::default()
        };
        assert_eq!(raw.available_quantity(), 7);

        let negative = RawStockRow {
            net_miktar: Some(-3),
            ..Default::default()
        };
        assert_eq!(negative.available_quantity(), 0);
    }

    #[test]
    fn from_raw_builds_canonical_key_and_source_ref() {
        let raw = RawStockRow {
            donanim_tipi: Some(" Laptop ".into()),
            marka: Some("Dell".into()),
            model: Some("5420".into()),
            ifs_no: Some("IFS-100".into()),
            net_miktar: Some(5),
            source_type: Some("trash:envanter".into()),
            source_id: Some(Value::from(42)),
            ..Default::default()
        };
        let row = StockRow::from_raw(&raw);
        assert_eq!(row.key.kind(), ItemKind::Inventory);
        assert_eq!(row.key.hardware_type(), "Laptop");
        assert_eq!(row.net_quantity, 5);
        let source = row.source.unwrap();
        assert_eq!(source.kind, "trash:envanter");
        assert_eq!(source.id, "42");
    }

    #[test]
    fn string_source_id_is_accepted() {
        let raw = RawStockRow {
            donanim_tipi: Some("Mouse".into()),
            source_type: Some("envanter".into()),
            source_id: Some(Value::from(" 7 ")),
            ..Default::default()
        };
        let row = StockRow::from_raw(&raw);
        assert_eq!(row.source.unwrap().id, "7");
    }

    #[test]
    fn tolerant_timestamp_parsing() {
        let raw = RawStockRow {
            son_islem_ts: Some("2026-02-11T09:30:00".into()),
            ..Default::default()
        };
        let row = StockRow::from_raw(&raw);
        assert!(row.last_operation_at.is_some());

        let bad = RawStockRow {
            son_islem_ts: Some("not a date".into()),
            ..Default::default()
        };
        assert!(StockRow::from_raw(&bad).last_operation_at.is_none());
    }
}
