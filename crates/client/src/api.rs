//! Typed endpoint wrappers.
//!
//! One method per backend contract. Response bodies are normalized into
//! domain types here; `{ok: false}` answers on 2xx become server errors so
//! callers only ever see the taxonomy in `stocktrack-core`.

use reqwest::multipart::Form;
use serde_json::{Map, Value};

use stocktrack_assign::AssignmentRequest;
use stocktrack_core::{ClientError, ClientResult, FieldId};
use stocktrack_stock::{FaultRecord, RawStockRow, StockKey, StockMovement};

use crate::http::Http;
use crate::lookup::LookupOption;

/// Fields submitted with a mark-fault request.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultMark {
    pub entity_key: String,
    /// Human label shown in fault lists (`device_no` on the wire).
    pub label: String,
    pub reason: String,
    pub destination: String,
    pub meta: Option<Map<String, Value>>,
}

/// Back-reference detail used by the assignment dialog's auto-fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDetail {
    /// Entity type the detail belongs to (`envanter` / `lisans` / `yazici`).
    pub kind: String,
    pub data: Map<String, Value>,
}

/// REST client for the stock backend.
#[derive(Debug, Clone)]
pub struct StockApi {
    http: Http,
}

/// Unwrap a snapshot body that is either a bare array or wrapped in
/// `{items}` / `{rows}`.
fn snapshot_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ["items", "rows"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Reject `{ok: false}` bodies, extracting the best available message.
fn require_ok(value: &Value, fallback: &str) -> ClientResult<()> {
    if value.get("ok").and_then(Value::as_bool) == Some(false) {
        let message = ["message", "detail", "error"]
            .iter()
            .filter_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|text| !text.is_empty())
            .unwrap_or(fallback);
        return Err(ClientError::server(200, message));
    }
    Ok(())
}

/// The backend rejects an overdrawn assignment with a plain 400 whose
/// message names the quantity; surface that on the quantity field so the
/// dialog highlights the input instead of showing a generic banner.
fn quantity_rejection(err: ClientError) -> ClientError {
    if let ClientError::Server { message, .. } = &err {
        let lower = message.to_lowercase();
        if lower.contains("miktar") || lower.contains("yetersiz stok") {
            return ClientError::field(FieldId::Quantity, message.clone());
        }
    }
    err
}

impl StockApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Http::new(base_url),
        }
    }

    /// `GET /api/stock/status`: the full ledger snapshot.
    pub async fn stock_status(&self) -> ClientResult<Vec<RawStockRow>> {
        let body = self.http.get_json("/api/stock/status", &[]).await?;
        let rows = snapshot_items(body)
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        Ok(rows)
    }

    /// `POST /stock/add`: stock-in and scrap both go through here.
    pub async fn submit_movement(&self, movement: &StockMovement) -> ClientResult<()> {
        let body = self.http.post_json("/stock/add", movement).await?;
        require_ok(&body, "İşlem başarısız")
    }

    /// `POST /stock/assign`: returns the server's confirmation message.
    pub async fn submit_assignment(&self, request: &AssignmentRequest) -> ClientResult<String> {
        let body = self
            .http
            .post_json("/stock/assign", request)
            .await
            .map_err(quantity_rejection)?;
        require_ok(&body, "Atama başarısız.").map_err(quantity_rejection)?;
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or("Atama tamamlandı.");
        Ok(message.to_string())
    }

    /// `GET /faults/list?entity=stock&status=arızalı`: the open-fault list
    /// for the stock entity.
    pub async fn open_stock_faults(&self) -> ClientResult<Vec<FaultRecord>> {
        let body = self
            .http
            .get_json("/faults/list", &[("entity", "stock"), ("status", "arızalı")])
            .await?;
        let records = match body.get("items") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        };
        Ok(records)
    }

    /// `POST /faults/mark`: open (or update) a fault. Multipart form body.
    pub async fn mark_fault(&self, mark: &FaultMark) -> ClientResult<()> {
        let meta = mark
            .meta
            .as_ref()
            .map(|map| serde_json::to_string(map).unwrap_or_default())
            .unwrap_or_default();
        let form = Form::new()
            .text("entity", "stock")
            .text("entity_key", mark.entity_key.clone())
            .text("device_no", mark.label.clone())
            .text("title", mark.label.clone())
            .text("reason", mark.reason.clone())
            .text("destination", mark.destination.clone())
            .text("meta", meta);
        let body = self.http.post_form("/faults/mark", form).await?;
        require_ok(&body, "Arıza kaydedilemedi")
    }

    /// `POST /faults/repair`: close the open fault for a key with the
    /// given terminal status (`tamir_edildi` or `hurda`).
    pub async fn close_fault(&self, entity_key: &str, status: &str) -> ClientResult<()> {
        let form = Form::new()
            .text("entity", "stock")
            .text("entity_key", entity_key.to_string())
            .text("status", status.to_string());
        let body = self.http.post_form("/faults/repair", form).await?;
        require_ok(&body, "İşlem başarısız")
    }

    /// `POST /api/stock/system-room/add`.
    pub async fn system_room_add(&self, items: &[StockKey]) -> ClientResult<()> {
        let body = self
            .http
            .post_json(
                "/api/stock/system-room/add",
                &serde_json::json!({ "items": items }),
            )
            .await?;
        require_ok(&body, "İşlem başarısız")
    }

    /// `POST /api/stock/system-room/remove`.
    pub async fn system_room_remove(&self, items: &[StockKey]) -> ClientResult<()> {
        let body = self
            .http
            .post_json(
                "/api/stock/system-room/remove",
                &serde_json::json!({ "items": items }),
            )
            .await?;
        require_ok(&body, "İşlem başarısız")
    }

    /// `GET /api/lookup/{entity}`: reference data for dropdowns.
    pub async fn lookup(&self, entity: &str) -> ClientResult<Vec<LookupOption>> {
        let body = self
            .http
            .get_json(&format!("/api/lookup/{entity}"), &[])
            .await?;
        Ok(LookupOption::list_from(&body))
    }

    /// `GET /api/picker/{entity}`: searchable picker sources.
    pub async fn picker(&self, entity: &str) -> ClientResult<Vec<LookupOption>> {
        let body = self
            .http
            .get_json(&format!("/api/picker/{entity}"), &[])
            .await?;
        Ok(LookupOption::list_from(&body))
    }

    /// `GET /stock/assign/source-detail?type=&id=`: back-reference detail
    /// for the assignment dialog's auto-fill.
    pub async fn source_detail(
        &self,
        source_type: &str,
        source_id: &str,
    ) -> ClientResult<SourceDetail> {
        let body = self
            .http
            .get_json(
                "/stock/assign/source-detail",
                &[("type", source_type), ("id", source_id)],
            )
            .await?;
        let kind = body
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or(source_type)
            .to_string();
        let data = match body.get("data") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        Ok(SourceDetail { kind, data })
    }
}
