//! Assignment dialog orchestration.
//!
//! Wraps an [`AssignmentDraft`] with the two network concerns the dialog
//! has: loading the reference dropdown sources, and auto-filling the active
//! tab from the row's back-reference. Auto-fill results are cached per
//! source record and guarded against supersession, so re-selecting rows
//! quickly never applies a stale detail.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use stocktrack_assign::{AssignmentDraft, AssignmentRequest};
use stocktrack_client::{LatestOnly, LookupOption, SourceDetail, StockDirectory};
use stocktrack_core::{ClientError, ClientResult};
use stocktrack_stock::StockRow;

/// Dropdown contents for the three target tabs.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSources {
    pub users: Vec<LookupOption>,
    pub inventories: Vec<LookupOption>,
    pub factories: Vec<LookupOption>,
    pub departments: Vec<LookupOption>,
    pub usage_areas: Vec<LookupOption>,
    pub license_names: Vec<LookupOption>,
    pub printers: Vec<LookupOption>,
    /// At least one source failed to load; the dialog stays usable and
    /// shows a warning instead of blocking.
    pub partial: bool,
}

pub struct AssignDialog {
    directory: Arc<dyn StockDirectory>,
    pub draft: AssignmentDraft,
    guard: LatestOnly,
    detail_cache: HashMap<String, SourceDetail>,
}

impl AssignDialog {
    pub fn open(directory: Arc<dyn StockDirectory>, row: StockRow) -> Self {
        Self {
            directory,
            draft: AssignmentDraft::new(row),
            guard: LatestOnly::new(),
            detail_cache: HashMap::new(),
        }
    }

    /// Load every dropdown source. Individual failures leave that list
    /// empty and flip [`ReferenceSources::partial`].
    pub async fn load_sources(&self) -> ReferenceSources {
        let mut partial = false;
        let mut admit = |result: ClientResult<Vec<LookupOption>>, entity: &str| match result {
            Ok(options) => options,
            Err(err) => {
                warn!(error = %err, entity, "reference source load failed");
                partial = true;
                Vec::new()
            }
        };
        let users = admit(self.directory.picker("kullanici").await, "kullanici");
        let inventories = admit(self.directory.picker("envanter").await, "envanter");
        let factories = admit(self.directory.lookup("fabrika").await, "fabrika");
        let departments = admit(self.directory.lookup("departman").await, "departman");
        let usage_areas = admit(
            self.directory.lookup("kullanim_alani").await,
            "kullanim_alani",
        );
        let license_names = admit(self.directory.lookup("lisans_adi").await, "lisans_adi");
        let printers = admit(self.directory.picker("yazici").await, "yazici");
        ReferenceSources {
            users,
            inventories,
            factories,
            departments,
            usage_areas,
            license_names,
            printers,
            partial,
        }
    }

    /// Fetch the row's back-reference detail and auto-fill the matching
    /// tab. Details are cached per `kind:id`; only the latest in-flight
    /// fetch is allowed to touch the draft.
    pub async fn auto_fill(&mut self) {
        let Some(source) = self.draft.row().source.clone() else {
            return;
        };
        let ticket = self.guard.begin();
        let cache_key = format!("{}:{}", source.kind, source.id);
        let detail = match self.detail_cache.get(&cache_key) {
            Some(hit) => hit.clone(),
            None => match self.directory.source_detail(&source.kind, &source.id).await {
                Ok(detail) => {
                    self.detail_cache.insert(cache_key, detail.clone());
                    detail
                }
                Err(err) => {
                    if !err.is_abort() {
                        warn!(error = %err, kind = %source.kind, id = %source.id,
                            "source detail fetch failed");
                    }
                    return;
                }
            },
        };
        if !self.guard.is_current(ticket) {
            return;
        }
        self.draft.apply_source_detail(&detail.kind, &detail.data);
    }

    /// Validate and produce the wire request, or the field-level error the
    /// dialog highlights.
    pub fn submit(&self) -> Result<AssignmentRequest, ClientError> {
        self.draft.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    use stocktrack_client::FaultMark;
    use stocktrack_stock::{FaultRecord, RawStockRow, StockKey, StockMovement};

    #[derive(Default)]
    struct FakeDirectory {
        detail_calls: Mutex<u32>,
        fail_lookups: bool,
    }

    #[async_trait]
    impl StockDirectory for FakeDirectory {
        async fn stock_status(&self) -> ClientResult<Vec<RawStockRow>> {
            Ok(Vec::new())
        }

        async fn open_stock_faults(&self) -> ClientResult<Vec<FaultRecord>> {
            Ok(Vec::new())
        }

        async fn submit_movement(&self, _movement: &StockMovement) -> ClientResult<()> {
            Ok(())
        }

        async fn submit_assignment(&self, _request: &AssignmentRequest) -> ClientResult<String> {
            Ok("Atama tamamlandı.".into())
        }

        async fn mark_fault(&self, _mark: &FaultMark) -> ClientResult<()> {
            Ok(())
        }

        async fn close_fault(&self, _entity_key: &str, _status: &str) -> ClientResult<()> {
            Ok(())
        }

        async fn system_room_add(&self, _items: &[StockKey]) -> ClientResult<()> {
            Ok(())
        }

        async fn system_room_remove(&self, _items: &[StockKey]) -> ClientResult<()> {
            Ok(())
        }

        async fn source_detail(
            &self,
            source_type: &str,
            _source_id: &str,
        ) -> ClientResult<SourceDetail> {
            *self.detail_calls.lock().unwrap() += 1;
            Ok(SourceDetail {
                kind: source_type.rsplit(':').next().unwrap_or("").to_string(),
                data: json!({ "envanter_no": "ENV-7", "marka": "Dell" })
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
            })
        }

        async fn lookup(&self, entity: &str) -> ClientResult<Vec<LookupOption>> {
            if self.fail_lookups {
                return Err(ClientError::transport("bağlantı koptu"));
            }
            Ok(vec![LookupOption {
                id: "1".into(),
                label: entity.to_string(),
            }])
        }

        async fn picker(&self, entity: &str) -> ClientResult<Vec<LookupOption>> {
            Ok(vec![LookupOption {
                id: "1".into(),
                label: entity.to_string(),
            }])
        }
    }

    fn row_with_source() -> StockRow {
        StockRow::from_raw(&RawStockRow {
            donanim_tipi: Some("Laptop".into()),
            net_miktar: Some(3),
            source_type: Some("trash:envanter".into()),
            source_id: Some(json!(42)),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn auto_fill_applies_and_caches_the_detail() {
        let directory = Arc::new(FakeDirectory::default());
        let mut dialog = AssignDialog::open(directory.clone(), row_with_source());

        dialog.auto_fill().await;
        assert_eq!(dialog.draft.inventory.inventory_no, "ENV-7");
        assert!(dialog.draft.is_read_only("envanter_no"));

        dialog.auto_fill().await;
        assert_eq!(*directory.detail_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn rows_without_back_reference_skip_the_lookup() {
        let directory = Arc::new(FakeDirectory::default());
        let row = StockRow::from_raw(&RawStockRow {
            donanim_tipi: Some("Laptop".into()),
            net_miktar: Some(3),
            ..Default::default()
        });
        let mut dialog = AssignDialog::open(directory.clone(), row);
        dialog.auto_fill().await;
        assert_eq!(*directory.detail_calls.lock().unwrap(), 0);
        assert_eq!(dialog.draft.inventory.inventory_no, "");
    }

    #[tokio::test]
    async fn partial_source_failure_keeps_the_dialog_usable() {
        let directory = Arc::new(FakeDirectory {
            fail_lookups: true,
            ..Default::default()
        });
        let dialog = AssignDialog::open(directory, row_with_source());
        let sources = dialog.load_sources().await;
        assert!(sources.partial);
        assert!(sources.factories.is_empty());
        // Picker-backed sources still loaded.
        assert_eq!(sources.users.len(), 1);
    }

    #[tokio::test]
    async fn submit_runs_draft_validation() {
        let directory = Arc::new(FakeDirectory::default());
        let mut dialog = AssignDialog::open(directory, row_with_source());
        dialog.auto_fill().await;
        dialog.draft.set_quantity(1);
        let request = dialog.submit().unwrap();
        assert_eq!(request.envanter_form.unwrap().envanter_no, "ENV-7");
    }
}
