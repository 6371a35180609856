//! The seam between the board engine and the network.
//!
//! The engine only ever talks to [`StockDirectory`]; tests swap in an
//! in-memory fake, production uses [`HttpStockDirectory`].

use async_trait::async_trait;

use stocktrack_assign::AssignmentRequest;
use stocktrack_core::ClientResult;
use stocktrack_stock::{FaultRecord, RawStockRow, StockKey, StockMovement};

use crate::api::{FaultMark, SourceDetail, StockApi};
use crate::lookup::LookupOption;

/// Remote ledger, fault registry and system-room registry, as one surface.
#[async_trait]
pub trait StockDirectory: Send + Sync {
    async fn stock_status(&self) -> ClientResult<Vec<RawStockRow>>;
    async fn open_stock_faults(&self) -> ClientResult<Vec<FaultRecord>>;
    async fn submit_movement(&self, movement: &StockMovement) -> ClientResult<()>;
    async fn submit_assignment(&self, request: &AssignmentRequest) -> ClientResult<String>;
    async fn mark_fault(&self, mark: &FaultMark) -> ClientResult<()>;
    async fn close_fault(&self, entity_key: &str, status: &str) -> ClientResult<()>;
    async fn system_room_add(&self, items: &[StockKey]) -> ClientResult<()>;
    async fn system_room_remove(&self, items: &[StockKey]) -> ClientResult<()>;
    async fn source_detail(&self, source_type: &str, source_id: &str)
        -> ClientResult<SourceDetail>;
    async fn lookup(&self, entity: &str) -> ClientResult<Vec<LookupOption>>;
    async fn picker(&self, entity: &str) -> ClientResult<Vec<LookupOption>>;
}

/// Production directory backed by [`StockApi`].
#[derive(Debug, Clone)]
pub struct HttpStockDirectory {
    api: StockApi,
}

impl HttpStockDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: StockApi::new(base_url),
        }
    }
}

#[async_trait]
impl StockDirectory for HttpStockDirectory {
    async fn stock_status(&self) -> ClientResult<Vec<RawStockRow>> {
        self.api.stock_status().await
    }

    async fn open_stock_faults(&self) -> ClientResult<Vec<FaultRecord>> {
        self.api.open_stock_faults().await
    }

    async fn submit_movement(&self, movement: &StockMovement) -> ClientResult<()> {
        self.api.submit_movement(movement).await
    }

    async fn submit_assignment(&self, request: &AssignmentRequest) -> ClientResult<String> {
        self.api.submit_assignment(request).await
    }

    async fn mark_fault(&self, mark: &FaultMark) -> ClientResult<()> {
        self.api.mark_fault(mark).await
    }

    async fn close_fault(&self, entity_key: &str, status: &str) -> ClientResult<()> {
        self.api.close_fault(entity_key, status).await
    }

    async fn system_room_add(&self, items: &[StockKey]) -> ClientResult<()> {
        self.api.system_room_add(items).await
    }

    async fn system_room_remove(&self, items: &[StockKey]) -> ClientResult<()> {
        self.api.system_room_remove(items).await
    }

    async fn source_detail(
        &self,
        source_type: &str,
        source_id: &str,
    ) -> ClientResult<SourceDetail> {
        self.api.source_detail(source_type, source_id).await
    }

    async fn lookup(&self, entity: &str) -> ClientResult<Vec<LookupOption>> {
        self.api.lookup(entity).await
    }

    async fn picker(&self, entity: &str) -> ClientResult<Vec<LookupOption>> {
        self.api.picker(entity).await
    }
}
