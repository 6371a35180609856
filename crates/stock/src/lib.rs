//! Stock domain module.
//!
//! This crate contains the fungible stock line model: canonical key
//! normalization, category detection, row view-models, the fault overlay,
//! and stock movement payloads. Pure data and deterministic logic only:
//! no IO, no HTTP, no rendering.

pub mod fault;
pub mod key;
pub mod movement;
pub mod row;

pub use fault::{fault_key, fault_label, fault_meta, FaultOverlay, FaultRecord, FaultState};
pub use key::{detect_kind, ItemKind, StockKey};
pub use movement::{StockMovement, StockOperation};
pub use row::{RawStockRow, SourceRef, StockRow};
