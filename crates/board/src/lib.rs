//! Status board: aggregation, partitioning, and command dispatch.
//!
//! The board is a pure state machine: every user action maps to a
//! [`BoardAction`], [`reduce`] updates the [`BoardState`] and returns the
//! side effects to run, and [`BoardEngine`] executes those effects against
//! a [`StockDirectory`](stocktrack_client::StockDirectory), feeding results
//! back in as new actions. Nothing here touches the network directly.

pub mod dialog;
pub mod engine;
pub mod filter;
pub mod reducer;
pub mod state;

pub use dialog::{AssignDialog, ReferenceSources};
pub use engine::BoardEngine;
pub use reducer::{reduce, BoardAction, Effect};
pub use state::{actions_for, Banner, BoardState, RowAction, Severity, TableState};
