//! HTTP client for the stock backend.
//!
//! Everything that touches the network lives here: the raw JSON transport,
//! typed endpoint wrappers, duck-typed response normalization, and the
//! [`StockDirectory`] seam the board engine drives its effects through.
//! Variant backend field names are normalized at this boundary and never
//! leak further in.

pub mod api;
pub mod directory;
pub mod http;
pub mod latest;
pub mod lookup;
pub mod telemetry;

pub use api::{FaultMark, SourceDetail, StockApi};
pub use directory::{HttpStockDirectory, StockDirectory};
pub use http::Http;
pub use latest::{LatestOnly, Ticket};
pub use lookup::LookupOption;
