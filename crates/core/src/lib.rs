//! `stocktrack-core` — shared foundation for the stock client.
//!
//! This crate contains the error taxonomy used across every layer. It has no
//! HTTP or rendering concerns.

pub mod error;

pub use error::{ClientError, ClientResult, FieldId};
