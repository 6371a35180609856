//! Assignment builder.
//!
//! Turns a selected stock row plus user-entered target fields into a valid
//! assignment request, or fails with a field-identified validation error
//! before any network call is made.

pub mod draft;
pub mod forms;

pub use draft::{
    auto_target, combine_notes, AssignmentDraft, AssignmentRequest, InventoryInput, LicenseInput,
    PrinterInput,
};
pub use forms::{InventoryForm, LicenseForm, PrinterForm, TargetKind};
