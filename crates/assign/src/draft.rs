//! In-progress assignment state machine.
//!
//! An [`AssignmentDraft`] owns everything the assignment dialog edits: the
//! selected row, the active target tab, the quantity, and the three
//! target-specific field sets. [`AssignmentDraft::build`] validates the
//! active tab and produces the wire request, or a field-identified
//! validation error; no network call happens before that succeeds.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use stocktrack_core::{ClientError, ClientResult, FieldId};
use stocktrack_stock::{ItemKind, StockRow};

use crate::forms::{InventoryForm, LicenseForm, PrinterForm, TargetKind};

/// Wire body for `POST /stock/assign`. Exactly one target form is present,
/// matching `atama_turu`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRequest {
    pub stock_id: String,
    pub atama_turu: TargetKind,
    pub miktar: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notlar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_form: Option<LicenseForm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envanter_form: Option<InventoryForm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer_form: Option<PrinterForm>,
}

impl AssignmentRequest {
    /// Number of populated target forms; always exactly one for a request
    /// produced by [`AssignmentDraft::build`].
    pub fn form_count(&self) -> usize {
        [
            self.license_form.is_some(),
            self.envanter_form.is_some(),
            self.printer_form.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// Concatenate the general note and a tab-specific note with a blank-line
/// separator, omitting absent parts. A history reader sees both notes
/// without ambiguity about which applies.
pub fn combine_notes(notes: &[Option<&str>]) -> Option<String> {
    let parts: Vec<&str> = notes
        .iter()
        .filter_map(|note| note.map(str::trim))
        .filter(|note| !note.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

fn field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Editable license-tab fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseInput {
    pub name: String,
    pub key: String,
    pub owner: String,
    pub linked_inventory: String,
    pub mail: String,
    pub ifs: String,
    pub note: String,
}

/// Editable inventory-tab fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryInput {
    pub inventory_no: String,
    pub pc_name: String,
    pub factory: String,
    pub department: String,
    pub owner: String,
    pub usage_area: String,
    pub serial_no: String,
    pub linked_inventory: String,
    pub notes: String,
    pub ifs: String,
    pub brand: String,
    pub model: String,
    pub hardware_type: String,
}

/// Editable printer-tab fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrinterInput {
    pub printer_no: String,
    pub brand: String,
    pub model: String,
    pub usage_area: String,
    pub ip: String,
    pub mac: String,
    pub hostname: String,
    pub ifs: String,
    pub linked_inventory: String,
    pub owner: String,
    pub factory: String,
    pub notes: String,
}

/// Dialog state for one assignment in progress.
#[derive(Debug, Clone)]
pub struct AssignmentDraft {
    row: StockRow,
    target: TargetKind,
    quantity: u32,
    max_quantity: u32,
    pub general_note: String,
    pub license: LicenseInput,
    pub inventory: InventoryInput,
    pub printer: PrinterInput,
    /// Wire names of fields populated from the source-detail lookup; the UI
    /// renders these read-only.
    read_only: BTreeSet<String>,
}

impl AssignmentDraft {
    /// Start a draft for the given row. The target tab is pre-selected by
    /// the auto-tab heuristic and the quantity input is clamped to the
    /// row's available quantity.
    pub fn new(row: StockRow) -> Self {
        let target = auto_target(&row);
        let max_quantity = row.net_quantity;
        Self {
            row,
            target,
            quantity: 1,
            max_quantity,
            general_note: String::new(),
            license: LicenseInput::default(),
            inventory: InventoryInput::default(),
            printer: PrinterInput::default(),
            read_only: BTreeSet::new(),
        }
    }

    pub fn row(&self) -> &StockRow {
        &self.row
    }

    pub fn target(&self) -> TargetKind {
        self.target
    }

    /// Switch tabs. The auto-selection is a convenience default, not a hard
    /// constraint.
    pub fn select_target(&mut self, target: TargetKind) {
        self.target = target;
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    /// Set the requested quantity, clamping to the input's maximum the way
    /// the quantity field does. Out-of-range submissions are still caught
    /// in [`build`](Self::build).
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.min(self.max_quantity.max(1));
    }

    pub fn is_read_only(&self, wire_field: &str) -> bool {
        self.read_only.contains(wire_field)
    }

    /// Apply a source-detail lookup result to the tab matching the detail's
    /// entity type. Previously auto-filled fields for that tab are cleared
    /// first, so a stale back-reference never leaks into a new selection.
    pub fn apply_source_detail(&mut self, detail_kind: &str, data: &Map<String, Value>) {
        let kind = detail_kind.trim().to_lowercase();
        let text = |key: &str| -> Option<String> {
            match data.get(key) {
                Some(Value::String(s)) => field(s),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            }
        };
        match kind.as_str() {
            "lisans" => {
                self.clear_auto_fields(&["lisans_adi", "lisans_anahtari", "mail_adresi"]);
                let fills = [
                    ("lisans_adi", text("lisans_adi")),
                    ("lisans_anahtari", text("lisans_anahtari")),
                    ("mail_adresi", text("mail_adresi")),
                ];
                for (wire, value) in fills {
                    if let Some(value) = value {
                        match wire {
                            "lisans_adi" => self.license.name = value,
                            "lisans_anahtari" => self.license.key = value,
                            "mail_adresi" => self.license.mail = value,
                            _ => {}
                        }
                        self.read_only.insert(wire.to_string());
                    }
                }
            }
            "envanter" => {
                self.clear_auto_fields(&[
                    "envanter_no",
                    "bilgisayar_adi",
                    "seri_no",
                    "marka",
                    "model",
                    "donanim_tipi",
                ]);
                let fills = [
                    ("envanter_no", text("envanter_no")),
                    ("bilgisayar_adi", text("bilgisayar_adi")),
                    ("seri_no", text("seri_no")),
                    ("marka", text("marka")),
                    ("model", text("model")),
                    ("donanim_tipi", text("donanim_tipi")),
                ];
                for (wire, value) in fills {
                    if let Some(value) = value {
                        match wire {
                            "envanter_no" => self.inventory.inventory_no = value,
                            "bilgisayar_adi" => self.inventory.pc_name = value,
                            "seri_no" => self.inventory.serial_no = value,
                            "marka" => self.inventory.brand = value,
                            "model" => self.inventory.model = value,
                            "donanim_tipi" => self.inventory.hardware_type = value,
                            _ => {}
                        }
                        self.read_only.insert(wire.to_string());
                    }
                }
            }
            "yazici" => {
                self.clear_auto_fields(&[
                    "yazici_envanter_no",
                    "yazici_marka",
                    "yazici_model",
                    "ip_adresi",
                    "mac",
                    "hostname",
                ]);
                let fills = [
                    ("yazici_envanter_no", text("envanter_no")),
                    ("yazici_marka", text("marka")),
                    ("yazici_model", text("model")),
                    ("ip_adresi", text("ip_adresi")),
                    ("mac", text("mac")),
                    ("hostname", text("hostname")),
                ];
                for (wire, value) in fills {
                    if let Some(value) = value {
                        match wire {
                            "yazici_envanter_no" => self.printer.printer_no = value,
                            "yazici_marka" => self.printer.brand = value,
                            "yazici_model" => self.printer.model = value,
                            "ip_adresi" => self.printer.ip = value,
                            "mac" => self.printer.mac = value,
                            "hostname" => self.printer.hostname = value,
                            _ => {}
                        }
                        self.read_only.insert(wire.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    fn clear_auto_fields(&mut self, wire_fields: &[&str]) {
        for wire in wire_fields {
            if self.read_only.remove(*wire) {
                match *wire {
                    "lisans_adi" => self.license.name.clear(),
                    "lisans_anahtari" => self.license.key.clear(),
                    "mail_adresi" => self.license.mail.clear(),
                    "envanter_no" => self.inventory.inventory_no.clear(),
                    "bilgisayar_adi" => self.inventory.pc_name.clear(),
                    "seri_no" => self.inventory.serial_no.clear(),
                    "marka" => self.inventory.brand.clear(),
                    "model" => self.inventory.model.clear(),
                    "donanim_tipi" => self.inventory.hardware_type.clear(),
                    "yazici_envanter_no" => self.printer.printer_no.clear(),
                    "yazici_marka" => self.printer.brand.clear(),
                    "yazici_model" => self.printer.model.clear(),
                    "ip_adresi" => self.printer.ip.clear(),
                    "mac" => self.printer.mac.clear(),
                    "hostname" => self.printer.hostname.clear(),
                    _ => {}
                }
            }
        }
    }

    /// Validate the active tab and produce the wire request.
    pub fn build(&self) -> ClientResult<AssignmentRequest> {
        if self.quantity < 1 || self.quantity > self.max_quantity {
            return Err(ClientError::field(
                FieldId::Quantity,
                format!(
                    "Miktar 1 ile {} arasında olmalı",
                    self.max_quantity
                ),
            ));
        }

        let general = field(&self.general_note);
        let mut request = AssignmentRequest {
            stock_id: self.row.key.stock_id(),
            atama_turu: self.target,
            miktar: self.quantity,
            notlar: general.clone(),
            license_form: None,
            envanter_form: None,
            printer_form: None,
        };

        match self.target {
            TargetKind::License => {
                let name = field(&self.license.name)
                    .ok_or_else(|| ClientError::field(FieldId::LicenseName, "Lisans adı giriniz."))?;
                request.license_form = Some(LicenseForm {
                    lisans_adi: name,
                    lisans_anahtari: field(&self.license.key),
                    sorumlu_personel: field(&self.license.owner),
                    bagli_envanter_no: field(&self.license.linked_inventory),
                    mail_adresi: field(&self.license.mail),
                    ifs_no: field(&self.license.ifs),
                });
                request.notlar =
                    combine_notes(&[general.as_deref(), Some(self.license.note.as_str())]);
            }
            TargetKind::Inventory => {
                let inv_no = field(&self.inventory.inventory_no).ok_or_else(|| {
                    ClientError::field(FieldId::InventoryNo, "Envanter numarası giriniz.")
                })?;
                request.envanter_form = Some(InventoryForm {
                    envanter_no: inv_no,
                    bilgisayar_adi: field(&self.inventory.pc_name),
                    fabrika: field(&self.inventory.factory),
                    departman: field(&self.inventory.department),
                    sorumlu_personel: field(&self.inventory.owner),
                    kullanim_alani: field(&self.inventory.usage_area),
                    seri_no: field(&self.inventory.serial_no),
                    bagli_envanter_no: field(&self.inventory.linked_inventory),
                    notlar: field(&self.inventory.notes),
                    ifs_no: field(&self.inventory.ifs),
                    marka: field(&self.inventory.brand),
                    model: field(&self.inventory.model),
                    donanim_tipi: field(&self.inventory.hardware_type),
                });
            }
            TargetKind::Printer => {
                let printer_no = field(&self.printer.printer_no).ok_or_else(|| {
                    ClientError::field(FieldId::PrinterNo, "Yazıcı envanter numarası giriniz.")
                })?;
                let printer_note = field(&self.printer.notes);
                request.printer_form = Some(PrinterForm {
                    envanter_no: printer_no,
                    marka: field(&self.printer.brand),
                    model: field(&self.printer.model),
                    kullanim_alani: field(&self.printer.usage_area),
                    ip_adresi: field(&self.printer.ip),
                    mac: field(&self.printer.mac),
                    hostname: field(&self.printer.hostname),
                    ifs_no: field(&self.printer.ifs),
                    bagli_envanter_no: field(&self.printer.linked_inventory),
                    sorumlu_personel: field(&self.printer.owner),
                    fabrika: field(&self.printer.factory),
                    notlar: printer_note.clone(),
                });
                request.notlar = combine_notes(&[general.as_deref(), printer_note.as_deref()]);
            }
        }

        Ok(request)
    }
}

/// Default tab for a freshly selected row: explicit hint wins, then a
/// license key or license item kind, then printer kind, else inventory.
pub fn auto_target(row: &StockRow) -> TargetKind {
    let hint = row
        .assignment_hint
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    if hint == "lisans" || row.license_key.is_some() || row.key.kind() == ItemKind::License {
        return TargetKind::License;
    }
    if hint == "yazici" || row.key.kind() == ItemKind::Printer {
        return TargetKind::Printer;
    }
    TargetKind::Inventory
}
