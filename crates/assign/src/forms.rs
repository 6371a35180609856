//! Wire shapes for the three assignment targets.
//!
//! Field names match the backend contract; the Rust-side builder works in
//! English and these renames never leak past the serializer.

use serde::Serialize;

/// Which entity type the stock quantity is being bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetKind {
    #[serde(rename = "lisans")]
    License,
    #[serde(rename = "envanter")]
    Inventory,
    #[serde(rename = "yazici")]
    Printer,
}

impl TargetKind {
    pub fn wire_token(&self) -> &'static str {
        match self {
            TargetKind::License => "lisans",
            TargetKind::Inventory => "envanter",
            TargetKind::Printer => "yazici",
        }
    }
}

/// `license_form` body: only the license name is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LicenseForm {
    pub lisans_adi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lisans_anahtari: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorumlu_personel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bagli_envanter_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_adresi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifs_no: Option<String>,
}

/// `envanter_form` body: only the inventory number is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryForm {
    pub envanter_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bilgisayar_adi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabrika: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departman: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorumlu_personel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kullanim_alani: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seri_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bagli_envanter_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notlar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifs_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marka: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donanim_tipi: Option<String>,
}

/// `printer_form` body: only the printer inventory number is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrinterForm {
    pub envanter_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marka: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kullanim_alani: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_adresi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifs_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bagli_envanter_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorumlu_personel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabrika: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notlar: Option<String>,
}
