//! Stock movement payloads: intake ("girdi") and scrap ("hurda").
//!
//! Both go through `POST /stock/add`; only the `islem` discriminator and the
//! validation rules differ. Scrap has no upper quantity clamp; the ledger
//! is the authority and rejects overdraws server-side.

use serde::Serialize;

use stocktrack_core::{ClientError, ClientResult, FieldId};

use crate::key::{clean, StockKey};

/// Ledger operation discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockOperation {
    /// Stock-in.
    #[serde(rename = "girdi")]
    In,
    /// Permanent removal without assignment.
    #[serde(rename = "hurda")]
    Scrap,
}

/// Wire body for `POST /stock/add`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockMovement {
    pub donanim_tipi: String,
    pub marka: Option<String>,
    pub model: Option<String>,
    pub ifs_no: Option<String>,
    pub miktar: u32,
    pub islem: StockOperation,
    pub islem_yapan: String,
}

impl StockMovement {
    /// Hardware intake: requires a hardware type and a positive quantity.
    pub fn intake_hardware(
        hardware_type: &str,
        brand: Option<&str>,
        model: Option<&str>,
        external_ref: Option<&str>,
        quantity: u32,
        actor: &str,
    ) -> ClientResult<Self> {
        let hardware = clean(Some(hardware_type)).ok_or_else(|| {
            ClientError::field(FieldId::HardwareType, "Donanım tipi seçiniz.")
        })?;
        if quantity == 0 {
            return Err(ClientError::field(
                FieldId::Quantity,
                "Miktar 0'dan büyük olmalı",
            ));
        }
        Ok(Self {
            donanim_tipi: hardware,
            marka: clean(brand),
            model: clean(model),
            ifs_no: clean(external_ref),
            miktar: quantity,
            islem: StockOperation::In,
            islem_yapan: actor.to_string(),
        })
    }

    /// License intake: the license name is stored in the hardware-type slot
    /// and the quantity is always one.
    pub fn intake_license(
        license_name: &str,
        external_ref: Option<&str>,
        actor: &str,
    ) -> ClientResult<Self> {
        let name = clean(Some(license_name))
            .ok_or_else(|| ClientError::field(FieldId::LicenseName, "Lisans adı giriniz."))?;
        Ok(Self {
            donanim_tipi: name,
            marka: None,
            model: None,
            ifs_no: clean(external_ref),
            miktar: 1,
            islem: StockOperation::In,
            islem_yapan: actor.to_string(),
        })
    }

    /// Scrap `quantity` units of the given stock line. Validated `> 0`; the
    /// caller is responsible for user confirmation.
    pub fn scrap(key: &StockKey, quantity: u32, actor: &str) -> ClientResult<Self> {
        if quantity == 0 {
            return Err(ClientError::field(FieldId::Quantity, "Geçersiz miktar"));
        }
        Ok(Self {
            donanim_tipi: key.donanim_tipi.clone(),
            marka: key.marka.clone(),
            model: key.model.clone(),
            ifs_no: key.ifs_no.clone(),
            miktar: quantity,
            islem: StockOperation::Scrap,
            islem_yapan: actor.to_string(),
        })
    }

    pub fn is_scrap(&self) -> bool {
        self.islem == StockOperation::Scrap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardware_intake_requires_type_and_quantity() {
        let err = StockMovement::intake_hardware("  ", None, None, None, 2, "tester").unwrap_err();
        assert!(err.is_validation());

        let err = StockMovement::intake_hardware("Laptop", None, None, None, 0, "tester")
            .unwrap_err();
        assert!(err.is_validation());

        let ok = StockMovement::intake_hardware("Laptop", Some("Dell"), None, None, 2, "tester")
            .unwrap();
        assert_eq!(ok.islem, StockOperation::In);
        assert_eq!(ok.miktar, 2);
    }

    #[test]
    fn license_intake_forces_quantity_one() {
        let movement = StockMovement::intake_license("Office 365", Some("IFS-7"), "tester")
            .unwrap();
        assert_eq!(movement.miktar, 1);
        assert_eq!(movement.donanim_tipi, "Office 365");
        assert_eq!(movement.ifs_no.as_deref(), Some("IFS-7"));
    }

    #[test]
    fn scrap_rejects_zero_quantity() {
        let key = StockKey::normalize(None, None, Some("Laptop"), None, None, None);
        assert!(StockMovement::scrap(&key, 0, "tester").is_err());
        let movement = StockMovement::scrap(&key, 2, "tester").unwrap();
        assert!(movement.is_scrap());
    }
}
