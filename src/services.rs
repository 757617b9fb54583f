use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parking permit fee per year, in cents
pub const PERMIT_FEE_PER_YEAR_CENTS: u64 = 12_000;

/// Council services a resident can act on from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    WasteCollection,
    ParkingPermit,
    RatesPayment,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::WasteCollection,
        ServiceKind::ParkingPermit,
        ServiceKind::RatesPayment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::WasteCollection => "Waste Collection",
            ServiceKind::ParkingPermit => "Parking Permit",
            ServiceKind::RatesPayment => "Rates Payment",
        }
    }

    /// Button text shown next to the service
    pub fn action(&self) -> &'static str {
        match self {
            ServiceKind::WasteCollection => "Request",
            ServiceKind::ParkingPermit => "Apply",
            ServiceKind::RatesPayment => "Pay",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermitTerm {
    OneYear,
    TwoYears,
}

impl PermitTerm {
    pub fn years(&self) -> u64 {
        match self {
            PermitTerm::OneYear => 1,
            PermitTerm::TwoYears => 2,
        }
    }

    pub fn from_years(years: u64) -> Result<Self> {
        match years {
            1 => Ok(PermitTerm::OneYear),
            2 => Ok(PermitTerm::TwoYears),
            other => Err(Error::Validation(format!(
                "Permit term must be 1 or 2 years, got {}",
                other
            ))),
        }
    }

    pub fn fee_cents(&self) -> u64 {
        PERMIT_FEE_PER_YEAR_CENTS * self.years()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatesStatus {
    Paid,
    Outstanding { amount_cents: u64 },
}

/// A service request with the state its form collects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceRequest {
    WasteCollection { pickup_date: NaiveDate },
    ParkingPermit { term: PermitTerm },
    RatesPayment { status: RatesStatus },
}

/// Confirmation shown after submitting a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceReceipt {
    pub kind: ServiceKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_cents: Option<u64>,
}

impl ServiceRequest {
    /// Waste pickup from a `YYYY-MM-DD` date field
    pub fn waste_collection(date: &str) -> Result<Self> {
        let date = date.trim();
        if date.is_empty() {
            return Err(Error::Validation("Pickup date is required".to_string()));
        }
        let pickup_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| Error::Validation(format!("Invalid pickup date '{}': {}", date, e)))?;
        Ok(ServiceRequest::WasteCollection { pickup_date })
    }

    pub fn kind(&self) -> ServiceKind {
        match self {
            ServiceRequest::WasteCollection { .. } => ServiceKind::WasteCollection,
            ServiceRequest::ParkingPermit { .. } => ServiceKind::ParkingPermit,
            ServiceRequest::RatesPayment { .. } => ServiceKind::RatesPayment,
        }
    }

    pub fn submit(&self) -> ServiceReceipt {
        let (message, charge_cents) = match self {
            ServiceRequest::WasteCollection { pickup_date } => (
                format!("Waste collection requested for {}", pickup_date.format("%Y-%m-%d")),
                None,
            ),
            ServiceRequest::ParkingPermit { term } => (
                "Parking permit applied. Charges are applied against your card.".to_string(),
                Some(term.fee_cents()),
            ),
            ServiceRequest::RatesPayment {
                status: RatesStatus::Paid,
            } => ("Rates already paid".to_string(), None),
            ServiceRequest::RatesPayment {
                status: RatesStatus::Outstanding { amount_cents },
            } => (
                "Rates paid. Charges are applied to your card.".to_string(),
                Some(*amount_cents),
            ),
        };

        ServiceReceipt {
            kind: self.kind(),
            message,
            charge_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for kind in ServiceKind::ALL {
            assert_eq!(ServiceKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(ServiceKind::from_label("parking permit"), Some(ServiceKind::ParkingPermit));
        assert_eq!(ServiceKind::from_label("Dog Registration"), None);
    }

    #[test]
    fn test_permit_fee_scales_with_term() {
        let receipt = ServiceRequest::ParkingPermit {
            term: PermitTerm::from_years(2).unwrap(),
        }
        .submit();
        assert_eq!(receipt.kind, ServiceKind::ParkingPermit);
        assert_eq!(receipt.charge_cents, Some(24_000));
        assert!(PermitTerm::from_years(3).is_err());
    }

    #[test]
    fn test_waste_collection_requires_date() {
        assert!(matches!(
            ServiceRequest::waste_collection(""),
            Err(Error::Validation(_))
        ));
        assert!(ServiceRequest::waste_collection("2024-13-01").is_err());

        let receipt = ServiceRequest::waste_collection("2024-03-05").unwrap().submit();
        assert_eq!(receipt.message, "Waste collection requested for 2024-03-05");
        assert_eq!(receipt.charge_cents, None);
    }

    #[test]
    fn test_rates_payment_only_charges_outstanding() {
        let paid = ServiceRequest::RatesPayment {
            status: RatesStatus::Paid,
        }
        .submit();
        assert_eq!(paid.charge_cents, None);

        let owing = ServiceRequest::RatesPayment {
            status: RatesStatus::Outstanding { amount_cents: 123_456 },
        }
        .submit();
        assert_eq!(owing.charge_cents, Some(123_456));
    }
}
