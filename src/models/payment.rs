// Point-of-sale payment captures. Processing itself happens at the external
// billing provider; this table only records how a service was settled.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::payments;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Payment {
    pub id: Uuid,
    pub company_id: Uuid,
    pub barber_id: Option<Uuid>,
    pub amount_cents: i32,
    pub method: String,
    pub courtesy_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub struct NewPayment {
    pub company_id: Uuid,
    pub barber_id: Option<Uuid>,
    pub amount_cents: i32,
    pub method: String,
    pub courtesy_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub barber_id: Option<Uuid>,
    pub amount_cents: Option<i32>,
    pub method: Option<String>,
    pub courtesy_reason: Option<String>,
}

impl CreatePaymentRequest {
    /// Resolve the capture into a storable row. Courtesy variants settle at
    /// zero (plain courtesy needs a reason); every other method needs a
    /// positive amount.
    pub fn resolve(&self, company_id: Uuid) -> Result<NewPayment, String> {
        let method = self
            .method
            .as_deref()
            .and_then(PaymentMethod::from_string)
            .ok_or_else(|| "Unknown payment method".to_string())?;

        let (amount_cents, courtesy_reason) = if method.is_courtesy() {
            let reason = self
                .courtesy_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from);

            if method == PaymentMethod::Courtesy && reason.is_none() {
                return Err("Courtesy requires a reason".to_string());
            }
            (0, reason)
        } else {
            let amount = self.amount_cents.unwrap_or(0);
            if amount <= 0 {
                return Err("Amount must be positive".to_string());
            }
            (amount, None)
        };

        Ok(NewPayment {
            company_id,
            barber_id: self.barber_id,
            amount_cents,
            method: method.as_str().to_string(),
            courtesy_reason,
        })
    }
}

/// Closed set of settlement methods. No dynamic dispatch: the display mapping
/// is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Pix,
    DebitCard,
    CreditCard,
    Courtesy,
    FidelityCourtesy,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Pix => "pix",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Courtesy => "courtesy",
            PaymentMethod::FidelityCourtesy => "fidelity_courtesy",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "pix" => Some(PaymentMethod::Pix),
            "debit_card" => Some(PaymentMethod::DebitCard),
            "credit_card" => Some(PaymentMethod::CreditCard),
            "courtesy" => Some(PaymentMethod::Courtesy),
            "fidelity_courtesy" => Some(PaymentMethod::FidelityCourtesy),
            _ => None,
        }
    }

    /// Customer-facing label (pt-BR, matching the storefront UI)
    pub fn display_label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::DebitCard => "Débito",
            PaymentMethod::CreditCard => "Crédito",
            PaymentMethod::Courtesy => "Cortesia",
            PaymentMethod::FidelityCourtesy => "Cortesia de Fidelidade",
        }
    }

    /// Courtesy variants settle at zero and never charge the customer
    pub fn is_courtesy(&self) -> bool {
        matches!(self, PaymentMethod::Courtesy | PaymentMethod::FidelityCourtesy)
    }
}

impl Payment {
    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_payment: NewPayment,
    ) -> Result<Self, diesel::result::Error> {
        diesel::insert_into(payments::table)
            .values(&new_payment)
            .get_result::<Self>(conn)
            .await
    }

    pub async fn list_for_company(
        conn: &mut AsyncPgConnection,
        company_id: Uuid,
    ) -> Result<Vec<Self>, diesel::result::Error> {
        use crate::schema::payments::dsl;

        dsl::payments
            .filter(dsl::company_id.eq(company_id))
            .order(dsl::created_at.desc())
            .load::<Self>(conn)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_round_trip() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Pix,
            PaymentMethod::DebitCard,
            PaymentMethod::CreditCard,
            PaymentMethod::Courtesy,
            PaymentMethod::FidelityCourtesy,
        ] {
            assert_eq!(PaymentMethod::from_string(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::from_string("check"), None);
    }

    #[test]
    fn test_courtesy_detection() {
        assert!(PaymentMethod::Courtesy.is_courtesy());
        assert!(PaymentMethod::FidelityCourtesy.is_courtesy());
        assert!(!PaymentMethod::Pix.is_courtesy());
        assert!(!PaymentMethod::Cash.is_courtesy());
    }

    #[test]
    fn test_resolve_courtesy_forces_zero_amount() {
        let company_id = Uuid::new_v4();
        let request = CreatePaymentRequest {
            barber_id: None,
            amount_cents: Some(4500),
            method: Some("courtesy".to_string()),
            courtesy_reason: Some("Owner's friend".to_string()),
        };

        let payment = request.resolve(company_id).unwrap();
        assert_eq!(payment.amount_cents, 0);
        assert_eq!(payment.method, "courtesy");
        assert_eq!(payment.courtesy_reason.as_deref(), Some("Owner's friend"));
    }

    #[test]
    fn test_resolve_courtesy_without_reason_is_rejected() {
        let request = CreatePaymentRequest {
            barber_id: None,
            amount_cents: None,
            method: Some("courtesy".to_string()),
            courtesy_reason: Some("   ".to_string()),
        };
        assert!(request.resolve(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_resolve_fidelity_courtesy_needs_no_reason() {
        let request = CreatePaymentRequest {
            barber_id: None,
            amount_cents: None,
            method: Some("fidelity_courtesy".to_string()),
            courtesy_reason: None,
        };

        let payment = request.resolve(Uuid::new_v4()).unwrap();
        assert_eq!(payment.amount_cents, 0);
        assert!(payment.courtesy_reason.is_none());
    }

    #[test]
    fn test_resolve_charged_method_needs_positive_amount() {
        let zero = CreatePaymentRequest {
            barber_id: None,
            amount_cents: Some(0),
            method: Some("pix".to_string()),
            courtesy_reason: None,
        };
        assert!(zero.resolve(Uuid::new_v4()).is_err());

        let valid = CreatePaymentRequest {
            barber_id: Some(Uuid::new_v4()),
            amount_cents: Some(3500),
            method: Some("pix".to_string()),
            courtesy_reason: None,
        };
        let payment = valid.resolve(Uuid::new_v4()).unwrap();
        assert_eq!(payment.amount_cents, 3500);
    }

    #[test]
    fn test_resolve_unknown_method_is_rejected() {
        let request = CreatePaymentRequest {
            barber_id: None,
            amount_cents: Some(1000),
            method: Some("check".to_string()),
            courtesy_reason: None,
        };
        assert!(request.resolve(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_display_labels_are_exhaustive() {
        assert_eq!(PaymentMethod::Cash.display_label(), "Dinheiro");
        assert_eq!(PaymentMethod::Pix.display_label(), "PIX");
        assert_eq!(
            PaymentMethod::FidelityCourtesy.display_label(),
            "Cortesia de Fidelidade"
        );
    }
}
