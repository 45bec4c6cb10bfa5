// Point-of-sale capture rules without database dependencies

use navalha_backend::models::payment::CreatePaymentRequest;
use navalha_backend::models::DeliveryStatus;
use navalha_backend::PaymentMethod;
use uuid::Uuid;

fn request(method: &str, amount_cents: Option<i32>) -> CreatePaymentRequest {
    CreatePaymentRequest {
        barber_id: None,
        amount_cents,
        method: Some(method.to_string()),
        courtesy_reason: None,
    }
}

#[test]
fn test_every_method_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&PaymentMethod::DebitCard).unwrap(),
        "\"debit_card\""
    );
    assert_eq!(
        serde_json::to_string(&PaymentMethod::FidelityCourtesy).unwrap(),
        "\"fidelity_courtesy\""
    );
    let parsed: PaymentMethod = serde_json::from_str("\"pix\"").unwrap();
    assert_eq!(parsed, PaymentMethod::Pix);
}

#[test]
fn test_charged_methods_keep_their_amount() {
    for method in ["cash", "pix", "debit_card", "credit_card"] {
        let payment = request(method, Some(7000)).resolve(Uuid::new_v4()).unwrap();
        assert_eq!(payment.amount_cents, 7000, "{}", method);
        assert!(payment.courtesy_reason.is_none());
    }
}

#[test]
fn test_charged_methods_reject_missing_or_zero_amount() {
    assert!(request("cash", None).resolve(Uuid::new_v4()).is_err());
    assert!(request("cash", Some(0)).resolve(Uuid::new_v4()).is_err());
    assert!(request("cash", Some(-100)).resolve(Uuid::new_v4()).is_err());
}

#[test]
fn test_courtesy_settles_at_zero_with_reason() {
    let mut courtesy = request("courtesy", Some(9900));
    courtesy.courtesy_reason = Some("Loyal customer birthday".to_string());

    let payment = courtesy.resolve(Uuid::new_v4()).unwrap();
    assert_eq!(payment.amount_cents, 0);
    assert_eq!(
        payment.courtesy_reason.as_deref(),
        Some("Loyal customer birthday")
    );
}

#[test]
fn test_delivery_status_wire_format_is_lowercase() {
    assert_eq!(
        serde_json::to_string(&DeliveryStatus::Sent).unwrap(),
        "\"sent\""
    );
    let parsed: DeliveryStatus = serde_json::from_str("\"failed\"").unwrap();
    assert_eq!(parsed, DeliveryStatus::Failed);
}
