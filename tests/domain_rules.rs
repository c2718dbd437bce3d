use storefront_api::{
    dto::{
        orders::{CartLine, CheckoutForm},
        products::UpdateProductRequest,
    },
    error::AppError,
    models::{OrderStatus, PaymentMethod, average_rating, sale_price},
    services::order_service::{cart_total, validate_checkout},
    session::{SessionStore, decode_token, issue_token},
};
use uuid::Uuid;

#[test]
fn sale_price_applies_discount_percentage() {
    assert_eq!(sale_price(100.0, 25.0), Some(75.0));
    assert_eq!(sale_price(2490.0, 15.0), Some(2116.5));
}

#[test]
fn sale_price_absent_without_discount() {
    assert_eq!(sale_price(100.0, 0.0), None);
}

#[test]
fn average_rating_is_mean_rounded_to_one_decimal() {
    assert_eq!(average_rating(&[]), 0.0);
    assert_eq!(average_rating(&[4, 5]), 4.5);
    assert_eq!(average_rating(&[1, 1, 2]), 1.3);
    assert_eq!(average_rating(&[5, 5, 5]), 5.0);
}

#[test]
fn payment_methods_round_trip_through_their_wire_names() {
    let methods = [
        (PaymentMethod::CreditCard, "credit_card"),
        (PaymentMethod::DebitCard, "debit_card"),
        (PaymentMethod::Promptpay, "promptpay"),
        (PaymentMethod::MobileBanking, "mobile_banking"),
        (PaymentMethod::BankTransfer, "bank_transfer"),
        (PaymentMethod::Cod, "cod"),
    ];
    for (method, name) in methods {
        assert_eq!(method.as_str(), name);
        assert_eq!(PaymentMethod::parse(name), Some(method));
    }
    assert_eq!(PaymentMethod::parse("barter"), None);
}

#[test]
fn orders_start_pending() {
    assert_eq!(OrderStatus::Pending.as_str(), "pending");
}

#[test]
fn product_patch_distinguishes_absent_from_null() {
    let patch: UpdateProductRequest = serde_json::from_str(r#"{"price": 99}"#).unwrap();
    assert_eq!(patch.price, Some(99.0));
    assert!(patch.name.is_none());
    assert!(patch.image_url.is_none());
    assert!(patch.category_id.is_none(), "absent field must stay absent");

    let patch: UpdateProductRequest = serde_json::from_str(r#"{"category_id": null}"#).unwrap();
    assert_eq!(patch.category_id, Some(None), "explicit null clears the category");

    let patch: UpdateProductRequest = serde_json::from_str(r#"{"category_id": 3}"#).unwrap();
    assert_eq!(patch.category_id, Some(Some(3)));
}

#[test]
fn cart_total_sums_quantity_times_price() {
    let items = vec![
        CartLine {
            id: 1,
            quantity: 2,
            price: 100.0,
        },
        CartLine {
            id: 2,
            quantity: 1,
            price: 50.0,
        },
    ];
    assert_eq!(cart_total(&items), 250.0);
}

fn checkout_form(cart_data: &str) -> CheckoutForm {
    CheckoutForm {
        customer_name: "Alice".to_string(),
        customer_email: "alice@example.com".to_string(),
        customer_phone: "0812345678".to_string(),
        customer_address: "1 Main St".to_string(),
        payment_method: "promptpay".to_string(),
        cart_data: cart_data.to_string(),
    }
}

#[test]
fn checkout_accepts_a_valid_cart() {
    let form = checkout_form(r#"[{"id":1,"quantity":2,"price":100.0},{"id":2,"quantity":1,"price":50.0}]"#);
    let order = validate_checkout(form).unwrap();
    assert_eq!(order.total_price, 250.0);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.payment_method, PaymentMethod::Promptpay);
}

#[test]
fn checkout_rejects_an_empty_cart() {
    for cart_data in ["", "[]"] {
        let err = validate_checkout(checkout_form(cart_data)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

#[test]
fn checkout_rejects_missing_customer_fields() {
    let mut form = checkout_form(r#"[{"id":1,"quantity":1,"price":10.0}]"#);
    form.customer_email = "  ".to_string();
    let err = validate_checkout(form).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn checkout_rejects_unknown_payment_methods() {
    let mut form = checkout_form(r#"[{"id":1,"quantity":1,"price":10.0}]"#);
    form.payment_method = "barter".to_string();
    let err = validate_checkout(form).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn checkout_rejects_zero_quantity_lines() {
    let form = checkout_form(r#"[{"id":1,"quantity":0,"price":10.0}]"#);
    let err = validate_checkout(form).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn checkout_rejects_malformed_cart_json() {
    let form = checkout_form("not json");
    let err = validate_checkout(form).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn session_tokens_round_trip_and_reject_foreign_secrets() {
    let sid = Uuid::new_v4();
    let token = issue_token("test-secret", "admin", sid).unwrap();

    let claims = decode_token("test-secret", &token).expect("token should decode");
    assert_eq!(claims.sub, "admin");
    assert_eq!(claims.sid, sid);

    assert!(decode_token("other-secret", &token).is_none());
    assert!(decode_token("test-secret", "garbage").is_none());
}

#[tokio::test]
async fn session_store_tracks_active_sessions() {
    let store = SessionStore::new();
    let sid = Uuid::new_v4();

    assert!(!store.contains(sid).await);
    store.insert(sid).await;
    assert!(store.contains(sid).await);
    assert!(store.remove(sid).await);
    assert!(!store.contains(sid).await);
    assert!(!store.remove(sid).await);
}
