use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One line of the client-side cart, submitted at checkout. `price` is the
/// client-quoted unit price and is stored as the purchase snapshot without
/// re-pricing against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    /// Product id.
    pub id: i32,
    pub quantity: i32,
    pub price: f64,
}

/// Checkout form. `cart_data` carries the cart payload as a JSON string,
/// the way the client-side cart serializes it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CheckoutForm {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_address: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub cart_data: String,
}
