use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Catalog view of a product: the stored row plus the derived sale price,
/// review aggregates and the owning category.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub discount: f64,
    /// Present only while a discount is active.
    pub sale_price: Option<f64>,
    pub category: Option<Category>,
    pub description: String,
    pub rating: f64,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Review {
    pub id: i32,
    pub product_id: i32,
    pub customer_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub payment_method: String,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderItem {
    pub id: i32,
    pub product_id: i32,
    /// Resolved by join; empty when the product row no longer exists.
    pub product_name: String,
    pub quantity: i32,
    /// Unit price snapshot taken at purchase time, never the live price.
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Promptpay,
    MobileBanking,
    BankTransfer,
    Cod,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Promptpay => "promptpay",
            PaymentMethod::MobileBanking => "mobile_banking",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cod => "cod",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "credit_card" => Some(PaymentMethod::CreditCard),
            "debit_card" => Some(PaymentMethod::DebitCard),
            "promptpay" => Some(PaymentMethod::Promptpay),
            "mobile_banking" => Some(PaymentMethod::MobileBanking),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "cod" => Some(PaymentMethod::Cod),
            _ => None,
        }
    }
}

/// Order lifecycle. Orders are created as `Pending`; the later states are
/// modeled but no operation moves an order into them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Price after the discount percentage, only while a discount is active.
pub fn sale_price(price: f64, discount: f64) -> Option<f64> {
    (discount > 0.0).then(|| price * (1.0 - discount / 100.0))
}

/// Mean review rating rounded to one decimal, 0 when there are no reviews.
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let mean = ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64;
    (mean * 10.0).round() / 10.0
}
