use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    dto::orders::{CartLine, CheckoutForm},
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{Order, OrderItem, OrderStatus, PaymentMethod},
    state::AppState,
};

/// A checkout payload that passed validation: customer info, a recognized
/// payment method, a non-empty cart and the total derived from it.
#[derive(Debug)]
pub struct CheckoutOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartLine>,
    pub total_price: f64,
}

/// Validate the raw checkout form. The cart arrives as a JSON string; line
/// prices are taken as submitted (see DESIGN.md on the pricing trust
/// boundary).
pub fn validate_checkout(form: CheckoutForm) -> AppResult<CheckoutOrder> {
    let CheckoutForm {
        customer_name,
        customer_email,
        customer_phone,
        customer_address,
        payment_method,
        cart_data,
    } = form;

    for (field, value) in [
        ("customer_name", &customer_name),
        ("customer_email", &customer_email),
        ("customer_phone", &customer_phone),
        ("customer_address", &customer_address),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} is required")));
        }
    }

    let payment_method = PaymentMethod::parse(&payment_method)
        .ok_or_else(|| AppError::Validation("unknown payment method".to_string()))?;

    let items: Vec<CartLine> = if cart_data.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(&cart_data)
            .map_err(|_| AppError::Validation("cart payload is not valid JSON".to_string()))?
    };

    if items.is_empty() {
        return Err(AppError::Validation("cart is empty".to_string()));
    }
    for line in &items {
        if line.quantity < 1 {
            return Err(AppError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }
    }

    let total_price = cart_total(&items);

    Ok(CheckoutOrder {
        customer_name,
        customer_email,
        customer_phone,
        customer_address,
        payment_method,
        items,
        total_price,
    })
}

pub fn cart_total(items: &[CartLine]) -> f64 {
    items
        .iter()
        .map(|line| line.price * f64::from(line.quantity))
        .sum()
}

/// Persist the order and all of its items in one transaction; either every
/// row commits or none do. Returns the new order id.
pub async fn place_order(state: &AppState, form: CheckoutForm) -> AppResult<i32> {
    let checkout = validate_checkout(form)?;

    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: NotSet,
        customer_name: Set(checkout.customer_name),
        customer_email: Set(checkout.customer_email),
        customer_phone: Set(checkout.customer_phone),
        customer_address: Set(checkout.customer_address),
        payment_method: Set(checkout.payment_method.as_str().to_string()),
        total_price: Set(checkout.total_price),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    for line in &checkout.items {
        OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            product_id: Set(line.id),
            quantity: Set(line.quantity),
            price: Set(line.price),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(order_id = order.id, total = order.total_price, "order placed");
    Ok(order.id)
}

pub async fn get_order(state: &AppState, id: i32) -> AppResult<Order> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let mut orders = order_views(state, vec![order]).await?;
    Ok(orders.remove(0))
}

/// Every order with its items, for the admin dashboard.
pub async fn list_orders(state: &AppState) -> AppResult<Vec<Order>> {
    let orders = Orders::find()
        .order_by_asc(OrderCol::Id)
        .all(&state.orm)
        .await?;
    order_views(state, orders).await
}

/// Attach items to each order, resolving product names by join. A deleted
/// product leaves an empty name on the snapshot line.
async fn order_views(state: &AppState, orders: Vec<OrderModel>) -> AppResult<Vec<Order>> {
    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();

    let mut items_by_order: HashMap<i32, Vec<OrderItemModel>> = HashMap::new();
    if !order_ids.is_empty() {
        let items = OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(order_ids))
            .order_by_asc(OrderItemCol::Id)
            .all(&state.orm)
            .await?;
        for item in items {
            items_by_order.entry(item.order_id).or_default().push(item);
        }
    }

    let product_ids: Vec<i32> = items_by_order
        .values()
        .flatten()
        .map(|item| item.product_id)
        .collect();
    let mut product_names: HashMap<i32, String> = HashMap::new();
    if !product_ids.is_empty() {
        let products = Products::find()
            .filter(ProductCol::Id.is_in(product_ids))
            .all(&state.orm)
            .await?;
        for product in products {
            product_names.insert(product.id, product.name);
        }
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = items_by_order
                .remove(&order.id)
                .unwrap_or_default()
                .into_iter()
                .map(|item| OrderItem {
                    id: item.id,
                    product_id: item.product_id,
                    product_name: product_names
                        .get(&item.product_id)
                        .cloned()
                        .unwrap_or_default(),
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect();
            order_view(order, items)
        })
        .collect())
}

fn order_view(model: OrderModel, items: Vec<OrderItem>) -> Order {
    Order {
        id: model.id,
        customer_name: model.customer_name,
        customer_email: model.customer_email,
        customer_phone: model.customer_phone,
        customer_address: model.customer_address,
        payment_method: model.payment_method,
        total_price: model.total_price,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        items,
    }
}
