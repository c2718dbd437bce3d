use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set,
};

use crate::{
    audit::log_audit,
    dto::{
        categories::AdminCategoryForm,
        products::{AdminProductForm, CreateProductRequest, UpdateProductRequest},
    },
    entity::{
        categories::{ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories},
        products::{ActiveModel as ProductActive, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{Category, Product},
    services::catalog_service,
    session::AdminSession,
    state::AppState,
};

/// Create a product from the JSON API. Not session-gated; the audit row
/// records no actor.
pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    let name = payload.name.unwrap_or_default();
    let image_url = payload.image_url.unwrap_or_default();
    if name.trim().is_empty() || payload.price.is_none() || image_url.trim().is_empty() {
        return Err(AppError::Validation(
            "name, price and image_url are required".to_string(),
        ));
    }
    let price = payload.price.unwrap_or_default();
    let discount = payload.discount.unwrap_or(0.0);
    validate_pricing(price, discount)?;

    let product = ProductActive {
        id: NotSet,
        name: Set(name),
        price: Set(price),
        image_url: Set(image_url),
        discount: Set(discount),
        category_id: Set(payload.category_id),
        description: Set(payload.description.unwrap_or_default()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit(state, None, "product_create", "products", product.id).await;

    catalog_service::get_product(state, product.id).await
}

/// Create a product from the admin form, where every field arrives as text.
pub async fn add_product(
    state: &AppState,
    session: &AdminSession,
    form: AdminProductForm,
) -> AppResult<i32> {
    if form.name.trim().is_empty()
        || form.price.trim().is_empty()
        || form.image_url.trim().is_empty()
    {
        return Err(AppError::Validation(
            "name, price and image_url are required".to_string(),
        ));
    }

    let price: f64 = form
        .price
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("price must be a number".to_string()))?;
    validate_pricing(price, 0.0)?;

    let category_id = match form.category_id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<i32>()
                .map_err(|_| AppError::Validation("invalid category id".to_string()))?,
        ),
    };

    let product = ProductActive {
        id: NotSet,
        name: Set(form.name),
        price: Set(price),
        image_url: Set(form.image_url),
        discount: Set(0.0),
        category_id: Set(category_id),
        description: Set(form.description),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit(state, Some(session), "product_create", "products", product.id).await;

    Ok(product.id)
}

/// Apply only the fields present in the patch; absent fields stay untouched.
pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<Product> {
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let price = payload.price.unwrap_or(existing.price);
    let discount = payload.discount.unwrap_or(existing.discount);
    validate_pricing(price, discount)?;

    let mut active: ProductActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(discount) = payload.discount {
        active.discount = Set(discount);
    }

    let product = active.update(&state.orm).await?;

    audit(state, None, "product_update", "products", product.id).await;

    catalog_service::get_product(state, product.id).await
}

/// JSON API delete: missing ids are an error on this surface.
pub async fn delete_product_api(state: &AppState, id: i32) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit(state, None, "product_delete", "products", id).await;
    Ok(())
}

/// Admin delete: a stale id is a silent no-op so back-office links stay
/// harmless. Reviews and order item rows cascade with the product.
pub async fn delete_product(state: &AppState, session: &AdminSession, id: i32) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected > 0 {
        audit(state, Some(session), "product_delete", "products", id).await;
    }
    Ok(())
}

pub async fn add_category(
    state: &AppState,
    session: &AdminSession,
    form: AdminCategoryForm,
) -> AppResult<Category> {
    if form.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    // Case-sensitive exact match, same as the unique constraint.
    let existing = Categories::find()
        .filter(CategoryCol::Name.eq(form.name.as_str()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("category already exists".to_string()));
    }

    let category = CategoryActive {
        id: NotSet,
        name: Set(form.name),
        description: Set(form.description),
    }
    .insert(&state.orm)
    .await?;

    audit(state, Some(session), "category_create", "categories", category.id).await;

    Ok(catalog_service::category_from_entity(category))
}

/// Admin delete: silent no-op on a stale id; owned products (and their
/// reviews and order item rows) cascade with the category.
pub async fn delete_category(state: &AppState, session: &AdminSession, id: i32) -> AppResult<()> {
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected > 0 {
        audit(state, Some(session), "category_delete", "categories", id).await;
    }
    Ok(())
}

fn validate_pricing(price: f64, discount: f64) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation("price must not be negative".to_string()));
    }
    if !discount.is_finite() || !(0.0..=100.0).contains(&discount) {
        return Err(AppError::Validation(
            "discount must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

async fn audit(
    state: &AppState,
    session: Option<&AdminSession>,
    action: &str,
    resource: &str,
    id: i32,
) {
    let actor = session.map(|s| s.username.as_str());
    let metadata = serde_json::json!({ "id": id });
    if let Err(err) = log_audit(state, actor, action, Some(resource), Some(metadata)).await {
        tracing::warn!(error = %err, "audit log failed");
    }
}
