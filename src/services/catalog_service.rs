use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity::{
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        products::{Column as ProductCol, Entity as Products, Model as ProductModel},
        reviews::{Column as ReviewCol, Entity as Reviews},
    },
    error::{AppError, AppResult},
    models::{self, Category, Product},
    state::AppState,
};

pub async fn list_products(state: &AppState, category_id: Option<i32>) -> AppResult<Vec<Product>> {
    let mut finder = Products::find().order_by_asc(ProductCol::Id);
    if let Some(category_id) = category_id {
        finder = finder.filter(ProductCol::CategoryId.eq(category_id));
    }
    let rows = finder.all(&state.orm).await?;
    enrich_products(state, rows).await
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<Product> {
    let row = Products::find_by_id(id).one(&state.orm).await?;
    let row = match row {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    let mut products = enrich_products(state, vec![row]).await?;
    Ok(products.remove(0))
}

pub async fn list_categories(state: &AppState) -> AppResult<Vec<Category>> {
    let rows = Categories::find()
        .order_by_asc(CategoryCol::Id)
        .all(&state.orm)
        .await?;
    Ok(rows.into_iter().map(category_from_entity).collect())
}

/// Category names are unique, so a name resolves to at most one category.
pub async fn find_category_by_name(
    state: &AppState,
    name: &str,
) -> AppResult<Option<CategoryModel>> {
    Ok(Categories::find()
        .filter(CategoryCol::Name.eq(name))
        .one(&state.orm)
        .await?)
}

/// Products of the named category, or None when the name does not resolve
/// (the route falls back to the default listing, never a hard error).
pub async fn products_by_category_name(
    state: &AppState,
    name: &str,
) -> AppResult<Option<Vec<Product>>> {
    let category = match find_category_by_name(state, name).await? {
        Some(c) => c,
        None => return Ok(None),
    };
    Ok(Some(list_products(state, Some(category.id)).await?))
}

pub async fn sale_products(state: &AppState) -> AppResult<Vec<Product>> {
    let rows = Products::find()
        .filter(ProductCol::Discount.gt(0.0))
        .order_by_asc(ProductCol::Id)
        .all(&state.orm)
        .await?;
    enrich_products(state, rows).await
}

/// Attach review aggregates and the owning category to each product row.
async fn enrich_products(state: &AppState, rows: Vec<ProductModel>) -> AppResult<Vec<Product>> {
    let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();

    let mut ratings: HashMap<i32, Vec<i32>> = HashMap::new();
    if !ids.is_empty() {
        let reviews = Reviews::find()
            .filter(ReviewCol::ProductId.is_in(ids))
            .all(&state.orm)
            .await?;
        for review in reviews {
            ratings.entry(review.product_id).or_default().push(review.rating);
        }
    }

    let categories: HashMap<i32, CategoryModel> = Categories::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| {
            let stars = ratings.get(&row.id).map(Vec::as_slice).unwrap_or(&[]);
            let category = row
                .category_id
                .and_then(|id| categories.get(&id))
                .cloned()
                .map(category_from_entity);
            product_view(row, category, stars)
        })
        .collect())
}

pub(crate) fn product_view(
    model: ProductModel,
    category: Option<Category>,
    stars: &[i32],
) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        image_url: model.image_url,
        discount: model.discount,
        sale_price: models::sale_price(model.price, model.discount),
        category,
        description: model.description,
        rating: models::average_rating(stars),
        review_count: stars.len() as i64,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub(crate) fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}
