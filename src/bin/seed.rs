use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        categories::{ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories},
        products::{ActiveModel as ProductActive, Column as ProductCol, Entity as Products},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let electronics = ensure_category(&orm, "Electronics", "Gadgets and accessories").await?;
    let computers = ensure_category(&orm, "Computers", "Laptops, tablets and phones").await?;
    let cameras = ensure_category(&orm, "Cameras", "Cameras and photo gear").await?;

    let products = [
        (
            "Wireless Headphones",
            2490.0,
            "https://images.example.com/headphones.jpg",
            15.0,
            Some(electronics),
            "Over-ear wireless headphones with noise cancelling",
        ),
        (
            "Smart Watch",
            4990.0,
            "https://images.example.com/watch.jpg",
            20.0,
            Some(electronics),
            "Smart watch with health tracking",
        ),
        (
            "Tablet Pro 12.9",
            33900.0,
            "https://images.example.com/tablet.jpg",
            35.0,
            Some(computers),
            "12.9-inch tablet with a Retina display",
        ),
        (
            "Flagship Phone",
            45990.0,
            "https://images.example.com/phone.jpg",
            40.0,
            Some(computers),
            "Flagship phone with a 48MP camera",
        ),
        (
            "Mirrorless Camera R5",
            159900.0,
            "https://images.example.com/camera.jpg",
            30.0,
            Some(cameras),
            "45MP mirrorless camera with 8K video",
        ),
        (
            "Camera Bag",
            1890.0,
            "https://images.example.com/bag.jpg",
            10.0,
            Some(cameras),
            "Padded camera bag",
        ),
    ];

    for (name, price, image_url, discount, category_id, description) in products {
        ensure_product(&orm, name, price, image_url, discount, category_id, description).await?;
    }

    println!("Seed completed");
    Ok(())
}

async fn ensure_category(
    orm: &DatabaseConnection,
    name: &str,
    description: &str,
) -> anyhow::Result<i32> {
    if let Some(existing) = Categories::find()
        .filter(CategoryCol::Name.eq(name))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let category = CategoryActive {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(description.to_string()),
    }
    .insert(orm)
    .await?;

    println!("Added category: {name}");
    Ok(category.id)
}

async fn ensure_product(
    orm: &DatabaseConnection,
    name: &str,
    price: f64,
    image_url: &str,
    discount: f64,
    category_id: Option<i32>,
    description: &str,
) -> anyhow::Result<()> {
    if Products::find()
        .filter(ProductCol::Name.eq(name))
        .one(orm)
        .await?
        .is_some()
    {
        return Ok(());
    }

    ProductActive {
        id: NotSet,
        name: Set(name.to_string()),
        price: Set(price),
        image_url: Set(image_url.to_string()),
        discount: Set(discount),
        category_id: Set(category_id),
        description: Set(description.to_string()),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    println!("Added product: {name}");
    Ok(())
}
