use std::sync::Arc;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Statement,
};
use uuid::Uuid;

use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        categories::AdminCategoryForm,
        orders::CheckoutForm,
        products::{AdminProductForm, CreateProductRequest, UpdateProductRequest},
        reviews::CreateReviewRequest,
    },
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::Entity as Orders,
        products::{Column as ProductCol, Entity as Products},
        reviews::Entity as Reviews,
    },
    error::AppError,
    services::{admin_service, auth_service, catalog_service, order_service, review_service},
    session::{AdminSession, SessionStore, decode_token},
    state::AppState,
};

// Integration flow: admin builds the catalog, customers review products and
// check out, cascades clean up. Skips when no database is configured.
#[tokio::test]
async fn catalog_checkout_and_admin_flow() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = connect_state(&database_url).await?;

    // Clean tables between runs.
    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "TRUNCATE TABLE order_items, orders, reviews, products, categories, audit_logs RESTART IDENTITY CASCADE",
        ))
        .await?;

    let session = AdminSession {
        username: "admin".to_string(),
        sid: Uuid::new_v4(),
    };

    // Admin creates a category; a duplicate name must not create a second row.
    let category = admin_service::add_category(
        &state,
        &session,
        AdminCategoryForm {
            name: "Electronics".to_string(),
            description: "Gadgets".to_string(),
        },
    )
    .await?;

    let err = admin_service::add_category(
        &state,
        &session,
        AdminCategoryForm {
            name: "Electronics".to_string(),
            description: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(catalog_service::list_categories(&state).await?.len(), 1);

    let err = admin_service::add_category(
        &state,
        &session,
        AdminCategoryForm {
            name: "  ".to_string(),
            description: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Admin form: text price is parsed, non-numeric is rejected.
    let product_id = admin_service::add_product(
        &state,
        &session,
        AdminProductForm {
            name: "Wireless Headphones".to_string(),
            price: "2490.00".to_string(),
            image_url: "https://images.example.com/headphones.jpg".to_string(),
            category_id: Some(category.id.to_string()),
            description: "Over-ear wireless headphones".to_string(),
        },
    )
    .await?;

    let err = admin_service::add_product(
        &state,
        &session,
        AdminProductForm {
            name: "Broken".to_string(),
            price: "not-a-number".to_string(),
            image_url: "https://images.example.com/broken.jpg".to_string(),
            category_id: None,
            description: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // JSON API create with a discount; the view carries the sale price.
    let discounted = admin_service::create_product(
        &state,
        CreateProductRequest {
            name: Some("Smart Watch".to_string()),
            price: Some(4000.0),
            image_url: Some("https://images.example.com/watch.jpg".to_string()),
            category_id: Some(category.id),
            description: None,
            discount: Some(25.0),
        },
    )
    .await?;
    assert_eq!(discounted.sale_price, Some(3000.0));

    let err = admin_service::create_product(&state, CreateProductRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Reviews: bounds are enforced, aggregates land on the product view.
    for rating in [0, 6] {
        let err = review_service::add_review(
            &state,
            CreateReviewRequest {
                product_id,
                customer_name: "Bob".to_string(),
                rating,
                comment: String::new(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    let err = review_service::add_review(
        &state,
        CreateReviewRequest {
            product_id: 999_999,
            customer_name: "Bob".to_string(),
            rating: 5,
            comment: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    review_service::add_review(
        &state,
        CreateReviewRequest {
            product_id,
            customer_name: "Bob".to_string(),
            rating: 4,
            comment: "Good".to_string(),
        },
    )
    .await?;
    review_service::add_review(
        &state,
        CreateReviewRequest {
            product_id,
            customer_name: "Carol".to_string(),
            rating: 5,
            comment: "Great".to_string(),
        },
    )
    .await?;

    let product = catalog_service::get_product(&state, product_id).await?;
    assert_eq!(product.rating, 4.5);
    assert_eq!(product.review_count, 2);
    assert_eq!(product.sale_price, None);
    assert_eq!(
        product.category.as_ref().map(|c| c.id),
        Some(category.id),
    );
    assert_eq!(review_service::list_reviews(&state, product_id).await?.len(), 2);

    // Category filters resolve by unique name; the sale listing only shows
    // discounted products.
    let filtered = catalog_service::products_by_category_name(&state, "Electronics")
        .await?
        .expect("known category");
    assert_eq!(filtered.len(), 2);
    assert!(
        catalog_service::products_by_category_name(&state, "Nonexistent")
            .await?
            .is_none()
    );
    let sale = catalog_service::sale_products(&state).await?;
    assert_eq!(sale.len(), 1);
    assert_eq!(sale[0].id, discounted.id);

    // Checkout: totals come from the submitted snapshots, both rows commit.
    let order_id = order_service::place_order(
        &state,
        CheckoutForm {
            customer_name: "Alice".to_string(),
            customer_email: "alice@example.com".to_string(),
            customer_phone: "0812345678".to_string(),
            customer_address: "1 Main St".to_string(),
            payment_method: "cod".to_string(),
            cart_data: format!(
                r#"[{{"id":{product_id},"quantity":2,"price":100.0}},{{"id":{},"quantity":1,"price":50.0}}]"#,
                discounted.id
            ),
        },
    )
    .await?;

    let order = order_service::get_order(&state, order_id).await?;
    assert_eq!(order.total_price, 250.0);
    assert_eq!(order.status, "pending");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].price, 100.0);
    assert_eq!(order.items[1].price, 50.0);
    assert_eq!(order.items[0].product_name, "Wireless Headphones");

    // An empty cart never creates an order row.
    let before = Orders::find().count(&state.orm).await?;
    let err = order_service::place_order(
        &state,
        CheckoutForm {
            customer_name: "Alice".to_string(),
            customer_email: "alice@example.com".to_string(),
            customer_phone: "0812345678".to_string(),
            customer_address: "1 Main St".to_string(),
            payment_method: "cod".to_string(),
            cart_data: "[]".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(Orders::find().count(&state.orm).await?, before);

    assert_eq!(order_service::list_orders(&state).await?.len(), 1);

    // Partial update touches only the provided field.
    let updated = admin_service::update_product(
        &state,
        product_id,
        UpdateProductRequest {
            price: Some(99.0),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(updated.price, 99.0);
    assert_eq!(updated.name, "Wireless Headphones");
    assert_eq!(updated.image_url, "https://images.example.com/headphones.jpg");
    assert_eq!(updated.category.as_ref().map(|c| c.id), Some(category.id));

    let err = admin_service::update_product(
        &state,
        999_999,
        UpdateProductRequest {
            price: Some(1.0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    // Deleting the category cascades to its products, their reviews and
    // their order item rows.
    admin_service::delete_category(&state, &session, category.id).await?;
    assert_eq!(
        Products::find()
            .filter(ProductCol::CategoryId.eq(category.id))
            .count(&state.orm)
            .await?,
        0
    );
    assert_eq!(Reviews::find().count(&state.orm).await?, 0);
    assert_eq!(
        OrderItems::find()
            .filter(OrderItemCol::ProductId.eq(product_id))
            .count(&state.orm)
            .await?,
        0
    );

    // Admin deletes are idempotent: a stale id is a silent no-op.
    admin_service::delete_product(&state, &session, product_id).await?;
    admin_service::delete_category(&state, &session, category.id).await?;

    // The JSON API delete stays strict.
    let err = admin_service::delete_product_api(&state, product_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}

#[tokio::test]
async fn login_registers_a_session_and_logout_revokes_it() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    // Sessions are process-local; no table cleanup needed here, so this
    // test can share the database with the flow test above.
    let state = connect_state(&database_url).await?;

    let err = auth_service::login(
        &state,
        storefront_api::dto::auth::LoginForm {
            username: "admin".to_string(),
            password: "wrong".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let resp = auth_service::login(
        &state,
        storefront_api::dto::auth::LoginForm {
            username: "admin".to_string(),
            password: "1234".to_string(),
        },
    )
    .await?;

    let claims = decode_token(&state.config.session_secret, &resp.token).expect("valid token");
    assert_eq!(claims.sub, "admin");
    assert!(state.sessions.contains(claims.sid).await);

    let session = AdminSession {
        username: claims.sub,
        sid: claims.sid,
    };
    auth_service::logout(&state, &session).await;
    assert!(
        !state.sessions.contains(claims.sid).await,
        "logout must revoke the session"
    );

    Ok(())
}

async fn connect_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".to_string(),
        port: 3000,
        admin_username: "admin".to_string(),
        admin_password: "1234".to_string(),
        session_secret: "test-secret".to_string(),
    };

    Ok(AppState {
        orm,
        config: Arc::new(config),
        sessions: SessionStore::new(),
    })
}
