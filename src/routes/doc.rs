use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginForm, LoginResponse},
        categories::AdminCategoryForm,
        orders::{CartLine, CheckoutForm},
        products::{AdminProductForm, CreateProductRequest, UpdateProductRequest},
        reviews::CreateReviewRequest,
    },
    error::ErrorBody,
    models::{Category, Order, OrderItem, OrderStatus, PaymentMethod, Product, Review},
    routes::{admin, auth, categories, health, products, reviews, storefront},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        storefront::index,
        storefront::category,
        storefront::product_detail,
        storefront::cart,
        storefront::checkout_page,
        storefront::checkout,
        storefront::checkout_success,
        storefront::sale,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        categories::list_categories,
        reviews::add_review,
        reviews::list_reviews,
        auth::login_page,
        auth::login,
        auth::logout,
        admin::dashboard,
        admin::categories_page,
        admin::add_category,
        admin::delete_category,
        admin::add_product_page,
        admin::add_product,
        admin::delete_product,
    ),
    components(
        schemas(
            Category,
            Product,
            Review,
            Order,
            OrderItem,
            PaymentMethod,
            OrderStatus,
            ErrorBody,
            CartLine,
            CheckoutForm,
            CreateProductRequest,
            UpdateProductRequest,
            AdminProductForm,
            AdminCategoryForm,
            CreateReviewRequest,
            LoginForm,
            LoginResponse,
            health::HealthData,
            storefront::CatalogPage,
            storefront::ProductPage,
            storefront::SalePage,
            storefront::CheckoutPage,
            products::ProductMutationResponse,
            products::MessageResponse,
            reviews::ReviewMutationResponse,
            admin::DashboardPage,
            admin::CategoriesPage,
            admin::AddProductPage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Storefront", description = "Public catalog and checkout pages"),
        (name = "Products", description = "Product JSON API"),
        (name = "Categories", description = "Category JSON API"),
        (name = "Reviews", description = "Review JSON API"),
        (name = "Auth", description = "Admin login and logout"),
        (name = "Admin", description = "Session-gated back office"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
