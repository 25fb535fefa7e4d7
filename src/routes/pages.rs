use crate::db;
use crate::db::product::Filter;
use actix_web::http::header::ContentType;
use actix_web::{error, get, web, Error, HttpResponse, Responder, Result};
use sqlx::PgPool;

// Server-rendered pages. All logic lives in the db layer; these handlers
// only resolve the filter key, run the query and hand the rows to tera.

#[tracing::instrument(name = "Home page.", skip(tmpl, pg_pool))]
#[get("/")]
pub async fn index(tmpl: web::Data<tera::Tera>, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    let products = db::product::fetch_with_relations(pg_pool.get_ref(), Filter::All)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let mut context = tera::Context::new();
    context.insert("products", &products);
    render(tmpl.get_ref(), "index.html", &context)
}

#[tracing::instrument(name = "Categories page.", skip(tmpl, pg_pool))]
#[get("/categories")]
pub async fn categories_index(
    tmpl: web::Data<tera::Tera>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let categories = db::category::fetch_all(pg_pool.get_ref())
        .await
        .map_err(error::ErrorInternalServerError)?;

    let mut context = tera::Context::new();
    context.insert("categories", &categories);
    render(tmpl.get_ref(), "categories.html", &context)
}

#[tracing::instrument(name = "Category page.", skip(tmpl, pg_pool))]
#[get("/categories/{slug}")]
pub async fn category(
    path: web::Path<(String,)>,
    tmpl: web::Data<tera::Tera>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let slug = path.into_inner().0;
    let category = db::category::fetch_by_slug(pg_pool.get_ref(), &slug)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("category not found"))?;

    let products = db::product::fetch_with_relations(pg_pool.get_ref(), Filter::CategorySlug(&slug))
        .await
        .map_err(error::ErrorInternalServerError)?;

    let mut context = tera::Context::new();
    context.insert("category", &category);
    context.insert("products", &products);
    render(tmpl.get_ref(), "category.html", &context)
}

#[tracing::instrument(name = "Tag page.", skip(tmpl, pg_pool))]
#[get("/tags/{slug}")]
pub async fn tag(
    path: web::Path<(String,)>,
    tmpl: web::Data<tera::Tera>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let slug = path.into_inner().0;
    let tag = db::tag::fetch_by_slug(pg_pool.get_ref(), &slug)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("tag not found"))?;

    let products = db::product::fetch_with_relations(pg_pool.get_ref(), Filter::TagSlug(&slug))
        .await
        .map_err(error::ErrorInternalServerError)?;

    let mut context = tera::Context::new();
    context.insert("tag", &tag);
    context.insert("products", &products);
    render(tmpl.get_ref(), "tag.html", &context)
}

// registered inside the /products scope
#[tracing::instrument(name = "Product page.", skip(tmpl, pg_pool))]
#[get("/{slug}")]
pub async fn product_detail(
    path: web::Path<(String,)>,
    tmpl: web::Data<tera::Tera>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let slug = path.into_inner().0;
    let product = db::product::fetch_one_by_slug(pg_pool.get_ref(), &slug)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("product not found"))?;

    let mut context = tera::Context::new();
    context.insert("status_label", product.product.status.label());
    context.insert("product", &product);
    render(tmpl.get_ref(), "product.html", &context)
}

#[tracing::instrument(name = "Submit product page.", skip(tmpl, pg_pool))]
#[get("/submit-product")]
pub async fn submit_product(
    tmpl: web::Data<tera::Tera>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let categories = db::category::fetch_all(pg_pool.get_ref())
        .await
        .map_err(error::ErrorInternalServerError)?;
    let tags = db::tag::fetch_all(pg_pool.get_ref())
        .await
        .map_err(error::ErrorInternalServerError)?;

    let mut context = tera::Context::new();
    context.insert("categories", &categories);
    context.insert("tags", &tags);
    render(tmpl.get_ref(), "submit_product.html", &context)
}

fn render(tmpl: &tera::Tera, name: &str, context: &tera::Context) -> Result<HttpResponse, Error> {
    tmpl.render(name, context)
        .map(|body| {
            HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(body)
        })
        .map_err(|err| {
            tracing::error!("Failed to render template {}, error: {:?}", name, err);
            error::ErrorInternalServerError("template error")
        })
}
