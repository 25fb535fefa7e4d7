use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_by_slug(pool: &PgPool, slug: &str) -> Result<Option<models::Category>, String> {
    let query_span = tracing::info_span!("Fetch category by slug.");
    sqlx::query_as::<_, models::Category>(
        r#"
        SELECT id, name, description, slug
        FROM categories
        WHERE slug = $1
        LIMIT 1
        "#,
    )
    .bind(slug)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(Some)
    .or_else(|err| match err {
        sqlx::Error::RowNotFound => Ok(None),
        e => {
            tracing::error!("Failed to fetch category {}, error: {:?}", slug, e);
            Err("Could not fetch data".to_string())
        }
    })
}

pub async fn fetch_by_id(pool: &PgPool, id: i32) -> Result<Option<models::Category>, String> {
    let query_span = tracing::info_span!("Fetch category by id.");
    sqlx::query_as::<_, models::Category>(
        r#"
        SELECT id, name, description, slug
        FROM categories
        WHERE id = $1
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(Some)
    .or_else(|err| match err {
        sqlx::Error::RowNotFound => Ok(None),
        e => {
            tracing::error!("Failed to fetch category {}, error: {:?}", id, e);
            Err("Could not fetch data".to_string())
        }
    })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::Category>, String> {
    let query_span = tracing::info_span!("Fetch all categories.");
    sqlx::query_as::<_, models::Category>(
        r#"
        SELECT id, name, description, slug
        FROM categories
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch categories, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
