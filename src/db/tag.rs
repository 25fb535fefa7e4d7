use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_by_slug(pool: &PgPool, slug: &str) -> Result<Option<models::Tag>, String> {
    let query_span = tracing::info_span!("Fetch tag by slug.");
    sqlx::query_as::<_, models::Tag>(
        r#"
        SELECT id, name, slug
        FROM tags
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
            tracing::error!("Failed to fetch tag {}, error: {:?}", slug, e);
            Err("Could not fetch data".to_string())
        }
    })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::Tag>, String> {
    let query_span = tracing::info_span!("Fetch all tags.");
    sqlx::query_as::<_, models::Tag>(
        r#"
        SELECT id, name, slug
        FROM tags
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch tags, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
