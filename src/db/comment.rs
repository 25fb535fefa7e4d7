use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn insert(
    pool: &PgPool,
    text: &str,
    product_id: i32,
    author_id: &str,
) -> Result<models::Comment, String> {
    let query_span = tracing::info_span!("Saving new comment into the database");
    sqlx::query_as::<_, models::Comment>(
        r#"
        INSERT INTO comments (text, product_id, author_id, created_at)
        VALUES ($1, $2, $3, NOW() at time zone 'utc')
        RETURNING id, text, product_id, author_id, created_at
        "#,
    )
    .bind(text)
    .bind(product_id)
    .bind(author_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|e| {
        tracing::error!("Failed to insert comment, error: {:?}", e);
        "Failed to insert".to_string()
    })
}
