use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: &str) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by id.");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT id, email, name, created_at
        FROM users
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
            tracing::error!("Failed to fetch user {}, error: {:?}", id, e);
            Err("Could not fetch data".to_string())
        }
    })
}

/// Mirrors a `user.created` event: user row plus its profile row, one
/// transaction.
pub async fn insert_with_profile(
    pool: &PgPool,
    id: &str,
    email: &str,
    name: &str,
    profile_image: Option<&str>,
) -> Result<(), String> {
    let query_span = tracing::info_span!("Saving new user into the database");

    async {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, created_at)
            VALUES ($1, $2, $3, NOW() at time zone 'utc')
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(name)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, profile_image)
            VALUES ($1, $2)
            "#,
        )
        .bind(id)
        .bind(profile_image)
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }
    .instrument(query_span)
    .await
    .map_err(|e: sqlx::Error| {
        tracing::error!("Failed to insert user {}, error: {:?}", id, e);
        "Failed to insert".to_string()
    })
}

pub async fn update_with_profile(
    pool: &PgPool,
    id: &str,
    email: &str,
    name: &str,
    profile_image: Option<&str>,
) -> Result<(), String> {
    let query_span = tracing::info_span!("Updating user in the database");

    async {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE users
            SET email = $2, name = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(name)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE profiles
            SET profile_image = $2
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .bind(profile_image)
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }
    .instrument(query_span)
    .await
    .map_err(|e: sqlx::Error| {
        tracing::error!("Failed to update user {}, error: {:?}", id, e);
        "Failed to update".to_string()
    })
}

/// Deleting the user row cascades to its profile, comments and authored
/// products through the schema's referential rules.
pub async fn delete(pool: &PgPool, id: &str) -> Result<(), String> {
    let query_span = tracing::info_span!("Deleting user from the database");

    sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|_| ())
        .map_err(|e| {
            tracing::error!("Failed to delete user {}, error: {:?}", id, e);
            "Failed to delete".to_string()
        })
}
