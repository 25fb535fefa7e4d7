use crate::models;
use crate::models::ProductStatus;
use crate::views;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::Instrument;

/// Which products a read query returns. Every variant joins the same
/// relations and orders by created_at descending.
#[derive(Debug)]
pub enum Filter<'a> {
    All,
    CategorySlug(&'a str),
    TagSlug(&'a str),
    ProductSlug(&'a str),
}

pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub slogan: String,
    pub description: String,
    pub status: ProductStatus,
    pub date_of_creation: DateTime<Utc>,
    pub date_of_death: Option<DateTime<Utc>>,
    pub number_of_users: i32,
    pub reason_for_failure: String,
    pub key_challenges: String,
    pub lessons_learned: String,
    pub what_would_you_do_differently: Option<String>,
    pub tips_or_advice: String,
    pub website: Option<String>,
    pub x_account: Option<String>,
    pub category_id: i32,
    pub author_id: String,
}

#[derive(thiserror::Error, Debug)]
pub enum InsertError {
    #[error("slug is already taken")]
    DuplicateSlug,
    #[error("{0}")]
    Database(String),
}

/// Counts products occupying the candidate slug or a suffixed variant of
/// it. Used to pick the first suffix; the unique constraint is what
/// actually guarantees the slug.
pub async fn count_slug_matches(pool: &PgPool, slug: &str) -> Result<i64, String> {
    let query_span = tracing::info_span!("Count products matching a slug.");
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM products
        WHERE slug = $1 OR slug LIKE $2
        "#,
    )
    .bind(slug)
    .bind(format!("{}-%", slug))
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to count slug matches for {}, error: {:?}", slug, err);
        "Could not fetch data".to_string()
    })
}

/// Persists the product plus its resource URLs and tag links in one
/// transaction. A unique violation on the slug is reported as
/// `InsertError::DuplicateSlug` so the caller can retry with the next
/// suffix.
pub async fn insert(
    pool: &PgPool,
    product: NewProduct,
    resource_urls: &[String],
    tag_ids: &[i32],
) -> Result<models::Product, InsertError> {
    let query_span = tracing::info_span!("Saving new product into the database");

    let result: Result<models::Product, sqlx::Error> = async {
        let mut tx = pool.begin().await?;

        let created = sqlx::query_as::<_, models::Product>(
            r#"
            INSERT INTO products (
                name, slug, slogan, description, status,
                date_of_creation, date_of_death, number_of_users,
                reason_for_failure, key_challenges, lessons_learned,
                what_would_you_do_differently, tips_or_advice,
                website, x_account, category_id, author_id, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, NOW() at time zone 'utc'
            )
            RETURNING *
            "#,
        )
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.slogan)
        .bind(&product.description)
        .bind(product.status)
        .bind(product.date_of_creation)
        .bind(product.date_of_death)
        .bind(product.number_of_users)
        .bind(&product.reason_for_failure)
        .bind(&product.key_challenges)
        .bind(&product.lessons_learned)
        .bind(&product.what_would_you_do_differently)
        .bind(&product.tips_or_advice)
        .bind(&product.website)
        .bind(&product.x_account)
        .bind(product.category_id)
        .bind(&product.author_id)
        .fetch_one(&mut *tx)
        .await?;

        for url in resource_urls {
            sqlx::query(r#"INSERT INTO resource_urls (url, product_id) VALUES ($1, $2)"#)
                .bind(url)
                .bind(created.id)
                .execute(&mut *tx)
                .await?;
        }

        for tag_id in tag_ids {
            sqlx::query(r#"INSERT INTO product_tags (product_id, tag_id) VALUES ($1, $2)"#)
                .bind(created.id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(created)
    }
    .instrument(query_span)
    .await;

    result.map_err(|err| {
        // only the slug constraint is retryable; a unique violation on any
        // other table is a plain database error
        if err
            .as_database_error()
            .map(|db_err| {
                db_err.is_unique_violation() && db_err.constraint() == Some("products_slug_key")
            })
            .unwrap_or(false)
        {
            return InsertError::DuplicateSlug;
        }
        tracing::error!("Failed to insert product, error: {:?}", err);
        InsertError::Database("Failed to insert".to_string())
    })
}

#[derive(sqlx::FromRow)]
struct ProductRecord {
    id: i32,
    name: String,
    slug: String,
    slogan: String,
    description: String,
    status: ProductStatus,
    date_of_creation: DateTime<Utc>,
    date_of_death: Option<DateTime<Utc>>,
    number_of_users: i32,
    reason_for_failure: String,
    key_challenges: String,
    lessons_learned: String,
    what_would_you_do_differently: Option<String>,
    tips_or_advice: String,
    website: Option<String>,
    x_account: Option<String>,
    category_id: i32,
    author_id: String,
    created_at: DateTime<Utc>,
    category_name: String,
    category_description: String,
    category_slug: String,
    author_name: String,
    author_image: Option<String>,
}

#[derive(sqlx::FromRow)]
struct TagRecord {
    product_id: i32,
    id: i32,
    name: String,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct CommentRecord {
    id: i32,
    text: String,
    product_id: i32,
    created_at: DateTime<Utc>,
    author_id: String,
    author_name: String,
    author_image: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ResourceUrlRecord {
    product_id: i32,
    url: String,
}

const PRODUCT_SELECT: &str = r#"
    SELECT
        p.id, p.name, p.slug, p.slogan, p.description, p.status,
        p.date_of_creation, p.date_of_death, p.number_of_users,
        p.reason_for_failure, p.key_challenges, p.lessons_learned,
        p.what_would_you_do_differently, p.tips_or_advice,
        p.website, p.x_account, p.category_id, p.author_id, p.created_at,
        c.name AS category_name,
        c.description AS category_description,
        c.slug AS category_slug,
        u.name AS author_name,
        pr.profile_image AS author_image
    FROM products p
    JOIN categories c ON c.id = p.category_id
    JOIN users u ON u.id = p.author_id
    LEFT JOIN profiles pr ON pr.user_id = u.id
"#;

/// Products joined with category, author, tags, resource URLs and
/// comments, newest first.
pub async fn fetch_with_relations(
    pool: &PgPool,
    filter: Filter<'_>,
) -> Result<Vec<views::ProductWithRelations>, String> {
    let query_span = tracing::info_span!("Fetch products with relations.");

    let mut sql = String::from(PRODUCT_SELECT);
    match filter {
        Filter::All => {}
        Filter::CategorySlug(_) => sql.push_str(" WHERE c.slug = $1"),
        Filter::TagSlug(_) => sql.push_str(
            " WHERE p.id IN (
                SELECT pt.product_id
                FROM product_tags pt
                JOIN tags t ON t.id = pt.tag_id
                WHERE t.slug = $1
            )",
        ),
        Filter::ProductSlug(_) => sql.push_str(" WHERE p.slug = $1"),
    }
    sql.push_str(" ORDER BY p.created_at DESC");

    let query = sqlx::query_as::<_, ProductRecord>(&sql);
    let query = match filter {
        Filter::All => query,
        Filter::CategorySlug(slug) | Filter::TagSlug(slug) | Filter::ProductSlug(slug) => {
            query.bind(slug.to_string())
        }
    };

    let records = query
        .fetch_all(pool)
        .instrument(query_span.clone())
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch products, error: {:?}", err);
            "Could not fetch data".to_string()
        })?;

    let product_ids: Vec<i32> = records.iter().map(|record| record.id).collect();

    let tags = sqlx::query_as::<_, TagRecord>(
        r#"
        SELECT pt.product_id, t.id, t.name, t.slug
        FROM product_tags pt
        JOIN tags t ON t.id = pt.tag_id
        WHERE pt.product_id = ANY($1)
        ORDER BY t.name
        "#,
    )
    .bind(&product_ids)
    .fetch_all(pool)
    .instrument(query_span.clone())
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch product tags, error: {:?}", err);
        "Could not fetch data".to_string()
    })?;

    let resource_urls = sqlx::query_as::<_, ResourceUrlRecord>(
        r#"
        SELECT product_id, url
        FROM resource_urls
        WHERE product_id = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(&product_ids)
    .fetch_all(pool)
    .instrument(query_span.clone())
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch resource urls, error: {:?}", err);
        "Could not fetch data".to_string()
    })?;

    let comments = sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT
            cm.id, cm.text, cm.product_id, cm.created_at,
            u.id AS author_id,
            u.name AS author_name,
            pr.profile_image AS author_image
        FROM comments cm
        JOIN users u ON u.id = cm.author_id
        LEFT JOIN profiles pr ON pr.user_id = u.id
        WHERE cm.product_id = ANY($1)
        ORDER BY cm.created_at
        "#,
    )
    .bind(&product_ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch comments, error: {:?}", err);
        "Could not fetch data".to_string()
    })?;

    let mut tags_by_product: HashMap<i32, Vec<models::Tag>> = HashMap::new();
    for tag in tags {
        tags_by_product
            .entry(tag.product_id)
            .or_default()
            .push(models::Tag {
                id: tag.id,
                name: tag.name,
                slug: tag.slug,
            });
    }

    let mut urls_by_product: HashMap<i32, Vec<String>> = HashMap::new();
    for record in resource_urls {
        urls_by_product
            .entry(record.product_id)
            .or_default()
            .push(record.url);
    }

    let mut comments_by_product: HashMap<i32, Vec<views::CommentWithAuthor>> = HashMap::new();
    for comment in comments {
        comments_by_product
            .entry(comment.product_id)
            .or_default()
            .push(views::CommentWithAuthor {
                id: comment.id,
                text: comment.text,
                created_at: comment.created_at,
                author: views::Author {
                    id: comment.author_id,
                    name: comment.author_name,
                    profile_image: comment.author_image,
                },
            });
    }

    Ok(records
        .into_iter()
        .map(|record| {
            let tags = tags_by_product.remove(&record.id).unwrap_or_default();
            let resource_urls = urls_by_product.remove(&record.id).unwrap_or_default();
            let comments = comments_by_product.remove(&record.id).unwrap_or_default();
            views::ProductWithRelations {
                category: models::Category {
                    id: record.category_id,
                    name: record.category_name,
                    description: record.category_description,
                    slug: record.category_slug,
                },
                author: views::Author {
                    id: record.author_id.clone(),
                    name: record.author_name,
                    profile_image: record.author_image,
                },
                product: models::Product {
                    id: record.id,
                    name: record.name,
                    slug: record.slug,
                    slogan: record.slogan,
                    description: record.description,
                    status: record.status,
                    date_of_creation: record.date_of_creation,
                    date_of_death: record.date_of_death,
                    number_of_users: record.number_of_users,
                    reason_for_failure: record.reason_for_failure,
                    key_challenges: record.key_challenges,
                    lessons_learned: record.lessons_learned,
                    what_would_you_do_differently: record.what_would_you_do_differently,
                    tips_or_advice: record.tips_or_advice,
                    website: record.website,
                    x_account: record.x_account,
                    category_id: record.category_id,
                    author_id: record.author_id,
                    created_at: record.created_at,
                },
                tags,
                resource_urls,
                comments,
            }
        })
        .collect())
}

pub async fn fetch_one_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<views::ProductWithRelations>, String> {
    fetch_with_relations(pool, Filter::ProductSlug(slug))
        .await
        .map(|mut products| {
            if products.is_empty() {
                None
            } else {
                Some(products.remove(0))
            }
        })
}
