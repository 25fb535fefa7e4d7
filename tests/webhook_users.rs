mod common;

fn created_event(user_id: &str, email: &str) -> String {
    serde_json::json!({
        "type": "user.created",
        "data": {
            "id": user_id,
            "email_addresses": [{"email_address": email}],
            "first_name": "Grace",
            "last_name": "Hopper",
            "image_url": "https://img.example/grace.png"
        }
    })
    .to_string()
}

async fn user_count(pool: &sqlx::PgPool, user_id: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("Failed to count users")
}

#[tokio::test]
async fn webhook_without_svix_headers_is_rejected() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/webhooks/users", &app.address))
        .header("Content-Type", "application/json")
        .body(created_event("user_no_headers", "grace@example.com"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    assert_eq!(0, user_count(&app.db_pool, "user_no_headers").await);
}

#[tokio::test]
async fn webhook_with_forged_signature_writes_nothing() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let body = created_event("user_forged", "grace@example.com");
    // signed over a different body, so verification must fail
    let signature = app.webhook_signature("msg_1", "1700000000", "{}");

    let response = client
        .post(&format!("{}/webhooks/users", &app.address))
        .header("Content-Type", "application/json")
        .header("svix-id", "msg_1")
        .header("svix-timestamp", "1700000000")
        .header("svix-signature", signature)
        .body(body)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    assert_eq!(0, user_count(&app.db_pool, "user_forged").await);
}

#[tokio::test]
async fn user_created_event_mirrors_user_and_profile() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let body = created_event("user_created", "grace@example.com");
    let signature = app.webhook_signature("msg_2", "1700000000", &body);

    let response = client
        .post(&format!("{}/webhooks/users", &app.address))
        .header("Content-Type", "application/json")
        .header("svix-id", "msg_2")
        .header("svix-timestamp", "1700000000")
        .header("svix-signature", signature)
        .body(body)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());

    let (email, name): (String, String) =
        sqlx::query_as("SELECT email, name FROM users WHERE id = $1")
            .bind("user_created")
            .fetch_one(&app.db_pool)
            .await
            .expect("User row was not mirrored");
    assert_eq!("grace@example.com", email);
    assert_eq!("Grace Hopper", name);

    let profiles: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE user_id = $1")
            .bind("user_created")
            .fetch_one(&app.db_pool)
            .await
            .expect("Failed to count profiles");
    assert_eq!(1, profiles);
}

#[tokio::test]
async fn user_deleted_event_removes_the_mirrored_row() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();
    app.seed_user("user_gone", "gone@example.com", "Gone Soon").await;

    let body =
        serde_json::json!({"type": "user.deleted", "data": {"id": "user_gone", "deleted": true}})
            .to_string();
    let signature = app.webhook_signature("msg_3", "1700000000", &body);

    let response = client
        .post(&format!("{}/webhooks/users", &app.address))
        .header("Content-Type", "application/json")
        .header("svix-id", "msg_3")
        .header("svix-timestamp", "1700000000")
        .header("svix-signature", signature)
        .body(body)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    assert_eq!(0, user_count(&app.db_pool, "user_gone").await);

    // the profile goes with the user
    let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE user_id = $1")
        .bind("user_gone")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count profiles");
    assert_eq!(0, profiles);
}
