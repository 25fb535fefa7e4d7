mod common;

async fn seed_catalog(app: &common::TestApp) -> (i32, i32) {
    let category_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO categories (name, description, slug) VALUES ('SaaS', 'SaaS products', 'saas') RETURNING id",
    )
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to seed category");

    let tag_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO tags (name, slug) VALUES ('B2B', 'b-2-b') RETURNING id",
    )
    .fetch_one(&app.db_pool)
    .await
    .expect("Failed to seed tag");

    (category_id, tag_id)
}

async fn submit_product(app: &common::TestApp, name: &str, category_id: i32, tag_id: i32) {
    let payload = serde_json::json!({
        "name": name,
        "website": "https://viable.example",
        "slogan": "It was fine",
        "description": "A product that ran out of runway.",
        "category": category_id.to_string(),
        "tags": [{"value": tag_id.to_string()}],
        "lessonsLearned": "Charge money earlier.",
        "status": "DEAD",
        "dateOfCreation": "2021-03-01T00:00:00Z",
        "rangeOfExistence": {"from": "2019-06-01T00:00:00Z", "to": "2023-01-15T00:00:00Z"},
        "numberOfUsers": 420,
        "resourcesUrls": [{"value": "https://blog.example/post"}],
        "reasonForFailure": "No revenue.",
        "keyChallenges": "Churn.",
        "tipsOrAdvice": "Talk to users."
    });

    let response = reqwest::Client::new()
        .post(&format!("{}/products", &app.address))
        .header("Authorization", app.bearer("user_author"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, response.status().as_u16());
}

async fn page(app: &common::TestApp, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .get(&format!("{}{}", &app.address, path))
        .send()
        .await
        .expect("Failed to execute request.")
}

#[tokio::test]
async fn the_home_page_lists_a_submitted_product() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let (category_id, tag_id) = seed_catalog(&app).await;
    app.seed_user("user_author", "author@example.com", "The Author").await;
    submit_product(&app, "Totally Viable", category_id, tag_id).await;

    let response = page(&app, "/").await;
    assert!(response.status().is_success());
    let html = response.text().await.expect("Body was not text");
    assert!(html.contains("Totally Viable"));
}

#[tokio::test]
async fn category_and_tag_pages_filter_products() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let (category_id, tag_id) = seed_catalog(&app).await;
    app.seed_user("user_author", "author@example.com", "The Author").await;
    submit_product(&app, "Totally Viable", category_id, tag_id).await;

    let response = page(&app, "/categories/saas").await;
    assert!(response.status().is_success());
    let html = response.text().await.expect("Body was not text");
    assert!(html.contains("Totally Viable"));

    let response = page(&app, "/tags/b-2-b").await;
    assert!(response.status().is_success());
    let html = response.text().await.expect("Body was not text");
    assert!(html.contains("Totally Viable"));
}

#[tokio::test]
async fn the_category_page_lists_newest_products_first() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let (category_id, tag_id) = seed_catalog(&app).await;
    app.seed_user("user_author", "author@example.com", "The Author").await;
    submit_product(&app, "First Mover", category_id, tag_id).await;
    submit_product(&app, "Second Wind", category_id, tag_id).await;

    let response = page(&app, "/categories/saas").await;
    assert!(response.status().is_success());
    let html = response.text().await.expect("Body was not text");

    let newer = html.find("Second Wind").expect("newer product missing");
    let older = html.find("First Mover").expect("older product missing");
    assert!(newer < older);
}

#[tokio::test]
async fn the_product_page_renders_the_post_mortem() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let (category_id, tag_id) = seed_catalog(&app).await;
    app.seed_user("user_author", "author@example.com", "The Author").await;
    submit_product(&app, "Totally Viable", category_id, tag_id).await;

    let response = page(&app, "/products/totally-viable").await;
    assert!(response.status().is_success());
    let html = response.text().await.expect("Body was not text");
    assert!(html.contains("Totally Viable"));
    assert!(html.contains("No revenue."));
}

#[tokio::test]
async fn unknown_slugs_are_not_found() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    assert_eq!(404, page(&app, "/categories/nope").await.status().as_u16());
    assert_eq!(404, page(&app, "/products/nope").await.status().as_u16());
    assert_eq!(404, page(&app, "/tags/nope").await.status().as_u16());
}
