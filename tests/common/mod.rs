use hmac::{Hmac, Mac};
use killedfast::configuration::{get_configuration, DatabaseSettings, Settings};
use killedfast::helpers::signature;
use sha2::Sha256;
use sqlx::{Connection, Executor, PgConnection, PgPool};

/// Shared secret the suite signs webhook payloads with. `whsec_` + base64,
/// the shape the identity provider hands out.
pub const TEST_WEBHOOK_SECRET: &str = "whsec_dGVzdC13ZWJob29rLXNlY3JldA==";

pub async fn spawn_app_with_configuration(mut configuration: Settings) -> Option<TestApp> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = killedfast::startup::run(listener, connection_pool.clone(), configuration.clone())
        .await
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        settings: configuration,
    })
}

pub async fn spawn_app() -> Option<TestApp> {
    // get_configuration refuses to start without the webhook secret
    std::env::set_var("WEBHOOK_SECRET", TEST_WEBHOOK_SECRET);
    let configuration = get_configuration().expect("Failed to get configuration");

    spawn_app_with_configuration(configuration).await
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await?;

    Ok(connection_pool)
}

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub settings: Settings,
}

impl TestApp {
    /// Inserts a mirrored user (plus profile) the way the webhook handler
    /// would, so tests can authenticate without replaying provider events.
    pub async fn seed_user(&self, id: &str, email: &str, name: &str) {
        sqlx::query("INSERT INTO users (id, email, name) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(email)
            .bind(name)
            .execute(&self.db_pool)
            .await
            .expect("Failed to seed user");

        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
            .bind(id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to seed profile");
    }

    /// Session token for `user_id`, signed the way the middleware expects.
    pub fn bearer(&self, user_id: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.settings.auth.secret.as_bytes())
            .expect("Failed to build hmac");
        mac.update(user_id.as_bytes());
        format!("Bearer {}:{:x}", user_id, mac.finalize().into_bytes())
    }

    /// Provider-shaped signature header for a webhook body.
    pub fn webhook_signature(&self, msg_id: &str, timestamp: &str, body: &str) -> String {
        let raw = signature::sign(TEST_WEBHOOK_SECRET, msg_id, timestamp, body.as_bytes())
            .expect("Failed to sign webhook body");
        signature::header_value(&raw)
    }
}
