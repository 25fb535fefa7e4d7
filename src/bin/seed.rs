use anyhow::Context;
use killedfast::configuration::get_configuration;
use killedfast::seed;
use killedfast::telemetry::{get_subscriber, init_subscriber};
use sqlx::PgPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("killedfast-seed".into(), "info".into());
    init_subscriber(subscriber);

    let settings = get_configuration().context("Failed to read configuration.")?;

    let pool = PgPool::connect(&settings.database.connection_string())
        .await
        .context("Failed to connect to database.")?;

    let report = seed::run(&pool)
        .await
        .context("Failed to seed reference data.")?;

    tracing::info!(
        categories = report.categories,
        tags = report.tags,
        "Reference data seeded"
    );
    Ok(())
}
