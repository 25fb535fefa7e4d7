use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub auth: AuthSettings,
    // supplied via the WEBHOOK_SECRET environment variable, never via the yaml file
    #[serde(default)]
    pub webhook_secret: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthSettings {
    pub secret: String,
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let mut settings = config::Config::default();

    // Add configuration values from a file named `configuration`
    // with the .yaml extension
    settings.merge(config::File::with_name("configuration"))?;

    let mut config: Settings = settings.try_deserialize()?;

    // The identity provider signs every webhook with this shared secret.
    // Starting without it would silently drop the whole user lifecycle.
    config.webhook_secret = std::env::var("WEBHOOK_SECRET")
        .map_err(|_| config::ConfigError::NotFound("WEBHOOK_SECRET".to_string()))?;

    Ok(config)
}
