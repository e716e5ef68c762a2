use anyhow::Result;
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_prefix: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub log_level: String,
    pub app_env: String,
    pub cors_allow_origin: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing or unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "4000").parse().unwrap_or(4000);
        let api_prefix = var("API_PREFIX", "v1").trim_matches('/').to_string();
        let db_max_connections = var("DB_MAX_CONNECTIONS", "10").parse().unwrap_or(10);

        let database_url = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => url,
            None => {
                let db_host = var("POSTGRES_HOST", "localhost");
                let db_port = var("POSTGRES_PORT", "5432");
                let db_name = var("POSTGRES_DB", "trips");
                let db_user = var("POSTGRES_USER", "postgres");
                let db_pwd = var("POSTGRES_PASSWORD", "postgres");

                format!(
                    "postgres://{}:{}@{}:{}/{}",
                    db_user, db_pwd, db_host, db_port, db_name
                )
            }
        };

        let log_level = var("LOG_LEVEL", "info");
        let app_env = var("APP_ENV", "development");
        let cors_allow_origin = lookup("CORS_ALLOW_ORIGIN").filter(|origin| !origin.is_empty());

        Ok(Self {
            port,
            api_prefix,
            database_url,
            db_max_connections,
            log_level,
            app_env,
            cors_allow_origin,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// SQL statements are logged by sqlx at debug under `sqlx::query`.
    pub fn log_filter(&self) -> String {
        if self.is_production() {
            self.log_level.clone()
        } else {
            format!("{},sqlx::query=debug", self.log_level)
        }
    }
}
