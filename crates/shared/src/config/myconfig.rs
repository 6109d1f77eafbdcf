use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_var(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}

/// Thirty days.
const MAX_JWT_EXPIRES_IN_MINUTES: i64 = 30 * 24 * 60;

fn check_jwt_lifetime(minutes: i64) -> Result<i64> {
    if (1..=MAX_JWT_EXPIRES_IN_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(anyhow!(
            "JWT_EXPIRES_IN_MINUTES must be between 1 and {MAX_JWT_EXPIRES_IN_MINUTES}, got {minutes}"
        ))
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn init() -> Result<Self> {
        let url = match optional_var("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = std::env::var("DB_HOST")
                    .context("Missing environment variable: DATABASE_URL or DB_HOST")?;
                let port: u16 = parse_var("DB_PORT", 5432)?;
                let username = std::env::var("DB_USERNAME")
                    .context("Missing environment variable: DB_USERNAME")?;
                let password = std::env::var("DB_PASSWORD")
                    .context("Missing environment variable: DB_PASSWORD")?;
                let name =
                    std::env::var("DB_NAME").context("Missing environment variable: DB_NAME")?;

                format!("postgres://{username}:{password}@{host}:{port}/{name}")
            }
        };

        let max_connections = parse_var("DB_MAX_CONNECTIONS", 5)?;

        Ok(Self {
            url,
            max_connections,
        })
    }
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from: String,
}

impl EmailConfig {
    pub fn init() -> Result<Self> {
        let smtp_server =
            std::env::var("SMTP_HOST").context("Missing environment variable: SMTP_HOST")?;
        let smtp_user = std::env::var("SMTP_USERNAME")
            .context("Missing environment variable: SMTP_USERNAME")?;
        let smtp_pass = std::env::var("SMTP_PASSWORD")
            .context("Missing environment variable: SMTP_PASSWORD")?;
        let smtp_port = parse_var("SMTP_PORT", 587)?;
        let from = optional_var("SMTP_FROM").unwrap_or_else(|| smtp_user.clone());

        Ok(Self {
            smtp_server,
            smtp_port,
            smtp_user,
            smtp_pass,
            from,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AdminSeedConfig {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

impl AdminSeedConfig {
    /// Returns `None` unless username, email and password are all present.
    pub fn init() -> Option<Self> {
        let username = optional_var("ADMIN_USERNAME")?;
        let email = optional_var("ADMIN_EMAIL")?;
        let password = optional_var("ADMIN_PASSWORD")?;
        let phone = optional_var("ADMIN_PHONE").unwrap_or_else(|| "01000000000".to_string());

        Some(Self {
            username,
            email,
            password,
            phone,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub jwt_expires_in_minutes: i64,
    pub bcrypt_cost: u32,
    pub run_migrations: bool,
    pub port: u16,
    pub cors_origin: String,
    pub upload_dir: String,
    pub email_config: EmailConfig,
    pub admin_seed: Option<AdminSeedConfig>,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database = DatabaseConfig::init().context("failed database config")?;

        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;
        let jwt_expires_in_minutes = check_jwt_lifetime(parse_var("JWT_EXPIRES_IN_MINUTES", 60)?)?;

        let bcrypt_cost = parse_var("BCRYPT_COST", 10)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(anyhow!("BCRYPT_COST must be between 4 and 31, got {bcrypt_cost}"));
        }

        let run_migrations = match optional_var("RUN_MIGRATIONS") {
            Some(raw) => parse_bool("RUN_MIGRATIONS", &raw)?,
            None => true,
        };

        let port = parse_var("PORT", 4000).context("PORT must be a valid u16 integer")?;
        let cors_origin = optional_var("CORS_ORIGIN").unwrap_or_else(|| "*".to_string());
        let upload_dir = optional_var("UPLOAD_DIR").unwrap_or_else(|| "./uploads".to_string());

        let email_config = EmailConfig::init().context("failed email config")?;

        Ok(Self {
            database,
            jwt_secret,
            jwt_expires_in_minutes,
            bcrypt_cost,
            run_migrations,
            port,
            cors_origin,
            upload_dir,
            email_config,
            admin_seed: AdminSeedConfig::init(),
        })
    }
}
