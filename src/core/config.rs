use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the HTML page templates
    pub template_dir: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub busy_timeout_secs: u64,
}

/// Login session settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl: Duration,
    /// Whether the session cookie carries the `Secure` attribute
    pub cookie_secure: bool,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            session: SessionConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

/// Parse a boolean flag, accepting the usual spellings.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let template_dir = env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string());

        Ok(Self {
            host,
            port,
            template_dir,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_URL: &'static str = "sqlite://csm.db?mode=rwc";
    const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let busy_timeout_secs = env::var("DB_BUSY_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_BUSY_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_BUSY_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            acquire_timeout_secs,
            busy_timeout_secs,
        })
    }
}

impl SessionConfig {
    const DEFAULT_TTL_HOURS: u64 = 24;

    pub fn from_env() -> Result<Self, String> {
        let ttl_hours = env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_TTL_HOURS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_HOURS must be a valid number".to_string())?;
        let ttl = Self::ttl_from_hours(ttl_hours)?;

        let cookie_secure = match env::var("COOKIE_SECURE") {
            Ok(raw) => parse_bool(&raw)
                .ok_or_else(|| "COOKIE_SECURE must be true or false".to_string())?,
            Err(_) => false,
        };

        Ok(Self { ttl, cookie_secure })
    }

    /// Convert a TTL in hours, rejecting values whose seconds do not fit an `i64`.
    fn ttl_from_hours(hours: u64) -> Result<Duration, String> {
        hours
            .checked_mul(3600)
            .filter(|secs| i64::try_from(*secs).is_ok())
            .map(Duration::from_secs)
            .ok_or_else(|| format!("SESSION_TTL_HOURS is out of range: {}", hours))
    }

    /// TTL in whole seconds, as stored in session rows.
    pub fn ttl_secs(&self) -> i64 {
        i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(Self::DEFAULT_TTL_HOURS * 3600),
            cookie_secure: false,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "CSM API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Service request status API".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
