use std::fmt;

/// Database file used when no connection string is configured.
pub const DEFAULT_SQLITE_PATH: &str = "purchases.db";

/// Environment variable holding a PostgreSQL connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable holding the listening port.
pub const PORT_ENV: &str = "PORT";

pub const DEFAULT_PORT: u16 = 5001;

pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Which backend stores purchases. Decided once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Sqlite { path: String },
    Postgres { url: String },
}

impl StoreConfig {
    /// A non-blank connection string selects PostgreSQL; otherwise the SQLite file is used.
    pub fn resolve(database_url: Option<&str>, sqlite_path: &str) -> Self {
        match database_url.map(str::trim) {
            Some(url) if !url.is_empty() => StoreConfig::Postgres {
                url: url.to_string(),
            },
            _ => StoreConfig::Sqlite {
                path: sqlite_path.to_string(),
            },
        }
    }
}

/// Never prints the connection string, it usually carries a password.
impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreConfig::Sqlite { path } => write!(f, "sqlite ({path})"),
            StoreConfig::Postgres { .. } => write!(f, "postgres (from {DATABASE_URL_ENV})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
