use crate::auth::Accounts;
use chirp_utils::version_info::RuntimeEnv;
use serde::Deserialize;
use std::env::vars;
use std::fmt::Display;
use std::time::Duration;
use tracing::info;

/// Default per-call deadline for store operations.
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Deserialize)]
pub enum Env {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "prod")]
    Prod,
    #[serde(rename = "test")]
    Test,
}

impl From<&Env> for RuntimeEnv {
    fn from(env: &Env) -> Self {
        match env {
            Env::Local => RuntimeEnv::Local,
            Env::Prod => RuntimeEnv::Prod,
            Env::Test => RuntimeEnv::Test,
        }
    }
}

impl Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Env::Local => write!(f, "local"),
            Env::Prod => write!(f, "prod"),
            Env::Test => write!(f, "test"),
        }
    }
}

// The final, validated configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    env: Env,
    database_url: String,
    server_addr: String,
    port: u16,
    publisher_accounts: Accounts,
    admin_accounts: Accounts,
    store_timeout: Duration,
}

// An intermediate struct for deserializing environment variables
// where most fields are optional and defaulted per environment.
#[derive(Deserialize)]
struct RawConfig {
    env: Env,
    database_url: Option<String>,
    server_addr: Option<String>,
    port: Option<u16>,
    publisher_accounts: Option<String>,
    admin_accounts: Option<String>,
    store_timeout_secs: Option<u64>,
}

impl Config {
    /// Create a test configuration with default values.
    ///
    /// Carries the same seeded accounts the local environment defaults to
    /// (`henry:secretpass` publisher, `admin:admin` admin).
    pub fn new_for_test() -> Self {
        Self {
            env: Env::Local,
            database_url: "postgres://localhost:5432/chirp".to_owned(),
            server_addr: "127.0.0.1".to_owned(),
            port: 8080,
            publisher_accounts: Accounts::from_pairs([("henry", "secretpass")]),
            admin_accounts: Accounts::from_pairs([("admin", "admin")]),
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_local(&self) -> bool {
        matches!(self.env, Env::Local)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self.env, Env::Prod)
    }

    /// Accounts allowed to publish tweets.
    pub fn publisher_accounts(&self) -> &Accounts {
        &self.publisher_accounts
    }

    /// Accounts allowed to query admin trend counts.
    pub fn admin_accounts(&self) -> &Accounts {
        &self.admin_accounts
    }

    /// Per-call deadline applied to every store operation.
    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    /// Initializes configuration by reading from environment variables
    /// and applying environment-aware defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            env,
            database_url,
            server_addr,
            port,
            publisher_accounts,
            admin_accounts,
            store_timeout_secs,
        } = raw_config;

        // Outside prod, an unset DATABASE_URL falls back to a localhost backend.
        let database_url = match database_url {
            Some(url) => url,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("DATABASE_URL not set, defaulting to localhost for {} environment", env);
                "postgres://localhost:5432/chirp".to_owned()
            }
            None => anyhow::bail!("DATABASE_URL must be set for {} environment", env),
        };

        let server_addr = match server_addr {
            Some(addr) => {
                info!("Using provided SERVER_ADDR: {}", addr);
                addr
            }
            None => {
                let default_addr = match env {
                    Env::Local => "127.0.0.1",
                    _ => "0.0.0.0",
                };
                info!(
                    "SERVER_ADDR not set, defaulting to {} for {} environment",
                    default_addr, env
                );
                default_addr.to_owned()
            }
        };

        let port = match port {
            Some(port) => port,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("PORT not set, defaulting to 8080 for {} environment", env);
                8080
            }
            None => anyhow::bail!("PORT must be set for {} environment", env),
        };

        // Seeded credentials are a local/test convenience only.
        let publisher_accounts = match publisher_accounts {
            Some(raw) => raw.parse::<Accounts>()?,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("PUBLISHER_ACCOUNTS not set, using seeded account for {} environment", env);
                Accounts::from_pairs([("henry", "secretpass")])
            }
            None => anyhow::bail!("PUBLISHER_ACCOUNTS must be set for {} environment", env),
        };

        let admin_accounts = match admin_accounts {
            Some(raw) => raw.parse::<Accounts>()?,
            None if matches!(env, Env::Local | Env::Test) => {
                info!("ADMIN_ACCOUNTS not set, using seeded account for {} environment", env);
                Accounts::from_pairs([("admin", "admin")])
            }
            None => anyhow::bail!("ADMIN_ACCOUNTS must be set for {} environment", env),
        };

        let store_timeout =
            Duration::from_secs(store_timeout_secs.unwrap_or(DEFAULT_STORE_TIMEOUT_SECS));

        Ok(Config {
            env,
            database_url,
            server_addr,
            port,
            publisher_accounts,
            admin_accounts,
            store_timeout,
        })
    }
}
