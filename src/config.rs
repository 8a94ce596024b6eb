//! Application configuration management.
//!
//! Each service reads its own prefixed environment variables (`ACCOUNTS_`,
//! `CARDS_`, `LOANS_`) using the `envy` crate, so the three services can share
//! one `.env` file without stepping on each other.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::info::ServiceInfo;

/// The three services built from this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Accounts,
    Cards,
    Loans,
}

impl ServiceKind {
    /// Lower-case service name used in logs and default messages.
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Accounts => "accounts",
            ServiceKind::Cards => "cards",
            ServiceKind::Loans => "loans",
        }
    }

    /// Prefix of every environment variable read by this service.
    pub fn env_prefix(self) -> &'static str {
        match self {
            ServiceKind::Accounts => "ACCOUNTS_",
            ServiceKind::Cards => "CARDS_",
            ServiceKind::Loans => "LOANS_",
        }
    }

    fn default_port(self) -> u16 {
        match self {
            ServiceKind::Accounts => 8080,
            ServiceKind::Cards => 9000,
            ServiceKind::Loans => 8090,
        }
    }

    fn default_auditor(self) -> &'static str {
        match self {
            ServiceKind::Accounts => "ACCOUNTS_MS",
            ServiceKind::Cards => "CARDS_MS",
            ServiceKind::Loans => "LOANS_MS",
        }
    }
}

/// Raw environment variables, before per-service defaults are applied.
///
/// Field names are converted automatically: `database_url` -> `ACCOUNTS_DATABASE_URL`.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    database_url: Option<String>,
    server_port: Option<u16>,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    build_version: Option<String>,
    default_auditor: Option<String>,
    message: Option<String>,
    contact_name: Option<String>,
    contact_email: Option<String>,
    /// Comma-separated list, e.g. `alice@bank.test,bob@bank.test`
    #[serde(default)]
    on_call_support: Vec<String>,
}

fn default_max_connections() -> u32 {
    5
}

/// Resolved configuration for one service.
///
/// # Environment Variables (shown for the accounts service)
///
/// - `ACCOUNTS_DATABASE_URL` (optional): PostgreSQL connection string. When
///   unset the service keeps its data in memory.
/// - `ACCOUNTS_SERVER_PORT` (optional): defaults to 8080 / 9000 / 8090
/// - `ACCOUNTS_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `ACCOUNTS_BUILD_VERSION` (optional): defaults to the crate version
/// - `ACCOUNTS_DEFAULT_AUDITOR` (optional): identity stamped on writes when
///   the request carries no `X-Audit-User` header
/// - `ACCOUNTS_MESSAGE`, `ACCOUNTS_CONTACT_NAME`, `ACCOUNTS_CONTACT_EMAIL`,
///   `ACCOUNTS_ON_CALL_SUPPORT`: served by the `*-info` endpoint
#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceKind,
    pub database_url: Option<String>,
    pub server_port: u16,
    pub max_connections: u32,
    pub build_version: String,
    pub default_auditor: String,
    pub info: ServiceInfo,
}

impl Config {
    /// Load configuration for `service` from the process environment.
    ///
    /// A `.env` file is loaded first if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed into
    /// its expected type (e.g. a non-numeric port).
    pub fn from_env(service: ServiceKind) -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        let raw = envy::prefixed(service.env_prefix()).from_env::<EnvConfig>()?;
        Ok(Self::resolve(service, raw))
    }

    /// Load configuration from an explicit set of variables instead of the
    /// process environment.
    pub fn from_vars<I>(service: ServiceKind, vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let raw = envy::prefixed(service.env_prefix()).from_iter::<_, EnvConfig>(vars)?;
        Ok(Self::resolve(service, raw))
    }

    fn resolve(service: ServiceKind, raw: EnvConfig) -> Self {
        let mut contact_details = BTreeMap::new();
        if let Some(name) = raw.contact_name {
            contact_details.insert("name".to_string(), name);
        }
        if let Some(email) = raw.contact_email {
            contact_details.insert("email".to_string(), email);
        }

        let info = ServiceInfo {
            message: raw
                .message
                .unwrap_or_else(|| format!("Welcome to the {} service", service.name())),
            contact_details,
            on_call_support: raw
                .on_call_support
                .into_iter()
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect(),
        };

        Self {
            service,
            database_url: raw.database_url.filter(|url| !url.trim().is_empty()),
            server_port: raw.server_port.unwrap_or(service.default_port()),
            max_connections: raw.max_connections,
            build_version: raw
                .build_version
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            default_auditor: raw
                .default_auditor
                .unwrap_or_else(|| service.default_auditor().to_string()),
            info,
        }
    }
}
