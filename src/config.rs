/*
 * Responsibility
 * - Read settings from the environment (.env supported): bind address, the
 *   authorized principal registry, NTLM defaults, static dir, HTTP limits
 * - Validate them up front (a missing or malformed registry aborts startup)
 */
use std::path::PathBuf;

use thiserror::Error;

use crate::services::authz::{PrincipalRegistry, RegistryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("invalid configuration: {key}: {source}")]
    Registry {
        key: &'static str,
        #[source]
        source: RegistryError,
    },
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub app_env: AppEnv,

    pub registry: PrincipalRegistry,
    // Shown in 403 bodies; meant for test harnesses only
    pub expose_authorized_users: bool,

    pub ntlm_domain: Option<String>,
    pub ntlm_workstation: Option<String>,

    pub static_dir: PathBuf,

    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| "localhost".to_string());

        let port: u16 = match var("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let app_env = AppEnv::parse(var("APP_ENV"));

        let registry = load_registry(&var)?;

        let expose_authorized_users = match var("EXPOSE_AUTHORIZED_USERS") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid("EXPOSE_AUTHORIZED_USERS"))?,
            None => !app_env.is_production(),
        };

        let static_dir = var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public"));

        let request_timeout_seconds: u64 = match var("REQUEST_TIMEOUT_SECONDS") {
            Some(v) => v
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => 30,
        };

        let request_body_limit_bytes: usize = match var("REQUEST_BODY_LIMIT_BYTES") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            None => 1024 * 1024,
        };

        Ok(Self {
            host,
            port,
            app_env,
            registry,
            expose_authorized_users,
            ntlm_domain: var("NTLM_DOMAIN"),
            ntlm_workstation: var("NTLM_WORKSTATION"),
            static_dir,
            request_timeout_seconds,
            request_body_limit_bytes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn load_registry<F>(var: &F) -> Result<PrincipalRegistry, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(list) = var("AUTHORIZED_USERS") {
        return PrincipalRegistry::parse_list(&list).map_err(|source| ConfigError::Registry {
            key: "AUTHORIZED_USERS",
            source,
        });
    }

    let path = var("AUTHORIZED_USERS_FILE").ok_or(ConfigError::Missing(
        "AUTHORIZED_USERS or AUTHORIZED_USERS_FILE",
    ))?;
    let json = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
        path: path.clone(),
        source,
    })?;

    PrincipalRegistry::parse_json(&json).map_err(|source| ConfigError::Registry {
        key: "AUTHORIZED_USERS_FILE",
        source,
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
