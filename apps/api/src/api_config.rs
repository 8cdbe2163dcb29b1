use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use guardpost_application::GuardDestinations;
use guardpost_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreConfig {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub session_store: SessionStoreConfig,
    pub role_grants_path: Option<PathBuf>,
    pub login_latency: Duration,
    pub guard_destinations: GuardDestinations,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_host = optional("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = optional("API_PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))
            })
            .transpose()?
            .unwrap_or(3001);
        let frontend_url =
            optional("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let session_store = match optional("SESSION_STORE")
            .unwrap_or_else(|| "file".to_owned())
            .as_str()
        {
            "memory" => SessionStoreConfig::Memory,
            "file" => SessionStoreConfig::File(PathBuf::from(
                optional("SESSION_STORE_PATH")
                    .unwrap_or_else(|| ".guardpost/session.json".to_owned()),
            )),
            other => {
                return Err(AppError::Validation(format!(
                    "SESSION_STORE must be either 'memory' or 'file', got '{other}'"
                )));
            }
        };

        let role_grants_path = optional("ROLE_GRANTS_PATH").map(PathBuf::from);

        let login_latency = optional("LOGIN_LATENCY_MS")
            .map(|value| {
                value.parse::<u64>().map_err(|error| {
                    AppError::Validation(format!("invalid LOGIN_LATENCY_MS: {error}"))
                })
            })
            .transpose()?
            .map_or(Duration::from_millis(800), Duration::from_millis);

        let guard_destinations = GuardDestinations {
            login_path: route_path(optional("LOGIN_PATH"), "LOGIN_PATH", "/login")?,
            unauthorized_path: route_path(
                optional("UNAUTHORIZED_PATH"),
                "UNAUTHORIZED_PATH",
                "/unauthorized",
            )?,
        };

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            session_store,
            role_grants_path,
            login_latency,
            guard_destinations,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn route_path(value: Option<String>, name: &str, default: &str) -> Result<String, AppError> {
    let path = value.unwrap_or_else(|| default.to_owned());
    if !path.starts_with('/') {
        return Err(AppError::Validation(format!(
            "{name} must be an absolute path, got '{path}'"
        )));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    use guardpost_core::AppError;

    use super::{ApiConfig, SessionStoreConfig};

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let Ok(config) = config_from(&[]) else {
            panic!("empty environment should load");
        };

        assert_eq!(config.api_port, 3001);
        assert_eq!(
            config.session_store,
            SessionStoreConfig::File(PathBuf::from(".guardpost/session.json"))
        );
        assert_eq!(config.login_latency, Duration::from_millis(800));
        assert_eq!(config.guard_destinations.login_path, "/login");
        assert_eq!(config.guard_destinations.unauthorized_path, "/unauthorized");
        assert!(config.role_grants_path.is_none());
        assert!(config.socket_address().is_ok());
    }

    #[test]
    fn overrides_are_read() {
        let Ok(config) = config_from(&[
            ("SESSION_STORE", "memory"),
            ("LOGIN_LATENCY_MS", "0"),
            ("LOGIN_PATH", "/signin"),
            ("ROLE_GRANTS_PATH", "config/grants.json"),
        ]) else {
            panic!("overrides should load");
        };

        assert_eq!(config.session_store, SessionStoreConfig::Memory);
        assert_eq!(config.login_latency, Duration::ZERO);
        assert_eq!(config.guard_destinations.login_path, "/signin");
        assert_eq!(
            config.role_grants_path,
            Some(PathBuf::from("config/grants.json"))
        );
    }

    #[test]
    fn invalid_values_fail_validation() {
        for pairs in [
            [("SESSION_STORE", "redis")],
            [("API_PORT", "not-a-port")],
            [("LOGIN_LATENCY_MS", "-5")],
            [("UNAUTHORIZED_PATH", "denied")],
        ] {
            assert!(matches!(config_from(&pairs), Err(AppError::Validation(_))));
        }
    }
}
