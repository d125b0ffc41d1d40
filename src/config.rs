use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;

/// How failed requests are reported to clients.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ErrorMode {
    /// Distinct status per failure kind with a JSON body.
    #[default]
    Strict,
    /// Every failure is `404` with the raw error text, for parity with older clients.
    Legacy,
}

impl FromStr for ErrorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ErrorMode::Strict),
            "legacy" => Ok(ErrorMode::Legacy),
            other => anyhow::bail!("unknown error mode {other:?}, expected strict or legacy"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub error_mode: ErrorMode,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://reelbase.db?mode=rwc".to_string());

        let error_mode = match var("ERROR_MODE") {
            Some(raw) => raw.parse().context("ERROR_MODE")?,
            None => ErrorMode::default(),
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            error_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url, "sqlite://reelbase.db?mode=rwc");
        assert_eq!(config.error_mode, ErrorMode::Strict);
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("ERROR_MODE", "Legacy"),
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.error_mode, ErrorMode::Legacy);
    }

    #[test]
    fn bad_port_names_variable() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "PORT");
    }

    #[test]
    fn unknown_error_mode_is_rejected() {
        assert!(load(&[("ERROR_MODE", "loose")]).is_err());
    }
}
