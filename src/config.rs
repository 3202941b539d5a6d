use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Minimal bug tracker web application")]
pub struct Args {
    /// Host to bind to (overrides BUG_TRACKER_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides BUG_TRACKER_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides BUG_TRACKER_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        let args = Args::parse();
        let migrate = args.migrate;
        let cfg = Self::merge(args, |key| env::var(key))?;
        Ok((cfg, migrate))
    }

    /// CLI values win over environment values, which win over defaults.
    fn merge<F>(args: Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let env_host = lookup("BUG_TRACKER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match lookup("BUG_TRACKER_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing BUG_TRACKER_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 8000,
            Err(err) => return Err(err).context("reading BUG_TRACKER_PORT"),
        };
        let env_db = lookup("BUG_TRACKER_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./data/bug_tracker.db".into());

        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.unwrap_or(env_db),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, env::VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn defaults_apply_without_env_or_flags() {
        let cfg = AppConfig::merge(Args::default(), lookup(&[])).unwrap();
        assert_eq!(cfg.addr(), "0.0.0.0:8000");
        assert_eq!(cfg.database_url, "sqlite://./data/bug_tracker.db");
    }

    #[test]
    fn flags_override_environment() {
        let args = Args {
            port: Some(9100),
            ..Args::default()
        };
        let cfg = AppConfig::merge(
            args,
            lookup(&[
                ("BUG_TRACKER_PORT", "9000"),
                ("BUG_TRACKER_HOST", "127.0.0.1"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.addr(), "127.0.0.1:9100");
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = AppConfig::merge(Args::default(), lookup(&[("BUG_TRACKER_PORT", "http")]))
            .unwrap_err();
        assert!(err.to_string().contains("BUG_TRACKER_PORT"));
    }

    #[test]
    fn cli_parses_flags() {
        let args = Args::parse_from(["bug-tracker", "--migrate", "--database-url", "sqlite::memory:"]);
        assert!(args.migrate);
        assert_eq!(args.database_url.as_deref(), Some("sqlite::memory:"));
    }
}
