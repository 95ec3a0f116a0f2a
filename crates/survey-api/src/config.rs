//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use survey_scenario::domain::catalog::SurveyCatalog;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Shared credential for the admin routes.
    pub admin_passphrase: String,
    /// YAML catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = non_empty("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".into())
        })?;
        let admin_passphrase = non_empty("ADMIN_PASSPHRASE").ok_or_else(|| {
            AppError::Config("ADMIN_PASSPHRASE environment variable must be set".into())
        })?;
        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            host,
            port,
            admin_passphrase,
            catalog_path: non_empty("SURVEY_CATALOG_PATH").map(PathBuf::from),
            otlp_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }

    /// Loads and validates the survey catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the catalog file cannot be read and
    /// `AppError::Catalog` if it fails validation.
    pub fn load_catalog(&self) -> Result<SurveyCatalog, AppError> {
        let catalog = match &self.catalog_path {
            Some(path) => {
                let source = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Config(format!("cannot read SURVEY_CATALOG_PATH {path:?}: {e}"))
                })?;
                SurveyCatalog::from_yaml_str(&source)?
            }
            None => SurveyCatalog::builtin()?,
        };
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_applies_defaults() {
        // Arrange
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/survey"),
            ("ADMIN_PASSPHRASE", "open-sesame"),
        ]);

        // Act
        let config = AppConfig::from_lookup(lookup).unwrap();

        // Assert
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.catalog_path.is_none());
        assert!(config.otlp_endpoint.is_none());
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        // Arrange
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://db/survey"),
            ("ADMIN_PASSPHRASE", "open-sesame"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("SURVEY_CATALOG_PATH", "/etc/survey/catalog.yaml"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317"),
        ]);

        // Act
        let config = AppConfig::from_lookup(lookup).unwrap();

        // Assert
        assert_eq!(config.database_url, "postgres://db/survey");
        assert_eq!(config.admin_passphrase, "open-sesame");
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/survey/catalog.yaml"))
        );
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
    }

    #[test]
    fn test_from_lookup_requires_database_url() {
        let lookup = lookup_from(&[("ADMIN_PASSPHRASE", "open-sesame")]);

        let result = AppConfig::from_lookup(lookup);

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn test_from_lookup_rejects_blank_passphrase() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/survey"),
            ("ADMIN_PASSPHRASE", "   "),
        ]);

        let result = AppConfig::from_lookup(lookup);

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("ADMIN_PASSPHRASE")));
    }

    #[test]
    fn test_from_lookup_rejects_invalid_port() {
        let lookup = lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/survey"),
            ("ADMIN_PASSPHRASE", "open-sesame"),
            ("PORT", "eighty"),
        ]);

        let result = AppConfig::from_lookup(lookup);

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("PORT")));
    }

    #[test]
    fn test_load_catalog_defaults_to_builtin() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/survey"),
            ("ADMIN_PASSPHRASE", "open-sesame"),
        ]))
        .unwrap();

        let catalog = config.load_catalog().unwrap();

        assert_eq!(catalog.total_rounds(), 30);
        assert_eq!(catalog.groups().len(), 4);
    }

    #[test]
    fn test_load_catalog_reports_missing_file() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/survey"),
            ("ADMIN_PASSPHRASE", "open-sesame"),
            ("SURVEY_CATALOG_PATH", "/nonexistent/catalog.yaml"),
        ]))
        .unwrap();

        let result = config.load_catalog();

        assert!(matches!(
            result,
            Err(AppError::Config(msg))
                if msg.contains("SURVEY_CATALOG_PATH") && msg.contains("/nonexistent/catalog.yaml")
        ));
    }
}
