//! API configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use domain_claims::adjudication::{DEFAULT_BENEFIT_LIMIT, DEFAULT_FRAUD_MULTIPLIER};
use domain_claims::BenefitRules;
use infra_db::DatabaseConfig;

/// Prefix of every environment variable read by [`ApiConfig::from_env`]
pub const ENV_PREFIX: &str = "CLAIMS";

/// API configuration
///
/// Every field has a default, so an empty environment yields a working
/// development setup backed by `claims.db` in the current directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub max_connections: u32,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Claims above this amount are only partially covered
    pub benefit_limit: Decimal,
    /// Claims above this multiple of the procedure average are flagged
    pub fraud_multiplier: Decimal,
    /// Member ids considered active
    pub active_members: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "sqlite://claims.db".to_string(),
            max_connections: 5,
            log_level: "info".to_string(),
            log_json: false,
            benefit_limit: DEFAULT_BENEFIT_LIMIT,
            fraud_multiplier: DEFAULT_FRAUD_MULTIPLIER,
            active_members: vec!["M123".to_string()],
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `CLAIMS_*` environment variables
    ///
    /// `CLAIMS_ACTIVE_MEMBERS` is a comma separated list.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("active_members"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects thresholds the adjudication rules cannot work with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.benefit_limit <= Decimal::ZERO {
            return Err(config::ConfigError::Message(format!(
                "benefit_limit must be positive, got {}",
                self.benefit_limit
            )));
        }
        if self.fraud_multiplier <= Decimal::ZERO {
            return Err(config::ConfigError::Message(format!(
                "fraud_multiplier must be positive, got {}",
                self.fraud_multiplier
            )));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn benefit_rules(&self) -> BenefitRules {
        BenefitRules::new(self.benefit_limit, self.fraud_multiplier)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone()).max_connections(self.max_connections)
    }
}
