//! Configuration management for RAX FXP
//!
//! Describes the two servers and the file to move between them. Values come
//! from a TOML file with `RAX_FXP_` environment overrides, e.g.
//! `RAX_FXP_SOURCE__PASSWORD` or `RAX_FXP_TRANSFER__COMPENSATION`.

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;
use std::time::Duration;

use crate::fxp::Compensation;

/// Complete transfer configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FxpConfig {
    /// Server the file is read from
    pub source: EndpointConfig,

    /// Server the file is written to
    pub destination: EndpointConfig,

    pub transfer: TransferConfig,
}

/// One FTP server and the account to log in with
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// What to transfer and how long to wait for it
#[derive(Debug, Deserialize, Clone)]
pub struct TransferConfig {
    pub source_path: String,
    pub destination_path: String,

    /// Action on the destination when the source fails mid-transfer
    pub compensation: Compensation,

    /// Deadline for connecting and logging in to each server
    pub connect_timeout_secs: u64,

    /// Deadline for the whole transfer; unlimited when absent
    pub transfer_timeout_secs: Option<u64>,
}

impl FxpConfig {
    /// Load configuration from `<name>.toml` with environment overrides
    pub fn load(name: &str) -> Result<Self, ConfigError> {
        Self::assemble(File::with_name(name).required(false), true)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::assemble(File::from_str(text, FileFormat::Toml), false)
    }

    fn assemble<T>(file: T, with_environment: bool) -> Result<Self, ConfigError>
    where
        T: Source + Send + Sync + 'static,
    {
        let mut builder = Config::builder()
            .set_default("source.port", 21)?
            .set_default("destination.port", 21)?
            .set_default("transfer.compensation", "none")?
            .set_default("transfer.connect_timeout_secs", 30)?
            .add_source(file);

        if with_environment {
            builder = builder.add_source(
                Environment::with_prefix("RAX_FXP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: FxpConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        self.source.validate("source")?;
        self.destination.validate("destination")?;

        if self.transfer.source_path.trim().is_empty() {
            return Err(ConfigError::Message(
                "transfer.source_path cannot be empty".into(),
            ));
        }

        if self.transfer.destination_path.trim().is_empty() {
            return Err(ConfigError::Message(
                "transfer.destination_path cannot be empty".into(),
            ));
        }

        if self.transfer.connect_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "transfer.connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.transfer.transfer_timeout_secs == Some(0) {
            return Err(ConfigError::Message(
                "transfer.transfer_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

impl EndpointConfig {
    /// Get host and port as a connectable address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Message(format!(
                "{}.host cannot be empty",
                section
            )));
        }

        if self.port == 0 {
            return Err(ConfigError::Message(format!("{}.port cannot be 0", section)));
        }

        Ok(())
    }
}

impl TransferConfig {
    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Get transfer timeout as Duration, if one is set
    pub fn transfer_timeout(&self) -> Option<Duration> {
        self.transfer_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [source]
        host = "ftp.example.org"
        username = "alice"
        password = "alice123"

        [destination]
        host = "10.0.0.2"
        port = 2121
        username = "bob"
        password = "bob123"

        [transfer]
        source_path = "/pub/file.iso"
        destination_path = "/incoming/file.iso"
        compensation = "abort"
        transfer_timeout_secs = 3600
    "#;

    #[test]
    fn test_parse_with_defaults() {
        let config = FxpConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.source.address(), "ftp.example.org:21");
        assert_eq!(config.destination.address(), "10.0.0.2:2121");
        assert_eq!(config.transfer.compensation, Compensation::Abort);
        assert_eq!(config.transfer.connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.transfer.transfer_timeout(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_compensation_defaults_to_none() {
        let text = SAMPLE.replace("compensation = \"abort\"", "");
        let config = FxpConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.transfer.compensation, Compensation::None);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let zero_port = SAMPLE.replace("port = 2121", "port = 0");
        assert!(FxpConfig::from_toml_str(&zero_port).is_err());

        let empty_path = SAMPLE.replace("\"/pub/file.iso\"", "\"  \"");
        assert!(FxpConfig::from_toml_str(&empty_path).is_err());

        let zero_timeout = SAMPLE.replace("3600", "0");
        assert!(FxpConfig::from_toml_str(&zero_timeout).is_err());

        let unknown_policy = SAMPLE.replace("\"abort\"", "\"retry\"");
        assert!(FxpConfig::from_toml_str(&unknown_policy).is_err());
    }
}
