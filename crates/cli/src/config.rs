//! `.qimen/config.toml` loading and validation.

use std::path::Path;

use chrono_tz::Tz;
use ledger::LedgerSettings;
use llm::LlmSettings;
use qimen::{parse_time_zone, QimenError};
use readings::ReadingSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = ".qimen/config.toml";

/// Highest sampling temperature chat-completions providers accept.
const MAX_TEMPERATURE: f32 = 2.0;

/// Reference clock for "now" and for birth times given without an offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    /// IANA zone name; daylight saving time follows the zone's rules.
    pub timezone: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            timezone: "America/Los_Angeles".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Emit JSON log lines instead of the compact human format.
    pub json_logs: bool,
    /// OTLP gRPC collector; spans are exported only when set.
    pub otlp_endpoint: Option<String>,
}

/// The whole config file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub clock: ClockConfig,
    pub ledger: LedgerSettings,
    pub readings: ReadingSettings,
    pub llm: LlmSettings,
    pub telemetry: TelemetryConfig,
}

fn invalid(message: impl Into<String>) -> QimenError {
    QimenError::ConfigurationError {
        message: message.into(),
    }
}

impl CliConfig {
    /// Loads and validates the file at `path`. A missing file yields the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, QimenError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| invalid(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&raw).map_err(|e| match e {
            QimenError::ConfigurationError { message } => {
                invalid(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Parses and validates TOML text.
    pub fn parse(raw: &str) -> Result<Self, QimenError> {
        let config: Self = toml::from_str(raw).map_err(|e| invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), QimenError> {
        self.reference_zone()?;
        if self.readings.max_attempts == 0 {
            return Err(invalid("readings.max_attempts must be at least 1"));
        }
        if self.readings.max_retry_delay_ms == 0 {
            return Err(invalid("readings.max_retry_delay_ms must be positive"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(invalid("llm.model must not be blank"));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(invalid("llm.base_url must not be blank"));
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&self.llm.temperature) {
            return Err(invalid(format!(
                "llm.temperature must be within 0.0..={MAX_TEMPERATURE}"
            )));
        }
        if self.llm.max_tokens == 0 {
            return Err(invalid("llm.max_tokens must be positive"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(invalid("llm.timeout_secs must be positive"));
        }
        if self.ledger.path.as_os_str().is_empty() {
            return Err(invalid("ledger.path must not be empty"));
        }
        if self
            .telemetry
            .otlp_endpoint
            .as_deref()
            .is_some_and(|e| e.trim().is_empty())
        {
            return Err(invalid("telemetry.otlp_endpoint must not be blank when set"));
        }
        Ok(())
    }

    /// The clock zone as a [`Tz`].
    pub fn reference_zone(&self) -> Result<Tz, QimenError> {
        parse_time_zone(&self.clock.timezone)
            .map_err(|e| invalid(format!("clock.timezone: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qimen::Points;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(
            config.reference_zone().unwrap(),
            chrono_tz::America::Los_Angeles
        );
        assert_eq!(config.readings.cost, Points::new(0));
        assert_eq!(config.readings.max_retry_delay_ms, 30_000);
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
    }

    #[test]
    fn sections_override_defaults() {
        let config = CliConfig::parse(
            r#"
            [clock]
            timezone = "Asia/Shanghai"

            [ledger]
            path = "/tmp/ledger.json"
            initial_points = 50

            [readings]
            cost = 3
            max_retry_delay_ms = 5000
            include_deities = true

            [llm]
            model = "gpt-4o-mini"

            [telemetry]
            json_logs = true
            otlp_endpoint = "http://localhost:4317"
            "#,
        )
        .unwrap();

        assert_eq!(config.reference_zone().unwrap(), chrono_tz::Asia::Shanghai);
        assert_eq!(config.ledger.initial_points, Points::new(50));
        assert_eq!(config.ledger.daily_sign_in_points, Points::new(5));
        assert_eq!(config.readings.cost, Points::new(3));
        assert_eq!(config.readings.max_attempts, 2);
        assert_eq!(config.readings.max_retry_delay_ms, 5000);
        assert!(config.readings.include_deities);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.max_tokens, 512);
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for raw in [
            "[clock]\ntimezone = \"Pacific\"",
            "[clock]\ntimezone = \"-08:00\"",
            "[clock]\nutc_offset = \"-08:00\"",
            "[readings]\nmax_attempts = 0",
            "[readings]\nmax_retry_delay_ms = 0",
            "[llm]\nmodel = \" \"",
            "[llm]\ntemperature = 3.5",
            "[telemetry]\notlp_endpoint = \"\"",
            "[unknown]\nkey = 1",
            "not toml at all [",
        ] {
            assert!(
                matches!(
                    CliConfig::parse(raw),
                    Err(QimenError::ConfigurationError { .. })
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn load_reports_the_file_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[readings]\nmax_attempts = 0\n").unwrap();
        let message = CliConfig::load(&path).unwrap_err().to_string();
        assert!(message.contains("config.toml"), "{message}");
        assert!(message.contains("max_attempts"), "{message}");
    }
}
